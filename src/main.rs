use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use lightzoom::{init_logging, Options, WebDocument, ZoomWidget};

// The demo widget lives for the whole page.
thread_local! {
    static WIDGET: RefCell<Option<ZoomWidget<WebDocument>>> = const { RefCell::new(None) };
}

const PHOTOS: &[(&str, &str)] = &[
    ("https://picsum.photos/id/10/1200/800", "Forest"),
    ("https://picsum.photos/id/29/1200/800", "Mountains"),
    ("https://picsum.photos/id/42/1200/800", "Cafe"),
    ("https://picsum.photos/id/57/1200/800", "Street"),
];

const DEMO_CSS: &str = "\
body { margin: 0; background: #020202; color: #ccffdd; \
       font-family: 'JetBrains Mono', 'Fira Code', Consolas, monospace; }
.gallery { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); \
           gap: 16px; padding: 24px; }
.gallery img { width: 100%; border: 1px solid #44dd66; }
.lightzoom-pointer { cursor: pointer; }
.lightzoom-no-scroll { overflow: hidden; }
.lightzoom-modal { display: none; position: fixed; inset: 0; z-index: 1000; \
                   background: rgba(0, 0, 0, 0.9); }
.lightzoom-modal--active { display: block; }
.lightzoom-modal__close { position: absolute; top: 12px; right: 20px; font-size: 32px; \
                          cursor: pointer; z-index: 1; }
.lightzoom-modal__wrapper { width: 100%; height: 100%; display: flex; \
                            align-items: center; justify-content: center; }
.lightzoom-modal__image { max-width: 90vw; max-height: 90vh; object-fit: contain; }
";

#[component]
fn App() -> impl IntoView {
    let (listening, set_listening) = signal(false);

    Effect::new(move || {
        let options = Options {
            selector: Some("img.zoom".to_string()),
            lock_scroll: true,
            pointer_cursor: true,
            close_on_outside_click: true,
            background_color: Some("#020202".to_string()),
            opacity: Some(90.0),
            ..Default::default()
        };

        match WebDocument::new().and_then(|doc| ZoomWidget::new(Rc::new(doc), options.resolve())) {
            Ok(widget) => {
                set_listening.set(widget.is_listening());
                WIDGET.with(|w| *w.borrow_mut() = Some(widget));
            }
            Err(err) => log::error!("{}", err),
        }
    });

    let on_remove = move |_: web_sys::MouseEvent| {
        WIDGET.with(|w| {
            if let Some(widget) = w.borrow().as_ref() {
                widget.remove_events();
            }
        });
        set_listening.set(false);
    };

    view! {
        <style>{DEMO_CSS}</style>
        <main class="gallery">
            {PHOTOS
                .iter()
                .map(|(src, alt)| view! { <img class="zoom" src=*src alt=*alt /> })
                .collect_view()}
        </main>
        <footer style="padding: 0 24px 24px; display: flex; gap: 16px; align-items: center;">
            <span>{move || if listening.get() { "[listening]" } else { "[inert]" }}</span>
            <button
                style="background: transparent; color: #66cc88; border: 1px solid #66cc88; \
                       padding: 8px 16px; cursor: pointer; font-family: inherit;"
                on:click=on_remove
            >
                "Remove events"
            </button>
        </footer>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    leptos::mount::mount_to_body(App);
}
