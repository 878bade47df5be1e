use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, KeyboardEvent};

use super::{Document, DomEvent, EventKind, Handler, ListenTarget};
use crate::error::ZoomError;

/// The live browser document.
#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

/// A registered listener. Dropping it without `unlisten` leaves the JS side
/// pointing at a freed closure, so the widget always hands it back.
pub struct WebListener {
    target: EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl WebDocument {
    pub fn new() -> Result<Self, ZoomError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(|document| Self { document })
            .ok_or_else(|| ZoomError::Dom("no window.document available".to_string()))
    }
}

fn to_dom_event(kind: EventKind, event: &web_sys::Event) -> Option<DomEvent<Element>> {
    match kind {
        EventKind::Click => Some(DomEvent::Click {
            target: event.target().and_then(|t| t.dyn_into::<Element>().ok()),
        }),
        EventKind::KeyDown => event
            .dyn_ref::<KeyboardEvent>()
            .map(|ev| DomEvent::Key { key: ev.key() }),
    }
}

impl Document for WebDocument {
    type Element = Element;
    type Listener = WebListener;

    fn create_element(&self, tag: &str) -> Result<Element, ZoomError> {
        self.document.create_element(tag).map_err(ZoomError::dom)
    }

    fn body(&self) -> Result<Element, ZoomError> {
        self.document
            .body()
            .map(Element::from)
            .ok_or_else(|| ZoomError::Dom("document has no body".to_string()))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), ZoomError> {
        parent.append_child(child).map(|_| ()).map_err(ZoomError::dom)
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, ZoomError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(ZoomError::dom)?;

        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), ZoomError> {
        element.set_attribute(name, value).map_err(ZoomError::dom)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn contains_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) -> Result<(), ZoomError> {
        element.class_list().add_1(class).map_err(ZoomError::dom)
    }

    fn remove_class(&self, element: &Element, class: &str) -> Result<(), ZoomError> {
        element.class_list().remove_1(class).map_err(ZoomError::dom)
    }

    fn set_background(&self, element: &Element, css: &str) -> Result<(), ZoomError> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| ZoomError::Dom("overlay is not an HTML element".to_string()))?;
        html.style()
            .set_property("background", css)
            .map_err(ZoomError::dom)
    }

    fn listen(
        &self,
        target: ListenTarget<Element>,
        kind: EventKind,
        mut handler: Handler<Element>,
    ) -> Result<WebListener, ZoomError> {
        let target: EventTarget = match target {
            ListenTarget::Element(el) => el.into(),
            ListenTarget::Page => self.document.clone().into(),
        };

        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Some(dom_event) = to_dom_event(kind, &event) {
                handler(dom_event);
            }
        });

        target
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .map_err(ZoomError::dom)?;

        Ok(WebListener { target, kind, closure })
    }

    fn unlisten(&self, listener: WebListener) {
        let _ = listener.target.remove_event_listener_with_callback(
            listener.kind.as_str(),
            listener.closure.as_ref().unchecked_ref(),
        );
    }
}
