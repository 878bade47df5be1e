use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::config::{Config, Selector};
use crate::dom::{Document, DomEvent, EventKind, Handler, ListenTarget};
use crate::error::ZoomError;

pub const CONTAINER_CLASS: &str = "lightzoom-modal";
pub const CLOSE_CLASS: &str = "lightzoom-modal__close";
pub const WRAPPER_CLASS: &str = "lightzoom-modal__wrapper";
pub const IMAGE_CLASS: &str = "lightzoom-modal__image";
pub const ACTIVE_CLASS: &str = "lightzoom-modal--active";
pub const POINTER_CLASS: &str = "lightzoom-pointer";
pub const NO_SCROLL_CLASS: &str = "lightzoom-no-scroll";
pub const INSTANCE_ATTR: &str = "data-lightzoom-id";

const CLOSE_LABEL: &str = "\u{00d7}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

struct Modal<E> {
    container: E,
    close: E,
    wrapper: E,
    image: E,
}

struct Listeners<L> {
    images: Vec<L>,
    close: Option<L>,
    wrapper: Option<L>,
    keyboard: Option<L>,
}

impl<L> Default for Listeners<L> {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            close: None,
            wrapper: None,
            keyboard: None,
        }
    }
}

struct Inner<D: Document> {
    doc: Rc<D>,
    config: Config,
    body: D::Element,
    modal: Modal<D::Element>,
    state: ModalState,
    listeners: Listeners<D::Listener>,
    listening: bool,
    diagnostic: Option<ZoomError>,
}

// Listener handlers hold the state strongly. The cycle through the
// registered listeners is what keeps a widget alive after its handle is
// gone, and `remove_events` is what breaks it.
type Shared<D> = Rc<RefCell<Inner<D>>>;

/// An image zoom overlay bound to a fixed set of images.
///
/// The target images are looked up once, when the widget is built. Images
/// added to the page afterwards are not picked up. Dropping the handle does
/// not detach anything; only [`ZoomWidget::remove_events`] does.
pub struct ZoomWidget<D: Document + 'static> {
    inner: Shared<D>,
}

pub fn is_close_key(key: &str) -> bool {
    matches!(key, "Escape" | "Enter")
}

/// Resolves the target images and checks that each one has a usable `src`.
/// A missing attribute counts as blank. Modal images of other widgets are
/// never targets.
pub fn find_targets<D: Document>(doc: &D, selector: &Selector) -> Result<Vec<D::Element>, ZoomError> {
    let criterion = selector.describe();
    let targets: Vec<D::Element> = doc
        .query_all(&selector.to_query())
        .map_err(|err| ZoomError::Query {
            criterion: criterion.clone(),
            reason: err.to_string(),
        })?
        .into_iter()
        .filter(|el| !doc.contains_class(el, IMAGE_CLASS))
        .collect();

    let all_valid = targets.iter().all(|img| {
        doc.attribute(img, "src")
            .is_some_and(|src| !src.trim().is_empty())
    });

    if all_valid {
        Ok(targets)
    } else {
        Err(ZoomError::InvalidTargets { criterion })
    }
}

fn build_modal<D: Document>(doc: &D, body: &D::Element, config: &Config) -> Result<Modal<D::Element>, ZoomError> {
    let container = doc.create_element("div")?;
    doc.add_class(&container, CONTAINER_CLASS)?;
    doc.set_attribute(&container, INSTANCE_ATTR, &Uuid::new_v4().to_string())?;

    let close = doc.create_element("span")?;
    doc.add_class(&close, CLOSE_CLASS)?;
    doc.set_text(&close, CLOSE_LABEL);

    let wrapper = doc.create_element("div")?;
    doc.add_class(&wrapper, WRAPPER_CLASS)?;

    let image = doc.create_element("img")?;
    doc.add_class(&image, IMAGE_CLASS)?;

    doc.append_child(&wrapper, &image)?;
    doc.append_child(&container, &close)?;
    doc.append_child(&container, &wrapper)?;
    doc.append_child(body, &container)?;

    if let Some(background) = &config.background {
        doc.set_background(&container, background)?;
    }

    Ok(Modal {
        container,
        close,
        wrapper,
        image,
    })
}

impl<D: Document + 'static> Inner<D> {
    fn open(this: &Shared<D>, image: &D::Element) -> Result<(), ZoomError> {
        let mut inner = this.borrow_mut();
        if !inner.listening {
            return Ok(());
        }

        let src = inner.doc.attribute(image, "src").unwrap_or_default();
        inner.doc.set_attribute(&inner.modal.image, "src", &src)?;

        if inner.state == ModalState::Open {
            return Ok(());
        }

        inner.doc.add_class(&inner.modal.container, ACTIVE_CLASS)?;
        inner.state = ModalState::Open;
        if inner.config.lock_scroll {
            inner.doc.add_class(&inner.body, NO_SCROLL_CLASS)?;
        }

        let keyboard = inner
            .doc
            .listen(ListenTarget::Page, EventKind::KeyDown, on_key(this.clone()))?;
        inner.listeners.keyboard = Some(keyboard);

        log::debug!("lightzoom: opened {}", src);
        Ok(())
    }
}

impl<D: Document> Inner<D> {
    fn close(&mut self) -> Result<(), ZoomError> {
        self.doc.remove_class(&self.modal.container, ACTIVE_CLASS)?;
        self.state = ModalState::Closed;

        if let Some(keyboard) = self.listeners.keyboard.take() {
            self.doc.unlisten(keyboard);
        }
        if self.config.lock_scroll {
            self.doc.remove_class(&self.body, NO_SCROLL_CLASS)?;
        }
        Ok(())
    }

    fn remove_events(&mut self) {
        self.listening = false;

        let listeners = std::mem::take(&mut self.listeners);
        let all = listeners
            .images
            .into_iter()
            .chain(listeners.close)
            .chain(listeners.wrapper)
            .chain(listeners.keyboard);
        for listener in all {
            self.doc.unlisten(listener);
        }
    }
}

fn close_shared<D: Document>(inner: &Shared<D>) {
    if let Err(err) = inner.borrow_mut().close() {
        log::error!("lightzoom: failed to close modal: {}", err);
    }
}

fn on_image_click<D: Document + 'static>(inner: Shared<D>, image: D::Element) -> Handler<D::Element> {
    Box::new(move |_| {
        if let Err(err) = Inner::open(&inner, &image) {
            log::error!("lightzoom: failed to open modal: {}", err);
        }
    })
}

fn on_close_click<D: Document + 'static>(inner: Shared<D>) -> Handler<D::Element> {
    Box::new(move |_| close_shared(&inner))
}

fn on_wrapper_click<D: Document + 'static>(inner: Shared<D>, image: D::Element) -> Handler<D::Element> {
    Box::new(move |event| {
        if let DomEvent::Click { target } = event {
            // Clicks on the displayed image itself keep the modal open.
            if target.as_ref() != Some(&image) {
                close_shared(&inner);
            }
        }
    })
}

fn on_key<D: Document + 'static>(inner: Shared<D>) -> Handler<D::Element> {
    Box::new(move |event| {
        if let DomEvent::Key { key } = event {
            if is_close_key(&key) {
                close_shared(&inner);
            }
        }
    })
}

impl<D: Document + 'static> ZoomWidget<D> {
    /// Injects the modal markup and, if every target image is valid, wires
    /// the listeners. Invalid targets are logged, kept as the widget's
    /// [`diagnostic`](Self::diagnostic), and leave it inert; only a failure
    /// to build the markup itself is returned as an error.
    pub fn new(doc: Rc<D>, config: Config) -> Result<Self, ZoomError> {
        let targets = find_targets(&*doc, &config.selector);

        let body = doc.body()?;
        let modal = build_modal(&*doc, &body, &config)?;

        let widget = Self {
            inner: Rc::new(RefCell::new(Inner {
                doc,
                config,
                body,
                modal,
                state: ModalState::Closed,
                listeners: Listeners::default(),
                listening: false,
                diagnostic: None,
            })),
        };

        match targets {
            Ok(targets) => {
                if let Err(err) = widget.attach(targets) {
                    log::error!("lightzoom: failed to attach listeners: {}", err);
                    widget.remove_events();
                    widget.inner.borrow_mut().diagnostic = Some(err);
                }
            }
            Err(err) => {
                log::error!("{}", err);
                widget.inner.borrow_mut().diagnostic = Some(err);
            }
        }

        Ok(widget)
    }

    fn attach(&self, targets: Vec<D::Element>) -> Result<(), ZoomError> {
        let shared = self.inner.clone();
        let mut inner = self.inner.borrow_mut();
        let doc = inner.doc.clone();
        inner.listening = true;

        for target in targets {
            let listener = doc.listen(
                ListenTarget::Element(target.clone()),
                EventKind::Click,
                on_image_click(shared.clone(), target.clone()),
            )?;
            inner.listeners.images.push(listener);
            if inner.config.pointer_cursor {
                doc.add_class(&target, POINTER_CLASS)?;
            }
        }

        let close = doc.listen(
            ListenTarget::Element(inner.modal.close.clone()),
            EventKind::Click,
            on_close_click(shared.clone()),
        )?;
        inner.listeners.close = Some(close);

        if inner.config.close_on_outside_click {
            let wrapper = doc.listen(
                ListenTarget::Element(inner.modal.wrapper.clone()),
                EventKind::Click,
                on_wrapper_click(shared, inner.modal.image.clone()),
            )?;
            inner.listeners.wrapper = Some(wrapper);
        }

        log::debug!(
            "lightzoom: watching {} image(s) for {}",
            inner.listeners.images.len(),
            inner.config.selector.describe()
        );
        Ok(())
    }

    /// Closes the modal. Calling it while closed does nothing.
    pub fn close_modal(&self) {
        if let Err(err) = self.inner.borrow_mut().close() {
            log::error!("lightzoom: failed to close modal: {}", err);
        }
    }

    /// Detaches every listener for good. The markup stays in the page.
    pub fn remove_events(&self) {
        self.inner.borrow_mut().remove_events();
        log::debug!("lightzoom: listeners removed");
    }

    pub fn state(&self) -> ModalState {
        self.inner.borrow().state
    }

    pub fn is_open(&self) -> bool {
        self.state() == ModalState::Open
    }

    /// False when construction found invalid targets or after `remove_events`.
    pub fn is_listening(&self) -> bool {
        self.inner.borrow().listening
    }

    /// Why construction left the widget inert, if it did.
    pub fn diagnostic(&self) -> Option<ZoomError> {
        self.inner.borrow().diagnostic.clone()
    }

    pub fn container(&self) -> D::Element {
        self.inner.borrow().modal.container.clone()
    }

    pub fn modal_image(&self) -> D::Element {
        self.inner.borrow().modal.image.clone()
    }
}
