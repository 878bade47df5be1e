//! The document boundary.
//!
//! `ZoomWidget` never touches `web_sys` directly; everything it does to the
//! page goes through [`Document`]. The browser implementation lives in
//! [`web`], and tests run against an in-memory document.

pub mod web;

#[cfg(test)]
pub mod mock;

use crate::error::ZoomError;

pub use web::WebDocument;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
        }
    }
}

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq)]
pub enum ListenTarget<E> {
    Element(E),
    /// The page itself, used for keyboard handling.
    Page,
}

/// The parts of a browser event the widget cares about.
#[derive(Clone, Debug, PartialEq)]
pub enum DomEvent<E> {
    Click { target: Option<E> },
    Key { key: String },
}

pub type Handler<E> = Box<dyn FnMut(DomEvent<E>)>;

pub trait Document {
    type Element: Clone + PartialEq + 'static;
    type Listener;

    fn create_element(&self, tag: &str) -> Result<Self::Element, ZoomError>;
    fn body(&self) -> Result<Self::Element, ZoomError>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), ZoomError>;

    /// Every element matching `selector`, in document order, at call time.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, ZoomError>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<(), ZoomError>;
    fn set_text(&self, element: &Self::Element, text: &str);

    fn contains_class(&self, element: &Self::Element, class: &str) -> bool;
    fn add_class(&self, element: &Self::Element, class: &str) -> Result<(), ZoomError>;
    fn remove_class(&self, element: &Self::Element, class: &str) -> Result<(), ZoomError>;
    fn set_background(&self, element: &Self::Element, css: &str) -> Result<(), ZoomError>;

    fn listen(
        &self,
        target: ListenTarget<Self::Element>,
        kind: EventKind,
        handler: Handler<Self::Element>,
    ) -> Result<Self::Listener, ZoomError>;

    fn unlisten(&self, listener: Self::Listener);
}
