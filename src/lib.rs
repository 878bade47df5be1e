//! LightZoom: click an image, see it in a full-screen overlay.

pub mod bindings;
pub mod color;
pub mod config;
pub mod dom;
pub mod error;
pub mod widget;

pub use bindings::{init_logging, LightZoom};
pub use config::{Config, Options, Selector};
pub use dom::{Document, WebDocument};
pub use error::ZoomError;
pub use widget::{ModalState, ZoomWidget};
