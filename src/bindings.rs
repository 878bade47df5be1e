use std::rc::Rc;
use std::sync::Once;

use wasm_bindgen::prelude::*;

use crate::config::Options;
use crate::dom::WebDocument;
use crate::error::ZoomError;
use crate::widget::ZoomWidget;

static LOGGER: Once = Once::new();

/// Routes `log` output to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::default()));
}

fn parse_options(options: JsValue) -> Result<Options, ZoomError> {
    if options.is_undefined() || options.is_null() {
        return Ok(Options::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| ZoomError::Options(e.to_string()))
}

/// `new LightZoom({ selector, lockScroll, ... })` from JS. The widget keeps
/// working after this object is freed; call `removeEvents()` to stop it.
#[wasm_bindgen(js_name = LightZoom)]
pub struct LightZoom {
    widget: ZoomWidget<WebDocument>,
}

#[wasm_bindgen(js_class = LightZoom)]
impl LightZoom {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<LightZoom, JsValue> {
        let options = parse_options(options)?;
        let doc = Rc::new(WebDocument::new()?);
        let widget = ZoomWidget::new(doc, options.resolve())?;
        Ok(LightZoom { widget })
    }

    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self) {
        self.widget.close_modal();
    }

    #[wasm_bindgen(js_name = removeEvents)]
    pub fn remove_events(&self) {
        self.widget.remove_events();
    }

    #[wasm_bindgen(getter)]
    pub fn diagnostic(&self) -> Option<String> {
        self.widget.diagnostic().map(|err| err.to_string())
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.widget.is_open()
    }
}
