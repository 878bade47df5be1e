use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ZoomError {
    #[error("invalid options: {0}")]
    Options(String),

    /// At least one matched image has a missing or blank `src`.
    #[error("lightzoom: every image matched by `{criterion}` needs a non-empty src attribute")]
    InvalidTargets { criterion: String },

    #[error("lightzoom: cannot query `{criterion}`: {reason}")]
    Query { criterion: String, reason: String },

    #[error("dom error: {0}")]
    Dom(String),
}

impl ZoomError {
    pub fn dom(err: JsValue) -> Self {
        ZoomError::Dom(format!("{:?}", err))
    }
}

impl From<ZoomError> for JsValue {
    fn from(err: ZoomError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
