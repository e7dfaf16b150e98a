use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no browser window available")]
    NoWindow,

    #[error("no document attached to the window")]
    NoDocument,

    #[error("document has no <{0}> element")]
    MissingElement(&'static str),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SiteError::Js(message)
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
