/// Error types for Blurbinator
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure loading a single blurb file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for {path} failed: {reason}")]
    Fetch { path: String, reason: String },

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("{path} is not a valid blurb file: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A navigation request that does not apply to the current view
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    #[error("no blurbs are loaded")]
    NothingLoaded,

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown blurb: {0}")]
    UnknownBlurb(String),

    #[error("blurb {title} has no {language} translation")]
    UnknownLanguage { title: String, language: String },

    #[error("blurb {0} has no translations")]
    NoTranslations(String),

    #[error("no category is open")]
    NoCategoryOpen,

    #[error("no blurb is open")]
    NoBlurbOpen,
}

/// Failure talking to the browser
#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,

    #[error("no document body")]
    NoBody,

    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(format!("{:?}", value))
    }
}
