use wasm_bindgen::JsValue;

/// Texture download or decode failure. Never fatal: the globe falls back
/// to a plain sphere.
#[derive(Debug)]
pub enum AssetError {
    Fetch(String),
    Status(u16),
    Decode(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Fetch(msg) => write!(f, "texture request failed: {msg}"),
            AssetError::Status(code) => write!(f, "texture request returned HTTP {code}"),
            AssetError::Decode(msg) => write!(f, "texture could not be decoded: {msg}"),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<gloo_net::Error> for AssetError {
    fn from(err: gloo_net::Error) -> Self {
        AssetError::Fetch(err.to_string())
    }
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        AssetError::Decode(err.to_string())
    }
}

#[derive(Debug)]
pub enum ViewerError {
    MissingElement(&'static str),
    Dom(String),
    Gpu(String),
    Config(serde_json::Error),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::MissingElement(id) => write!(f, "element #{id} not found"),
            ViewerError::Dom(msg) => write!(f, "DOM error: {msg}"),
            ViewerError::Gpu(msg) => write!(f, "graphics initialization failed: {msg}"),
            ViewerError::Config(err) => write!(f, "invalid page configuration: {err}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::Config(err)
    }
}

impl From<JsValue> for ViewerError {
    fn from(value: JsValue) -> Self {
        ViewerError::Dom(js_error_string(&value))
    }
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub fn js_error_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
