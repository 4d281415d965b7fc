use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The input is not a readable zip container.
    Container(String),
    /// A required package entry is missing.
    NotFound(String),
    ManifestParse(roxmltree::Error),
    AssetDecode {
        name: String,
        source: image::ImageError,
    },
    /// No row in the sheet looks like the assignment header.
    HeaderNotFound(String),
    Workbook(String),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Container(msg) => write!(f, "Invalid container: {msg}"),
            Error::NotFound(name) => write!(f, "Missing package entry: {name}"),
            Error::ManifestParse(e) => write!(f, "Malformed relationship manifest: {e}"),
            Error::AssetDecode { name, source } => {
                write!(f, "Cannot decode image asset {name}: {source}")
            }
            Error::HeaderNotFound(msg) => write!(f, "Header row not found: {msg}"),
            Error::Workbook(msg) => write!(f, "Workbook error: {msg}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::ManifestParse(e) => Some(e),
            Error::AssetDecode { source, .. } => Some(source),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ManifestParse(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => Error::Io(io),
            other => Error::Container(other.to_string()),
        }
    }
}

impl From<calamine::Error> for Error {
    fn from(e: calamine::Error) -> Self {
        Error::Workbook(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
