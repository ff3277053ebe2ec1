use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

/// Leading bytes of a ZIP container, which is what a raw .docx file is.
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Read a plain-text question or answer file.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.starts_with(ZIP_SIGNATURE) {
        return Err(LoadError::BinaryDocument {
            path: path.to_path_buf(),
        });
    }

    let size = bytes.len();
    let mut text = String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    if text.starts_with(BYTE_ORDER_MARK) {
        text.replace_range(..BYTE_ORDER_MARK.len_utf8(), "");
    }

    if text.trim().is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), bytes = size, "loaded text");
    Ok(text)
}

/// Like [`load_text`], but a missing path yields an empty string.
pub fn load_optional_text<P: AsRef<Path>>(path: Option<P>) -> Result<String, LoadError> {
    match path {
        Some(path) => load_text(path),
        None => Ok(String::new()),
    }
}
