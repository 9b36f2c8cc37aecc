//! Reading compilation units from disk

use super::prelude::*;
use std::path::Path;
use tracing::trace;

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF8_BOM: &str = "\u{feff}";

/// Reads a file as text, errors carrying the path
pub fn read_source(path: &Path) -> PascalCResult<String> {
    let bytes = std::fs::read(path).map_err(|e| PascalCError::new(e, Some(path.to_path_buf())))?;
    decode(&bytes).map_err(|e| e.with_path(path))
}

/// Decodes UTF-16LE when the text starts with its byte order mark, UTF-8 otherwise
pub fn decode(bytes: &[u8]) -> PascalCResult<String> {
    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        trace!("decoding {} bytes as UTF-16LE", rest.len());
        let chunks = rest.chunks_exact(2);
        if !chunks.remainder().is_empty() {
            return Err(PascalCErrorKind::InvalidEncoding("UTF-16LE").into());
        }
        let units = chunks
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<_>>();
        String::from_utf16(&units).map_err(|_| PascalCErrorKind::InvalidEncoding("UTF-16LE").into())
    } else {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| PascalCError::from(PascalCErrorKind::InvalidEncoding("UTF-8")))?;
        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
    }
}
