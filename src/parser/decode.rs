use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::bytes::Regex;

use crate::error::PageError;

/// Above this share of replacement/NUL chars the bytes are treated as binary.
const MAX_GARBAGE_RATIO: f64 = 0.1;

/// Browsers only look for the charset declaration near the top of the page.
const SNIFF_LEN: usize = 1024;

static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?([a-z0-9_.:-]+)"#).unwrap());

/// Bytes to text. Strict UTF-8 first, then the `<meta charset>` encoding,
/// then windows-1252.
pub fn decode_page(bytes: &[u8]) -> Result<Cow<'_, str>, PageError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(PageError::Undecodable);
    }

    let text = match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let encoding = declared_encoding(bytes).unwrap_or(WINDOWS_1252);
            encoding.decode_without_bom_handling(bytes).0
        }
    };

    let total = text.chars().count();
    let garbage = text
        .chars()
        .filter(|c| *c == char::REPLACEMENT_CHARACTER || *c == '\0')
        .count();

    if garbage as f64 > total as f64 * MAX_GARBAGE_RATIO {
        return Err(PageError::Undecodable);
    }
    Ok(text)
}

/// Single-byte family encoding declared by the page. A UTF-8 declaration is
/// ignored here since the bytes already failed strict UTF-8.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes()).filter(|e| *e != UTF_8 && e.is_ascii_compatible())
}
