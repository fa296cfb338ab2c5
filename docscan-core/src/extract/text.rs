use super::ExtractionResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Longest UTF-8 encoding of one character
const MAX_UTF8_BYTES: usize = 4;

/// Read a plain text file, replacing invalid UTF-8 and truncating to
/// `max_chars`. At most `max_chars * 4` bytes are read from disk. Read
/// failures are reported in the text with one page.
pub(crate) fn extract_plain_text(path: &Path, max_chars: usize) -> ExtractionResult {
    let text = match read_prefix(path, max_chars.saturating_mul(MAX_UTF8_BYTES)) {
        Ok(bytes) => {
            let decoded = String::from_utf8_lossy(&bytes);
            match decoded.char_indices().nth(max_chars) {
                Some((cut, _)) => decoded[..cut].to_string(),
                None => decoded.into_owned(),
            }
        }
        Err(e) => {
            tracing::warn!("Failed to read text file {}: {}", path.display(), e);
            format!("Unable to read file: {}", e)
        }
    };

    ExtractionResult {
        text,
        page_count: 1,
        contains_images: false,
        tables_count: 0,
    }
}

fn read_prefix(path: &Path, max_bytes: usize) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    File::open(path)?
        .take(max_bytes as u64)
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}
