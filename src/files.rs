//! Text extraction from uploaded files.
//!
//! Uploads are processed entirely in memory; nothing touches disk.

use crate::error::FileError;

/// Extensions the upload route accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt"];

/// File extension, lowercased.
fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Whether an uploaded filename has an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Extract text content from an uploaded file's bytes.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, FileError> {
    match extension(filename).as_deref() {
        Some("txt") => {
            let text =
                String::from_utf8(bytes.to_vec()).map_err(|e| FileError::ExtractionFailed {
                    filename: filename.to_string(),
                    reason: format!("not valid UTF-8: {e}"),
                })?;
            Ok(text.trim().to_string())
        }
        _ => Err(FileError::ExtensionNotAllowed(filename.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_files_allowed() {
        assert!(allowed_file("emails.txt"));
        assert!(allowed_file("EMAILS.TXT"));
    }

    #[test]
    fn other_extensions_rejected() {
        assert!(!allowed_file("emails.pdf"));
        assert!(!allowed_file("run.exe"));
        assert!(!allowed_file("no_extension"));
    }

    #[test]
    fn extracts_trimmed_utf8_text() {
        let text = extract_text("emails.txt", "  Olá, preciso de suporte\n".as_bytes()).unwrap();
        assert_eq!(text, "Olá, preciso de suporte");
    }

    #[test]
    fn invalid_utf8_fails_extraction() {
        let result = extract_text("emails.txt", &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(FileError::ExtractionFailed { .. })));
    }

    #[test]
    fn disallowed_extension_fails_extraction() {
        let result = extract_text("emails.pdf", b"%PDF-1.4");
        assert!(matches!(result, Err(FileError::ExtensionNotAllowed(_))));
    }
}
