//! PDF text sources: `lopdf` for flowing text, poppler's `pdftotext -layout`
//! for column-aligned text.

use lopdf::Document;
use statex_core::{DecryptionError, ExtractError};
use std::io::Write;
use std::process::Command;

use crate::source::{TextLayout, TextSource, effective_password};

/// Load the document and unlock it, mapping failures to typed errors.
///
/// Statements protected by an empty user password open without one.
fn open_document(bytes: &[u8], password: Option<&str>) -> Result<Document, ExtractError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| ExtractError::Unreadable(e.to_string()))?;
    if !doc.is_encrypted() {
        return Ok(doc);
    }

    match effective_password(password) {
        Some(pw) => {
            doc.decrypt(pw).map_err(|_| DecryptionError::WrongPassword)?;
        }
        None => {
            doc.decrypt("").map_err(|_| DecryptionError::NoPasswordGiven)?;
        }
    }
    Ok(doc)
}

/// Flowing text straight from the content streams
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfSource;

impl TextSource for LopdfSource {
    fn extract(&self, bytes: &[u8], password: Option<&str>) -> Result<String, ExtractError> {
        let doc = open_document(bytes, password)?;

        let mut text = String::new();
        for page_no in doc.get_pages().keys() {
            let page = doc
                .extract_text(&[*page_no])
                .map_err(|e| ExtractError::Unreadable(format!("page {page_no}: {e}")))?;
            text.push_str(&page);
            text.push('\n');
        }
        Ok(text)
    }

    fn layout(&self) -> TextLayout {
        TextLayout::Flowing
    }

    fn name(&self) -> &'static str {
        "lopdf"
    }
}

/// Column-aligned text via an external `pdftotext -layout`
#[derive(Debug, Clone)]
pub struct PdftotextSource {
    command: String,
}

impl Default for PdftotextSource {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl PdftotextSource {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    /// True when the command can be executed
    pub fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("-v")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl TextSource for PdftotextSource {
    fn extract(&self, bytes: &[u8], password: Option<&str>) -> Result<String, ExtractError> {
        // Decide encryption failures up front so they stay typed.
        open_document(bytes, password)?;

        let mut file = tempfile::Builder::new()
            .prefix("statex-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| ExtractError::Tool(format!("create temp file: {e}")))?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| ExtractError::Tool(format!("write temp file: {e}")))?;

        let mut cmd = Command::new(&self.command);
        cmd.args(["-layout", "-enc", "UTF-8"]);
        if let Some(pw) = effective_password(password) {
            cmd.args(["-upw", pw]);
        }
        cmd.arg(file.path()).arg("-");

        let output = cmd
            .output()
            .map_err(|e| ExtractError::Tool(format!("running {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(tool_failure(&self.command, &output.status.to_string(), &stderr));
        }

        // pdftotext separates pages with form feeds
        Ok(String::from_utf8_lossy(&output.stdout).replace('\u{c}', "\n"))
    }

    fn layout(&self) -> TextLayout {
        TextLayout::FixedColumns
    }

    fn name(&self) -> &'static str {
        "pdftotext"
    }
}

/// Map a failed `pdftotext` run to an error; poppler reports bad passwords on stderr.
fn tool_failure(command: &str, status: &str, stderr: &str) -> ExtractError {
    if stderr.contains("Incorrect password") {
        return DecryptionError::WrongPassword.into();
    }
    ExtractError::Tool(format!("{command} exited with {status}: {}", stderr.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let err = LopdfSource.extract(b"definitely not a pdf", None).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));

        let err = PdftotextSource::default().extract(b"nope", Some("pw")).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }

    #[test]
    fn test_tool_failure_mapping() {
        let err = tool_failure("pdftotext", "exit status: 1", "Command Line Error: Incorrect password\n");
        assert_eq!(err, ExtractError::Decryption(DecryptionError::WrongPassword));

        let err = tool_failure("pdftotext", "exit status: 1", "Syntax Error: Couldn't find trailer dictionary\n");
        assert_eq!(
            err,
            ExtractError::Tool(
                "pdftotext exited with exit status: 1: Syntax Error: Couldn't find trailer dictionary".to_string()
            )
        );
    }

    #[test]
    fn test_missing_tool_is_not_available() {
        assert!(!PdftotextSource::new("statex-no-such-binary").is_available());
    }

    #[test]
    fn test_layout_capabilities() {
        assert_eq!(LopdfSource.layout(), TextLayout::Flowing);
        assert_eq!(PdftotextSource::default().layout(), TextLayout::FixedColumns);
    }
}
