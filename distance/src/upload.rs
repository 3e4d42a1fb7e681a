use crate::{
    error::ValidationError,
    parser::{BYTE_ORDER_MARK, DEFAULT_MAX_BYTES},
};

/// What the upload boundary accepts before any bytes reach the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub accepted_extensions: Vec<String>,
    pub accepted_mime_types: Vec<String>,
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_extensions: vec![".txt".to_string()],
            accepted_mime_types: vec!["text/plain".to_string()],
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn accepts_name(&self, file_name: &str) -> bool {
        let file_name = file_name.to_ascii_lowercase();
        self.accepted_extensions.iter().any(|ext| {
            file_name.ends_with(&ext.to_ascii_lowercase()) && file_name.len() > ext.len()
        })
    }

    fn accepts_mime(&self, mime: &str) -> bool {
        // "text/plain; charset=utf-8" and the like
        let essence = mime.split(';').next().unwrap_or_default().trim();
        self.accepted_mime_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(essence))
    }

    #[tracing::instrument(skip(self))]
    pub fn check(
        &self,
        file_name: &str,
        mime: Option<&str>,
        size: usize,
    ) -> Result<(), ValidationError> {
        if !self.accepts_name(file_name) || mime.is_some_and(|mime| !self.accepts_mime(mime)) {
            return Err(ValidationError::UnsupportedType {
                name: file_name.to_string(),
            });
        }
        if size > self.max_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Uploaded bytes must be UTF-8 text. A leading byte order mark is dropped.
pub fn decode(bytes: &[u8]) -> Result<&str, ValidationError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| ValidationError::InvalidFormat(format!("file is not UTF-8 text: {err}")))?;
    Ok(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text))
}
