//! crates/lexinary_core/src/validation.rs
//!
//! Input checks that run before any mock computation. A failed check leaves the
//! session untouched.

use crate::domain::DocumentType;

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_CONTRACT_WORDS: usize = 5000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File too large. Max size: {max_mib}MB.")]
    FileTooLarge { size: usize, max_mib: usize },
    #[error("Unsupported file type '{0}'. Upload a PDF or Word (.docx) transcript.")]
    UnsupportedFileType(String),
    #[error("Contract text is empty.")]
    EmptyContract,
    #[error("Contract text too long. Max {max} words.")]
    ContractTooLong { words: usize, max: usize },
}

/// Checks an uploaded transcript's size, then resolves its type.
pub fn validate_upload(
    size: usize,
    max_bytes: usize,
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<DocumentType, ValidationError> {
    if size > max_bytes {
        return Err(ValidationError::FileTooLarge {
            size,
            max_mib: max_bytes / (1024 * 1024),
        });
    }
    DocumentType::detect(content_type, file_name).ok_or_else(|| {
        ValidationError::UnsupportedFileType(
            content_type
                .or(file_name)
                .unwrap_or("unknown")
                .to_string(),
        )
    })
}

pub fn validate_contract(text: &str, max_words: usize) -> Result<(), ValidationError> {
    let words = text.split_whitespace().count();
    if words == 0 {
        return Err(ValidationError::EmptyContract);
    }
    if words > max_words {
        return Err(ValidationError::ContractTooLong {
            words,
            max: max_words,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_at_limit_is_accepted() {
        let kind = validate_upload(
            DEFAULT_MAX_UPLOAD_BYTES,
            DEFAULT_MAX_UPLOAD_BYTES,
            Some("application/pdf"),
            Some("depo.pdf"),
        );
        assert_eq!(kind, Ok(DocumentType::Pdf));
    }

    #[test]
    fn oversized_upload_is_rejected_before_type_check() {
        let err = validate_upload(DEFAULT_MAX_UPLOAD_BYTES + 1, DEFAULT_MAX_UPLOAD_BYTES, None, None)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size: DEFAULT_MAX_UPLOAD_BYTES + 1,
                max_mib: 10
            }
        );
        assert_eq!(err.to_string(), "File too large. Max size: 10MB.");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = validate_upload(10, DEFAULT_MAX_UPLOAD_BYTES, Some("text/plain"), Some("a.txt"))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedFileType("text/plain".to_string()));
    }

    #[test]
    fn contract_word_limit() {
        let at_limit = "word ".repeat(DEFAULT_MAX_CONTRACT_WORDS);
        assert_eq!(validate_contract(&at_limit, DEFAULT_MAX_CONTRACT_WORDS), Ok(()));

        let over = "word ".repeat(DEFAULT_MAX_CONTRACT_WORDS + 1);
        let err = validate_contract(&over, DEFAULT_MAX_CONTRACT_WORDS).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ContractTooLong {
                words: 5001,
                max: 5000
            }
        );
        assert_eq!(err.to_string(), "Contract text too long. Max 5000 words.");
    }

    #[test]
    fn blank_contract_is_rejected() {
        assert_eq!(
            validate_contract("  \n ", DEFAULT_MAX_CONTRACT_WORDS),
            Err(ValidationError::EmptyContract)
        );
    }
}
