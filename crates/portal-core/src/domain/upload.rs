//! Upload Policy
//!
//! Local checks applied before a file is handed to the image host.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("{label} must be under {limit_kib}KB")]
    TooLarge { label: String, limit_kib: u64 },
    #[error("{label} file is already selected")]
    Duplicate { label: String },
    #[error("{label} is empty")]
    Empty { label: String },
    #[error("upload failed: {0}")]
    Failed(String),
}

/// Identity of a picked file, used to spot re-selection of the same file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFingerprint {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self { max_bytes: 150 * 1024 }
    }
}

impl UploadPolicy {
    pub fn check(&self, label: &str, file: &FileFingerprint) -> Result<(), UploadError> {
        if file.size == 0 {
            return Err(UploadError::Empty { label: label.to_string() });
        }
        if file.size > self.max_bytes {
            return Err(UploadError::TooLarge {
                label: label.to_string(),
                limit_kib: self.max_bytes / 1024,
            });
        }
        Ok(())
    }

    /// Checks a new selection against the one already held for `label`
    pub fn check_selection(
        &self,
        label: &str,
        picked: &FileFingerprint,
        current: Option<&FileFingerprint>,
    ) -> Result<(), UploadError> {
        if current == Some(picked) {
            return Err(UploadError::Duplicate { label: label.to_string() });
        }
        self.check(label, picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(size: u64) -> FileFingerprint {
        FileFingerprint { name: "aadhaar.png".into(), size, mime: "image/png".into() }
    }

    #[test]
    fn test_size_limit() {
        let policy = UploadPolicy::default();
        assert!(policy.check("Photo", &file(150 * 1024)).is_ok());
        assert_eq!(
            policy.check("Photo", &file(150 * 1024 + 1)),
            Err(UploadError::TooLarge { label: "Photo".into(), limit_kib: 150 })
        );
        assert!(matches!(policy.check("Photo", &file(0)), Err(UploadError::Empty { .. })));
    }

    #[test]
    fn test_duplicate_selection() {
        let policy = UploadPolicy::default();
        let current = file(1000);
        assert!(matches!(
            policy.check_selection("Aadhaar", &file(1000), Some(&current)),
            Err(UploadError::Duplicate { .. })
        ));
        assert!(policy.check_selection("Aadhaar", &file(1001), Some(&current)).is_ok());
        assert!(policy.check_selection("Aadhaar", &file(1001), None).is_ok());
    }
}
