//! Image packager
//!
//! Turns an [`Upload`] into the image records sent to the model. Bytes and
//! declared content type pass through untouched; no decoding or transcoding
//! happens here.

use crate::error::{ArtifactError, Result};
use crate::types::{ALLOWED_EXTENSIONS, ImageRecord, Upload};

/// Whether the upload's file extension is one the uploader accepts.
pub fn is_allowed_upload(upload: &Upload) -> bool {
    upload
        .extension()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reject uploads whose extension is outside the accepted set.
pub fn ensure_allowed(upload: &Upload) -> Result<()> {
    if is_allowed_upload(upload) {
        Ok(())
    } else {
        Err(ArtifactError::UnsupportedFileType(
            upload.extension().unwrap_or_else(|| "(none)".to_string()),
        ))
    }
}

/// Package an upload into a single-element sequence of image records.
///
/// # Errors
///
/// Returns [`ArtifactError::NoUpload`] when called without an upload. The
/// submission handler checks for an upload first, so this only fires on a
/// programming error.
pub fn package_upload(upload: Option<&Upload>) -> Result<Vec<ImageRecord>> {
    let upload = upload.ok_or(ArtifactError::NoUpload)?;
    if upload.content_type.trim().is_empty() {
        return Err(ArtifactError::Packaging(format!(
            "Upload {} has no content type",
            upload.file_name
        )));
    }

    tracing::debug!(
        file_name = %upload.file_name,
        mime_type = %upload.content_type,
        bytes = upload.len(),
        "packaged upload"
    );

    Ok(vec![ImageRecord {
        mime_type: upload.content_type.clone(),
        data: upload.data.clone(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaging_preserves_type_and_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let upload = Upload::new("statue.jpg", "image/jpeg", bytes.clone());
        let records = package_upload(Some(&upload)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mime_type, "image/jpeg");
        assert_eq!(records[0].data, bytes);
    }

    #[test]
    fn packaging_without_upload_is_a_no_file_error() {
        let err = package_upload(None).unwrap_err();
        assert!(matches!(err, ArtifactError::NoUpload));
    }

    #[test]
    fn blank_content_type_is_rejected() {
        let upload = Upload::new("a.png", "  ", vec![1]);
        assert!(matches!(
            package_upload(Some(&upload)),
            Err(ArtifactError::Packaging(_))
        ));
    }

    #[test]
    fn only_jpg_jpeg_png_are_allowed() {
        for name in ["a.jpg", "b.JPEG", "c.png"] {
            assert!(is_allowed_upload(&Upload::new(name, "image/x", vec![])), "{name}");
        }
        for name in ["a.gif", "b.webp", "noext"] {
            assert!(!is_allowed_upload(&Upload::new(name, "image/x", vec![])), "{name}");
        }
        let err = ensure_allowed(&Upload::new("x.gif", "image/gif", vec![])).unwrap_err();
        assert!(matches!(err, ArtifactError::UnsupportedFileType(ext) if ext == "gif"));
    }
}
