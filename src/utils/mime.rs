//! MIME type detection utilities

const OCTET_STREAM: &str = "application/octet-stream";

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file name (extension-based)
pub fn guess_mime_from_file_name(file_name: &str) -> Option<String> {
    mime_guess::from_path(file_name)
        .first_raw()
        .map(|s| s.to_string())
}

/// Resolve the MIME type of an upload.
///
/// A declared content type is kept verbatim, `application/octet-stream`
/// included. Only when the part carries none do we fall back to the file
/// name, then to magic bytes, otherwise octet-stream.
pub fn resolve_upload_mime(declared: Option<&str>, file_name: &str, bytes: &[u8]) -> String {
    if let Some(d) = declared.map(str::trim)
        && !d.is_empty()
    {
        return d.to_string();
    }
    guess_mime_from_file_name(file_name)
        .or_else(|| guess_mime_from_bytes(bytes))
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
