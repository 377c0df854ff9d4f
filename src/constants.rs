pub(crate) const DEFAULT_WHOLE_STREAM_SIZE_LIMIT: u64 = std::u64::MAX;
pub(crate) const DEFAULT_PER_FIELD_SIZE_LIMIT: u64 = std::u64::MAX;

pub(crate) const BOUNDARY_EXT: &str = "--";
pub(crate) const CRLF: &[u8] = b"\r\n";

pub(crate) const FORM_DATA: &str = "form-data";
pub(crate) const MULTIPART_FORM_DATA: &str = "multipart/form-data";

pub(crate) const PARAM_BOUNDARY: &str = "boundary";
pub(crate) const PARAM_NAME: &str = "name";
pub(crate) const PARAM_FILE_NAME: &str = "filename";

/// Builds the `--boundary` delimiter marker.
pub(crate) fn delimiter(boundary: &str) -> Vec<u8> {
    format!("{}{}", BOUNDARY_EXT, boundary).into_bytes()
}

/// Builds the `--boundary--` terminator marker.
pub(crate) fn terminator(boundary: &str) -> Vec<u8> {
    format!("{}{}{}", BOUNDARY_EXT, boundary, BOUNDARY_EXT).into_bytes()
}
