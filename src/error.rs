use std::fmt::{self, Debug, Display, Formatter};

use derive_more::Display;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A set of errors that can occur while decoding a multipart body and in
/// other operations.
#[derive(Display)]
#[non_exhaustive]
pub enum Error {
    /// The `Content-Type` header is not `multipart/form-data`.
    #[display(fmt = "Content-Type is not multipart/form-data")]
    NoMultipart,

    /// No boundary found in `Content-Type` header.
    #[display(fmt = "multipart boundary not found in Content-Type")]
    NoBoundary,

    /// The `Content-Type` header value is not visible ASCII.
    #[display(fmt = "failed to decode Content-Type header value: {}", _0)]
    DecodeContentType(BoxError),

    /// A part declared a `Content-Type` outside the allowed set. The whole
    /// decode is rejected.
    #[display(
        fmt = "field '{}' declared a disallowed content type: {}",
        field_name,
        content_type
    )]
    DisallowedContentType { field_name: String, content_type: String },

    /// An unknown field is detected when multipart
    /// [`constraints`](crate::Constraints::allowed_fields) are added.
    #[display(fmt = "unknown field received: {}", field_name)]
    UnknownField { field_name: String },

    /// The field size exceeded the maximum limit.
    #[display(fmt = "field '{}' exceeded the maximum size limit: {} bytes", field_name, limit)]
    FieldSizeExceeded { limit: u64, field_name: String },

    /// The body size exceeded the maximum limit.
    #[display(fmt = "stream size exceeded the maximum limit: {} bytes", limit)]
    StreamSizeExceeded { limit: u64 },

    /// The body ended before the closing `--boundary--` line. Only reported
    /// when [`Constraints::require_terminator`](crate::Constraints::require_terminator)
    /// is enabled.
    #[display(fmt = "incomplete multipart stream")]
    IncompleteStream,

    /// Reading the body stream failed.
    #[display(fmt = "stream read failed: {}", _0)]
    StreamReadFailed(BoxError),

    /// Failed to decode the field data as `JSON` in
    /// [`field.json()`](crate::Field::json) method.
    #[cfg(feature = "json")]
    #[display(fmt = "failed to decode field data as JSON: {}", _0)]
    DecodeJson(serde_json::Error),
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string().eq(&other.to_string())
    }
}

impl Eq for Error {}
