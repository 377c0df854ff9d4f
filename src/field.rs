use std::borrow::Cow;

use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// A single decoded part of a `multipart/form-data` body.
///
/// The content is a slice of the original body; cloning a `Field` or its
/// [`bytes`](Field::bytes) never copies the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) file_name: Option<String>,
    pub(crate) content_type: Option<mime::Mime>,
    pub(crate) content_length: Option<u64>,
    pub(crate) idx: usize,
    pub(crate) data: Bytes,
}

impl Field {
    /// The field name, taken from the `Content-Disposition` header. A part
    /// without one inherits the name of the part before it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file name found in the `Content-Disposition` header.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The `Content-Type` header of the part, if it could be parsed as
    /// [`mime::Mime`].
    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.content_type.as_ref()
    }

    /// The length the part declared in its `Content-Length` header. It is
    /// informational only; the content always runs up to the next boundary.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// The position of the part within the body, starting at zero.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// The raw content of the part.
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    /// Consumes the field and returns its raw content.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Decodes the content as text using the `charset` parameter of the
    /// part's content type, falling back to UTF-8.
    pub fn text(&self) -> String {
        self.text_with_charset("utf-8")
    }

    /// Decodes the content as text using the `charset` parameter of the
    /// part's content type, falling back to `default_encoding`. Unknown
    /// labels decode as UTF-8.
    pub fn text_with_charset(&self, default_encoding: &str) -> String {
        let encoding_name = self
            .content_type()
            .and_then(|mime| mime.get_param(mime::CHARSET))
            .map(|charset| charset.as_str())
            .unwrap_or(default_encoding);

        let encoding = Encoding::for_label(encoding_name.as_bytes()).unwrap_or(UTF_8);

        let (text, _, _) = encoding.decode(&self.data);

        match text {
            Cow::Owned(s) => s,
            Cow::Borrowed(s) => String::from(s),
        }
    }

    /// Deserializes the content as JSON.
    ///
    /// # Optional
    ///
    /// This requires the optional `json` feature to be enabled.
    #[cfg(feature = "json")]
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        serde_json::from_slice(&self.data).map_err(crate::Error::DecodeJson)
    }
}
