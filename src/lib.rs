//! A forward-only parser for fully-buffered `multipart/form-data` request
//! bodies.
//!
//! The body is walked line by line: each `--boundary` line opens a part, the
//! part's headers run until a blank line, and its content runs up to the next
//! `--boundary` that starts a line. The result is a [`FormData`] mapping each
//! field name to the raw bytes of its content, sliced out of the original
//! body without copying.
//!
//! By default every part must either omit `Content-Type` or declare
//! `application/octet-stream`; anything else rejects the whole body. See
//! [`Constraints`] to change that and to add size limits.
//!
//! # Examples
//!
//! ```
//! use formscan::{parse_boundary, Multipart};
//!
//! # fn run() -> formscan::Result<()> {
//! let content_type = "multipart/form-data; boundary=AaB03x";
//! let body = "--AaB03x\r\n\
//!             Content-Disposition: form-data; name=\"field1\"\r\n\
//!             \r\n\
//!             value1\r\n\
//!             --AaB03x--\r\n";
//!
//! let multipart = Multipart::new(parse_boundary(content_type)?);
//! let form = multipart.parse(body)?;
//!
//! assert_eq!(form.get("field1").unwrap().as_ref(), b"value1");
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```

use std::borrow::Cow;

pub use bytes;

pub use constraints::Constraints;
pub use error::Error;
pub use field::Field;
pub use form_data::FormData;
pub use multipart::Multipart;
pub use size_limit::SizeLimit;

mod constants;
mod constraints;
mod content_disposition;
mod error;
mod field;
mod form_data;
mod helpers;
mod multipart;
mod params;
mod scanner;
mod size_limit;
mod state;

/// A Result type often returned from methods that can have `formscan` errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses the `Content-Type` header to extract the boundary value.
///
/// The parameter list following `form-data` (matched ASCII
/// case-insensitively) is searched for a non-empty `boundary` parameter,
/// which may be quoted.
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> crate::Result<String> {
    let content_type = content_type.as_ref();

    let pos = content_type
        .to_ascii_lowercase()
        .find(constants::FORM_DATA)
        .ok_or(Error::NoMultipart)?;

    let (_, params) = params::split(&content_type[pos..]);

    params::find(params, constants::PARAM_BOUNDARY)
        .map(Cow::into_owned)
        .ok_or(Error::NoBoundary)
}

/// Decodes `body` with the default [`Constraints`], mapping any rejection to
/// an empty [`FormData`].
///
/// This is the lenient entry point: a disallowed part content type, like any
/// other error, yields no fields at all, while a body missing its closing
/// boundary keeps the fields captured before the end of input.
pub fn parse_form_data<B: Into<bytes::Bytes>>(boundary: &str, body: B) -> FormData {
    match Multipart::new(boundary).parse(body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("rejecting multipart body: {}", err);
            FormData::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boundary() {
        let content_type = "multipart/form-data; boundary=ABCDEFG";
        assert_eq!(parse_boundary(content_type), Ok("ABCDEFG".to_owned()));

        let content_type = "multipart/form-data; boundary=------ABCDEFG";
        assert_eq!(parse_boundary(content_type), Ok("------ABCDEFG".to_owned()));

        let content_type = "multipart/form-data; charset=utf-8; boundary=\"quoted boundary\"";
        assert_eq!(parse_boundary(content_type), Ok("quoted boundary".to_owned()));

        let content_type = "MULTIPART/FORM-DATA; BOUNDARY=AaB03x";
        assert_eq!(parse_boundary(content_type), Ok("AaB03x".to_owned()));

        let content_type = "boundary=------ABCDEFG";
        assert_eq!(parse_boundary(content_type), Err(Error::NoMultipart));

        let content_type = "text/plain";
        assert_eq!(parse_boundary(content_type), Err(Error::NoMultipart));

        let content_type = "multipart/form-data";
        assert_eq!(parse_boundary(content_type), Err(Error::NoBoundary));

        let content_type = "multipart/form-data; boundary=";
        assert_eq!(parse_boundary(content_type), Err(Error::NoBoundary));
    }

    #[test]
    fn test_parse_form_data_rejects_to_empty() {
        let body = "--X\r\nContent-Disposition: form-data; name=\"a\"\r\nContent-Type: text/plain\r\n\r\nabc\r\n--X--\r\n";
        assert!(parse_form_data("X", body).is_empty());

        let body = "--X\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nabc\r\n--X--\r\n";
        assert_eq!(parse_form_data("X", body).get("a").unwrap().as_ref(), b"abc");
    }
}
