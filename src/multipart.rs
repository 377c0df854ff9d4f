use bytes::{Bytes, BytesMut};
use futures_util::stream::{Stream, TryStreamExt};
use http::header::{self, HeaderMap};
use log::{debug, trace};
#[cfg(feature = "tokio-io")]
use tokio::io::AsyncRead;
#[cfg(feature = "tokio-io")]
use tokio_util::io::ReaderStream;

use crate::constants;
use crate::constraints::Constraints;
use crate::content_disposition::ContentDisposition;
use crate::helpers;
use crate::state::{MultipartState, ParsingStage};
use crate::{Field, FormData};

/// Decodes fully-buffered `multipart/form-data` bodies delimited by one
/// boundary.
///
/// Parts are walked front to back: each part's field name comes from its
/// `Content-Disposition` header and its content is everything up to the next
/// line-anchored `--boundary`. A `Multipart` holds no per-body state, so one
/// value can decode any number of bodies, from any number of threads.
///
/// # Examples
///
/// ```
/// use formscan::Multipart;
///
/// let body = "--X-BOUNDARY\r\n\
///             Content-Disposition: form-data; name=\"op\"\r\n\
///             \r\n\
///             write\r\n\
///             --X-BOUNDARY\r\n\
///             Content-Disposition: form-data; name=\"bytes\"\r\n\
///             Content-Type: application/octet-stream\r\n\
///             \r\n\
///             \x00\x01\x02\r\n\
///             --X-BOUNDARY--\r\n";
///
/// let form = Multipart::new("X-BOUNDARY").parse(body).unwrap();
///
/// assert_eq!(form.get("op").unwrap().as_ref(), b"write");
/// assert_eq!(form.get("bytes").unwrap().as_ref(), b"\x00\x01\x02");
/// ```
#[derive(Debug, Clone)]
pub struct Multipart {
    boundary: String,
    delimiter: Vec<u8>,
    terminator: Vec<u8>,
    constraints: Constraints,
}

impl Multipart {
    /// Construct a new `Multipart` instance with the given boundary and the
    /// default [`Constraints`].
    pub fn new<B: Into<String>>(boundary: B) -> Multipart {
        Multipart::with_constraints(boundary, Constraints::default())
    }

    /// Construct a new `Multipart` instance with the given boundary and
    /// constraints.
    pub fn with_constraints<B: Into<String>>(boundary: B, constraints: Constraints) -> Multipart {
        let boundary = boundary.into();

        Multipart {
            delimiter: constants::delimiter(&boundary),
            terminator: constants::terminator(&boundary),
            boundary,
            constraints,
        }
    }

    /// Construct a new `Multipart` instance from the `Content-Type` header of
    /// a request.
    ///
    /// The header must start with `multipart/form-data` and carry a
    /// `boundary` parameter.
    pub fn from_headers(headers: &HeaderMap) -> crate::Result<Multipart> {
        Multipart::from_headers_with_constraints(headers, Constraints::default())
    }

    /// Same as [`from_headers`](Multipart::from_headers), with constraints.
    pub fn from_headers_with_constraints(headers: &HeaderMap, constraints: Constraints) -> crate::Result<Multipart> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .ok_or(crate::Error::NoMultipart)?
            .to_str()
            .map_err(|err| crate::Error::DecodeContentType(err.into()))?;

        let is_multipart = content_type
            .get(..constants::MULTIPART_FORM_DATA.len())
            .map(|prefix| prefix.eq_ignore_ascii_case(constants::MULTIPART_FORM_DATA))
            .unwrap_or(false);

        if !is_multipart {
            return Err(crate::Error::NoMultipart);
        }

        let boundary = crate::parse_boundary(content_type)?;

        Ok(Multipart::with_constraints(boundary, constraints))
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Decodes a complete body.
    ///
    /// An empty body yields an empty [`FormData`] without scanning. A part
    /// whose `Content-Type` is not allowed rejects the whole body with
    /// [`Error::DisallowedContentType`](crate::Error::DisallowedContentType).
    /// A body without a closing `--boundary--` line keeps the fields captured
    /// so far unless [`Constraints::require_terminator`] is set.
    pub fn parse<B: Into<Bytes>>(&self, body: B) -> crate::Result<FormData> {
        let body: Bytes = body.into();

        if body.is_empty() {
            return Ok(FormData::default());
        }

        let limit = self.constraints.size_limit.whole_stream;
        if body.len() as u64 > limit {
            return Err(crate::Error::StreamSizeExceeded { limit });
        }

        trace!("total size of incoming body: {} bytes", body.len());

        let mut state = MultipartState::new(&body);
        let mut form = FormData::default();

        loop {
            match state.stage {
                ParsingStage::FindingBoundary => self.find_boundary(&mut state),
                ParsingStage::ReadingFieldHeaders => self.read_field_headers(&mut state)?,
                ParsingStage::ReadingFieldData => self.read_field_data(&body, &mut state, &mut form)?,
                ParsingStage::Eof => break,
            }
        }

        if !state.found_terminator && self.constraints.require_terminator {
            return Err(crate::Error::IncompleteStream);
        }

        Ok(form)
    }

    /// Collects a stream of body chunks into one buffer, then decodes it.
    ///
    /// The whole-stream size limit is enforced while collecting.
    pub async fn parse_stream<S, O, E>(&self, stream: S) -> crate::Result<FormData>
    where
        S: Stream<Item = Result<O, E>>,
        O: Into<Bytes>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let limit = self.constraints.size_limit.whole_stream;

        let stream = stream
            .map_ok(|b| Into::<Bytes>::into(b))
            .map_err(|err| crate::Error::StreamReadFailed(err.into()));
        futures_util::pin_mut!(stream);

        let mut buf = BytesMut::new();

        while let Some(chunk) = stream.try_next().await? {
            if (buf.len() + chunk.len()) as u64 > limit {
                return Err(crate::Error::StreamSizeExceeded { limit });
            }

            buf.extend_from_slice(&chunk);
        }

        self.parse(buf.freeze())
    }

    /// Reads the body from an [`AsyncRead`] to the end, then decodes it.
    ///
    /// # Optional
    ///
    /// This requires the optional `tokio-io` feature to be enabled.
    #[cfg(feature = "tokio-io")]
    pub async fn parse_reader<R: AsyncRead>(&self, reader: R) -> crate::Result<FormData> {
        self.parse_stream(ReaderStream::new(reader)).await
    }

    fn find_boundary(&self, state: &mut MultipartState<'_>) {
        loop {
            let found = state.scanner.advance_to_next_line(None);
            let line = state.scanner.current_segment();

            // The terminator also starts with the delimiter, so test it first.
            if line.starts_with(&self.terminator) {
                trace!("end of multipart body");
                state.found_terminator = true;
                state.stage = ParsingStage::Eof;
                return;
            }

            if !found {
                trace!("body exhausted before the closing boundary");
                state.stage = ParsingStage::Eof;
                return;
            }

            if line.starts_with(&self.delimiter) {
                state.begin_field();
                return;
            }
        }
    }

    fn read_field_headers(&self, state: &mut MultipartState<'_>) -> crate::Result<()> {
        while state.scanner.advance_to_next_line(None) {
            let line = state.scanner.current_segment();

            if line.is_empty() {
                trace!("end of field headers");
                break;
            }

            if let Some(value) = helpers::header_value(line, &header::CONTENT_DISPOSITION) {
                let content_disposition = ContentDisposition::parse(value);

                if let Some(name) = content_disposition.field_name {
                    trace!("field name: {}", name);
                    state.curr_field_name = name;
                }
                state.curr_file_name = content_disposition.file_name;
            } else if let Some(value) = helpers::header_value(line, &header::CONTENT_LENGTH) {
                state.curr_content_length = helpers::parse_content_length(value);
                debug!("declared content length: {:?}", state.curr_content_length);
            } else if let Some(value) = helpers::header_value(line, &header::CONTENT_TYPE) {
                if !self.is_content_type_allowed(value) {
                    let content_type = String::from_utf8_lossy(value).trim().to_owned();
                    trace!("disallowed content type: {}", content_type);

                    return Err(crate::Error::DisallowedContentType {
                        field_name: state.curr_field_name.clone(),
                        content_type,
                    });
                }

                state.curr_content_type = std::str::from_utf8(value)
                    .ok()
                    .and_then(|val| val.trim().parse::<mime::Mime>().ok());
            }
        }

        state.stage = ParsingStage::ReadingFieldData;
        Ok(())
    }

    fn read_field_data(&self, body: &Bytes, state: &mut MultipartState<'_>, form: &mut FormData) -> crate::Result<()> {
        let more = state.scanner.advance_to_boundary(&self.delimiter);
        let range = state.scanner.current_range();
        let field_name = state.curr_field_name.clone();

        if !self.constraints.is_it_allowed(&field_name) {
            return Err(crate::Error::UnknownField { field_name });
        }

        let limit = self.constraints.size_limit.extract_size_limit_for(&field_name);
        if range.len() as u64 > limit {
            return Err(crate::Error::FieldSizeExceeded { limit, field_name });
        }

        debug!(
            "captured field '{}': {} bytes, more = {}",
            field_name,
            range.len(),
            more
        );

        form.insert(Field {
            name: field_name,
            file_name: state.curr_file_name.take(),
            content_type: state.curr_content_type.take(),
            content_length: state.curr_content_length.take(),
            idx: state.next_field_idx,
            data: body.slice(range),
        });

        state.next_field_idx += 1;
        state.stage = if more {
            ParsingStage::FindingBoundary
        } else {
            ParsingStage::Eof
        };

        Ok(())
    }

    fn is_content_type_allowed(&self, value: &[u8]) -> bool {
        self.constraints
            .allowed_content_types
            .iter()
            .any(|allowed| helpers::contains_ignore_ascii_case(value, allowed.essence_str().as_bytes()))
    }
}
