use crate::size_limit::SizeLimit;

/// Represents some rules to be applied while decoding a multipart body.
///
/// A `Constraints` value is built once and handed to
/// [`Multipart::with_constraints`](crate::Multipart::with_constraints); it is
/// never mutated by the parser.
///
/// # Examples
///
/// ```
/// use formscan::{Constraints, Multipart, SizeLimit};
///
/// let constraints = Constraints::new()
///     .allowed_fields(vec!["op", "bytes"])
///     .size_limit(SizeLimit::new().whole_stream(1024 * 1024).for_field("op", 64))
///     .require_terminator(true);
///
/// let multipart = Multipart::with_constraints("X-BOUNDARY", constraints);
/// # drop(multipart);
/// ```
#[derive(Debug, Clone)]
pub struct Constraints {
    pub(crate) size_limit: SizeLimit,
    pub(crate) allowed_fields: Option<Vec<String>>,
    pub(crate) allowed_content_types: Vec<mime::Mime>,
    pub(crate) require_terminator: bool,
}

impl Constraints {
    /// Creates a set of rules with default behaviour: no size limits, every
    /// field name accepted, only `application/octet-stream` parts allowed and
    /// a missing closing boundary tolerated.
    pub fn new() -> Constraints {
        Constraints::default()
    }

    /// Applies size limit constraints on the body and on each field.
    pub fn size_limit(mut self, size_limit: SizeLimit) -> Constraints {
        self.size_limit = size_limit;
        self
    }

    /// Restricts the accepted field names. A part with any other name fails
    /// the decode with [`Error::UnknownField`](crate::Error::UnknownField).
    pub fn allowed_fields<N: Into<String>>(mut self, allowed_fields: Vec<N>) -> Constraints {
        let allowed_fields = allowed_fields.into_iter().map(|item| item.into()).collect();
        self.allowed_fields = Some(allowed_fields);
        self
    }

    /// Replaces the set of content types a part may declare in its
    /// `Content-Type` header. A part declaring anything else rejects the whole
    /// decode. Parts without a `Content-Type` header are always accepted.
    pub fn allowed_content_types(mut self, allowed_content_types: Vec<mime::Mime>) -> Constraints {
        self.allowed_content_types = allowed_content_types;
        self
    }

    /// When set, a body that ends before its closing `--boundary--` line is
    /// reported as [`Error::IncompleteStream`](crate::Error::IncompleteStream)
    /// instead of yielding the fields captured so far.
    pub fn require_terminator(mut self, require: bool) -> Constraints {
        self.require_terminator = require;
        self
    }

    pub(crate) fn is_it_allowed(&self, field: &str) -> bool {
        match self.allowed_fields {
            Some(ref allowed_fields) => allowed_fields.iter().any(|item| item == field),
            None => true,
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints {
            size_limit: SizeLimit::default(),
            allowed_fields: None,
            allowed_content_types: vec![mime::APPLICATION_OCTET_STREAM],
            require_terminator: false,
        }
    }
}
