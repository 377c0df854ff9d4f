use crate::scanner::Scanner;

pub(crate) struct MultipartState<'a> {
    pub(crate) scanner: Scanner<'a>,
    pub(crate) stage: ParsingStage,
    pub(crate) next_field_idx: usize,
    pub(crate) found_terminator: bool,
    // Survives across parts: a part without a `name` reuses it.
    pub(crate) curr_field_name: String,
    pub(crate) curr_file_name: Option<String>,
    pub(crate) curr_content_type: Option<mime::Mime>,
    pub(crate) curr_content_length: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsingStage {
    FindingBoundary,
    ReadingFieldHeaders,
    ReadingFieldData,
    Eof,
}

impl<'a> MultipartState<'a> {
    pub(crate) fn new(body: &'a [u8]) -> Self {
        MultipartState {
            scanner: Scanner::new(body),
            stage: ParsingStage::FindingBoundary,
            next_field_idx: 0,
            found_terminator: false,
            curr_field_name: String::new(),
            curr_file_name: None,
            curr_content_type: None,
            curr_content_length: None,
        }
    }

    /// Clears the part-scoped header metadata before a new part's headers are
    /// read. The pending field name is kept.
    pub(crate) fn begin_field(&mut self) {
        self.curr_file_name = None;
        self.curr_content_type = None;
        self.curr_content_length = None;
        self.stage = ParsingStage::ReadingFieldHeaders;
    }
}
