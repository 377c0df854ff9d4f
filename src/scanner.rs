use memchr::memmem;

use crate::constants;

/// A forward-only cursor over an immutable body.
///
/// The active segment is the `[start, end)` range returned by
/// [`current_segment`](Scanner::current_segment). Every advance keeps
/// `start <= end <= buf.len()`; offsets are clamped instead of wrapping when
/// stepping over a two-byte terminator near the end of the buffer.
pub(crate) struct Scanner<'a> {
    buf: &'a [u8],
    start: usize,
    end: usize,
    started: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Scanner {
            buf,
            start: 0,
            end: 0,
            started: false,
        }
    }

    /// Moves the active segment to the next CRLF-delimited line.
    ///
    /// The first call only locates the first `\r\n`. Later calls step over the
    /// terminator that ends the current segment, then either take exactly
    /// `fixed_len` bytes or scan for the next `\r\n`.
    ///
    /// Returns `false` when no terminator was found (or `fixed_len` runs past
    /// the buffer); the active segment then runs to the end of the buffer.
    pub(crate) fn advance_to_next_line(&mut self, fixed_len: Option<usize>) -> bool {
        if !self.started {
            self.started = true;
            self.start = 0;
            return self.scan_line_end();
        }

        self.skip_crlf();

        match fixed_len {
            Some(len) => {
                let end = self.start.saturating_add(len);
                self.end = end.min(self.buf.len());
                end <= self.buf.len()
            }
            None => self.scan_line_end(),
        }
    }

    /// Moves the active segment to everything up to the next line-anchored
    /// occurrence of `delimiter`.
    ///
    /// A match only counts when it is immediately preceded by `\r\n`; the
    /// segment then ends at that `\r\n`. The terminator that was just skipped
    /// also anchors a match, which yields an empty segment. Returns `false` if
    /// there is no such match, leaving the remainder of the buffer as the
    /// active segment.
    pub(crate) fn advance_to_boundary(&mut self, delimiter: &[u8]) -> bool {
        self.skip_crlf();

        let finder = memmem::Finder::new(delimiter);
        let mut from = self.start;

        while let Some(rel_idx) = finder.find(&self.buf[from..]) {
            let idx = from + rel_idx;

            if idx >= constants::CRLF.len() && &self.buf[idx - 2..idx] == constants::CRLF {
                self.end = idx - 2;
                self.start = self.start.min(self.end);
                return true;
            }

            from = idx + 1;
        }

        self.end = self.buf.len();
        false
    }

    pub(crate) fn current_segment(&self) -> &'a [u8] {
        &self.buf[self.start..self.end]
    }

    /// The active segment as a range into the buffer.
    pub(crate) fn current_range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    fn skip_crlf(&mut self) {
        self.start = self.end.saturating_add(constants::CRLF.len()).min(self.buf.len());
        self.end = self.start;
    }

    fn scan_line_end(&mut self) -> bool {
        match memmem::find(&self.buf[self.start..], constants::CRLF) {
            Some(rel_idx) => {
                self.end = self.start + rel_idx;
                true
            }
            None => {
                self.end = self.buf.len();
                false
            }
        }
    }
}
