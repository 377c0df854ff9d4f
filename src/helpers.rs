use http::header::HeaderName;
use memchr::memmem;

/// Returns the value of a `Name: value` header line if its name matches
/// `name` ASCII case-insensitively.
pub(crate) fn header_value<'a>(line: &'a [u8], name: &HeaderName) -> Option<&'a [u8]> {
    let name = name.as_str().as_bytes();

    if line.len() <= name.len() || line[name.len()] != b':' {
        return None;
    }

    if !line[..name.len()].eq_ignore_ascii_case(name) {
        return None;
    }

    Some(&line[name.len() + 1..])
}

/// ASCII case-insensitive substring test.
pub(crate) fn contains_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    let haystack = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();

    memmem::find(&haystack, &needle).is_some()
}

pub(crate) fn parse_content_length(value: &[u8]) -> Option<u64> {
    std::str::from_utf8(value).ok()?.trim().parse::<u64>().ok()
}
