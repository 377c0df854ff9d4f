//! Tokenizer for MIME header parameter lists such as
//! `form-data; name="field"; filename="a.bin"`.

use std::borrow::Cow;

/// Splits a header value into its leading token and the parameter list that
/// follows it.
pub(crate) fn split(value: &str) -> (&str, Params<'_>) {
    match value.find(';') {
        Some(idx) => (value[..idx].trim(), Params { rest: &value[idx + 1..] }),
        None => (value.trim(), Params { rest: "" }),
    }
}

/// Returns the value of the first parameter named `key`, compared ASCII
/// case-insensitively. Empty values are treated as absent.
pub(crate) fn find<'a>(params: Params<'a>, key: &str) -> Option<Cow<'a, str>> {
    params
        .filter(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
        .find(|v| !v.is_empty())
}

/// Iterator over `key=value` pairs separated by `;`. Values may be quoted,
/// in which case `\` escapes the following character.
pub(crate) struct Params<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Params<'a> {
    type Item = (&'a str, Cow<'a, str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.rest.trim_start_matches(|c: char| c == ';' || c.is_ascii_whitespace());
            if rest.is_empty() {
                self.rest = rest;
                return None;
            }

            let key_end = rest.find(|c: char| c == '=' || c == ';').unwrap_or_else(|| rest.len());
            let key = rest[..key_end].trim();

            if !rest[key_end..].starts_with('=') {
                self.rest = &rest[key_end..];
                if key.is_empty() {
                    continue;
                }
                return Some((key, Cow::Borrowed("")));
            }

            let value_part = rest[key_end + 1..].trim_start();
            let (value, remaining) = if value_part.starts_with('"') {
                read_quoted(&value_part[1..])
            } else {
                let end = value_part.find(';').unwrap_or_else(|| value_part.len());
                (Cow::Borrowed(value_part[..end].trim_end()), &value_part[end..])
            };

            self.rest = remaining;

            if key.is_empty() {
                continue;
            }

            return Some((key, value));
        }
    }
}

// Reads up to the closing quote. An unterminated quote takes the rest of the
// input.
fn read_quoted(s: &str) -> (Cow<'_, str>, &str) {
    let mut owned: Option<String> = None;
    let mut chars = s.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => {
                let value = match owned {
                    Some(buf) => Cow::Owned(buf),
                    None => Cow::Borrowed(&s[..idx]),
                };
                return (value, &s[idx + 1..]);
            }
            '\\' => {
                let buf = owned.get_or_insert_with(|| s[..idx].to_owned());
                if let Some((_, escaped)) = chars.next() {
                    buf.push(escaped);
                }
            }
            _ => {
                if let Some(buf) = owned.as_mut() {
                    buf.push(ch);
                }
            }
        }
    }

    let value = match owned {
        Some(buf) => Cow::Owned(buf),
        None => Cow::Borrowed(s),
    };

    (value, "")
}
