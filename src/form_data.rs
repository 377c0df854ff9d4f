use std::collections::hash_map::{self, HashMap};

use bytes::Bytes;

use crate::Field;

/// The decoded fields of a `multipart/form-data` body, keyed by field name.
///
/// Names are unique: when several parts share a name, the last one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: HashMap<String, Field>,
}

impl FormData {
    pub(crate) fn insert(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Returns the content of the field named `name`.
    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.fields.get(name).map(Field::bytes)
    }

    /// Returns the field named `name` together with its header metadata.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Field> {
        self.fields.remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// An iterator over the field names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// An iterator over `(name, content)` pairs, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bytes)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field.bytes()))
    }

    /// Converts into a plain name → content map.
    pub fn into_map(self) -> HashMap<String, Bytes> {
        self.fields
            .into_iter()
            .map(|(name, field)| (name, field.into_bytes()))
            .collect()
    }
}

impl IntoIterator for FormData {
    type Item = (String, Field);
    type IntoIter = hash_map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, idx: usize, data: &'static [u8]) -> Field {
        Field {
            name: name.to_owned(),
            file_name: None,
            content_type: None,
            content_length: None,
            idx,
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_last_insert_wins() {
        let mut form = FormData::default();
        form.insert(field("a", 0, b"first"));
        form.insert(field("a", 1, b"second"));

        assert_eq!(form.len(), 1);
        assert_eq!(form.get("a"), Some(&Bytes::from_static(b"second")));
        assert_eq!(form.field("a").map(Field::index), Some(1));
    }

    #[test]
    fn test_into_map() {
        let mut form = FormData::default();
        form.insert(field("a", 0, b"1"));
        form.insert(field("b", 1, b"2"));

        let mut names: Vec<_> = form.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);

        let map = form.into_map();
        assert_eq!(map.get("b"), Some(&Bytes::from_static(b"2")));
    }
}
