use crate::{constants, params};

pub(crate) struct ContentDisposition {
    pub(crate) field_name: Option<String>,
    pub(crate) file_name: Option<String>,
}

impl ContentDisposition {
    /// Parses the value of a `Content-Disposition` header. Only the
    /// `form-data` disposition type yields parameters.
    pub(crate) fn parse(value: &[u8]) -> ContentDisposition {
        let value = String::from_utf8_lossy(value);
        let (disposition, params) = params::split(&value);

        if !disposition.eq_ignore_ascii_case(constants::FORM_DATA) {
            return ContentDisposition {
                field_name: None,
                file_name: None,
            };
        }

        let mut field_name = None;
        let mut file_name = None;

        for (key, val) in params.filter(|(_, val)| !val.is_empty()) {
            if field_name.is_none() && key.eq_ignore_ascii_case(constants::PARAM_NAME) {
                field_name = Some(val.into_owned());
            } else if file_name.is_none() && key.eq_ignore_ascii_case(constants::PARAM_FILE_NAME) {
                file_name = Some(val.into_owned());
            }
        }

        ContentDisposition { field_name, file_name }
    }
}
