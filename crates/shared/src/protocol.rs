use serde_json::Value;
use tracing::warn;

use crate::domain::Contact;

/// Interprets a list response body. Anything other than a JSON array means
/// "no contacts". Every array entry becomes one contact, so the count always
/// follows the array length; entries that are not objects have empty fields.
pub fn decode_contact_list(body: Value) -> Vec<Contact> {
    let Value::Array(entries) = body else {
        warn!("contact list response is not an array; treating as empty");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Contact::from_json_fields(fields),
            _ => {
                warn!(index, "contact entry is not an object; keeping it with empty fields");
                Contact::default()
            }
        })
        .collect()
}

/// Body of a successful add response. The server may answer with JSON, with
/// plain text, or with nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum AddContactAck {
    Json(Value),
    Empty,
}

impl AddContactAck {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Empty,
        }
    }
}
