use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ContactError;

/// A directory entry as returned by the agenda endpoint.
///
/// The upstream server names its fields `nombre`, `apellido` and `telefono`;
/// camelCase and snake_case spellings are accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Server-assigned identifier, kept as-is and never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(
        rename = "nombre",
        alias = "firstName",
        alias = "first_name",
        default,
        deserialize_with = "lenient_text"
    )]
    pub first_name: String,
    #[serde(
        rename = "apellido",
        alias = "lastName",
        alias = "last_name",
        default,
        deserialize_with = "lenient_text"
    )]
    pub last_name: String,
    #[serde(
        rename = "telefono",
        alias = "phone",
        default,
        deserialize_with = "lenient_text"
    )]
    pub phone: String,
}

impl Contact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
        }
    }

    /// Reads a loosely shaped list entry. Missing fields stay empty; when
    /// several spellings of a field are present the upstream name wins, then
    /// camelCase, then snake_case.
    pub fn from_json_fields(fields: &Map<String, Value>) -> Self {
        let pick = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| fields.get(*key))
                .map(value_text)
                .unwrap_or_default()
        };
        Self {
            id: fields.get("id").filter(|id| !id.is_null()).cloned(),
            first_name: pick(&["nombre", "firstName", "first_name"]),
            last_name: pick(&["apellido", "lastName", "last_name"]),
            phone: pick(&["telefono", "phone"]),
        }
    }

    /// Lower-cased `first last phone`, the haystack for search queries.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.phone).to_lowercase()
    }
}

/// Servers in the wild send phone numbers as JSON numbers and leave fields
/// `null`; both render as text instead of failing the whole list.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value_text(&value))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Payload of an add request. Only constructed through [`NewContact::validated`],
/// so every instance has three non-empty, trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    #[serde(rename = "nombre")]
    first_name: String,
    #[serde(rename = "apellido")]
    last_name: String,
    #[serde(rename = "telefono")]
    phone: String,
}

impl NewContact {
    pub fn validated(first_name: &str, last_name: &str, phone: &str) -> Result<Self, ContactError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let phone = phone.trim();

        let missing: Vec<&str> = [
            ("first name", first_name),
            ("last name", last_name),
            ("phone", phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| label)
        .collect();

        if !missing.is_empty() {
            return Err(ContactError::validation(format!(
                "Please fill in all fields before submitting (missing: {}).",
                missing.join(", ")
            )));
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
