//! Texts shown on the status line.

use shared::error::ContactError;

pub const LOADING: &str = "Loading contacts...";
pub const SENDING: &str = "Sending...";
pub const ADDED: &str = "Contact added. Refreshing list...";

pub fn loaded(count: usize) -> String {
    match count {
        1 => "Loaded 1 contact".to_string(),
        n => format!("Loaded {n} contacts"),
    }
}

pub fn load_failed(error: &ContactError) -> String {
    format!("Could not load contacts: {error}")
}

pub fn add_failed(error: &ContactError) -> String {
    match error {
        ContactError::Validation(message) => message.clone(),
        other => format!("Could not add contact: {other}"),
    }
}
