//! Results delivered from the backend worker to the UI thread.

use client_core::LoadTicket;
use shared::{domain::Contact, error::ContactError, protocol::AddContactAck};

#[derive(Debug)]
pub enum UiEvent {
    ContactsLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Contact>, ContactError>,
    },
    ContactAdded(Result<AddContactAck, ContactError>),
    /// The worker could not start; no pending request will be answered.
    BackendFailed(String),
}
