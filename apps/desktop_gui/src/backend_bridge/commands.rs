//! Backend commands queued from UI to backend worker.

use client_core::LoadTicket;
use shared::domain::NewContact;

#[derive(Debug)]
pub enum BackendCommand {
    LoadContacts { ticket: LoadTicket },
    AddContact { contact: NewContact },
}
