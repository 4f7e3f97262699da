//! State transitions for the directory window. Every function mutates the
//! model and returns the backend command to queue, if any, so the whole flow
//! is testable without a window or a network.

use client_core::{status, DirectoryState, GridShape, LoadOutcome, LoadTicket};
use shared::domain::NewContact;

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl ContactForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub struct DirectoryModel {
    pub state: DirectoryState,
    pub search_text: String,
    pub form: ContactForm,
    pub status: String,
    pub adding: bool,
    pub loading: bool,
    /// Load issued after a confirmed add; once applied the view jumps to the
    /// last page.
    jump_after: Option<LoadTicket>,
}

impl DirectoryModel {
    pub fn new(grid: GridShape) -> Self {
        Self {
            state: DirectoryState::new(grid),
            search_text: String::new(),
            form: ContactForm::default(),
            status: String::new(),
            adding: false,
            loading: false,
            jump_after: None,
        }
    }
}

pub fn request_reload(model: &mut DirectoryModel) -> BackendCommand {
    let ticket = model.state.begin_load();
    model.loading = true;
    model.status = status::LOADING.to_string();
    BackendCommand::LoadContacts { ticket }
}

pub fn search_changed(model: &mut DirectoryModel) {
    model.state.set_query(&model.search_text);
}

pub fn step_page(model: &mut DirectoryModel, delta: isize) -> bool {
    model.state.step_page(delta)
}

pub fn submit_form(model: &mut DirectoryModel) -> Option<BackendCommand> {
    if model.adding {
        return None;
    }
    match NewContact::validated(&model.form.first_name, &model.form.last_name, &model.form.phone) {
        Ok(contact) => {
            model.adding = true;
            model.status = status::SENDING.to_string();
            Some(BackendCommand::AddContact { contact })
        }
        Err(err) => {
            model.status = status::add_failed(&err);
            None
        }
    }
}

pub fn apply_event(model: &mut DirectoryModel, event: UiEvent) -> Option<BackendCommand> {
    match event {
        UiEvent::BackendFailed(message) => {
            model.loading = false;
            model.adding = false;
            model.jump_after = None;
            model.status = message;
            None
        }
        UiEvent::ContactsLoaded { ticket, result } => {
            let outcome = model.state.finish_load(ticket, result);
            match &outcome {
                LoadOutcome::Applied { count } => model.status = status::loaded(*count),
                LoadOutcome::Failed { error } => {
                    tracing::warn!(seq = ticket.seq(), error = %error, "contact load failed");
                    model.status = status::load_failed(error);
                }
                LoadOutcome::Stale => return None,
            }
            model.loading = false;
            if let Some(pending) = model.jump_after {
                if pending == ticket {
                    model.state.jump_to_last_page();
                }
                if pending <= ticket {
                    model.jump_after = None;
                }
            }
            None
        }
        UiEvent::ContactAdded(Ok(_)) => {
            model.adding = false;
            model.form.clear();
            let cmd = request_reload(model);
            if let BackendCommand::LoadContacts { ticket } = &cmd {
                model.jump_after = Some(*ticket);
            }
            model.status = status::ADDED.to_string();
            Some(cmd)
        }
        UiEvent::ContactAdded(Err(err)) => {
            tracing::warn!(error = %err, "add contact failed");
            model.adding = false;
            model.status = status::add_failed(&err);
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
