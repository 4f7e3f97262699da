//! The directory controller: owns [`DirectoryState`], talks to a
//! [`ContactApi`], and pushes a full re-render to its view after every change.

use std::sync::Arc;

use shared::{domain::NewContact, error::ContactError, protocol::AddContactAck};
use tracing::{debug, info, warn};

use crate::{
    render::{render_page, RenderedPage},
    state::{DirectoryState, GridShape, LoadOutcome},
    status,
    transport::ContactApi,
    view::DirectoryView,
};

pub struct ContactListController<V: DirectoryView> {
    api: Arc<dyn ContactApi>,
    view: V,
    state: DirectoryState,
}

impl<V: DirectoryView> ContactListController<V> {
    pub fn new(api: Arc<dyn ContactApi>, view: V, grid: GridShape) -> Self {
        Self {
            api,
            view,
            state: DirectoryState::new(grid),
        }
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Replaces the contact list from the endpoint. Failures empty the list
    /// and are reported on the status line; the view is re-rendered either way.
    pub async fn load_all(&mut self) -> LoadOutcome {
        let ticket = self.state.begin_load();
        self.view.show_message(status::LOADING);

        let result = self.api.fetch_contacts().await;
        let outcome = self.state.finish_load(ticket, result);
        match &outcome {
            LoadOutcome::Applied { count } => {
                info!(seq = ticket.seq(), count, "contacts loaded");
                self.view.show_message(&status::loaded(*count));
            }
            LoadOutcome::Failed { error } => {
                warn!(seq = ticket.seq(), error = %error, "contact load failed");
                self.view.show_message(&status::load_failed(error));
            }
            LoadOutcome::Stale => {
                debug!(seq = ticket.seq(), "ignoring superseded contact load");
            }
        }

        self.render();
        outcome
    }

    pub fn search(&mut self, query: &str) {
        self.state.set_query(query);
        debug!(query = self.state.query(), "search query changed");
        self.render();
    }

    /// Returns whether the page changed; out-of-range moves are ignored.
    pub fn go_to_page(&mut self, delta: isize) -> bool {
        let moved = self.state.step_page(delta);
        if moved {
            self.render();
        }
        moved
    }

    /// Validates, posts, then reloads and shows the last page. State is left
    /// untouched when validation or the post fails.
    pub async fn add_contact(
        &mut self,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<AddContactAck, ContactError> {
        let contact = match NewContact::validated(first_name, last_name, phone) {
            Ok(contact) => contact,
            Err(err) => {
                debug!(error = %err, "rejected incomplete contact form");
                self.view.show_message(&status::add_failed(&err));
                return Err(err);
            }
        };

        self.view.show_message(status::SENDING);
        let ack = match self.api.add_contact(&contact).await {
            Ok(ack) => ack,
            Err(err) => {
                warn!(error = %err, "add contact failed");
                self.view.show_message(&status::add_failed(&err));
                return Err(err);
            }
        };

        self.view.show_message(status::ADDED);
        self.view.clear_form();
        self.load_all().await;
        self.state.jump_to_last_page();
        self.render();
        Ok(ack)
    }

    pub fn render(&mut self) -> RenderedPage {
        self.state.clamp_page();
        let page = render_page(&self.state);
        self.view.show_page(&page);
        page
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
