//! Directory state owned by the controller and the load sequencing that
//! keeps it consistent across overlapping reloads.

use shared::{domain::Contact, error::ContactError};
use tracing::debug;

use crate::paging::{self, normalize_query};

pub const DEFAULT_GRID_ROWS: usize = 3;
pub const DEFAULT_GRID_COLS: usize = 5;
/// Largest accepted row or column count.
pub const MAX_GRID_DIM: usize = 64;

/// Dimensions of the card grid. One page holds exactly `rows * cols` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    /// Each dimension is clamped to `1..=MAX_GRID_DIM`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.clamp(1, MAX_GRID_DIM),
            cols: cols.clamp(1, MAX_GRID_DIM),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn page_size(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_ROWS, DEFAULT_GRID_COLS)
    }
}

/// Issued by [`DirectoryState::begin_load`]. Only the most recently issued
/// ticket may replace the contact list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    Failed { error: ContactError },
    /// A newer load was started after this one; the response was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct DirectoryState {
    contacts: Vec<Contact>,
    query: String,
    current_page: usize,
    grid: GridShape,
    latest_load: u64,
}

impl DirectoryState {
    pub fn new(grid: GridShape) -> Self {
        Self {
            contacts: Vec::new(),
            query: String::new(),
            current_page: 0,
            grid,
            latest_load: 0,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn page_size(&self) -> usize {
        self.grid.page_size()
    }

    pub fn filtered(&self) -> Vec<&Contact> {
        paging::filter_contacts(&self.contacts, &self.query)
    }

    pub fn filtered_count(&self) -> usize {
        self.contacts
            .iter()
            .filter(|contact| paging::matches(contact, &self.query))
            .count()
    }

    pub fn total_pages(&self) -> usize {
        paging::total_pages(self.filtered_count(), self.page_size())
    }

    /// Stores the normalized query and returns to the first page.
    pub fn set_query(&mut self, raw: &str) {
        self.query = normalize_query(raw);
        self.current_page = 0;
    }

    /// Moves by `delta` pages when the target exists. Returns whether the
    /// page changed.
    pub fn step_page(&mut self, delta: isize) -> bool {
        self.clamp_page();
        let total = self.total_pages();
        let Some(target) = self.current_page.checked_add_signed(delta) else {
            return false;
        };
        if target >= total || target == self.current_page {
            return false;
        }
        self.current_page = target;
        true
    }

    pub fn jump_to_last_page(&mut self) {
        self.current_page = paging::last_page(self.filtered_count(), self.page_size());
    }

    pub fn clamp_page(&mut self) {
        self.current_page =
            paging::clamp_page(self.current_page, self.filtered_count(), self.page_size());
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        LoadTicket(self.latest_load)
    }

    pub fn is_latest(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest_load
    }

    /// Applies a load response. Contacts are replaced wholesale on success and
    /// cleared on failure, unless the ticket has been superseded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Contact>, ContactError>,
    ) -> LoadOutcome {
        if !self.is_latest(ticket) {
            debug!(
                seq = ticket.0,
                latest = self.latest_load,
                "discarding superseded contact load"
            );
            return LoadOutcome::Stale;
        }

        let outcome = match result {
            Ok(contacts) => {
                let count = contacts.len();
                self.contacts = contacts;
                LoadOutcome::Applied { count }
            }
            Err(error) => {
                self.contacts.clear();
                LoadOutcome::Failed { error }
            }
        };
        self.clamp_page();
        outcome
    }
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self::new(GridShape::default())
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
