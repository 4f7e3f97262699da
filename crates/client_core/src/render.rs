//! Projection of [`DirectoryState`] onto a fixed-size grid, plus the markup
//! form of that projection.

use std::fmt::Write as _;

use crate::{paging, state::DirectoryState};

/// Replaces `& < > " '` with their entities in a single left-to-right scan.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Card {
        first_name: String,
        last_name: String,
        phone: String,
    },
    /// Invisible filler keeping the cell count constant.
    Placeholder,
}

impl Cell {
    pub fn is_card(&self) -> bool {
        matches!(self, Cell::Card { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub cells: Vec<Cell>,
    /// Zero-based.
    pub current_page: usize,
    pub total_pages: usize,
    /// True when the filtered list, not just this page, is empty.
    pub show_empty: bool,
}

impl RenderedPage {
    pub fn page_label(&self) -> String {
        format!("page {} of {}", self.current_page + 1, self.total_pages)
    }

    pub fn card_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_card()).count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.cells.len() - self.card_count()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(
            html,
            r#"<section id="grid" class="grid" data-page="{}" data-pages="{}">"#,
            self.current_page + 1,
            self.total_pages
        );
        for cell in &self.cells {
            match cell {
                Cell::Card {
                    first_name,
                    last_name,
                    phone,
                } => {
                    let _ = writeln!(
                        html,
                        r#"  <article class="card"><h3>{} {}</h3><p class="meta">Contact</p><div class="phone">{}</div></article>"#,
                        escape_html(first_name),
                        escape_html(last_name),
                        escape_html(phone)
                    );
                }
                Cell::Placeholder => {
                    html.push_str(
                        "  <article class=\"card placeholder\" style=\"opacity:0\"><div aria-hidden=\"true\"></div></article>\n",
                    );
                }
            }
        }
        html.push_str("</section>\n");
        if self.show_empty {
            html.push_str("<p id=\"emptyState\">No contacts to show.</p>\n");
        } else {
            html.push_str("<p id=\"emptyState\" hidden>No contacts to show.</p>\n");
        }
        let _ = writeln!(
            html,
            r#"<span id="pageInfo">{}</span>"#,
            escape_html(&self.page_label())
        );
        html
    }
}

/// Reads `state` without mutating it; the page index is clamped locally so
/// the output is valid even if the caller has not clamped yet.
pub fn render_page(state: &DirectoryState) -> RenderedPage {
    let page_size = state.page_size();
    let filtered = state.filtered();
    let total_pages = paging::total_pages(filtered.len(), page_size);
    let current_page = paging::clamp_page(state.current_page(), filtered.len(), page_size);

    let mut cells: Vec<Cell> = paging::page_window(&filtered, current_page, page_size)
        .iter()
        .map(|contact| Cell::Card {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone: contact.phone.clone(),
        })
        .collect();
    cells.resize(page_size, Cell::Placeholder);

    RenderedPage {
        cells,
        current_page,
        total_pages,
        show_empty: filtered.is_empty(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
