//! Client-side filtering and page arithmetic over the loaded contact list.

use shared::domain::Contact;

/// Trimmed, lower-cased form a raw search box value is stored in.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `query` must already be normalized. An empty query matches everything.
pub fn matches(contact: &Contact, query: &str) -> bool {
    query.is_empty() || contact.search_text().contains(query)
}

pub fn filter_contacts<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|contact| matches(contact, query))
        .collect()
}

/// Number of pages needed for `count` items; an empty list still has one page.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

pub fn last_page(count: usize, page_size: usize) -> usize {
    total_pages(count, page_size) - 1
}

pub fn clamp_page(page: usize, count: usize, page_size: usize) -> usize {
    page.min(last_page(count, page_size))
}

/// Items visible on `page`; shorter than `page_size` on the last page and
/// empty when `page` is past the end.
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
#[path = "tests/paging_tests.rs"]
mod tests;
