use crate::render::RenderedPage;

/// Display surface driven by the controller. Implementations only present
/// what they are given; they never reach back into directory state.
pub trait DirectoryView {
    fn show_page(&mut self, page: &RenderedPage);
    fn show_message(&mut self, message: &str);
    /// Resets the add-contact form after a confirmed add.
    fn clear_form(&mut self);
}

/// Keeps the latest markup and status line in memory.
#[derive(Debug, Default, Clone)]
pub struct HtmlView {
    markup: String,
    message: String,
    page: Option<RenderedPage>,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn page(&self) -> Option<&RenderedPage> {
        self.page.as_ref()
    }
}

impl DirectoryView for HtmlView {
    fn show_page(&mut self, page: &RenderedPage) {
        self.markup = page.to_html();
        self.page = Some(page.clone());
    }

    fn show_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    fn clear_form(&mut self) {}
}
