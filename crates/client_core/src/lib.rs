pub mod config;
pub mod controller;
pub mod paging;
pub mod render;
pub mod state;
pub mod status;
pub mod transport;
pub mod view;

pub use config::{load_settings, Settings};
pub use controller::ContactListController;
pub use render::{escape_html, render_page, Cell, RenderedPage};
pub use state::{DirectoryState, GridShape, LoadOutcome, LoadTicket};
pub use transport::{ContactApi, HttpContactApi};
pub use view::{DirectoryView, HtmlView};
