use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, render::Cell, ContactListController, DirectoryView, GridShape, HttpContactApi,
    LoadOutcome, RenderedPage,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "contacts", about = "Browse and extend a remote contact directory")]
struct Args {
    /// TOML settings file; defaults to ./contacts.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured endpoint.
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Print the page as HTML markup instead of text.
    #[arg(long, global = true)]
    html: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of the directory.
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// 1-based; pages past the end show the last page.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Add a contact and show the page it lands on.
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
    },
}

/// Status lines go to stderr as they happen; the final page is kept for stdout.
#[derive(Default)]
struct TerminalView {
    page: Option<RenderedPage>,
}

impl DirectoryView for TerminalView {
    fn show_page(&mut self, page: &RenderedPage) {
        self.page = Some(page.clone());
    }

    fn show_message(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn clear_form(&mut self) {}
}

fn format_text(page: &RenderedPage, grid: GridShape) -> String {
    let mut out = String::new();
    if page.show_empty {
        out.push_str("(no contacts)\n");
    }
    for (index, cell) in page.cells.iter().enumerate() {
        if let Cell::Card {
            first_name,
            last_name,
            phone,
        } = cell
        {
            let row = index / grid.cols() + 1;
            let col = index % grid.cols() + 1;
            out.push_str(&format!(
                "[{row},{col}] {first_name} {last_name}  {phone}\n"
            ));
        }
    }
    out.push_str(&page.page_label());
    out.push('\n');
    out
}

/// Loads, filters and steps forward to the 1-based `page`, stopping at the
/// last one. Returns false when the load failed.
async fn run_list<V: DirectoryView>(
    controller: &mut ContactListController<V>,
    search: &str,
    page: usize,
) -> bool {
    let outcome = controller.load_all().await;
    controller.search(search);
    for _ in 1..page.max(1) {
        if !controller.go_to_page(1) {
            break;
        }
    }
    !matches!(outcome, LoadOutcome::Failed { .. })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    settings.validate().context("invalid contacts settings")?;

    let grid = settings.grid();
    let api = HttpContactApi::from_settings(&settings)?;
    let mut controller = ContactListController::new(Arc::new(api), TerminalView::default(), grid);

    let succeeded = match args.command {
        Command::List { search, page } => run_list(&mut controller, &search, page).await,
        Command::Add {
            first_name,
            last_name,
            phone,
        } => controller
            .add_contact(&first_name, &last_name, &phone)
            .await
            .is_ok(),
    };

    if let Some(page) = controller.view().page.as_ref() {
        if args.html {
            print!("{}", page.to_html());
        } else {
            print!("{}", format_text(page, grid));
        }
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
