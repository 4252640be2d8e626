//! Encyclopedia - a small Markdown wiki
//!
//! Entries are `<Title>.md` files rendered by a line-oriented Markdown
//! converter and served by a handful of axum handlers.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod markdown;
pub mod services;
pub mod types;
pub mod utils;

use axum::{routing::get, Router};

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use markdown::markdown_to_html;
pub use types::{AppState, SearchOutcome};
pub use services::{FileService, MarkdownService, SearchService};

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/wiki/:title", get(handlers::handle_entry))
        .route(
            "/wiki/:title/edit",
            get(handlers::handle_edit_form).post(handlers::handle_edit_submit),
        )
        .route("/search", get(handlers::handle_search))
        .route("/new", get(handlers::handle_new_form).post(handlers::handle_new_submit))
        .route("/random", get(handlers::handle_random))
        .route("/static/*path", get(handlers::handle_static))
        .with_state(state)
}
