use std::sync::Arc;
use std::path::PathBuf;

use serde::Deserialize;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub entries_dir: Arc<PathBuf>,
    pub static_dir: Arc<PathBuf>,
}

/// Outcome of a title search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query
    Empty,
    /// A title matched the query exactly, ignoring case
    Exact(String),
    /// Titles containing the query
    Results(Vec<String>),
}

/// Query string for `/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Submitted create form
#[derive(Debug, Default, Deserialize)]
pub struct NewEntryForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Submitted edit form
#[derive(Debug, Default, Deserialize)]
pub struct EditEntryForm {
    #[serde(default)]
    pub content: String,
}

/// Template rendering context
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub content: String,
    pub sidebar: String,
}
