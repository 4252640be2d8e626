pub mod file_service;
pub mod search_service;
pub mod markdown_service;

pub use file_service::FileService;
pub use search_service::SearchService;
pub use markdown_service::MarkdownService;
