use log::debug;

use crate::markdown::markdown_to_html;

/// Service for handling markdown rendering
#[derive(Clone, Copy, Default)]
pub struct MarkdownService;

impl MarkdownService {
    /// Create a new markdown service
    pub fn new() -> Self {
        Self
    }

    /// Render stored entry text to an HTML fragment.
    ///
    /// `None` stands for an entry with no content and yields an empty fragment.
    pub fn render(&self, content: Option<&str>) -> String {
        let start_time = std::time::Instant::now();
        let html = markdown_to_html(content);
        debug!(
            "Rendered {} bytes of markdown into {} bytes of HTML in {:?}",
            content.map_or(0, str::len),
            html.len(),
            start_time.elapsed()
        );
        html
    }
}
