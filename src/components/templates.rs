use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use log::debug;
use regex::{Captures, Regex};

use crate::types::TemplateContext;
use crate::utils::escape_html;

const STYLE_LINK: &str = "<link rel=\"stylesheet\" href=\"/static/css/encyclopedia.css\">";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{\{(TITLE|STYLE|SIDEBAR|CONTENT)\}\}").expect("Invalid placeholder regex"))
}

/// Component for handling HTML template rendering
#[derive(Clone)]
pub struct TemplateComponent {
    base_template: PathBuf,
}

impl TemplateComponent {
    /// Create a template component reading `html/base.html` under `static_dir`
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self { base_template: static_dir.into().join("html").join("base.html") }
    }

    /// Render a full page. The title is escaped; content and sidebar are trusted HTML.
    pub fn render_page(&self, context: &TemplateContext) -> String {
        let title = escape_html(&context.title);

        if let Ok(base) = fs::read_to_string(&self.base_template) {
            debug!("Rendering page '{}' with {:?}", context.title, self.base_template);
            // One pass, so placeholder text inside inserted values stays literal.
            return placeholder_regex()
                .replace_all(&base, |caps: &Captures| match &caps[1] {
                    "TITLE" => title.clone(),
                    "STYLE" => STYLE_LINK.to_string(),
                    "SIDEBAR" => context.sidebar.clone(),
                    _ => context.content.clone(),
                })
                .into_owned();
        }

        // Fallback inline shell
        format!(
            "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>{}</title>{}</head><body><div class=\"layout\"><aside class=\"sidebar\">{}</aside><main class=\"content\">{}</main></div></body></html>",
            title, STYLE_LINK, context.sidebar, context.content
        )
    }
}
