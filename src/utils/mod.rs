use std::path::{Component, Path};
use std::time::SystemTime;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use time::OffsetDateTime;

use crate::errors::WikiError;

pub use crate::markdown::escape_html;

/// Characters escaped when a title is used as a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

const MAX_TITLE_CHARS: usize = 200;

/// Check that a title can safely name a file in the entries directory
pub fn validate_title(title: &str) -> Result<&str, WikiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(WikiError::InvalidTitle("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(WikiError::InvalidTitle(format!("title is longer than {} characters", MAX_TITLE_CHARS)));
    }
    if title.starts_with('.') {
        return Err(WikiError::InvalidTitle("title must not start with '.'".to_string()));
    }
    if title.contains(['/', '\\']) || title.chars().any(char::is_control) {
        return Err(WikiError::InvalidTitle("title contains a forbidden character".to_string()));
    }
    Ok(title)
}

/// Reject request paths that could leave the directory they are joined onto
pub fn ensure_safe_path(req_path: &str) -> Result<(), WikiError> {
    for comp in Path::new(req_path).components() {
        match comp {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(WikiError::InvalidPath);
            }
        }
    }
    Ok(())
}

/// URL of an entry page
pub fn entry_href(title: &str) -> String {
    format!("/wiki/{}", utf8_percent_encode(title, PATH_SEGMENT))
}

/// URL of an entry's edit page
pub fn edit_href(title: &str) -> String {
    format!("{}/edit", entry_href(title))
}

/// Stored form of an entry: a level-one heading with the title, then the body
pub fn compose_entry(title: &str, body: &str) -> String {
    format!("# {}\n\n{}", title, body)
}

/// Remove the leading `# {title}` heading added by [`compose_entry`]
pub fn strip_title_heading<'a>(title: &str, content: &'a str) -> &'a str {
    let mut lines = content.splitn(2, '\n');
    let first = lines.next().unwrap_or("");
    match first.trim_end().strip_prefix('#') {
        Some(rest) if rest.starts_with(char::is_whitespace) && rest.trim() == title => {
            lines.next().unwrap_or("").trim_start_matches(['\r', '\n'])
        }
        _ => content,
    }
}

/// Generate last modified metadata HTML
pub fn last_modified_html(modified: Option<SystemTime>) -> String {
    match modified.map(|mtime| mtime.duration_since(SystemTime::UNIX_EPOCH)) {
        Some(Ok(dur)) => {
            let secs = dur.as_secs() as i64;
            let datetime = OffsetDateTime::from_unix_timestamp(secs).ok();
            if let Some(dt) = datetime {
                let fmt = time::format_description::well_known::Rfc3339;
                if let Ok(s) = dt.format(&fmt) {
                    return format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s));
                }
            }
            String::new()
        }
        _ => String::new(),
    }
}

/// Determine content type for a file based on its extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase()) {
        Some(ref ext) if ext == "html" => "text/html; charset=utf-8",
        Some(ref ext) if ext == "css" => "text/css; charset=utf-8",
        Some(ref ext) if ext == "js" => "application/javascript; charset=utf-8",
        Some(ref ext) if ext == "svg" => "image/svg+xml",
        Some(ref ext) if ext == "png" => "image/png",
        Some(ref ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ref ext) if ext == "ico" => "image/x-icon",
        Some(ref ext) if ext == "txt" => "text/plain; charset=utf-8",
        Some(ref ext) if ext == "md" => "text/markdown; charset=utf-8",
        _ => "application/octet-stream",
    }
}
