use std::{fmt, io};
use axum::{http::StatusCode, response::{Html, IntoResponse, Response}};

use crate::markdown::escape_html;

/// Custom error types for the encyclopedia
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound(String),
    InvalidTitle(String),
    InvalidPath,
    Logger(log::SetLoggerError),
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl From<log::SetLoggerError> for WikiError {
    fn from(err: log::SetLoggerError) -> Self {
        WikiError::Logger(err)
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::NotFound(title) => write!(f, "Entry not found: {}", title),
            WikiError::InvalidTitle(reason) => write!(f, "Invalid title: {}", reason),
            WikiError::InvalidPath => write!(f, "Invalid path"),
            WikiError::Logger(e) => write!(f, "Logger error: {}", e),
        }
    }
}

impl std::error::Error for WikiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WikiError::Io(e) => Some(e),
            WikiError::Logger(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound(title) => {
                log::warn!("Entry not found: '{}'", title);
                (StatusCode::NOT_FOUND, Html(not_found_page(&title))).into_response()
            }
            WikiError::InvalidTitle(reason) => {
                (StatusCode::BAD_REQUEST, format!("Invalid title: {}", reason)).into_response()
            }
            WikiError::InvalidPath => (StatusCode::BAD_REQUEST, "Invalid path").into_response(),
            WikiError::Io(e) => {
                log::error!("I/O error while handling request: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("I/O error: {}", e),
                )
                    .into_response()
            }
            WikiError::Logger(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Logger error: {}", e),
            )
                .into_response(),
        }
    }
}

fn not_found_page(title: &str) -> String {
    format!(r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>404 - Not Found</title>
    <link rel="stylesheet" href="/static/css/encyclopedia.css">
</head>
<body>
    <div class="error-page">
        <div class="error-icon">404</div>
        <h1 class="error-title">Page Not Found</h1>
        <p class="error-message">The requested page &quot;{}&quot; was not found.</p>
        <div class="error-actions">
            <a href="/" class="error-btn primary">Go Home</a>
            <a href="/new" class="error-btn secondary">Create New Page</a>
        </div>
    </div>
</body>
</html>"#, escape_html(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn not_found_is_a_404() {
        let resp = WikiError::NotFound("Missing".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_title_is_a_400() {
        let resp = WikiError::InvalidTitle("empty".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_page_escapes_title() {
        let page = not_found_page("<b>");
        assert!(page.contains("&lt;b&gt;"));
        assert!(!page.contains("<b>"));
    }

    #[test]
    fn io_error_converts() {
        let err: WikiError = io::Error::new(io::ErrorKind::Other, "disk").into();
        assert_eq!(err.to_string(), "I/O error: disk");
        assert!(std::error::Error::source(&err).is_some());
    }

    struct NoopLogger;

    impl log::Log for NoopLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            false
        }
        fn log(&self, _: &log::Record) {}
        fn flush(&self) {}
    }

    static NOOP_LOGGER: NoopLogger = NoopLogger;

    #[test]
    fn logger_error_keeps_its_source() {
        let _ = log::set_logger(&NOOP_LOGGER);
        let err: WikiError = log::set_logger(&NOOP_LOGGER).unwrap_err().into();
        assert!(err.to_string().starts_with("Logger error:"));
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(std::error::Error::source(boxed.as_ref()).is_some());
    }
}
