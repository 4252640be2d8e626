use axum::{
    body::Body,
    extract::{Form, Path as AxumPath, Query, State},
    http::{header, HeaderValue, Response},
    response::{Html, IntoResponse, Redirect},
};

use crate::components::{NavigationComponent, TemplateComponent};
use crate::errors::WikiError;
use crate::services::{FileService, MarkdownService, SearchService};
use crate::types::{AppState, EditEntryForm, NewEntryForm, SearchOutcome, SearchParams, TemplateContext};
use crate::utils::{
    compose_entry, content_type_for, edit_href, ensure_safe_path, entry_href, escape_html,
    last_modified_html, strip_title_heading, validate_title,
};

const DUPLICATE_TITLE_MESSAGE: &str = "An entry with this title already exists.";

/// Handle the index page: every entry, linked
pub async fn handle_index(State(state): State<AppState>) -> Result<impl IntoResponse, WikiError> {
    let file_service = FileService::new(state.entries_dir.as_ref().clone());
    let entries = file_service.list_entries()?;
    log::info!("Serving index with {} entries", entries.len());

    let mut content = String::new();
    content.push_str("<h1>All Pages</h1>");
    content.push_str(&render_title_list(&entries));
    Ok(render_page(&state, "Encyclopedia", "", &content))
}

/// Handle entry requests
pub async fn handle_entry(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
) -> Result<impl IntoResponse, WikiError> {
    log::info!("Entry request received: '{}'", title);
    let title = entry_title(&title)?;

    let file_service = FileService::new(state.entries_dir.as_ref().clone());
    let content = find_entry(&file_service, title)?;
    let html = MarkdownService::new().render(Some(&content));

    let mut body = String::new();
    body.push_str(&last_modified_html(file_service.last_modified(title)));
    body.push_str(&format!("<article class=\"entry\">{}</article>", html));
    body.push_str(&format!(
        "<p class=\"entry-actions\"><a href=\"{}\">Edit this page</a></p>",
        escape_html(&edit_href(title))
    ));
    Ok(render_page(&state, title, "", &body))
}

/// Handle search requests
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response<Body>, WikiError> {
    log::info!("Search request received for query: '{}'", params.q);

    let file_service = FileService::new(state.entries_dir.as_ref().clone());
    let search_service = SearchService::new(file_service);

    match search_service.search(&params.q)? {
        SearchOutcome::Empty => Ok(Redirect::to("/").into_response()),
        SearchOutcome::Exact(title) => Ok(Redirect::to(&entry_href(&title)).into_response()),
        SearchOutcome::Results(results) => {
            let query = params.q.trim();
            let content = render_search_results(query, &results);
            Ok(render_page(&state, "Search", query, &content).into_response())
        }
    }
}

/// Show the create form
pub async fn handle_new_form(State(state): State<AppState>) -> impl IntoResponse {
    render_page(&state, "Create New Page", "", &render_new_form("", "", None))
}

/// Create an entry from the submitted form
pub async fn handle_new_submit(
    State(state): State<AppState>,
    Form(form): Form<NewEntryForm>,
) -> Result<Response<Body>, WikiError> {
    let raw_title = form.title.trim();
    let content = form.content.trim();
    log::info!("Create request received for '{}'", raw_title);

    let title = match validate_title(raw_title) {
        Ok(title) => title,
        Err(WikiError::InvalidTitle(reason)) => {
            log::warn!("Rejected new entry title '{}': {}", raw_title, reason);
            let message = format!("Invalid title: {}.", reason);
            let form_html = render_new_form(raw_title, content, Some(&message));
            return Ok(render_page(&state, "Create New Page", "", &form_html).into_response());
        }
        Err(e) => return Err(e),
    };

    let file_service = FileService::new(state.entries_dir.as_ref().clone());
    let existing = file_service.list_entries()?;
    if existing.iter().any(|entry| entry.to_lowercase() == title.to_lowercase()) {
        log::warn!("Entry '{}' already exists", title);
        let form_html = render_new_form(title, content, Some(DUPLICATE_TITLE_MESSAGE));
        return Ok(render_page(&state, "Create New Page", "", &form_html).into_response());
    }

    file_service.save_entry(title, &compose_entry(title, content))?;
    log::info!("Created entry '{}'", title);
    Ok(Redirect::to(&entry_href(title)).into_response())
}

/// Show the edit form, without the title heading the entry was stored with
pub async fn handle_edit_form(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
) -> Result<impl IntoResponse, WikiError> {
    let title = entry_title(&title)?;
    let file_service = FileService::new(state.entries_dir.as_ref().clone());
    let content = find_entry(&file_service, title)?;
    let body = strip_title_heading(title, &content);

    let page_title = format!("Edit {}", title);
    Ok(render_page(&state, &page_title, "", &render_edit_form(title, body)))
}

/// Save an edited entry
pub async fn handle_edit_submit(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
    Form(form): Form<EditEntryForm>,
) -> Result<impl IntoResponse, WikiError> {
    log::info!("Edit request received for '{}'", title);
    let title = entry_title(&title)?;

    let file_service = FileService::new(state.entries_dir.as_ref().clone());
    if !file_service.entry_exists(title) {
        return Err(WikiError::NotFound(title.to_string()));
    }

    file_service.save_entry(title, &compose_entry(title, form.content.trim()))?;
    log::info!("Updated entry '{}'", title);
    Ok(Redirect::to(&entry_href(title)))
}

/// Redirect to a random entry, or home when there are none
pub async fn handle_random(State(state): State<AppState>) -> Result<impl IntoResponse, WikiError> {
    let file_service = FileService::new(state.entries_dir.as_ref().clone());
    let search_service = SearchService::new(file_service);

    match search_service.random_entry()? {
        Some(title) => {
            log::info!("Random entry: '{}'", title);
            Ok(Redirect::to(&entry_href(&title)))
        }
        None => {
            log::info!("Random entry requested but the encyclopedia is empty");
            Ok(Redirect::to("/"))
        }
    }
}

/// Handle static file requests
pub async fn handle_static(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<impl IntoResponse, WikiError> {
    ensure_safe_path(&path)?;
    let requested = state.static_dir.join(&path);

    if !requested.is_file() {
        return Err(WikiError::NotFound(path));
    }

    let bytes = std::fs::read(&requested)?;
    let mut resp = Response::new(Body::from(bytes));
    resp.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type_for(&requested)));
    Ok(resp)
}

/// Normalise a title taken from the URL path. An unusable title is "not found".
fn entry_title(raw: &str) -> Result<&str, WikiError> {
    validate_title(raw).map_err(|e| match e {
        WikiError::InvalidTitle(_) => WikiError::NotFound(raw.to_string()),
        other => other,
    })
}

/// Read an entry for display
fn find_entry(file_service: &FileService, title: &str) -> Result<String, WikiError> {
    file_service.get_entry(title)?.ok_or_else(|| WikiError::NotFound(title.to_string()))
}

fn render_page(state: &AppState, title: &str, query: &str, content: &str) -> Html<String> {
    let sidebar = NavigationComponent::new().build_sidebar_html(query);
    let templates = TemplateComponent::new(state.static_dir.as_path());
    Html(templates.render_page(&TemplateContext {
        title: title.to_string(),
        content: content.to_string(),
        sidebar,
    }))
}

fn render_title_list(titles: &[String]) -> String {
    let mut html = String::new();
    html.push_str("<ul class=\"entries\">\n");
    for title in titles {
        html.push_str(&format!(
            "  <li><a href=\"{}\">{}</a></li>\n",
            escape_html(&entry_href(title)),
            escape_html(title)
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn render_search_results(query: &str, results: &[String]) -> String {
    let mut content = String::new();
    content.push_str("<div class=\"search-results\">");
    content.push_str(&format!("<h1 class=\"search-header\">Search Results for \"{}\"</h1>", escape_html(query)));
    content.push_str(&format!(
        "<p class=\"results-count\">Found {} result{}</p>",
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    ));

    if results.is_empty() {
        content.push_str("<p class=\"no-results\">No entries match your search.</p>");
        content.push_str("<p><a href=\"/new\">Create a new page</a></p>");
    } else {
        content.push_str(&render_title_list(results));
    }

    content.push_str("</div>");
    content
}

fn render_error(message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"form-error\">{}</p>", escape_html(m)))
        .unwrap_or_default()
}

fn render_new_form(title: &str, content: &str, error: Option<&str>) -> String {
    format!(
        "<h1>Create New Page</h1>{}<form class=\"entry-form\" action=\"/new\" method=\"post\"><label for=\"title\">Title</label><input id=\"title\" type=\"text\" name=\"title\" value=\"{}\" required><label for=\"content\">Content (Markdown)</label><textarea id=\"content\" name=\"content\" rows=\"20\">{}</textarea><button type=\"submit\">Save</button></form>",
        render_error(error),
        escape_html(title),
        escape_html(content)
    )
}

fn render_edit_form(title: &str, content: &str) -> String {
    format!(
        "<h1>Edit {}</h1><form class=\"entry-form\" action=\"{}\" method=\"post\"><label for=\"content\">Content (Markdown)</label><textarea id=\"content\" name=\"content\" rows=\"20\">{}</textarea><button type=\"submit\">Save</button></form>",
        escape_html(title),
        escape_html(&edit_href(title)),
        escape_html(content)
    )
}
