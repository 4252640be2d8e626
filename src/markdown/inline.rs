use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::escape::{escape_html, Escaped};

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid link regex"))
}

// `regex` has no backreferences, so each delimiter gets its own branch.
fn bold_regex() -> &'static Regex {
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("Invalid bold regex"))
}

/// Apply links and bold to an escaped fragment.
///
/// Links are substituted first, then bold. The bold pass runs over the whole
/// fragment, anchors included, so `__x__` inside a URL still turns bold.
pub fn inline_markup(text: &Escaped) -> String {
    let linked = link_regex().replace_all(text.as_str(), |caps: &Captures| {
        // The label is already escaped; the URL gets a second pass for the attribute.
        format!("<a href=\"{}\">{}</a>", escape_html(&caps[2]), &caps[1])
    });

    bold_regex()
        .replace_all(&linked, |caps: &Captures| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("<strong>{inner}</strong>")
        })
        .into_owned()
}
