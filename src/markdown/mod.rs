//! Line-oriented Markdown to HTML conversion.
//!
//! Recognises ATX headings (`#` to `######`), flat unordered lists (`-`, `*`,
//! `+`), paragraphs, `[label](url)` links and `**bold**` / `__bold__`. Anything
//! else is paragraph text. Literal text is escaped before inline markup adds
//! its own tags, and the result is a fragment with one block per line.

mod escape;
mod inline;

use std::sync::OnceLock;

use regex::Regex;

pub use escape::{escape_html, Escaped};
pub use inline::inline_markup;

fn heading_regex() -> &'static Regex {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADING_REGEX.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("Invalid heading regex"))
}

// `\r\n` comes first so it counts as a single break.
fn line_break_regex() -> &'static Regex {
    static LINE_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINE_BREAK_REGEX.get_or_init(|| {
        Regex::new("\r\n|[\n\r\x0B\x0C\x1C-\x1E\u{85}\u{2028}\u{2029}]").expect("Invalid line break regex")
    })
}

fn list_item_regex() -> &'static Regex {
    static LIST_ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
    LIST_ITEM_REGEX.get_or_init(|| Regex::new(r"^[-*+]\s+(.*)$").expect("Invalid list item regex"))
}

/// A single input line after trailing whitespace is stripped
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading { level: usize, text: &'a str },
    ListItem(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line.is_empty() {
            return Line::Blank;
        }
        if let Some(caps) = heading_regex().captures(line) {
            let level = caps.get(1).map_or(0, |m| m.len());
            let text = caps.get(2).map_or("", |m| m.as_str()).trim();
            return Line::Heading { level, text };
        }
        if let Some(caps) = list_item_regex().captures(line) {
            return Line::ListItem(caps.get(1).map_or("", |m| m.as_str()).trim());
        }
        Line::Text(line)
    }
}

/// The block currently being built. A pending paragraph and an open list are
/// mutually exclusive.
#[derive(Debug)]
enum Block<'a> {
    Idle,
    Paragraph(Vec<&'a str>),
    List,
}

struct Renderer<'a> {
    block: Block<'a>,
    output: Vec<String>,
}

impl<'a> Renderer<'a> {
    fn new() -> Self {
        Self { block: Block::Idle, output: Vec::new() }
    }

    fn feed(&mut self, raw: &'a str) {
        match Line::classify(raw.trim_end()) {
            Line::Blank => self.end_block(),
            Line::Heading { level, text } => {
                self.end_block();
                self.output.push(format!("<h{level}>{}</h{level}>", markup(text)));
            }
            Line::ListItem(text) => {
                self.flush_paragraph();
                if !matches!(self.block, Block::List) {
                    self.output.push("<ul>".to_string());
                    self.block = Block::List;
                }
                self.output.push(format!("<li>{}</li>", markup(text)));
            }
            Line::Text(text) => {
                if let Block::Paragraph(lines) = &mut self.block {
                    lines.push(text);
                } else {
                    self.close_list();
                    self.block = Block::Paragraph(vec![text]);
                }
            }
        }
    }

    fn flush_paragraph(&mut self) {
        if matches!(self.block, Block::Paragraph(_)) {
            self.end_block();
        }
    }

    fn close_list(&mut self) {
        if matches!(self.block, Block::List) {
            self.end_block();
        }
    }

    fn end_block(&mut self) {
        match std::mem::replace(&mut self.block, Block::Idle) {
            Block::Idle => {}
            Block::List => self.output.push("</ul>".to_string()),
            Block::Paragraph(lines) => {
                let joined = lines.iter().map(|line| line.trim()).collect::<Vec<_>>().join(" ");
                let text = joined.trim();
                if !text.is_empty() {
                    self.output.push(format!("<p>{}</p>", markup(text)));
                }
            }
        }
    }

    fn finish(mut self) -> String {
        self.end_block();
        self.output.join("\n")
    }
}

fn markup(raw: &str) -> String {
    inline_markup(&Escaped::new(raw))
}

/// Convert Markdown to an HTML fragment.
///
/// `None` means there is no document at all and renders as the empty string,
/// same as empty input. Conversion never fails.
pub fn markdown_to_html(markdown: Option<&str>) -> String {
    let Some(markdown) = markdown else {
        return String::new();
    };

    let mut renderer = Renderer::new();
    for line in line_break_regex().split(markdown) {
        renderer.feed(line);
    }
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn render(markdown: &str) -> String {
        markdown_to_html(Some(markdown))
    }

    #[rstest]
    #[case("# Title", "<h1>Title</h1>")]
    #[case("###### Six", "<h6>Six</h6>")]
    #[case("##   Spaced out   ", "<h2>Spaced out</h2>")]
    #[case("- a\n- b", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>")]
    #[case("* a\n+ b\n- c", "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>")]
    #[case("Hello **world**", "<p>Hello <strong>world</strong></p>")]
    #[case("[x](http://e.com)", r#"<p><a href="http://e.com">x</a></p>"#)]
    #[case("foo\nbar", "<p>foo bar</p>")]
    #[case("foo\n\nbar", "<p>foo</p>\n<p>bar</p>")]
    #[case("  indented\n    more  ", "<p>indented more</p>")]
    #[case("# **Bold** [home](/)", r#"<h1><strong>Bold</strong> <a href="/">home</a></h1>"#)]
    fn renders_supported_grammar(#[case] markdown: &str, #[case] expected: &str) {
        assert_eq!(render(markdown), expected);
    }

    #[rstest]
    #[case("#NoSpace", "<p>#NoSpace</p>")]
    #[case("####### seven", "<p>####### seven</p>")]
    #[case("#", "<p>#</p>")]
    #[case("-not a list", "<p>-not a list</p>")]
    #[case("**not a list**", "<p><strong>not a list</strong></p>")]
    #[case("  - indented", "<p>- indented</p>")]
    #[case("**unclosed", "<p>**unclosed</p>")]
    fn unmatched_constructs_fall_through_to_paragraphs(#[case] markdown: &str, #[case] expected: &str) {
        assert_eq!(render(markdown), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("\n\n   \n\t\n"))]
    fn empty_input_renders_nothing(#[case] markdown: Option<&str>) {
        assert_eq!(markdown_to_html(markdown), "");
    }

    #[test]
    fn script_tags_are_escaped() {
        assert_eq!(
            render("Hi <script>alert('x')</script>"),
            "<p>Hi &lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn headings_and_items_are_escaped() {
        assert_eq!(
            render("# a < b\n- \"q\" & co"),
            "<h1>a &lt; b</h1>\n<ul>\n<li>&quot;q&quot; &amp; co</li>\n</ul>"
        );
    }

    #[test]
    fn list_closes_before_heading() {
        assert_eq!(render("- a\n# H\n- b"), "<ul>\n<li>a</li>\n</ul>\n<h1>H</h1>\n<ul>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn list_closes_at_blank_line() {
        assert_eq!(render("- a\n\n- b"), "<ul>\n<li>a</li>\n</ul>\n<ul>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn paragraph_flushes_before_list() {
        assert_eq!(render("intro\nline\n- a\n- b"), "<p>intro line</p>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn text_after_list_closes_it_first() {
        assert_eq!(
            render("- a\ntrailing\n- b"),
            "<ul>\n<li>a</li>\n</ul>\n<p>trailing</p>\n<ul>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn paragraph_flushes_before_heading() {
        assert_eq!(render("para\n## Next"), "<p>para</p>\n<h2>Next</h2>");
    }

    #[test]
    fn crlf_and_lone_cr_split_lines() {
        assert_eq!(render("# T\r\nbody\rmore"), "<h1>T</h1>\n<p>body more</p>");
    }

    #[test]
    fn unicode_and_control_breaks_split_lines() {
        assert_eq!(
            render("# A\u{2028}- b\x0Cc\u{85}d\x0Be\u{2029}\x1C\x1Df\x1Eg"),
            "<h1>A</h1>\n<ul>\n<li>b</li>\n</ul>\n<p>c d e</p>\n<p>f g</p>"
        );
    }

    #[test]
    fn long_list_opens_and_closes_once() {
        let markdown = (0..50).map(|i| format!("- item {i}")).collect::<Vec<_>>().join("\n");
        let html = render(&markdown);
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("</ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 50);
        assert!(html.starts_with("<ul>\n"));
        assert!(html.ends_with("\n</ul>"));
    }

    #[test]
    fn rerendering_output_stays_inert() {
        let once = render("# T\n<script>x</script> **b** [l](u)");
        let twice = render(&once);
        assert!(!twice.contains("<script"));
        assert!(!twice.contains("<h1>"));
        assert!(!twice.contains("<a "));
        assert!(twice.contains("&amp;lt;script&amp;gt;"));
    }

    fn strip_known_tags(html: &str) -> String {
        let tags = Regex::new(r#"</?(h[1-6]|ul|li|p|strong|a)>|<a href="[^"<>]*">"#).expect("Invalid tag regex");
        tags.replace_all(html, "").into_owned()
    }

    #[rstest]
    #[case("<img src=x onerror=alert(1)>")]
    #[case("# <h1>\"'&")]
    #[case("- <li>\n- </ul>")]
    #[case("[<b>](javascript:\"x\")")]
    #[case("**<i>** __'__ & &amp;")]
    #[case("a > b\nc < d\n\n'quoted' \"double\"")]
    fn only_renderer_tags_are_live(#[case] markdown: &str) {
        let text = strip_known_tags(&render(markdown));
        assert!(!text.contains(['<', '>', '"', '\'']), "unescaped markup in {text:?}");
        let entity = Regex::new(r"^&(amp|lt|gt|quot|#x27);").expect("Invalid entity regex");
        for (idx, _) in text.match_indices('&') {
            assert!(entity.is_match(&text[idx..]), "bare ampersand in {text:?}");
        }
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(Line::classify(""), Line::Blank);
        assert_eq!(Line::classify("### x "), Line::Heading { level: 3, text: "x" });
        assert_eq!(Line::classify("+  item"), Line::ListItem("item"));
        assert_eq!(Line::classify("  text"), Line::Text("  text"));
    }
}
