use log::debug;

use crate::utils::escape_html;

const NAV_LINKS: [(&str, &str); 3] = [
    ("/", "Home"),
    ("/new", "Create New Page"),
    ("/random", "Random Page"),
];

/// Component for the sidebar: site name, search box and navigation links
#[derive(Clone, Copy, Default)]
pub struct NavigationComponent;

impl NavigationComponent {
    /// Create a new navigation component
    pub fn new() -> Self {
        Self
    }

    /// Build sidebar HTML, pre-filling the search box with `query`
    pub fn build_sidebar_html(&self, query: &str) -> String {
        debug!("Building sidebar HTML (query: '{}')", query);

        let mut html = String::new();
        html.push_str("<div class=\"sidebar-nav\">");
        html.push_str("<h2 class=\"site-name\">Wiki</h2>");

        html.push_str("<form class=\"search\" action=\"/search\" method=\"get\">");
        html.push_str(&format!(
            "<input type=\"text\" name=\"q\" placeholder=\"Search Encyclopedia\" value=\"{}\">",
            escape_html(query)
        ));
        html.push_str("</form>");

        html.push_str("<ul class=\"nav-list\">");
        for (href, label) in NAV_LINKS {
            html.push_str(&format!("<li><a href=\"{}\">{}</a></li>", href, label));
        }
        html.push_str("</ul>");
        html.push_str("</div>");
        html
    }
}
