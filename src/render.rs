// Markdown rendering - pure functions, no state

use comrak::{markdown_to_html, Options};

/// Render Markdown to an HTML fragment. Deterministic; all state lives in
/// the caller. Raw inline HTML (the edit affordance, the home page's New
/// link) passes through unsanitized.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::default();
    options.render.unsafe_ = true;
    markdown_to_html(markdown, &options)
}

/// Seed content for a page that has never been saved: a heading named
/// after the slug.
pub fn default_template(slug: &str) -> String {
    format!("# {}\n", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_heading() {
        let html = render_markdown("# hello");
        assert!(html.contains("<h1>hello</h1>"));
    }

    #[test]
    fn default_template_names_the_slug() {
        assert_eq!(default_template("notes"), "# notes\n");
        let html = render_markdown(&default_template("notes"));
        assert!(html.contains("<h1>notes</h1>"));
    }
}
