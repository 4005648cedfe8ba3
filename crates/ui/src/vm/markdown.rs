use pulldown_cmark::{Parser, html};

/// Render lesson markdown to HTML and sanitize it before it reaches
/// `dangerous_inner_html`.
#[must_use]
pub fn markdown_to_safe_html(source: &str) -> String {
    let parser = Parser::new(source);
    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);
    ammonia::clean(&rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_emphasis() {
        let html = markdown_to_safe_html("Speed limits are **maximums**.");
        assert!(html.contains("<strong>maximums</strong>"));
    }

    #[test]
    fn strips_script_tags() {
        let html = markdown_to_safe_html("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
