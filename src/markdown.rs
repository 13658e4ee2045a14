//! Markdown Rendering
//!
//! Renders the agreement terms with pulldown-cmark. Extends plain output with:
//! - Raw HTML in the source is shown as text, never injected
//! - Links open in a new tab
//! - Headings get an anchor id

use pulldown_cmark::{html::push_html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Parse markdown into HTML safe for `inner_html`
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

// State for the event transformer
enum State {
    Normal,
    InLink,
    InHeading { level: HeadingLevel, text: String, inner: Vec<Event<'static>> },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    events.push(Event::Text(raw));
                }
                Event::Start(Tag::Link { dest_url, title, .. }) => {
                    let html = format!(
                        r#"<a href="{}" title="{}" target="_blank" rel="noopener noreferrer">"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::InLink;
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    state = State::InHeading { level, text: String::new(), inner: Vec::new() };
                }
                other => events.push(other),
            },

            State::InLink => match event {
                Event::End(TagEnd::Link) => {
                    events.push(Event::Html(CowStr::from("</a>")));
                    state = State::Normal;
                }
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },

            State::InHeading { level, ref mut text, ref mut inner } => match event {
                Event::End(TagEnd::Heading(_)) => {
                    let tag = heading_tag(level);
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<{tag} id="{}">"#,
                        slugify(text)
                    ))));
                    for e in inner.drain(..) {
                        events.push(e);
                    }
                    events.push(Event::Html(CowStr::from(format!("</{tag}>\n"))));
                    state = State::Normal;
                }
                Event::Text(t) | Event::Code(t) => {
                    text.push_str(&t);
                    inner.push(Event::Text(CowStr::from(t.into_string())));
                }
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    inner.push(Event::Text(CowStr::from(raw.into_string())));
                }
                _ => {}
            },
        }
    }

    events
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("Terms <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let html = parse_markdown("[policy](https://example.com/p?a=1&b=2)");
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("a=1&amp;b=2"));
        assert!(html.contains("policy</a>"));
    }

    #[test]
    fn test_headings_get_anchor() {
        let html = parse_markdown("## 3. Payment Terms");
        assert!(html.contains(r#"<h2 id="3-payment-terms">3. Payment Terms</h2>"#));
    }
}
