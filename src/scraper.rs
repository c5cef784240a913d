use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;
use tracing::debug;
use crate::error::{AppError, Result};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(45))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .build()
        .unwrap_or_default()
});

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

static TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, h1, h2, h3, h4, h5, h6, li, a, td, th, div, span")
        .expect("Failed to parse text selector")
});

const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Result of scraping one page.
#[derive(Debug, Clone)]
pub struct ScrapedPage {
    pub html_length: usize,
    pub body_length: usize,
    pub cleaned: String,
}

pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

pub async fn scrape_and_clean(url: &str) -> Result<ScrapedPage> {
    debug!(%url, "fetching page");
    let html = fetch_html(url).await?;
    clean_html(&html)
}

/// Extracts the readable text of `<body>`, one element per line.
pub fn clean_html(html: &str) -> Result<ScrapedPage> {
    let document = Html::parse_document(html);
    let body = document
        .select(&BODY_SELECTOR)
        .next()
        .ok_or_else(|| AppError::ParseError("no <body> found".to_string()))?;

    let mut buf = String::new();
    for element in body.select(&TEXT_SELECTOR) {
        let text = visible_text(element);
        let text = text.trim();
        if !text.is_empty() {
            buf.push_str(text);
            buf.push('\n');
        }
    }

    Ok(ScrapedPage {
        html_length: html.len(),
        body_length: body.inner_html().len(),
        cleaned: normalize_whitespace(&buf),
    })
}

/// Text under `element`, ignoring anything inside script/style/noscript.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| match a.value() {
            Node::Element(el) => SKIPPED_TAGS.contains(&el.name()),
            _ => false,
        });
        if !hidden {
            out.push_str(text);
        }
    }
    out
}

pub fn normalize_whitespace(s: &str) -> String {
    s.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits `s` into pieces of at most `max` characters. `max == 0` keeps it whole.
pub fn chunk_string(s: &str, max: usize) -> Vec<&str> {
    if max == 0 || s.chars().count() <= max {
        return vec![s];
    }

    let mut out = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in s.char_indices() {
        if count == max {
            out.push(&s[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    out.push(&s[start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_line_endings_and_inner_spaces() {
        let raw = "  Hello   world \r\n\r\n\tsecond\rline   three  \n\n";
        assert_eq!(normalize_whitespace(raw), "Hello world\nsecond\nline three");
    }

    #[test]
    fn cleans_body_text_and_drops_scripts() {
        let html = r#"<html><head><title>t</title></head><body>
            <h1>Title</h1>
            <script>var x = 1;</script>
            <p>First   paragraph <style>.a{}</style></p>
            <ul><li>item</li></ul>
        </body></html>"#;

        let page = clean_html(html).unwrap();
        assert_eq!(page.cleaned, "Title\nFirst paragraph\nitem");
        assert_eq!(page.html_length, html.len());
        assert!(page.body_length > 0);
    }

    #[test]
    fn nested_elements_repeat_their_text() {
        let html = "<html><body><div><span>inner</span></div></body></html>";
        let page = clean_html(html).unwrap();
        assert_eq!(page.cleaned, "inner\ninner");
    }

    #[test]
    fn chunks_on_char_boundaries() {
        assert_eq!(chunk_string("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(chunk_string("héllo", 2), vec!["hé", "ll", "o"]);
        assert_eq!(chunk_string("short", 100), vec!["short"]);
        assert_eq!(chunk_string("whole", 0), vec!["whole"]);
    }
}
