//! Minimal query surface over a parsed HTML document.
//!
//! The analyzer only ever needs "first match", "all matches", an attribute
//! lookup and the text content of an element, so that is all this exposes.

use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document. Malformed markup is recovered, never rejected.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn select_first(&self, selector: &Selector) -> Option<Node<'_>> {
        self.html.select(selector).next().map(Node)
    }

    /// All matches in document order.
    pub fn select_all(&self, selector: &Selector) -> Vec<Node<'_>> {
        self.html.select(selector).map(Node).collect()
    }
}

#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_select_first_returns_earliest_match() {
        let doc = Document::parse("<p>one</p><p>two</p>");
        let node = doc.select_first(&selector("p")).unwrap();
        assert_eq!(node.text(), "one");
    }

    #[test]
    fn test_select_first_none_when_absent() {
        let doc = Document::parse("<html><body></body></html>");
        assert!(doc.select_first(&selector("title")).is_none());
    }

    #[test]
    fn test_select_all_keeps_document_order() {
        let doc = Document::parse(r#"<img src="a.png"><div><img src="b.png"></div><img src="c.png">"#);
        let srcs: Vec<_> = doc
            .select_all(&selector("img"))
            .iter()
            .filter_map(|n| n.attribute("src"))
            .collect();
        assert_eq!(srcs, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_text_collects_nested_text() {
        let doc = Document::parse("<h1>Hello <em>big</em> world</h1>");
        let node = doc.select_first(&selector("h1")).unwrap();
        assert_eq!(node.text(), "Hello big world");
    }

    #[test]
    fn test_attribute_missing_vs_empty() {
        let doc = Document::parse(r#"<img src="x.png" alt="">"#);
        let node = doc.select_first(&selector("img")).unwrap();
        assert_eq!(node.attribute("alt"), Some(""));
        assert_eq!(node.attribute("title"), None);
    }
}
