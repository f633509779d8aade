use super::{SanitizeError, Sanitizer};
use crate::selector::CssSelector;
use select::document::Document;
use select::node::Node;
use select::predicate::Predicate;

const BUZZ_BLOCKS: &[&str] = &[
    ".article__notice",
    ".article__aggr",
    "aside",
    ".media__copyright",
    ".article__meta",
    ".article__info",
    ".article__tags",
];

/// Tags whose content is never article text.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "form", "button", "template",
];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "blockquote", "li", "ul", "ol",
    "h1", "h2", "h3", "h4", "h5", "h6", "table", "tr", "figure", "figcaption", "pre",
];

/// Extracts article text from inosmi.ru pages.
pub struct InosmiSanitizer {
    container: CssSelector,
    buzz: CssSelector,
}

impl Default for InosmiSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl InosmiSanitizer {
    pub fn new() -> Self {
        let buzz = BUZZ_BLOCKS
            .iter()
            .chain(SKIPPED_TAGS)
            .filter_map(|rule| CssSelector::parse(rule))
            .collect();

        Self {
            container: CssSelector::And(vec![
                CssSelector::Tag("div".into()),
                CssSelector::Class("layout-article".into()),
            ]),
            buzz: CssSelector::Or(buzz),
        }
    }

    fn collect_text(&self, node: &Node, out: &mut String) {
        if let Some(text) = node.as_text() {
            out.push_str(text);
            return;
        }

        let Some(name) = node.name() else {
            // comments and the like
            return;
        };
        if self.buzz.matches(node) {
            return;
        }
        if name == "br" {
            out.push('\n');
            return;
        }

        for child in node.children() {
            self.collect_text(&child, out);
        }

        if BLOCK_TAGS.contains(&name) {
            out.push('\n');
        }
    }
}

impl Sanitizer for InosmiSanitizer {
    fn sanitize(&self, html: &str) -> Result<String, SanitizeError> {
        let document = Document::from(html);
        let article = document
            .find(&self.container)
            .next()
            .ok_or(SanitizeError::ArticleNotFound)?;

        let mut raw = String::new();
        self.collect_text(&article, &mut raw);

        let text = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        log::debug!(
            "Sanitized article via {}: {} chars",
            self.container.to_css_string(),
            text.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <html><head><title>ИноСМИ</title><script>var x = 1;</script></head>
        <body>
          <div class="header">Меню сайта</div>
          <div class="layout-article" data-id="260327000">
            <div class="article__meta">04.02.2023</div>
            <h1 class="article__title">Нефть дорожает</h1>
            <div class="article__body">
              <p>Во-первых, он хочет, чтобы<br>цены росли.</p>
              <aside><p>Читайте также</p></aside>
              <div class="media__copyright">© Фото</div>
              <p>Это стало <b>началом</b>!</p>
              <script>track();</script>
              <!-- комментарий -->
            </div>
            <div class="article__tags">нефть, рынок</div>
          </div>
        </body></html>
    "#;

    #[test]
    fn extracts_article_text_without_buzz() {
        let text = InosmiSanitizer::new().sanitize(ARTICLE).unwrap();
        assert_eq!(
            text,
            "Нефть дорожает\nВо-первых, он хочет, чтобы\nцены росли.\nЭто стало началом!"
        );
    }

    #[test]
    fn missing_container_is_article_not_found() {
        let html = r#"<html><body><div class="b-topic__body"><p>Лента</p></div></body></html>"#;
        assert_eq!(
            InosmiSanitizer::new().sanitize(html),
            Err(SanitizeError::ArticleNotFound)
        );
    }

    #[test]
    fn empty_container_gives_empty_text() {
        let html = r#"<div class="layout-article"><aside>реклама</aside></div>"#;
        assert_eq!(InosmiSanitizer::new().sanitize(html).unwrap(), "");
    }

    #[test]
    fn container_must_be_the_layout_div() {
        let sanitizer = InosmiSanitizer::new();
        assert_eq!(sanitizer.container.to_css_string(), "div.layout-article");

        let html = r#"<section class="layout-article"><p>Нефть дорожает</p></section>"#;
        assert_eq!(sanitizer.sanitize(html), Err(SanitizeError::ArticleNotFound));
    }
}
