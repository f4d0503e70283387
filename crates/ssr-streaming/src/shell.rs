//! Outer HTML shell pieces.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

/// A single `<meta>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    /// Attribute used for the key (`name` or `property`).
    pub attribute: MetaAttribute,
    /// Key, e.g. `description` or `og:title`.
    pub key: String,
    /// Tag content.
    pub content: String,
}

/// Key attribute of a meta tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAttribute {
    Name,
    Property,
}

impl MetaTag {
    /// `<meta name=...>` tag.
    pub fn name(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            attribute: MetaAttribute::Name,
            key: key.into(),
            content: content.into(),
        }
    }

    /// `<meta property=...>` tag (Open Graph).
    pub fn property(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            attribute: MetaAttribute::Property,
            key: key.into(),
            content: content.into(),
        }
    }

    /// Render the tag to HTML.
    pub fn render(&self) -> String {
        let attribute = match self.attribute {
            MetaAttribute::Name => "name",
            MetaAttribute::Property => "property",
        };
        format!(
            r#"<meta {}="{}" content="{}">"#,
            attribute,
            encode_double_quoted_attribute(&self.key),
            encode_double_quoted_attribute(&self.content)
        )
    }
}

/// Page metadata reported by the page renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Page description.
    #[serde(default)]
    pub description: Option<String>,
    /// Preview image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Additional meta tags.
    #[serde(default)]
    pub tags: Vec<MetaTag>,
}

impl PageMeta {
    /// Create metadata with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the preview image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Add an arbitrary meta tag.
    pub fn with_tag(mut self, tag: MetaTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Render the title and meta tags.
    ///
    /// `locale` becomes `og:locale` when given.
    pub fn render(&self, locale: Option<&str>) -> String {
        let mut html = String::new();

        if let Some(title) = &self.title {
            html.push_str(&format!("<title>{}</title>\n", encode_text(title)));
            html.push_str(&MetaTag::property("og:title", title).render());
            html.push('\n');
        }

        if let Some(description) = &self.description {
            html.push_str(&MetaTag::name("description", description).render());
            html.push('\n');
            html.push_str(&MetaTag::property("og:description", description).render());
            html.push('\n');
        }

        if let Some(image) = &self.image {
            html.push_str(&MetaTag::property("og:image", image).render());
            html.push('\n');
        }

        if let Some(locale) = locale {
            html.push_str(&MetaTag::property("og:locale", locale).render());
            html.push('\n');
        }

        for tag in &self.tags {
            html.push_str(&tag.render());
            html.push('\n');
        }

        html
    }
}

/// The markup surrounding rendered page content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OuterHtml {
    /// Everything up to and including the content container's opening tag.
    pub before: String,
    /// Everything from the content container's closing tag to `</html>`.
    pub after: String,
}

impl OuterHtml {
    /// Create from the two fragments.
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Serialize a value as JSON safe to embed inside a `<script>` element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(escape_json_for_script(&serde_json::to_string(value)?))
}

/// Escape `</` so embedded JSON cannot close the surrounding script tag.
pub fn escape_json_for_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// `<link rel="stylesheet">` tag.
pub fn stylesheet_link(href: &str) -> String {
    format!(
        r#"<link rel="stylesheet" href="{}">"#,
        encode_double_quoted_attribute(href)
    )
}

/// `<script src>` tag.
pub fn script_src(src: &str) -> String {
    format!(
        r#"<script src="{}" charset="utf-8"></script>"#,
        encode_double_quoted_attribute(src)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_tag_escapes_content() {
        let tag = MetaTag::name("description", r#"Fish & "chips""#);
        assert_eq!(
            tag.render(),
            r#"<meta name="description" content="Fish &amp; &quot;chips&quot;">"#
        );
    }

    #[test]
    fn test_page_meta_render() {
        let meta = PageMeta::new("Cart <1>")
            .with_description("Your cart")
            .with_image("/cart.png")
            .with_tag(MetaTag::name("robots", "noindex"));

        let html = meta.render(Some("en-US"));

        assert!(html.contains("<title>Cart &lt;1&gt;</title>"));
        assert!(html.contains(r#"<meta property="og:title" content="Cart &lt;1&gt;">"#));
        assert!(html.contains(r#"<meta name="description" content="Your cart">"#));
        assert!(html.contains(r#"<meta property="og:image" content="/cart.png">"#));
        assert!(html.contains(r#"<meta property="og:locale" content="en-US">"#));
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
    }

    #[test]
    fn test_empty_meta_renders_nothing() {
        assert_eq!(PageMeta::default().render(None), "");
    }

    #[test]
    fn test_script_json_escapes_closing_tag() {
        let json = script_json(&serde_json::json!({ "name": "</script><script>alert(1)" })).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains(r"<\/script>"));
    }

    #[test]
    fn test_asset_tags() {
        assert_eq!(
            stylesheet_link("/main.css"),
            r#"<link rel="stylesheet" href="/main.css">"#
        );
        assert_eq!(
            script_src("/main.js"),
            r#"<script src="/main.js" charset="utf-8"></script>"#
        );
    }
}
