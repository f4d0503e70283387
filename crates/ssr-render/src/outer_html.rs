//! Outer HTML generation: the markup around the rendered page content.

use html_escape::encode_double_quoted_attribute;
use ssr_core::ConfigError;
use ssr_streaming::{escape_json_for_script, script_src, stylesheet_link, OuterHtml, PageMeta};

use crate::assets::Assets;
use crate::resolvable::{HtmlHooks, Resolvable};
use crate::store::Parameters;

/// Id of the element the page content is rendered into.
pub const CONTENT_CONTAINER_ID: &str = "react";

/// Everything the outer HTML depends on, passed explicitly.
pub struct OuterHtmlInput<'a> {
    /// Request path.
    pub path: &'a str,
    /// Render parameters from the state initializer.
    pub parameters: &'a Parameters,
    /// Page metadata.
    pub meta: &'a PageMeta,
    /// Asset manifest.
    pub assets: &'a Resolvable<Assets>,
    /// Head/body customization.
    pub html: &'a HtmlHooks,
    /// Client bootstrap script generator.
    pub bootstrap: &'a (dyn Fn() -> String + Send + Sync),
    /// Protected cookie value echoed to the client.
    pub protected_cookie: Option<&'a str>,
    /// Whether page content is rendered between the fragments.
    pub render_content: bool,
    /// Locale preference list; the first entry is used.
    pub locales: &'a [String],
}

/// Generate the before-content and after-content fragments.
///
/// Fails when the asset manifest has no entries and no default entry bundle.
pub fn generate_outer_html(input: &OuterHtmlInput<'_>) -> Result<OuterHtml, ConfigError> {
    let assets = input.assets.resolve(input.path, input.parameters);
    let entries = assets.resolve_entries()?;
    let html = input.html.resolve(input.path, input.parameters);
    let locale = input.locales.first().map(String::as_str);

    let mut before = String::with_capacity(1024);
    before.push_str("<!DOCTYPE html>\n");
    match locale {
        Some(locale) => before.push_str(&format!(
            "<html lang=\"{}\">\n",
            encode_double_quoted_attribute(locale)
        )),
        None => before.push_str("<html>\n"),
    }
    before.push_str("<head>\n");
    before.push_str("<meta charset=\"utf-8\">\n");
    before.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    before.push_str(&input.meta.render(locale));
    push_line(&mut before, &html.head);
    for href in assets.stylesheets(&entries) {
        push_line(&mut before, &stylesheet_link(href));
    }
    if let Some(icon) = &assets.icon {
        push_line(
            &mut before,
            &format!(
                r#"<link rel="shortcut icon" href="{}">"#,
                encode_double_quoted_attribute(icon)
            ),
        );
    }
    before.push_str("</head>\n");
    before.push_str("<body>\n");
    push_line(&mut before, &html.body_start);
    before.push_str(&format!("<div id=\"{}\">", CONTENT_CONTAINER_ID));

    let mut after = String::with_capacity(1024);
    after.push_str("</div>\n");
    after.push_str("<script>\n");
    push_line(&mut after, &(input.bootstrap)());
    if let Some(value) = input.protected_cookie {
        push_line(
            &mut after,
            &format!("window._protected_cookie_value = {};", script_string(value)),
        );
    }
    if !input.locales.is_empty() {
        push_line(
            &mut after,
            &format!("window._locales = {};", script_string_list(input.locales)),
        );
    }
    if !input.render_content {
        push_line(&mut after, "window._server_side_render_skipped = true;");
    }
    after.push_str("</script>\n");
    for src in assets.scripts(&entries) {
        push_line(&mut after, &script_src(src));
    }
    push_line(&mut after, &html.body_end);
    after.push_str("</body>\n");
    after.push_str("</html>");

    Ok(OuterHtml::new(before, after))
}

fn push_line(html: &mut String, line: &str) {
    if line.is_empty() {
        return;
    }
    html.push_str(line);
    html.push('\n');
}

fn script_string(value: &str) -> String {
    escape_json_for_script(&serde_json::Value::from(value).to_string())
}

fn script_string_list(values: &[String]) -> String {
    escape_json_for_script(&serde_json::Value::from(values.to_vec()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonStore, Store};
    use serde_json::json;
    use std::sync::Arc;

    fn params() -> Parameters {
        let store: Arc<dyn Store> = Arc::new(JsonStore::new(json!({})));
        Parameters::new(store)
    }

    fn main_assets() -> Resolvable<Assets> {
        Assets::new()
            .with_javascript("main", "/assets/main.js")
            .with_style("main", "/assets/main.css")
            .into()
    }

    fn bootstrap() -> String {
        "window._state = {};".to_string()
    }

    fn input<'a>(
        parameters: &'a Parameters,
        meta: &'a PageMeta,
        assets: &'a Resolvable<Assets>,
        html: &'a HtmlHooks,
        locales: &'a [String],
    ) -> OuterHtmlInput<'a> {
        OuterHtmlInput {
            path: "/products/1",
            parameters,
            meta,
            assets,
            html,
            bootstrap: &bootstrap,
            protected_cookie: None,
            render_content: true,
            locales,
        }
    }

    #[test]
    fn test_fragments_structure() {
        let params = params();
        let meta = PageMeta::new("Product");
        let assets = main_assets();
        let html = HtmlHooks::new();
        let locales = vec!["en-US".to_string(), "de".to_string()];

        let outer = generate_outer_html(&input(&params, &meta, &assets, &html, &locales)).unwrap();

        assert!(outer.before.starts_with("<!DOCTYPE html>\n<html lang=\"en-US\">"));
        assert!(outer.before.contains("<title>Product</title>"));
        assert!(outer.before.contains(r#"<link rel="stylesheet" href="/assets/main.css">"#));
        assert!(outer.before.ends_with("<div id=\"react\">"));

        assert!(outer.after.starts_with("</div>\n<script>\nwindow._state = {};\n"));
        assert!(outer.after.contains(r#"window._locales = ["en-US","de"];"#));
        assert!(!outer.after.contains("_server_side_render_skipped"));
        assert!(!outer.after.contains("_protected_cookie_value"));
        assert!(outer
            .after
            .contains(r#"<script src="/assets/main.js" charset="utf-8"></script>"#));
        assert!(outer.after.ends_with("</body>\n</html>"));
    }

    #[test]
    fn test_hooks_are_placed() {
        let params = params();
        let meta = PageMeta::default();
        let assets = main_assets();
        let html = HtmlHooks::new()
            .with_head("<meta name=\"theme-color\" content=\"#000\">".to_string())
            .with_body_start("<noscript>Enable JS</noscript>".to_string())
            .with_body_end(Resolvable::function(|path: &str, _: &Parameters| {
                format!("<!-- rendered {} -->", path)
            }));

        let outer = generate_outer_html(&input(&params, &meta, &assets, &html, &[])).unwrap();

        let head_end = outer.before.find("</head>").unwrap();
        let theme = outer.before.find("theme-color").unwrap();
        assert!(theme < head_end);
        assert!(outer.before.contains("<body>\n<noscript>Enable JS</noscript>\n<div id=\"react\">"));
        assert!(outer.after.contains("<!-- rendered /products/1 -->\n</body>"));
        assert!(outer.before.contains("<html>\n"));
    }

    #[test]
    fn test_render_content_disabled_marker_and_cookie() {
        let params = params();
        let meta = PageMeta::default();
        let assets = main_assets();
        let html = HtmlHooks::new();
        let mut input = input(&params, &meta, &assets, &html, &[]);
        input.render_content = false;
        input.protected_cookie = Some("tok</script>");

        let outer = generate_outer_html(&input).unwrap();

        assert!(outer.after.contains("window._server_side_render_skipped = true;"));
        assert!(outer
            .after
            .contains(r#"window._protected_cookie_value = "tok<\/script>";"#));
    }

    #[test]
    fn test_missing_entries_fails() {
        let params = params();
        let meta = PageMeta::default();
        let assets: Resolvable<Assets> = Assets::new().with_javascript("app", "/app.js").into();
        let html = HtmlHooks::new();

        let err = generate_outer_html(&input(&params, &meta, &assets, &html, &[])).unwrap_err();

        assert_eq!(err, ConfigError::MissingAssetEntries);
        assert!(err.to_string().contains("assets.entries"));
    }

    #[test]
    fn test_assets_function_gets_path() {
        let params = params();
        let meta = PageMeta::default();
        let assets = Resolvable::function(|path: &str, _: &Parameters| {
            Assets::new().with_javascript("main", format!("{}/bundle.js", path.trim_end_matches('/')))
        });
        let html = HtmlHooks::new();

        let outer = generate_outer_html(&input(&params, &meta, &assets, &html, &[])).unwrap();

        assert!(outer.after.contains(r#"src="/products/1/bundle.js""#));
    }

    #[test]
    fn test_icon_link() {
        let params = params();
        let meta = PageMeta::default();
        let assets: Resolvable<Assets> = Assets::new()
            .with_javascript("main", "/main.js")
            .with_icon("/favicon.ico")
            .into();
        let html = HtmlHooks::new();

        let outer = generate_outer_html(&input(&params, &meta, &assets, &html, &[])).unwrap();

        assert!(outer
            .before
            .contains(r#"<link rel="shortcut icon" href="/favicon.ico">"#));
    }
}
