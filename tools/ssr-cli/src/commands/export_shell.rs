//! Render the static shell page.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _, Result};
use async_trait::async_trait;
use ssr_core::{MapCookieJar, RouteConfig};
use ssr_observability::LogFormat;
use ssr_render::{
    collect_string, PageOutcome, PageRenderer, Parameters, RenderOutcome, RenderPipeline,
    StaticInitializer, STATIC_SHELL_PATH,
};

use super::ExportShellArgs;
use crate::config::SiteConfig;
use crate::context::Context;
use crate::output::human_size;

/// Page renderer for a pipeline that only ever renders the static shell.
struct ShellOnlyRenderer;

#[async_trait]
impl PageRenderer for ShellOnlyRenderer {
    async fn render_page(
        &self,
        _parameters: &Parameters,
        _routes: &[RouteConfig],
    ) -> anyhow::Result<PageOutcome> {
        Err(anyhow!("page rendering is not available outside the static shell"))
    }
}

/// Run the export-shell command.
pub async fn run(args: ExportShellArgs, ctx: &Context) -> Result<()> {
    let format = if ctx.output.is_verbose() {
        LogFormat::Human
    } else {
        LogFormat::Json
    };

    let html = render_shell(&ctx.config, &args, format).await?;

    match &args.out {
        Some(out) => {
            let path = ctx.resolve_path(out);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "path": path,
                    "bytes": html.len(),
                }));
            } else {
                ctx.output.done(&format!(
                    "Wrote {} ({})",
                    path.display(),
                    human_size(html.len() as u64)
                ));
            }
        }
        None => println!("{}", html),
    }

    Ok(())
}

/// Run the pipeline for the static shell path and collect the output.
pub async fn render_shell(
    config: &SiteConfig,
    args: &ExportShellArgs,
    format: LogFormat,
) -> Result<String> {
    let pipeline = RenderPipeline::new(
        Arc::new(StaticInitializer::new(config.initial_state())),
        Arc::new(ShellOnlyRenderer),
    )
    .with_log_format(format);

    let cookies = MapCookieJar::from_header(&args.cookies.join("; "));
    let mut request = config.to_request(STATIC_SHELL_PATH, cookies);
    if !args.locales.is_empty() {
        request = request.with_locales(args.locales.iter().cloned());
    }

    let outcome = pipeline
        .render(&config.to_settings(), request)
        .await
        .context("Shell render failed")?;

    let content = match outcome {
        RenderOutcome::Content(content) => content,
        RenderOutcome::Redirect(url) => bail!("Shell render redirected to {}", url),
    };

    collect_string(content.content)
        .await
        .context("Failed to collect shell output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssr_core::AuthenticationSettings;
    use ssr_render::Assets;

    fn config() -> SiteConfig {
        let mut config = SiteConfig {
            routes: vec![RouteConfig::new("/")],
            authentication: AuthenticationSettings::with_protected_cookie("jwt"),
            assets: Assets::new().with_javascript("main", "/assets/main.js"),
            locales: vec!["en".to_string()],
            ..Default::default()
        };
        config
            .state
            .insert("currency".to_string(), serde_json::json!("EUR"));
        config
    }

    fn args() -> ExportShellArgs {
        ExportShellArgs {
            out: None,
            cookies: Vec::new(),
            locales: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_render_shell() {
        let html = render_shell(&config(), &args(), LogFormat::Json).await.unwrap();

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<div id=\"react\"></div>"));
        assert!(html.contains(r#"window._state = {"currency":"EUR"};"#));
        assert!(html.contains("window._server_side_render_skipped = true;"));
        assert!(html.contains(r#"<script src="/assets/main.js" charset="utf-8"></script>"#));
    }

    #[tokio::test]
    async fn test_render_shell_with_cookie_and_locale() {
        let args = ExportShellArgs {
            cookies: vec!["jwt=abc".to_string(), "theme=dark".to_string()],
            locales: vec!["fr".to_string()],
            ..args()
        };

        let html = render_shell(&config(), &args, LogFormat::Human).await.unwrap();

        assert!(html.contains("<html lang=\"fr\">"));
        assert!(html.contains(r#"window._protected_cookie_value = "abc";"#));
    }

    #[tokio::test]
    async fn test_render_shell_missing_entries() {
        let config = SiteConfig {
            assets: Assets::new(),
            ..config()
        };

        let err = render_shell(&config, &args(), LogFormat::Json).await.unwrap_err();

        assert!(format!("{:#}", err).contains("assets.entries"));
    }
}
