//! Validate the site configuration.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use super::CheckArgs;
use crate::config::SiteConfig;
use crate::context::Context;

/// Result of checking a site configuration.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub routes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected_cookie: Option<String>,
    pub entries: Vec<String>,
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    pub warnings: Vec<String>,
}

/// Run the check command.
pub async fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    if ctx.config_path.is_none() {
        bail!("No ssr.toml, .ssr.toml or ssr.json found. Run `ssr init` to create one.");
    }

    let report = check_config(&ctx.config)?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        let routes = report.routes.to_string();
        ctx.output.report_title("Site configuration");
        ctx.output.report_field("routes", Some(&routes));
        ctx.output.report_field("basename", report.basename.as_deref());
        ctx.output
            .report_field("protected cookie", report.protected_cookie.as_deref());
        ctx.output.report_field("entries", Some(&report.entries.join(", ")));
        ctx.output.report_urls("scripts", &report.scripts);
        ctx.output.report_urls("stylesheets", &report.stylesheets);
        for warning in &report.warnings {
            ctx.output.warn(warning);
        }
    }

    if args.strict && !report.warnings.is_empty() {
        bail!("{} warning(s) in strict mode", report.warnings.len());
    }

    if !ctx.output.is_json() {
        ctx.output.done("Configuration is valid");
    }
    Ok(())
}

/// Normalize the settings and resolve the asset entries.
pub fn check_config(config: &SiteConfig) -> Result<CheckReport> {
    let settings = config
        .to_settings()
        .normalize()
        .context("Invalid settings")?;
    let entries = config
        .assets
        .resolve_entries()
        .context("Invalid assets")?;

    let mut warnings = Vec::new();
    for entry in &entries {
        if !config.assets.javascript.contains_key(entry) && !config.assets.styles.contains_key(entry) {
            warnings.push(format!("Entry `{}` has no javascript or style bundle", entry));
        }
    }
    if config.locales.is_empty() {
        warnings.push("No locales configured; <html> has no lang attribute".to_string());
    }

    Ok(CheckReport {
        routes: settings.routes.len(),
        basename: settings.basename,
        protected_cookie: settings.authentication.protected_cookie().map(String::from),
        scripts: config.assets.scripts(&entries).map(String::from).collect(),
        stylesheets: config.assets.stylesheets(&entries).map(String::from).collect(),
        entries,
        warnings,
    })
}
