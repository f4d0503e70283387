//! The render pipeline: initialize state, render the page, wrap it in the
//! outer HTML and hand back one combined stream.
//!
//! ```text
//! settings ─► normalize ─► protected cookie ─► StateInitializer
//!                                                    │
//!                                   parse request URL ◄┘
//!                                          │
//!          ┌── /react-website-base ────────┤
//!          ▼                               ▼
//!   before + after              PageRenderer ─► redirect?
//!                                          │
//!                     before + container(content) + after
//! ```
//!
//! Everything after the URL is parsed runs inside a protected region: a
//! failure there is offered to the configured error handler, which may turn
//! it into a redirect.

use std::sync::Arc;
use std::time::{Duration, Instant};

use http::StatusCode;
use ssr_core::{Location, RenderPhase, RenderTime, RequestId, SetCookie};
use ssr_observability::{LogFormat, MetricsCollector, RenderLogger};
use ssr_streaming::{combine, html_chunk, PageMeta};

use crate::error::RenderError;
use crate::error_handler::ErrorContext;
use crate::initializer::{InitializeContext, Initialized, StateInitializer};
use crate::outer_html::{generate_outer_html, OuterHtmlInput};
use crate::page::{PageOutcome, PageRenderer};
use crate::redirect::normalize_redirect;
use crate::request::{RenderOutcome, RenderRequest, RenderedContent};
use crate::settings::{NormalizedSettings, Settings};
use crate::store::Parameters;

/// Path that renders only the outer HTML, with no page content.
pub const STATIC_SHELL_PATH: &str = "/react-website-base";

/// Orchestrates a single server-side render.
#[derive(Clone)]
pub struct RenderPipeline {
    initializer: Arc<dyn StateInitializer>,
    page_renderer: Arc<dyn PageRenderer>,
    log_format: LogFormat,
}

impl RenderPipeline {
    /// Create a pipeline from its two collaborators.
    pub fn new(
        initializer: Arc<dyn StateInitializer>,
        page_renderer: Arc<dyn PageRenderer>,
    ) -> Self {
        Self {
            initializer,
            page_renderer,
            log_format: LogFormat::Json,
        }
    }

    /// Set the log output format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Render one request.
    ///
    /// Configuration, state initialization and URL errors are returned
    /// directly. Errors raised later are first passed to the error handler;
    /// if it requests a redirect, that redirect is returned instead.
    pub async fn render(
        &self,
        settings: &Settings,
        request: RenderRequest,
    ) -> Result<RenderOutcome, RenderError> {
        let settings = settings.normalize()?;

        let request_id = RequestId::generate();
        let mut logger = RenderLogger::new(request_id.clone()).with_format(self.log_format);
        let mut metrics = MetricsCollector::new(request_id);
        logger.phase(&RenderPhase::Start);

        let protected_cookie = settings
            .authentication
            .protected_cookie()
            .and_then(|name| request.cookies.get(name));

        let started = Instant::now();
        let initialized = self
            .initializer
            .initialize(
                &settings,
                InitializeContext {
                    protected_cookie: protected_cookie.clone(),
                    proxy: request.proxy.as_ref(),
                    cookies: request.cookies.as_ref(),
                    initialize: request.initialize.as_ref(),
                    url: &request.url,
                },
            )
            .await
            .map_err(|e| {
                let error = RenderError::Initialize(e);
                logger.phase(&RenderPhase::Error(error.to_string()));
                error
            })?;
        let initialize_time = started.elapsed();
        logger.phase(&RenderPhase::Initialized);

        let location = Location::parse(&request.url)
            .map_err(|e| RenderError::InvalidUrl(format!("{}: {}", request.url, e)))?;
        logger.set_path(location.pathname.clone());
        metrics.set_path(location.pathname.clone());

        let Initialized {
            cookies,
            bootstrap,
            parameters,
        } = initialized;

        let step = RenderStep {
            settings: &settings,
            request: &request,
            location: &location,
            parameters: &parameters,
            bootstrap: &*bootstrap,
            protected_cookie: protected_cookie.as_deref(),
            initialize_time,
        };

        let result = match self.render_protected(&step, cookies, &logger, &mut metrics).await {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                logger.phase(&RenderPhase::Error(error.to_string()));
                recover(&settings, &request, &location, &parameters, error)
            }
        };

        match &result {
            Ok(RenderOutcome::Redirect(url)) => {
                metrics.record_redirect();
                logger
                    .info_builder("render redirected")
                    .field("location", url.clone())
                    .emit();
            }
            Ok(RenderOutcome::Content(content)) => {
                metrics.set_route(content.route.clone());
                metrics.record_time(content.time);
                logger
                    .info_builder("render complete")
                    .field_u64("status", u64::from(content.status.as_u16()))
                    .field("route", content.route.clone().unwrap_or_default())
                    .emit();
            }
            Err(error) => logger.error(&error.to_string()),
        }

        let status = match &result {
            Ok(RenderOutcome::Content(content)) => Some(content.status.as_u16()),
            _ => None,
        };
        let metrics = metrics.finalize(status);
        logger
            .debug_builder("render metrics")
            .field("metrics", metrics.to_json())
            .emit();

        result
    }

    async fn render_protected(
        &self,
        step: &RenderStep<'_>,
        cookies: Vec<SetCookie>,
        logger: &RenderLogger,
        metrics: &mut MetricsCollector,
    ) -> Result<RenderOutcome, RenderError> {
        if step.location.path_without_trailing_slash() == STATIC_SHELL_PATH {
            let outer = generate_outer_html(&step.outer_html_input(&PageMeta::default(), false))?;
            metrics.record_shell_only();
            logger.phase(&RenderPhase::ShellRendered);

            return Ok(RenderOutcome::Content(RenderedContent {
                route: None,
                status: StatusCode::OK,
                content: combine(vec![html_chunk(outer.before), html_chunk(outer.after)]),
                time: RenderTime::new().with_initialize(step.initialize_time),
                cookies,
            }));
        }

        let outcome = self
            .page_renderer
            .render_page(step.parameters, &step.settings.routes)
            .await
            .map_err(RenderError::Page)?;

        let page = match outcome {
            PageOutcome::Redirect(target) => {
                logger.phase(&RenderPhase::Redirected);
                return Ok(RenderOutcome::Redirect(normalize_redirect(
                    &target,
                    step.settings.basename.as_deref(),
                )));
            }
            PageOutcome::Rendered(page) => page,
        };

        let outer =
            generate_outer_html(&step.outer_html_input(&page.meta, step.request.render_content))?;

        let mut streams = vec![html_chunk(outer.before), html_chunk(outer.after)];
        if step.request.render_content {
            let content = step
                .settings
                .container
                .wrap(page.content, &page.container_props);
            streams.insert(streams.len() / 2, content.into_stream());
        }
        logger.phase(&RenderPhase::Completion);

        Ok(RenderOutcome::Content(RenderedContent {
            route: page.route,
            status: page.status,
            content: combine(streams),
            time: page.time.with_initialize(step.initialize_time),
            cookies,
        }))
    }
}

/// Inputs shared by the steps inside the protected region.
struct RenderStep<'a> {
    settings: &'a NormalizedSettings,
    request: &'a RenderRequest,
    location: &'a Location,
    parameters: &'a Parameters,
    bootstrap: &'a (dyn Fn() -> String + Send + Sync),
    protected_cookie: Option<&'a str>,
    initialize_time: Duration,
}

impl<'a> RenderStep<'a> {
    fn outer_html_input(&self, meta: &'a PageMeta, render_content: bool) -> OuterHtmlInput<'a> {
        OuterHtmlInput {
            path: &self.location.pathname,
            parameters: self.parameters,
            meta,
            assets: &self.request.assets,
            html: &self.request.html,
            bootstrap: self.bootstrap,
            protected_cookie: self.protected_cookie,
            render_content,
            locales: &self.request.locales,
        }
    }
}

/// Offer the error to the handler; return its redirect or the error itself.
fn recover(
    settings: &NormalizedSettings,
    request: &RenderRequest,
    location: &Location,
    parameters: &Parameters,
    error: RenderError,
) -> Result<RenderOutcome, RenderError> {
    let Some(handler) = &settings.error_handler else {
        return Err(error);
    };

    let context = ErrorContext::new(
        &location.pathname,
        &request.url,
        settings.basename.as_deref(),
        parameters.store(),
    );
    handler.handle(&error, &context);

    match context.into_redirect() {
        Some(url) => Ok(RenderOutcome::Redirect(url)),
        None => Err(error),
    }
}
