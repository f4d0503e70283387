//! Error handler hook and its context.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use ssr_core::Location;

use crate::error::RenderError;
use crate::redirect::{normalize_redirect, normalize_redirect_str, RedirectSlot};
use crate::store::Store;

/// Application callback given one chance to turn a render error into a
/// redirect.
pub trait ErrorHandler: Send + Sync {
    /// Inspect the error; call [`ErrorContext::redirect`] to recover.
    fn handle(&self, error: &RenderError, context: &ErrorContext<'_>);
}

impl<F> ErrorHandler for F
where
    F: Fn(&RenderError, &ErrorContext<'_>) + Send + Sync,
{
    fn handle(&self, error: &RenderError, context: &ErrorContext<'_>) {
        self(error, context)
    }
}

/// What the error handler can see and do.
pub struct ErrorContext<'a> {
    path: &'a str,
    url: &'a str,
    basename: Option<&'a str>,
    store: &'a Arc<dyn Store>,
    redirect: RedirectSlot,
}

impl<'a> ErrorContext<'a> {
    /// Create a context for one failed render.
    pub fn new(
        path: &'a str,
        url: &'a str,
        basename: Option<&'a str>,
        store: &'a Arc<dyn Store>,
    ) -> Self {
        Self {
            path,
            url,
            basename,
            store,
            redirect: RedirectSlot::new(),
        }
    }

    /// Always `true`: handlers run on the server here.
    pub fn server(&self) -> bool {
        true
    }

    /// Request path.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Full request URL.
    pub fn url(&self) -> &str {
        self.url
    }

    /// Request a redirect. Only the first call has an effect.
    pub fn redirect(&self, target: &str) {
        self.redirect
            .request(normalize_redirect_str(target, self.basename));
    }

    /// Request a redirect to a parsed location. Only the first call has an effect.
    pub fn redirect_to(&self, target: &Location) {
        self.redirect.request(normalize_redirect(target, self.basename));
    }

    /// The redirect requested so far, basename applied.
    pub fn redirected(&self) -> Option<&str> {
        self.redirect.get()
    }

    /// Snapshot of the initializer's store state.
    pub fn state(&self) -> Value {
        self.store.state()
    }

    /// Consume the context, returning the requested redirect.
    pub fn into_redirect(self) -> Option<String> {
        self.redirect.into_inner()
    }
}

impl fmt::Debug for ErrorContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContext")
            .field("path", &self.path)
            .field("url", &self.url)
            .field("basename", &self.basename)
            .field("redirect", &self.redirect.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;
    use serde_json::json;
    use ssr_core::ConfigError;

    fn handler_fn<F>(f: F) -> F
    where
        F: Fn(&RenderError, &ErrorContext<'_>) + Send + Sync,
    {
        f
    }

    fn store() -> Arc<dyn Store> {
        Arc::new(JsonStore::new(json!({ "user": null })))
    }

    #[test]
    fn test_context_exposes_request() {
        let store = store();
        let context = ErrorContext::new("/cart", "/cart?coupon=X", None, &store);

        assert!(context.server());
        assert_eq!(context.path(), "/cart");
        assert_eq!(context.url(), "/cart?coupon=X");
        assert_eq!(context.state(), json!({ "user": null }));
        assert!(context.redirected().is_none());
    }

    #[test]
    fn test_first_redirect_wins() {
        let store = store();
        let context = ErrorContext::new("/cart", "/cart", Some("/shop"), &store);

        context.redirect("/login");
        context.redirect("/other");
        context.redirect_to(&Location::from_path("/third"));

        assert_eq!(context.into_redirect(), Some("/shop/login".to_string()));
    }

    #[test]
    fn test_closure_handler() {
        let handler = handler_fn(|error, context| {
            if error.is_config() {
                context.redirect("/setup");
            }
        });
        let store = store();
        let context = ErrorContext::new("/", "/", None, &store);

        handler.handle(&RenderError::Config(ConfigError::MissingAssetEntries), &context);

        assert_eq!(context.redirected(), Some("/setup"));
    }
}
