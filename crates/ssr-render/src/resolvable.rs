//! Literal-or-function request options.

use std::fmt;
use std::sync::Arc;

use crate::store::Parameters;

/// Function computing a value from the request path and render parameters.
pub type ResolveFn<T> = Arc<dyn Fn(&str, &Parameters) -> T + Send + Sync>;

/// A value given either literally or as a function of (path, parameters).
pub enum Resolvable<T> {
    Literal(T),
    Function(ResolveFn<T>),
}

impl<T: Clone> Resolvable<T> {
    /// Wrap a literal value.
    pub fn literal(value: T) -> Self {
        Self::Literal(value)
    }

    /// Wrap a function.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, &Parameters) -> T + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Produce the value: functions are invoked, literals are cloned.
    pub fn resolve(&self, path: &str, parameters: &Parameters) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Function(f) => f(path, parameters),
        }
    }
}

impl<T> From<T> for Resolvable<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: Default> Default for Resolvable<T> {
    fn default() -> Self {
        Self::Literal(T::default())
    }
}

impl<T: Clone> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Function(f) => Self::Function(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Head/body customization hooks.
#[derive(Debug, Clone, Default)]
pub struct HtmlHooks {
    /// Markup appended inside `<head>`.
    pub head: Option<Resolvable<String>>,
    /// Markup right after `<body>`.
    pub body_start: Option<Resolvable<String>>,
    /// Markup right before `</body>`.
    pub body_end: Option<Resolvable<String>>,
}

/// Hooks resolved for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedHtml {
    pub head: String,
    pub body_start: String,
    pub body_end: String,
}

impl HtmlHooks {
    /// Create empty hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the head hook.
    pub fn with_head(mut self, head: impl Into<Resolvable<String>>) -> Self {
        self.head = Some(head.into());
        self
    }

    /// Set the body-start hook.
    pub fn with_body_start(mut self, body_start: impl Into<Resolvable<String>>) -> Self {
        self.body_start = Some(body_start.into());
        self
    }

    /// Set the body-end hook.
    pub fn with_body_end(mut self, body_end: impl Into<Resolvable<String>>) -> Self {
        self.body_end = Some(body_end.into());
        self
    }

    /// Resolve every hook once; missing hooks become empty strings.
    pub fn resolve(&self, path: &str, parameters: &Parameters) -> ResolvedHtml {
        let resolve = |hook: &Option<Resolvable<String>>| {
            hook.as_ref()
                .map(|hook| hook.resolve(path, parameters))
                .unwrap_or_default()
        };

        ResolvedHtml {
            head: resolve(&self.head),
            body_start: resolve(&self.body_start),
            body_end: resolve(&self.body_end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonStore, Store};
    use serde_json::json;

    fn params() -> Parameters {
        let store: Arc<dyn Store> = Arc::new(JsonStore::new(json!({ "user": "ada" })));
        Parameters::new(store)
    }

    #[test]
    fn test_literal_resolves_to_itself() {
        let value: Resolvable<String> = "<b>hi</b>".to_string().into();
        assert_eq!(value.resolve("/", &params()), "<b>hi</b>");
    }

    #[test]
    fn test_function_receives_path_and_parameters() {
        let value = Resolvable::function(|path: &str, params: &Parameters| {
            format!("{}:{}", path, params.store().state()["user"])
        });
        assert_eq!(value.resolve("/account", &params()), "/account:\"ada\"");
    }

    #[test]
    fn test_html_hooks_resolve() {
        let hooks = HtmlHooks::new()
            .with_head("<link rel=\"manifest\" href=\"/manifest.json\">".to_string())
            .with_body_end(Resolvable::function(|path: &str, _: &Parameters| {
                format!("<!-- {} -->", path)
            }));

        let resolved = hooks.resolve("/about", &params());

        assert_eq!(resolved.head, "<link rel=\"manifest\" href=\"/manifest.json\">");
        assert_eq!(resolved.body_start, "");
        assert_eq!(resolved.body_end, "<!-- /about -->");
    }

    #[test]
    fn test_debug_hides_function() {
        let value: Resolvable<String> = Resolvable::function(|_: &str, _: &Parameters| String::new());
        assert_eq!(format!("{:?}", value), "Function(..)");
    }
}
