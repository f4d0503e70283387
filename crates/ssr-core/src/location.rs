//! Parsed request locations.

use url::{Position, Url};

/// Placeholder origin used to parse relative request URLs.
const PLACEHOLDER_ORIGIN: &str = "http://localhost";

/// A parsed URL split into its path components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Everything before the path for absolute URLs (`scheme://host[:port]`,
    /// `//host` or `mailto:`), `None` for relative ones.
    pub origin: Option<String>,
    /// Path. Starts with `/` except for opaque URLs such as `mailto:x@y`.
    pub pathname: String,
    /// Raw query string without the leading `?`.
    pub search: Option<String>,
    /// Fragment without the leading `#`.
    pub hash: Option<String>,
}

impl Location {
    /// Parse an absolute or relative URL.
    ///
    /// Scheme-relative input (`//host/path`) keeps its authority and is
    /// treated as absolute.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        let (url, origin) = match Url::parse(input) {
            Ok(url) => {
                let origin = url[..Position::BeforePath].to_string();
                (url, Some(origin))
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let url = Url::parse(PLACEHOLDER_ORIGIN)?.join(input)?;
                let origin = is_scheme_relative(input)
                    .then(|| format!("//{}", &url[Position::BeforeUsername..Position::BeforePath]));
                (url, origin)
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            origin,
            pathname: url.path().to_string(),
            search: url.query().filter(|q| !q.is_empty()).map(String::from),
            hash: url.fragment().filter(|h| !h.is_empty()).map(String::from),
        })
    }

    /// Create a relative location from a bare path.
    pub fn from_path(pathname: impl Into<String>) -> Self {
        Self {
            origin: None,
            pathname: pathname.into(),
            search: None,
            hash: None,
        }
    }

    /// Whether the location carries its own origin.
    pub fn is_absolute(&self) -> bool {
        self.origin.is_some()
    }

    /// Path with a single trailing slash removed (`/` stays `/`).
    pub fn path_without_trailing_slash(&self) -> &str {
        match self.pathname.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => &self.pathname,
        }
    }

    /// Decoded query parameters, in order.
    pub fn query(&self) -> Vec<(String, String)> {
        match &self.search {
            Some(search) => url::form_urlencoded::parse(search.as_bytes())
                .into_owned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get the first query parameter with the given name.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Serialize back to a URL string.
    ///
    /// Relative locations get `basename` prepended; absolute ones are
    /// returned as-is.
    pub fn to_url(&self, basename: Option<&str>) -> String {
        let mut url = match &self.origin {
            Some(origin) => origin.clone(),
            None => basename.unwrap_or_default().to_string(),
        };
        url.push_str(&self.pathname);
        if let Some(search) = &self.search {
            url.push('?');
            url.push_str(search);
        }
        if let Some(hash) = &self.hash {
            url.push('#');
            url.push_str(hash);
        }
        url
    }
}

/// Whether `input` starts with two slashes once the leading whitespace the
/// URL parser ignores is skipped. Backslashes count as slashes, as they do
/// for http URLs.
fn is_scheme_relative(input: &str) -> bool {
    let mut chars = input
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'));
    matches!(
        (chars.next(), chars.next()),
        (Some('/' | '\\'), Some('/' | '\\'))
    )
}
