//! Redirect URL parsing.
//!
//! Providers return the authorization result in the redirect URL's query
//! string (`?code=...` / `?error=...`). Some deliver it in a fragment
//! instead (`#code=...`); when the query is empty the fragment is
//! reinterpreted as a query string and parsed with the same rules.

use url::Url;

/// What a redirect URL carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// An authorization code.
    Code(String),
    /// A provider denial (`error` parameter, optional `error_description`).
    Denied {
        error: String,
        description: Option<String>,
    },
    /// Neither a code nor an error. Legitimate intermediate navigations
    /// land here; callers treat it as a no-op.
    Empty,
}

/// Parse a redirect URL into its authorization outcome.
///
/// `error` takes precedence over `code` when both are present. An empty
/// `code` value counts as absent.
pub fn parse_redirect(raw: &str) -> RedirectOutcome {
    let pairs = query_pairs(raw);

    if let Some((_, error)) = pairs.iter().find(|(k, _)| k == "error") {
        let description = pairs
            .iter()
            .find(|(k, _)| k == "error_description")
            .map(|(_, v)| v.clone());
        return RedirectOutcome::Denied {
            error: error.clone(),
            description,
        };
    }

    match pairs.iter().find(|(k, _)| k == "code") {
        Some((_, code)) if !code.is_empty() => RedirectOutcome::Code(code.clone()),
        _ => RedirectOutcome::Empty,
    }
}

fn query_pairs(raw: &str) -> Vec<(String, String)> {
    let Ok(url) = Url::parse(raw) else {
        return Vec::new();
    };

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if !pairs.is_empty() {
        return pairs;
    }

    // Fragment-style response: treat `#` as `?` and re-parse
    match url.fragment() {
        Some(fragment) if !fragment.is_empty() => url::form_urlencoded::parse(fragment.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        _ => Vec::new(),
    }
}
