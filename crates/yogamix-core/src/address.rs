//! Return detection.
//!
//! After Spotify redirects back to the page, the authorization code sits in
//! the query string. [`ReturnDetector::detect`] captures it once and strips
//! it from the visible address so a refresh does not replay it.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::Result;
use crate::export::AuthorizationResult;

/// Query parameter carrying the authorization code.
pub const CODE_PARAM: &str = "code";
/// Query parameter the provider echoes back alongside the code.
pub const STATE_PARAM: &str = "state";
/// Query parameter set when the user denies authorization.
pub const ERROR_PARAM: &str = "error";

/// Read and rewrite the page address.
pub trait AddressBar {
    /// The full current URL.
    fn href(&self) -> Result<String>;
    /// Replace the visible URL without reloading the page.
    fn replace(&self, href: &str) -> Result<()>;
}

/// In-memory [`AddressBar`] for native use and tests.
#[derive(Debug, Default)]
pub struct MemoryAddressBar {
    href: RefCell<String>,
}

impl MemoryAddressBar {
    /// Start at `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: RefCell::new(href.into()),
        }
    }

    /// The current URL.
    pub fn current(&self) -> String {
        self.href.borrow().clone()
    }
}

impl AddressBar for MemoryAddressBar {
    fn href(&self) -> Result<String> {
        Ok(self.current())
    }

    fn replace(&self, href: &str) -> Result<()> {
        *self.href.borrow_mut() = href.to_string();
        Ok(())
    }
}

/// Detects a return from the authorization page.
#[derive(Clone)]
pub struct ReturnDetector {
    address_bar: Rc<dyn AddressBar>,
}

impl std::fmt::Debug for ReturnDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReturnDetector").finish_non_exhaustive()
    }
}

impl ReturnDetector {
    /// Create a detector over `address_bar`.
    pub fn new(address_bar: Rc<dyn AddressBar>) -> Self {
        Self { address_bar }
    }

    /// Capture the authorization code, if any, and remove it from the URL.
    ///
    /// A second call on the same page load returns [`AuthorizationResult::Absent`]
    /// because the parameter is gone.
    pub fn detect(&self) -> AuthorizationResult {
        let href = match self.address_bar.href() {
            Ok(href) => href,
            Err(e) => {
                warn!("Could not read page URL: {}", e);
                return AuthorizationResult::Absent;
            }
        };
        let url = match Url::parse(&href) {
            Ok(url) => url,
            Err(e) => {
                warn!(%href, "Could not parse page URL: {}", e);
                return AuthorizationResult::Absent;
            }
        };

        let code = url
            .query_pairs()
            .find(|(name, value)| name == CODE_PARAM && !value.is_empty())
            .map(|(_, value)| value.into_owned());

        let Some(code) = code else {
            if let Some((_, reason)) = url.query_pairs().find(|(name, _)| name == ERROR_PARAM) {
                info!(%reason, "Authorization was not granted");
            }
            return AuthorizationResult::Absent;
        };

        let cleaned = strip_authorization_params(&url);
        if let Err(e) = self.address_bar.replace(cleaned.as_str()) {
            warn!("Could not remove authorization code from URL: {}", e);
        }
        debug!(url = %cleaned, "Captured authorization code");
        AuthorizationResult::Code(code)
    }
}

/// Copy of `url` without the `code` and `state` parameters.
fn strip_authorization_params(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != CODE_PARAM && name != STATE_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.query_pairs_mut().clear().extend_pairs(kept);
    }
    cleaned
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn detector(href: &str) -> (Rc<MemoryAddressBar>, ReturnDetector) {
        let bar = Rc::new(MemoryAddressBar::new(href));
        let detector = ReturnDetector::new(bar.clone());
        (bar, detector)
    }

    #[test]
    fn test_detect_captures_code_once() {
        let (bar, detector) = detector("https://yoga.example.com/?code=ABC123");
        assert_eq!(
            detector.detect(),
            AuthorizationResult::Code("ABC123".to_string())
        );
        assert_eq!(bar.current(), "https://yoga.example.com/");
        assert_eq!(detector.detect(), AuthorizationResult::Absent);
    }

    #[test]
    fn test_detect_keeps_unrelated_params_and_fragment() {
        let (bar, detector) =
            detector("https://yoga.example.com/app?tab=export&code=XYZ&state=s1#result");
        assert!(detector.detect().is_present());
        assert_eq!(bar.current(), "https://yoga.example.com/app?tab=export#result");
    }

    #[test]
    fn test_detect_without_code_leaves_url_alone() {
        let (bar, detector) = detector("https://yoga.example.com/?tab=export");
        assert_eq!(detector.detect(), AuthorizationResult::Absent);
        assert_eq!(bar.current(), "https://yoga.example.com/?tab=export");
    }

    #[test]
    fn test_detect_treats_empty_code_as_absent() {
        let (bar, detector) = detector("https://yoga.example.com/?code=");
        assert_eq!(detector.detect(), AuthorizationResult::Absent);
        assert_eq!(bar.current(), "https://yoga.example.com/?code=");
    }

    #[test]
    fn test_detect_treats_denial_as_absent() {
        let (bar, detector) = detector("https://yoga.example.com/?error=access_denied");
        assert_eq!(detector.detect(), AuthorizationResult::Absent);
        assert_eq!(bar.current(), "https://yoga.example.com/?error=access_denied");
    }

    #[test]
    fn test_detect_decodes_code() {
        let (_, detector) = detector("https://yoga.example.com/?code=a%2Fb%3Dc");
        assert_eq!(detector.detect().code(), Some("a/b=c"));
    }

    #[test]
    fn test_detect_unparseable_url_is_absent() {
        let (_, detector) = detector("not a url");
        assert_eq!(detector.detect(), AuthorizationResult::Absent);
    }
}
