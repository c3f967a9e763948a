//! Authorization redirect.

use tracing::{error, info, warn};

use crate::backend::ExportBackend;
use crate::error::{Error, ErrorKind};
use crate::export::PendingExport;
use crate::presenter::ExportStatus;
use crate::session::ExportSession;

/// Result of [`ExportSession::begin_authorization`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// The browser was sent to the authorization page.
    Redirected {
        /// The authorization URL.
        auth_url: String,
    },
    /// The redirect did not happen. The pending export stays stored.
    Failed {
        /// Category of the failure.
        kind: ErrorKind,
        /// Message shown to the user.
        message: String,
    },
}

impl AuthorizationOutcome {
    fn failed(error: &Error) -> Self {
        Self::Failed {
            kind: error.kind(),
            message: error.user_message(),
        }
    }
}

impl<B: ExportBackend> ExportSession<B> {
    /// Store `export` and send the browser to the Spotify authorization page.
    ///
    /// The export is persisted before the backend is contacted so it survives
    /// the navigation. Failures are shown to the user and leave the stored
    /// export in place, so the user can retry without re-entering anything.
    pub async fn begin_authorization(&self, export: &PendingExport) -> AuthorizationOutcome {
        self.presenter.present(ExportStatus::Authorizing);

        if let Err(e) = self.store.save(export) {
            error!("Cannot start authorization without a stored export: {}", e);
            return self.authorization_failed(&e);
        }

        let auth_url = match self.backend.request_auth_url().await {
            Ok(url) => url,
            Err(e) => {
                warn!(kind = ?e.kind(), "Authorization URL request failed: {}", e);
                return self.authorization_failed(&e);
            }
        };

        info!(%auth_url, "Redirecting to Spotify authorization");
        self.presenter.present(ExportStatus::Redirecting {
            auth_url: auth_url.clone(),
        });

        if let Err(e) = self.navigator.navigate(&auth_url) {
            warn!("Navigation to authorization page failed: {}", e);
            return self.authorization_failed(&e);
        }

        AuthorizationOutcome::Redirected { auth_url }
    }

    fn authorization_failed(&self, error: &Error) -> AuthorizationOutcome {
        let outcome = AuthorizationOutcome::failed(error);
        self.presenter.present(ExportStatus::Failed {
            message: error.user_message(),
        });
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::rc::Rc;

    use mockall::predicate::eq;

    use super::*;
    use crate::error::NETWORK_ERROR_MESSAGE;
    use crate::presenter::MockNavigator;
    use crate::testing::{Harness, sample_export};

    const AUTH_URL: &str = "https://accounts.spotify.com/authorize?client_id=abc";

    #[tokio::test]
    async fn test_saves_then_navigates() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .with(eq(AUTH_URL))
            .times(1)
            .returning(|_| Ok(()));

        let harness = Harness::new("https://yoga.example.com/");
        harness.backend.push_auth_url(Ok(AUTH_URL.to_string()));
        let session = harness.session_with_navigator(Rc::new(navigator));

        let export = sample_export();
        let outcome = session.begin_authorization(&export).await;

        assert_eq!(
            outcome,
            AuthorizationOutcome::Redirected {
                auth_url: AUTH_URL.to_string()
            }
        );
        assert_eq!(session.store().load(), Some(export));
        assert_eq!(
            harness.presenter.statuses(),
            vec![
                ExportStatus::Authorizing,
                ExportStatus::Redirecting {
                    auth_url: AUTH_URL.to_string()
                }
            ]
        );
    }

    #[tokio::test]
    async fn test_backend_refusal_keeps_export() {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();

        let harness = Harness::new("https://yoga.example.com/");
        harness
            .backend
            .push_auth_url(Err(Error::Backend("Spotify not configured".to_string())));
        let session = harness.session_with_navigator(Rc::new(navigator));

        let export = sample_export();
        let outcome = session.begin_authorization(&export).await;

        assert_eq!(
            outcome,
            AuthorizationOutcome::Failed {
                kind: ErrorKind::Backend,
                message: "Spotify not configured".to_string()
            }
        );
        assert_eq!(session.store().load(), Some(export));
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_export() {
        let harness = Harness::new("https://yoga.example.com/");
        harness
            .backend
            .push_auth_url(Err(Error::Transport("connection reset".to_string())));
        let session = harness.session();

        let export = sample_export();
        session.begin_authorization(&export).await;

        assert_eq!(session.store().load(), Some(export));
        assert_eq!(
            harness.presenter.last(),
            Some(ExportStatus::Failed {
                message: NETWORK_ERROR_MESSAGE.to_string()
            })
        );
        assert!(harness.navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_failure_is_reported() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .returning(|_| Err(Error::Navigation("blocked".to_string())));

        let harness = Harness::new("https://yoga.example.com/");
        harness.backend.push_auth_url(Ok(AUTH_URL.to_string()));
        let session = harness.session_with_navigator(Rc::new(navigator));

        let outcome = session.begin_authorization(&sample_export()).await;

        assert!(matches!(
            outcome,
            AuthorizationOutcome::Failed {
                kind: ErrorKind::Navigation,
                ..
            }
        ));
        assert!(session.store().load().is_some());
    }

    #[tokio::test]
    async fn test_second_request_overwrites_first() {
        let harness = Harness::new("https://yoga.example.com/");
        harness.backend.push_auth_url(Ok(AUTH_URL.to_string()));
        harness.backend.push_auth_url(Ok(AUTH_URL.to_string()));
        let session = harness.session();

        let first = sample_export();
        let mut second = sample_export();
        second.playlist_name = "Evening Flow - 2024-01-01".to_string();

        session.begin_authorization(&first).await;
        session.begin_authorization(&second).await;

        assert_eq!(session.store().load(), Some(second));
    }
}
