//! In-memory page used by the export flow tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use yogamix_core::{
    CreatePlaylistOutcome, CreatePlaylistRequest, Error, ExportBackend, ExportPresenter,
    ExportSession, ExportStatus, IntentStore, MemoryAddressBar, MemoryStorage, Navigator,
    PendingExport, Result, ReturnDetector,
};

/// Backend double answering from queues.
#[derive(Default)]
pub struct QueuedBackend {
    auth_urls: RefCell<VecDeque<Result<String>>>,
    outcomes: RefCell<VecDeque<Result<CreatePlaylistOutcome>>>,
    auth_calls: Cell<usize>,
    requests: RefCell<Vec<CreatePlaylistRequest>>,
    /// Snapshot of the stored export taken whenever an auth URL is requested.
    stored_at_auth: RefCell<Vec<Option<PendingExport>>>,
    store: RefCell<Option<IntentStore>>,
}

impl QueuedBackend {
    pub fn auth_url(&self, answer: Result<String>) -> &Self {
        self.auth_urls.borrow_mut().push_back(answer);
        self
    }

    pub fn outcome(&self, answer: Result<CreatePlaylistOutcome>) -> &Self {
        self.outcomes.borrow_mut().push_back(answer);
        self
    }

    pub fn watch_store(&self, store: IntentStore) {
        *self.store.borrow_mut() = Some(store);
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.get()
    }

    pub fn requests(&self) -> Vec<CreatePlaylistRequest> {
        self.requests.borrow().clone()
    }

    pub fn stored_at_auth(&self) -> Vec<Option<PendingExport>> {
        self.stored_at_auth.borrow().clone()
    }
}

impl ExportBackend for QueuedBackend {
    async fn request_auth_url(&self) -> Result<String> {
        self.auth_calls.set(self.auth_calls.get() + 1);
        let snapshot = self.store.borrow().as_ref().and_then(IntentStore::load);
        self.stored_at_auth.borrow_mut().push(snapshot);
        self.auth_urls
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("unexpected auth URL request".to_string())))
    }

    async fn create_playlist(
        &self,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistOutcome> {
        self.requests.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("unexpected create request".to_string())))
    }
}

/// Presenter that keeps every status it was shown.
#[derive(Default)]
pub struct StatusLog(RefCell<Vec<ExportStatus>>);

impl StatusLog {
    pub fn all(&self) -> Vec<ExportStatus> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<ExportStatus> {
        self.0.borrow().last().cloned()
    }
}

impl ExportPresenter for StatusLog {
    fn present(&self, status: ExportStatus) {
        self.0.borrow_mut().push(status);
    }
}

/// Navigator that records destinations.
#[derive(Default)]
pub struct NavigationLog(RefCell<Vec<String>>);

impl NavigationLog {
    pub fn all(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, url: &str) -> Result<()> {
        self.0.borrow_mut().push(url.to_string());
        Ok(())
    }
}

/// One simulated browser tab. Storage outlives page loads; everything else
/// is per load.
pub struct Page {
    pub storage: Rc<MemoryStorage>,
    pub address_bar: Rc<MemoryAddressBar>,
    pub backend: Rc<QueuedBackend>,
    pub statuses: Rc<StatusLog>,
    pub navigations: Rc<NavigationLog>,
}

impl Page {
    pub fn load(storage: Rc<MemoryStorage>, href: &str) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self {
            storage,
            address_bar: Rc::new(MemoryAddressBar::new(href)),
            backend: Rc::new(QueuedBackend::default()),
            statuses: Rc::new(StatusLog::default()),
            navigations: Rc::new(NavigationLog::default()),
        }
    }

    pub fn store(&self) -> IntentStore {
        IntentStore::new(self.storage.clone())
    }

    pub fn session(&self) -> ExportSession<Rc<QueuedBackend>> {
        self.backend.watch_store(self.store());
        ExportSession::new(
            self.backend.clone(),
            self.store(),
            ReturnDetector::new(self.address_bar.clone()),
            self.navigations.clone(),
            self.statuses.clone(),
        )
    }
}

pub fn morning_flow() -> PendingExport {
    PendingExport {
        playlist_name: "Morning Flow - 2024-01-01".to_string(),
        track_ids: vec!["t1".to_string(), "t2".to_string()],
        created_at: 1_704_067_200_000,
    }
}
