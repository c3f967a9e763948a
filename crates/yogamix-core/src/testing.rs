//! Test doubles shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::address::{MemoryAddressBar, ReturnDetector};
use crate::backend::{CreatePlaylistOutcome, CreatePlaylistRequest, ExportBackend};
use crate::error::{Error, Result};
use crate::export::PendingExport;
use crate::presenter::{ExportPresenter, ExportStatus, Navigator};
use crate::session::ExportSession;
use crate::storage::{IntentStore, MemoryStorage};

/// Backend that replays queued answers and records what it was asked.
#[derive(Default)]
pub struct ScriptedBackend {
    auth_urls: RefCell<VecDeque<Result<String>>>,
    outcomes: RefCell<VecDeque<Result<CreatePlaylistOutcome>>>,
    auth_calls: Cell<usize>,
    create_requests: RefCell<Vec<CreatePlaylistRequest>>,
}

impl ScriptedBackend {
    pub fn push_auth_url(&self, answer: Result<String>) {
        self.auth_urls.borrow_mut().push_back(answer);
    }

    pub fn push_outcome(&self, answer: Result<CreatePlaylistOutcome>) {
        self.outcomes.borrow_mut().push_back(answer);
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.get()
    }

    pub fn create_requests(&self) -> Vec<CreatePlaylistRequest> {
        self.create_requests.borrow().clone()
    }
}

impl ExportBackend for ScriptedBackend {
    async fn request_auth_url(&self) -> Result<String> {
        self.auth_calls.set(self.auth_calls.get() + 1);
        self.auth_urls
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("no scripted auth URL".to_string())))
    }

    async fn create_playlist(
        &self,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistOutcome> {
        self.create_requests.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("no scripted outcome".to_string())))
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    statuses: RefCell<Vec<ExportStatus>>,
}

impl RecordingPresenter {
    pub fn statuses(&self) -> Vec<ExportStatus> {
        self.statuses.borrow().clone()
    }

    pub fn last(&self) -> Option<ExportStatus> {
        self.statuses.borrow().last().cloned()
    }
}

impl ExportPresenter for RecordingPresenter {
    fn present(&self, status: ExportStatus) {
        self.statuses.borrow_mut().push(status);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<()> {
        self.visited.borrow_mut().push(url.to_string());
        Ok(())
    }
}

/// In-memory page: storage, address bar, backend, and surface.
pub struct Harness {
    pub storage: Rc<MemoryStorage>,
    pub address_bar: Rc<MemoryAddressBar>,
    pub backend: Rc<ScriptedBackend>,
    pub presenter: Rc<RecordingPresenter>,
    pub navigator: Rc<RecordingNavigator>,
}

impl Harness {
    pub fn new(href: &str) -> Self {
        Self {
            storage: Rc::new(MemoryStorage::new()),
            address_bar: Rc::new(MemoryAddressBar::new(href)),
            backend: Rc::new(ScriptedBackend::default()),
            presenter: Rc::new(RecordingPresenter::default()),
            navigator: Rc::new(RecordingNavigator::default()),
        }
    }

    pub fn session(&self) -> ExportSession<Rc<ScriptedBackend>> {
        self.session_with_navigator(self.navigator.clone())
    }

    pub fn session_with_navigator(
        &self,
        navigator: Rc<dyn Navigator>,
    ) -> ExportSession<Rc<ScriptedBackend>> {
        ExportSession::new(
            self.backend.clone(),
            IntentStore::new(self.storage.clone()),
            ReturnDetector::new(self.address_bar.clone()),
            navigator,
            self.presenter.clone(),
        )
    }
}

pub fn sample_export() -> PendingExport {
    PendingExport {
        playlist_name: "Morning Flow - 2024-01-01".to_string(),
        track_ids: vec!["t1".to_string(), "t2".to_string()],
        created_at: 1_704_067_200_000,
    }
}
