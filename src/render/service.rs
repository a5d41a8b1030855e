//! Render service - owns the worker thread, the request generation counter
//! and the gallery cache.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, info, warn};

use crate::errors::ViewerError;

use super::DEFAULT_CACHE_SIZE;
use super::cache::{CacheKey, GalleryCache};
use super::request::{RenderRequest, RenderResponse, RequestId};
use super::state::{Command, Effect, ViewState};
use super::types::PageGallery;
use super::worker::render_worker;

/// Document metadata reported by the worker after opening.
#[derive(Clone, Debug)]
pub struct DocumentInfo {
    pub page_count: u32,
    pub title: Option<String>,
}

/// Events delivered to the UI from `poll_events`.
#[derive(Debug)]
pub enum ServiceEvent {
    /// Document opened; page count and title are known
    DocumentReady(DocumentInfo),
    /// A gallery for the current page arrived
    Gallery(Arc<PageGallery>),
    /// Document open, page load or render failed
    Failed(ViewerError),
}

/// Manages rendering through a single worker thread.
///
/// Every page render carries a fresh `RequestId`; only the newest id is
/// considered live and responses from older generations are discarded on
/// receipt. Rapid navigation therefore always settles on the latest page,
/// and a stale rasterization can never overwrite a newer one.
pub struct RenderService {
    state: ViewState,
    doc_path: PathBuf,
    request_tx: Sender<RenderRequest>,
    response_rx: Receiver<RenderResponse>,
    next_request_id: u64,
    live_request: Option<(RequestId, CacheKey)>,
    cache: GalleryCache,
    document: Option<DocumentInfo>,
    ready: VecDeque<ServiceEvent>,
}

impl RenderService {
    /// Open a document and start its render worker.
    #[must_use]
    pub fn new(doc_path: PathBuf) -> Self {
        let (request_tx, response_rx) = spawn_worker(&doc_path);
        info!("render service started for {}", doc_path.display());

        Self {
            state: ViewState::new(),
            doc_path,
            request_tx,
            response_rx,
            next_request_id: 1,
            live_request: None,
            cache: GalleryCache::new(DEFAULT_CACHE_SIZE),
            document: None,
            ready: VecDeque::new(),
        }
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Document metadata, once the worker has reported it.
    #[must_use]
    pub fn document_info(&self) -> Option<&DocumentInfo> {
        self.document.as_ref()
    }

    /// Override the initial size before the first render (CLI/settings).
    pub fn set_initial_size(&mut self, size: u32) {
        self.state.size.set(size);
    }

    /// Apply a command to the view state and execute its effects.
    pub fn apply_command(&mut self, cmd: Command) {
        let effects = self.state.apply(cmd);
        self.execute_effects(effects);
    }

    fn execute_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RenderCurrentPage => self.request_current_page(),

                Effect::InvalidateCache => {
                    self.cache.invalidate_all();
                    self.live_request = None;
                }

                Effect::ReloadDocument => {
                    info!("reloading {}", self.doc_path.display());
                    let _ = self.request_tx.send(RenderRequest::Shutdown);
                    let (tx, rx) = spawn_worker(&self.doc_path);
                    self.request_tx = tx;
                    self.response_rx = rx;
                    self.document = None;
                }
            }
        }
    }

    /// Request the gallery for the current page, serving from cache when a
    /// matching render already exists.
    fn request_current_page(&mut self) {
        if self.document.is_none() {
            // First render is issued when DocumentInfo arrives.
            return;
        }

        let page = self.state.current_page;
        let params = self.state.render_params();
        let key = CacheKey::from_params(page, &params);

        if let Some(cached) = self.cache.get(&key) {
            debug!("gallery cache hit for page {page} at {}", params.size.value);
            self.live_request = None;
            self.ready.push_back(ServiceEvent::Gallery(cached));
            return;
        }

        let id = self.next_id();
        let _ = self.request_tx.send(RenderRequest::Gallery { id, page, params });
        self.live_request = Some((id, key));
    }

    /// Poll for completed responses, discarding stale generations.
    pub fn poll_events(&mut self) -> Vec<ServiceEvent> {
        let mut events: Vec<ServiceEvent> = self.ready.drain(..).collect();

        while let Ok(response) = self.response_rx.try_recv() {
            match response {
                RenderResponse::DocumentInfo { page_count, title } => {
                    let info = DocumentInfo { page_count, title };
                    self.document = Some(info.clone());
                    let effects = self.state.apply(Command::SetPageCount(page_count));
                    self.execute_effects(effects);
                    events.push(ServiceEvent::DocumentReady(info));
                    self.request_current_page();
                    events.extend(self.ready.drain(..));
                }

                RenderResponse::Gallery { id, page, data } => {
                    let Some((live_id, key)) = self.live_request else {
                        debug!("discarding render of page {page} (nothing live)");
                        continue;
                    };
                    if id != live_id {
                        debug!("discarding stale render of page {page}");
                        continue;
                    }

                    self.live_request = None;

                    // The worker already rendered at the page-clamped size;
                    // narrowing the control here lands on the same value, so
                    // the published gallery always matches the control.
                    let _ = self
                        .state
                        .size
                        .narrow_max(data.natural_width, data.natural_height);

                    self.cache.insert(key, Arc::clone(&data));
                    let effective = CacheKey {
                        page,
                        target_size: data.target_size,
                    };
                    if effective != key {
                        self.cache.insert(effective, Arc::clone(&data));
                    }

                    events.push(ServiceEvent::Gallery(data));
                }

                RenderResponse::Error { id, error } => {
                    match self.live_request {
                        Some((live_id, _)) if id == live_id => {
                            self.live_request = None;
                            warn!("render failed: {error}");
                            events.push(ServiceEvent::Failed(error));
                        }
                        _ => debug!("discarding stale render error: {error}"),
                    }
                }

                RenderResponse::DocumentFailed { error } => {
                    warn!("document failed: {error}");
                    self.document = None;
                    events.push(ServiceEvent::Failed(error));
                }
            }
        }

        events
    }

    /// True while a render request is in flight.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.live_request.is_some()
    }

    fn next_id(&mut self) -> RequestId {
        let id = RequestId::new(self.next_request_id);
        self.next_request_id += 1;
        id
    }
}

impl Drop for RenderService {
    fn drop(&mut self) {
        let _ = self.request_tx.send(RenderRequest::Shutdown);
    }
}

fn spawn_worker(doc_path: &Path) -> (Sender<RenderRequest>, Receiver<RenderResponse>) {
    let (request_tx, request_rx) = flume::unbounded();
    let (response_tx, response_rx) = flume::unbounded();

    let path = doc_path.to_path_buf();
    std::thread::spawn(move || {
        render_worker(&path, request_rx, response_tx);
    });

    (request_tx, response_rx)
}
