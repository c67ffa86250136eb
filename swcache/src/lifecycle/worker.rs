use std::sync::Arc;

use http::Method;
use smol_str::SmolStr;
use swcache_backend::{BackendError, CacheStorage};
use swcache_core::{Network, PushData, Request, Response};
use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};

use super::event::{Event, EventOutcome, FetchOutcome};
use super::state::{InvalidTransition, Phase, WorkerState};
use crate::classifier::{Classification, Classifier};
use crate::config::WorkerConfig;
use crate::error::{PrecacheError, WorkerError};
use crate::host::Host;
use crate::metrics;
use crate::notification::{ClickOutcome, Notification, build_notification, handle_click};
use crate::offload::OffloadManager;
use crate::precache::precache;
use crate::strategy::Strategies;

/// Result of the install step.
#[derive(Debug)]
pub struct InstallReport {
    /// Entries stored in CORE.
    pub precached: usize,
    /// Why the precache batch was abandoned, if it was. Install still
    /// completes.
    pub failure: Option<PrecacheError>,
}

/// Result of the activate step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivateReport {
    /// Stale partitions removed.
    pub deleted: Vec<SmolStr>,
    /// Stale partitions that could not be removed.
    pub failed: Vec<SmolStr>,
}

/// An offline-first caching worker.
///
/// Owns the lifecycle state machine and routes every [`Event`] to its
/// handler. Storage, network and host are injected.
pub struct ServiceWorker<S, N, H> {
    storage: Arc<S>,
    host: Arc<H>,
    network: Arc<N>,
    config: Arc<WorkerConfig>,
    classifier: Classifier,
    strategies: Strategies<S, N>,
    state: watch::Sender<WorkerState>,
}

impl<S, N, H> std::fmt::Debug for ServiceWorker<S, N, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceWorker")
            .field("state", &*self.state.borrow())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S, N, H> ServiceWorker<S, N, H>
where
    S: CacheStorage + 'static,
    N: Network + 'static,
    H: Host + 'static,
{
    /// Creates a worker in the [`WorkerState::Parsed`] state.
    pub fn new(storage: Arc<S>, network: Arc<N>, host: Arc<H>, config: WorkerConfig) -> Self {
        let classifier = Classifier::new(host.scope(), &config.asset_extensions);
        let offload = OffloadManager::new(config.offload.clone());
        let strategies = Strategies::new(Arc::clone(&storage), Arc::clone(&network), offload);
        let (state, _) = watch::channel(WorkerState::Parsed);
        Self {
            storage,
            host,
            network,
            config: Arc::new(config),
            classifier,
            strategies,
            state,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    /// Worker configuration.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Manager running background refreshes.
    pub fn offload(&self) -> &OffloadManager {
        self.strategies.offload()
    }

    /// Waits until the worker is activated, or terminated.
    pub async fn ready(&self) -> WorkerState {
        let mut state = self.state.subscribe();
        match state
            .wait_for(|state| matches!(state, WorkerState::Activated | WorkerState::Redundant))
            .await
        {
            Ok(state) => *state,
            Err(_) => WorkerState::Redundant,
        }
    }

    fn advance(&self, phase: Phase) -> Result<WorkerState, InvalidTransition> {
        let mut result = Err(InvalidTransition {
            from: self.state(),
            phase,
        });
        self.state.send_if_modified(|state| match state.next(phase) {
            Ok(next) => {
                debug!(from = %state, to = %next, "worker state changed");
                *state = next;
                result = Ok(next);
                true
            }
            Err(err) => {
                result = Err(err);
                false
            }
        });
        result
    }

    /// Handles one event.
    pub async fn dispatch(&self, event: Event) -> Result<EventOutcome, WorkerError> {
        let span = info_span!("worker_event", event = event.name());
        async move {
            match event {
                Event::Install => self.install().await.map(EventOutcome::Installed),
                Event::Activate => self.activate().await.map(EventOutcome::Activated),
                Event::Fetch(request) => self.fetch(&request).await.map(EventOutcome::Fetch),
                Event::Push(data) => self.push(data.as_ref()).await.map(EventOutcome::Push),
                Event::NotificationClick(notification) => self
                    .notification_click(&notification)
                    .await
                    .map(EventOutcome::NotificationClick),
            }
        }
        .instrument(span)
        .await
    }

    /// Installs the worker: precaches the manifest into CORE.
    ///
    /// A failed precache batch is logged and reported, never returned as an
    /// error.
    pub async fn install(&self) -> Result<InstallReport, WorkerError> {
        self.advance(Phase::BeginInstall)?;
        info!(scope = %self.host.scope(), "installing");

        if let Err(err) = self.host.skip_waiting().await {
            warn!(error = %err, "skip waiting failed");
        }

        let core = self.config.caches.core();
        let report = match precache(
            self.storage.as_ref(),
            self.network.as_ref(),
            self.host.scope(),
            &core,
            &self.config.precache,
        )
        .await
        {
            Ok(precached) => {
                metrics::record_precache(true);
                InstallReport {
                    precached,
                    failure: None,
                }
            }
            Err(err) => {
                warn!(partition = %core, error = %err, "core precache failed");
                metrics::record_precache(false);
                InstallReport {
                    precached: 0,
                    failure: Some(err),
                }
            }
        };

        self.advance(Phase::FinishInstall)?;
        Ok(report)
    }

    /// Activates the worker: deletes stale partitions of the family and
    /// claims open pages.
    pub async fn activate(&self) -> Result<ActivateReport, WorkerError> {
        self.advance(Phase::BeginActivate)?;
        info!("activating");

        let names = match self.storage.keys().await {
            Ok(names) => names,
            Err(err) => {
                warn!(error = %err, "failed to list cache partitions");
                Vec::new()
            }
        };

        let mut report = ActivateReport::default();
        for name in names
            .into_iter()
            .filter(|name| self.config.caches.is_stale(name))
        {
            match self.storage.delete(&name).await {
                Ok(status) if status.is_deleted() => {
                    debug!(partition = %name, "deleted stale partition");
                    report.deleted.push(name);
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(partition = %name, error = %err, "failed to delete stale partition");
                    report.failed.push(name);
                }
            }
        }
        metrics::record_purged(report.deleted.len());

        if let Err(err) = self.host.claim().await {
            warn!(error = %err, "failed to claim clients");
        }

        self.advance(Phase::FinishActivate)?;
        Ok(report)
    }

    /// Marks the worker redundant.
    pub fn terminate(&self) -> Result<(), WorkerError> {
        self.advance(Phase::Terminate)?;
        Ok(())
    }

    /// Routes one request.
    pub async fn fetch(&self, request: &Request) -> Result<FetchOutcome, WorkerError> {
        if self.state() != WorkerState::Activated {
            debug!(state = %self.state(), url = %request.url(), "worker not active, passing through");
            return Ok(FetchOutcome::Passthrough);
        }

        match self.classifier.classify(request) {
            Classification::Ignored(reason) => {
                debug!(?reason, url = %request.url(), "request ignored");
                Ok(FetchOutcome::Passthrough)
            }
            Classification::Unhandled => {
                debug!(url = %request.url(), "request not cached");
                Ok(FetchOutcome::Passthrough)
            }
            Classification::Page => Ok(self.serve_page(request).await),
            Classification::Asset => {
                let core = self.config.caches.core();
                let response = self.strategies.cache_first(request, &core).await?;
                Ok(FetchOutcome::Respond(response))
            }
        }
    }

    async fn serve_page(&self, request: &Request) -> FetchOutcome {
        let pages = self.config.caches.pages();
        match self.strategies.stale_while_revalidate(request, &pages).await {
            Ok(Some(response)) => return FetchOutcome::Respond(response),
            Ok(None) => {}
            Err(err) => warn!(partition = %pages, error = %err, "page lookup failed"),
        }

        match self.offline_page().await {
            Ok(Some(response)) => {
                debug!(url = %request.url(), "serving offline page");
                metrics::record_offline_fallback();
                FetchOutcome::Respond(response)
            }
            Ok(None) => FetchOutcome::NetworkError,
            Err(err) => {
                warn!(error = %err, "offline page lookup failed");
                FetchOutcome::NetworkError
            }
        }
    }

    async fn offline_page(&self) -> Result<Option<Response>, BackendError> {
        let url = match self.host.scope().join(&self.config.offline_page) {
            Ok(url) => url,
            Err(err) => {
                warn!(page = %self.config.offline_page, error = %err, "invalid offline page");
                return Ok(None);
            }
        };
        let core = self.storage.open(&self.config.caches.core()).await?;
        core.match_request(&Request::new(Method::GET, url)).await
    }

    /// Shows the notification for a push message.
    pub async fn push(&self, data: Option<&PushData>) -> Result<Notification, WorkerError> {
        let notification =
            build_notification(data, self.host.scope(), &self.config.notification);
        self.host.show_notification(&notification).await?;
        Ok(notification)
    }

    /// Resolves a click on `notification`.
    pub async fn notification_click(
        &self,
        notification: &Notification,
    ) -> Result<ClickOutcome, WorkerError> {
        Ok(handle_click(self.host.as_ref(), notification).await?)
    }
}
