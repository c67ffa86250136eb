#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use http::StatusCode;
use swcache::{
    ClientId, ClientQuery, FetchError, Host, HostError, Network, Notification, Request, Response,
    ServiceWorker, WindowClient, WorkerConfig,
};
use swcache_moka::MokaStorage;
use tokio::sync::Semaphore;
use url::Url;

pub const SCOPE: &str = "https://news.example/morningnews/";

pub fn scope() -> Url {
    Url::parse(SCOPE).unwrap()
}

/// Absolute URL of `path` under the scope.
pub fn at(path: &str) -> String {
    scope().join(path).unwrap().to_string()
}

pub fn get(path: &str) -> Request {
    Request::get(&at(path)).unwrap()
}

#[derive(Debug, Clone)]
enum Route {
    Respond(Response),
    Fail,
}

/// In-memory origin server counting every request it sees.
///
/// Unknown URLs answer `404`. While offline every fetch fails; while gated
/// every fetch waits until the gate opens.
#[derive(Debug)]
pub struct TestNetwork {
    routes: DashMap<String, Route>,
    calls: DashMap<String, usize>,
    offline: AtomicBool,
    gated: AtomicBool,
    gate: Semaphore,
}

impl Default for TestNetwork {
    fn default() -> Self {
        Self {
            routes: DashMap::new(),
            calls: DashMap::new(),
            offline: AtomicBool::new(false),
            gated: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }
}

impl TestNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Network serving `200` for every precache manifest entry.
    pub fn with_site() -> Self {
        let network = Self::new();
        for path in WorkerConfig::default().precache {
            network.respond(&path, &format!("site:{path}"));
        }
        network
    }

    pub fn respond(&self, path: &str, body: &str) {
        self.routes.insert(
            at(path),
            Route::Respond(Response::ok_with_body(body.to_string())),
        );
    }

    pub fn respond_with(&self, path: &str, response: Response) {
        self.routes.insert(at(path), Route::Respond(response));
    }

    pub fn fail(&self, path: &str) {
        self.routes.insert(at(path), Route::Fail);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn close_gate(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    pub fn open_gate(&self) {
        self.gated.store(false, Ordering::SeqCst);
        self.gate.add_permits(64);
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.get(&at(path)).map(|count| *count).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl Network for TestNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let mut url = request.url().clone();
        url.set_fragment(None);
        let url = url.to_string();
        *self.calls.entry(url.clone()).or_insert(0) += 1;

        if self.gated.load(Ordering::SeqCst) {
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(FetchError::network)?;
        }

        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::network(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "offline",
            )));
        }

        let route = self.routes.get(&url).map(|route| route.value().clone());
        match route {
            Some(Route::Respond(response)) => Ok(response.with_url(request.url().clone())),
            Some(Route::Fail) => Err(FetchError::network(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            ))),
            None => Ok(Response::new(StatusCode::NOT_FOUND, "not found")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    SkipWaiting,
    Claim,
    MatchAll(ClientQuery),
    Focus(ClientId),
    OpenWindow(Url),
    Show(String),
    Close(String),
}

/// Host recording every call made to it.
#[derive(Debug)]
pub struct TestHost {
    scope: Url,
    clients: Mutex<Vec<WindowClient>>,
    can_open_windows: AtomicBool,
    calls: Mutex<Vec<HostCall>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            scope: scope(),
            clients: Mutex::new(Vec::new()),
            can_open_windows: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_client(self, id: &str, path: &str) -> Self {
        self.clients.lock().unwrap().push(WindowClient {
            id: ClientId::new(id),
            url: Url::parse(&at(path)).unwrap(),
        });
        self
    }

    pub fn without_windows(self) -> Self {
        self.can_open_windows.store(false, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Host for TestHost {
    fn scope(&self) -> &Url {
        &self.scope
    }

    async fn skip_waiting(&self) -> Result<(), HostError> {
        self.record(HostCall::SkipWaiting);
        Ok(())
    }

    async fn claim(&self) -> Result<(), HostError> {
        self.record(HostCall::Claim);
        Ok(())
    }

    async fn match_all(&self, query: ClientQuery) -> Result<Vec<WindowClient>, HostError> {
        self.record(HostCall::MatchAll(query));
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn focus(&self, client: &ClientId) -> Result<(), HostError> {
        self.record(HostCall::Focus(client.clone()));
        Ok(())
    }

    async fn open_window(&self, url: &Url) -> Result<(), HostError> {
        if !self.can_open_windows.load(Ordering::SeqCst) {
            return Err(HostError::Unsupported("open_window"));
        }
        self.record(HostCall::OpenWindow(url.clone()));
        Ok(())
    }

    async fn show_notification(&self, notification: &Notification) -> Result<(), HostError> {
        self.record(HostCall::Show(notification.title.clone()));
        Ok(())
    }

    async fn close_notification(&self, notification: &Notification) -> Result<(), HostError> {
        self.record(HostCall::Close(notification.title.clone()));
        Ok(())
    }
}

pub type TestWorker = ServiceWorker<MokaStorage, TestNetwork, TestHost>;

pub struct Harness {
    pub storage: Arc<MokaStorage>,
    pub network: Arc<TestNetwork>,
    pub host: Arc<TestHost>,
    pub worker: TestWorker,
}

impl Harness {
    pub fn new(network: TestNetwork, host: TestHost, config: WorkerConfig) -> Self {
        let storage = Arc::new(MokaStorage::builder().unbounded().build());
        Self::with_storage(storage, network, host, config)
    }

    pub fn with_storage(
        storage: Arc<MokaStorage>,
        network: TestNetwork,
        host: TestHost,
        config: WorkerConfig,
    ) -> Self {
        let network = Arc::new(network);
        let host = Arc::new(host);
        let worker = ServiceWorker::new(
            Arc::clone(&storage),
            Arc::clone(&network),
            Arc::clone(&host),
            config,
        );
        Self {
            storage,
            network,
            host,
            worker,
        }
    }

    /// Installed and activated worker over the default site.
    pub async fn active() -> Self {
        let harness = Self::new(TestNetwork::with_site(), TestHost::new(), WorkerConfig::default());
        harness.worker.install().await.unwrap();
        harness.worker.activate().await.unwrap();
        harness
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
