//! Mock store for testing the service without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use vidrepo_core::{RemoteFile, StoreBackend, WriteRequest};
use vidrepo_storage::{RemoteStore, StoreError, StoreResult};

/// Lets a test hold a store call open and observe the in-flight state.
#[derive(Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

enum ListBehavior {
    Files(Vec<RemoteFile>),
    Fail(u16, String),
}

pub struct MockStore {
    puts: Mutex<Vec<(String, WriteRequest)>>,
    put_calls: AtomicUsize,
    list_calls: AtomicUsize,
    put_failure: Mutex<Option<(u16, String)>>,
    list_behavior: Mutex<ListBehavior>,
    gate: Option<Arc<Gate>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            puts: Mutex::new(Vec::new()),
            put_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            put_failure: Mutex::new(None),
            list_behavior: Mutex::new(ListBehavior::Files(Vec::new())),
            gate: None,
        }
    }

    /// Every store call waits on `gate` before answering.
    pub fn gated(gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn fail_puts(&self, status: u16, body: &str) {
        *self.put_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn set_listing(&self, files: Vec<RemoteFile>) {
        *self.list_behavior.lock().unwrap() = ListBehavior::Files(files);
    }

    pub fn fail_listing(&self, status: u16, body: &str) {
        *self.list_behavior.lock().unwrap() = ListBehavior::Fail(status, body.to_string());
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> Vec<(String, WriteRequest)> {
        self.puts.lock().unwrap().clone()
    }
}

pub fn remote_file(name: &str) -> RemoteFile {
    RemoteFile {
        name: name.to_string(),
        path: format!("videos/{}", name),
        content_hash: format!("sha-{}", name),
        size_bytes: 1024,
        download_url: format!("https://raw.example.com/octo/clips/main/videos/{}", name),
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn put_file(&self, relative_name: &str, request: &WriteRequest) -> StoreResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        self.puts
            .lock()
            .unwrap()
            .push((relative_name.to_string(), request.clone()));

        let failure = self.put_failure.lock().unwrap().clone();
        match failure {
            Some((status, body)) => Err(StoreError::Remote { status, body }),
            None => Ok(()),
        }
    }

    async fn list_directory(&self) -> StoreResult<Vec<RemoteFile>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        match &*self.list_behavior.lock().unwrap() {
            ListBehavior::Files(files) => Ok(files.clone()),
            ListBehavior::Fail(status, body) => Err(StoreError::Remote {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
