use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::auth::domain::{Principal, PrincipalId, Role};
use crate::auth::identity::{IdentityClient, IdentityError, LoginRequest, RegisterRequest};
use crate::auth::notice::{Notice, NoticePublisher};

pub(super) fn principal(role: Role) -> Principal {
    Principal {
        id: PrincipalId(format!("u-{}", role.label())),
        full_name: format!("{} account", role.label()),
        email: format!("{}@example.test", role.label()),
        role,
    }
}

/// Identity double with scripted responses and a semaphore gate so tests can
/// hold a fetch in flight.
pub(super) struct ScriptedIdentity {
    calls: AtomicUsize,
    gate: Arc<Semaphore>,
    current_responses: Mutex<VecDeque<Result<Principal, IdentityError>>>,
    login_responses: Mutex<VecDeque<Result<Principal, IdentityError>>>,
    register_responses: Mutex<VecDeque<Result<Principal, IdentityError>>>,
    logout_responses: Mutex<VecDeque<Result<(), IdentityError>>>,
}

impl ScriptedIdentity {
    /// Fetches complete as soon as they are issued.
    pub(super) fn open() -> Arc<Self> {
        Arc::new(Self::with_permits(Semaphore::MAX_PERMITS))
    }

    /// Fetches block until [`release`](Self::release) is called, one permit
    /// per fetch.
    pub(super) fn held() -> Arc<Self> {
        Arc::new(Self::with_permits(0))
    }

    fn with_permits(permits: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            gate: Arc::new(Semaphore::new(permits)),
            current_responses: Mutex::new(VecDeque::new()),
            login_responses: Mutex::new(VecDeque::new()),
            register_responses: Mutex::new(VecDeque::new()),
            logout_responses: Mutex::new(VecDeque::new()),
        }
    }

    pub(super) fn release(&self) {
        self.gate.add_permits(1);
    }

    pub(super) fn current_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Block until the double has seen `count` identity fetches.
    pub(super) async fn wait_for_calls(&self, count: usize) {
        while self.current_calls() < count {
            tokio::task::yield_now().await;
        }
    }

    pub(super) fn push_current(&self, response: Result<Principal, IdentityError>) {
        self.current_responses
            .lock()
            .expect("scripted mutex poisoned")
            .push_back(response);
    }

    pub(super) fn push_login(&self, response: Result<Principal, IdentityError>) {
        self.login_responses
            .lock()
            .expect("scripted mutex poisoned")
            .push_back(response);
    }

    pub(super) fn push_register(&self, response: Result<Principal, IdentityError>) {
        self.register_responses
            .lock()
            .expect("scripted mutex poisoned")
            .push_back(response);
    }

    pub(super) fn push_logout(&self, response: Result<(), IdentityError>) {
        self.logout_responses
            .lock()
            .expect("scripted mutex poisoned")
            .push_back(response);
    }
}

#[async_trait]
impl IdentityClient for ScriptedIdentity {
    async fn current(&self) -> Result<Principal, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate
            .acquire()
            .await
            .expect("scripted gate closed")
            .forget();
        self.current_responses
            .lock()
            .expect("scripted mutex poisoned")
            .pop_front()
            .unwrap_or(Err(IdentityError::NotAuthenticated))
    }

    async fn login(&self, _request: LoginRequest) -> Result<Principal, IdentityError> {
        self.login_responses
            .lock()
            .expect("scripted mutex poisoned")
            .pop_front()
            .unwrap_or(Err(IdentityError::NotAuthenticated))
    }

    async fn register(&self, _request: RegisterRequest) -> Result<Principal, IdentityError> {
        self.register_responses
            .lock()
            .expect("scripted mutex poisoned")
            .pop_front()
            .unwrap_or(Err(IdentityError::Rejected("not scripted".to_string())))
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        self.logout_responses
            .lock()
            .expect("scripted mutex poisoned")
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotices {
    events: Mutex<Vec<Notice>>,
}

impl MemoryNotices {
    pub(super) fn events(&self) -> Vec<Notice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }

    pub(super) fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|notice| notice.message)
            .collect()
    }
}

impl NoticePublisher for MemoryNotices {
    fn publish(&self, notice: Notice) {
        self.events
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
