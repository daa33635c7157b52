use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::domain::Principal;
use super::identity::{IdentityClient, IdentityError};

/// Why a session failed to resolve to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The identity endpoint reported a missing or expired credential.
    NotAuthenticated,
    /// The fetch failed for another reason (network, server). Gates exactly
    /// like `NotAuthenticated`; only diagnostics distinguish the two.
    FetchFailed,
}

/// Cached view of the current authentication lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Resolved(Principal),
    Unresolved(UnresolvedReason),
}

impl SessionState {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Resolved(principal) => Some(principal),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

struct Generations {
    current: u64,
    /// Generation a fetch is currently running for, if any. At most one fetch
    /// is claimed per generation.
    fetching: Option<u64>,
}

/// Process-wide session cache with a single-fetch-per-cycle contract.
///
/// The cached state starts at `Loading`, transitions exactly once per
/// invalidation cycle, and is written only here; consumers get read access
/// through [`SessionResolver::resolve`] and [`SessionResolver::peek`].
/// Identity-client failures never escape this boundary.
pub struct SessionResolver<C> {
    client: Arc<C>,
    generations: Mutex<Generations>,
    state_tx: watch::Sender<SessionState>,
}

impl<C> SessionResolver<C>
where
    C: IdentityClient + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        Self {
            client,
            generations: Mutex::new(Generations {
                current: 0,
                fetching: None,
            }),
            state_tx,
        }
    }

    /// Current cached state without triggering a fetch.
    pub fn peek(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Drop the cached state. The next [`resolve`](Self::resolve) issues a
    /// fresh fetch; a result still in flight from before this call is
    /// discarded when it arrives.
    pub fn invalidate(&self) {
        let mut generations = self.generations.lock().expect("generation mutex poisoned");
        generations.current += 1;
        self.state_tx.send_replace(SessionState::Loading);
    }

    /// Resolve the session, fetching at most once per invalidation cycle.
    ///
    /// Concurrent callers during `Loading` share the in-flight fetch and all
    /// observe the same resolution.
    pub async fn resolve(&self) -> SessionState {
        loop {
            let mut state_rx = self.state_tx.subscribe();
            let current = state_rx.borrow_and_update().clone();
            if !current.is_loading() {
                return current;
            }

            let claimed = {
                let mut generations =
                    self.generations.lock().expect("generation mutex poisoned");
                // Commits happen under this lock, so re-checking here closes
                // the window between reading `Loading` and claiming the fetch.
                if !self.state_tx.borrow().is_loading() {
                    None
                } else if generations.fetching == Some(generations.current) {
                    None
                } else {
                    generations.fetching = Some(generations.current);
                    Some(generations.current)
                }
            };

            match claimed {
                Some(generation) => {
                    let state = self.fetch().await;
                    let mut generations =
                        self.generations.lock().expect("generation mutex poisoned");
                    if generations.current == generation {
                        generations.fetching = None;
                        self.state_tx.send_replace(state.clone());
                        return state;
                    }
                    // Invalidated while in flight: discard and re-resolve
                    // under the new generation.
                    debug!(generation, "discarding superseded session fetch");
                }
                None => {
                    if state_rx.changed().await.is_err() {
                        return self.peek();
                    }
                }
            }
        }
    }

    async fn fetch(&self) -> SessionState {
        match self.client.current().await {
            Ok(principal) => SessionState::Resolved(principal),
            Err(IdentityError::NotAuthenticated) => {
                debug!("session resolved anonymous");
                SessionState::Unresolved(UnresolvedReason::NotAuthenticated)
            }
            Err(err) => {
                warn!(error = %err, "identity fetch failed, gating closed");
                SessionState::Unresolved(UnresolvedReason::FetchFailed)
            }
        }
    }
}
