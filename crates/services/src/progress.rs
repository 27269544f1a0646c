use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::{Day, DayStatus, ProgressMap, User, UserId};
use storage::LocalPersistence;

use crate::error::ProgressError;
use crate::gateway::RemoteGateway;

/// Which store currently owns the progress map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Authority {
    #[default]
    Local,
    Remote(UserId),
}

#[derive(Debug, Default)]
struct ProgressState {
    map: ProgressMap,
    authority: Authority,
}

/// Owns the active progress map and routes writes to the authoritative store.
///
/// Exactly one store is authoritative at a time. The switch from local to
/// remote happens only in `reconcile_on_sign_in`, which merges both maps
/// (remote wins per day) and writes the result back to the remote store.
pub struct ProgressService {
    gateway: Arc<dyn RemoteGateway>,
    local: LocalPersistence,
    state: Mutex<ProgressState>,
}

impl ProgressService {
    #[must_use]
    pub fn new(gateway: Arc<dyn RemoteGateway>, local: LocalPersistence) -> Self {
        Self {
            gateway,
            local,
            state: Mutex::new(ProgressState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, map: ProgressMap, authority: Authority) {
        let mut state = self.lock();
        state.map = map;
        state.authority = authority;
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressMap {
        self.lock().map.clone()
    }

    #[must_use]
    pub fn authority(&self) -> Authority {
        self.lock().authority.clone()
    }

    /// Load progress from the store matching the session state.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Gateway` if the remote read fails. Local reads
    /// never fail.
    pub async fn load_for(&self, user: Option<&User>) -> Result<ProgressMap, ProgressError> {
        let (map, authority) = match user {
            Some(user) => (
                self.gateway.progress(&user.id).await?,
                Authority::Remote(user.id.clone()),
            ),
            None => (self.local.load().await, Authority::Local),
        };
        tracing::debug!(days = map.len(), ?authority, "progress loaded");
        self.replace(map.clone(), authority);
        Ok(map)
    }

    /// Record `status` for `day` and persist the whole map.
    ///
    /// The in-memory map is updated even when the remote write fails.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Gateway` if the remote write fails.
    pub async fn record(&self, day: Day, status: DayStatus) -> Result<ProgressMap, ProgressError> {
        let (snapshot, authority) = {
            let mut state = self.lock();
            state.map.record(day, status);
            (state.map.clone(), state.authority.clone())
        };

        match authority {
            Authority::Local => self.local.save(&snapshot).await,
            Authority::Remote(user_id) => {
                if let Err(err) = self.gateway.save_progress(&user_id, &snapshot).await {
                    tracing::warn!(user = %user_id, %day, error = %err, "progress write failed");
                    return Err(err.into());
                }
            }
        }
        Ok(snapshot)
    }

    /// Merge local progress into the user's remote progress and adopt it.
    ///
    /// Remote entries win on shared days; local-only days are carried over.
    /// The merged map is written back to the remote store. Calling this again
    /// for the user who is already authoritative returns the current map
    /// without touching either store.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Gateway` if the remote read or write fails; the
    /// authority stays local in that case.
    pub async fn reconcile_on_sign_in(&self, user: &User) -> Result<ProgressMap, ProgressError> {
        if self.authority() == Authority::Remote(user.id.clone()) {
            return Ok(self.snapshot());
        }

        let local = self.local.load().await;
        let remote = self.gateway.progress(&user.id).await?;
        let merged = ProgressMap::merge_remote_over_local(&local, &remote);
        self.gateway.save_progress(&user.id, &merged).await?;

        tracing::info!(
            user = %user.id,
            local = local.len(),
            remote = remote.len(),
            merged = merged.len(),
            "progress reconciled"
        );
        self.replace(merged.clone(), Authority::Remote(user.id.clone()));
        Ok(merged)
    }

    /// Hand authority back to local persistence and reload from it.
    pub async fn on_sign_out(&self) -> ProgressMap {
        let map = self.local.load().await;
        self.replace(map.clone(), Authority::Local);
        map
    }
}
