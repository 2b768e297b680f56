/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use crate::common::types::SessionId;
use crate::tools::{error::AppError, prometheus::LIVE_SESSIONS};
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// A live app session that can be torn down, cancelling whatever it still has scheduled.
#[async_trait]
pub trait FlowSession: Send + Sync {
    const APP: &'static str;

    fn id(&self) -> &SessionId;

    async fn teardown(&self);
}

pub fn new_session_id() -> SessionId {
    SessionId(Uuid::new_v4().to_string())
}

pub struct SessionStore<S: FlowSession> {
    sessions: RwLock<FxHashMap<SessionId, Arc<S>>>,
    capacity: usize,
}

impl<S: FlowSession> SessionStore<S> {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(FxHashMap::default()),
            capacity,
        }
    }

    pub async fn insert(&self, session: Arc<S>) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.capacity {
            return Err(AppError::SessionLimitExceeded(self.capacity));
        }
        info!(tag = "[Session Started]", app = S::APP, session_id = %session.id());
        sessions.insert(session.id().to_owned(), session);
        LIVE_SESSIONS
            .with_label_values(&[S::APP])
            .set(sessions.len() as i64);
        Ok(())
    }

    pub async fn get(&self, session_id: &SessionId) -> Result<Arc<S>, AppError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or(AppError::SessionNotFound(session_id.to_string()))
    }

    /// Removes the session and tears it down.
    pub async fn remove(&self, session_id: &SessionId) -> Result<(), AppError> {
        let session = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .remove(session_id)
                .ok_or(AppError::SessionNotFound(session_id.to_string()))?;
            LIVE_SESSIONS
                .with_label_values(&[S::APP])
                .set(sessions.len() as i64);
            session
        };
        session.teardown().await;
        info!(tag = "[Session Ended]", app = S::APP, session_id = %session_id);
        Ok(())
    }

    /// Tears down every session, used on shutdown.
    pub async fn clear(&self) {
        let drained: Vec<Arc<S>> = {
            let mut sessions = self.sessions.write().await;
            sessions.drain().map(|(_, session)| session).collect()
        };
        LIVE_SESSIONS.with_label_values(&[S::APP]).set(0);
        for session in drained.iter() {
            session.teardown().await;
        }
        info!(tag = "[Sessions Cleared]", app = S::APP, count = drained.len());
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
