// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared handle to a [`VanState`] for one connected session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::error::ParseError;
use crate::telemetry::{self, MergeReport};

use super::{SessionId, VanState};

#[derive(Debug, Default)]
struct Inner {
    state: VanState,
    changed_at: Option<DateTime<Utc>>,
}

/// Cloneable handle to the state of one session.
///
/// The ingestion path merges payloads through [`SharedVanState::merge`]
/// while UI readers take snapshots or borrow the state under a read lock.
/// A merge holds the write lock for the whole payload, so a reader sees
/// either the state before the merge or the state after it.
///
/// Each call to [`SharedVanState::new`] creates an independent state.
/// Clones share it.
///
/// # Examples
///
/// ```
/// use vansync::state::SharedVanState;
///
/// let shared = SharedVanState::new();
/// let reader = shared.clone();
///
/// shared.merge(r#"{"system": {"uptime": 42, "error_code": 5}}"#).unwrap();
///
/// let uptime = reader.read(|state| state.system().map(|s| s.uptime));
/// assert_eq!(uptime, Some(42));
/// assert_eq!(reader.revision(), 1);
/// assert!(reader.last_changed().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SharedVanState {
    session: SessionId,
    inner: Arc<RwLock<Inner>>,
    revision: Arc<watch::Sender<u64>>,
}

impl SharedVanState {
    /// Creates a handle with every section unknown.
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            session: SessionId::new(),
            inner: Arc::new(RwLock::new(Inner::default())),
            revision: Arc::new(revision),
        }
    }

    /// Returns the identifier used in this session's log events.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    /// Merges one telemetry payload.
    ///
    /// The payload is parsed before the lock is taken. Watchers are notified
    /// when the merge changed the state.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] or [`ParseError::NotAnObject`] if the
    /// payload root is malformed. Nothing is applied in that case.
    pub fn merge(&self, payload: &str) -> Result<MergeReport, ParseError> {
        let root = telemetry::parse_root(payload).inspect_err(|e| {
            tracing::warn!(session = %self.session, error = %e, "Rejected telemetry payload");
        })?;

        let report = {
            let mut inner = self.inner.write();
            let report = telemetry::merge_root(&mut inner.state, &root);
            if report.changed() {
                inner.changed_at = Some(Utc::now());
            }
            report
        };

        if report.changed() {
            self.bump_revision();
        }
        tracing::debug!(
            session = %self.session,
            applied = report.applied().len(),
            errors = report.errors().len(),
            changed = report.changed(),
            "Merged telemetry payload"
        );
        Ok(report)
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> VanState {
        self.inner.read().state.clone()
    }

    /// Runs `f` with the current state under a read lock.
    ///
    /// Keep `f` short: merges wait while it runs.
    pub fn read<R>(&self, f: impl FnOnce(&VanState) -> R) -> R {
        f(&self.inner.read().state)
    }

    /// Returns when a merge last changed the state, or `None` if no merge
    /// has changed it since creation or the last reset.
    #[must_use]
    pub fn last_changed(&self) -> Option<DateTime<Utc>> {
        self.inner.read().changed_at
    }

    /// Subscribes to state revisions.
    ///
    /// The receiver yields the revision number after every merge that
    /// changed the state and after every reset.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Returns the current revision number, starting at zero.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Resets every section to unknown, as after a disconnect.
    pub fn reset(&self) {
        *self.inner.write() = Inner::default();
        self.bump_revision();
        tracing::debug!(session = %self.session, "Van state reset");
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl Default for SharedVanState {
    fn default() -> Self {
        Self::new()
    }
}
