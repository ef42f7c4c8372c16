// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{mem, time::Instant};

use crate::roundtrip::{PendingToken, Roundtrip};

/// Lifecycle of asynchronously loaded data.
///
/// A new request always restarts at [`LoadState::Loading`] and keeps
/// the previous value until the result arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Idle,
    Loading {
        since: Instant,
        loaded_before: Option<T>,
    },
    Loaded(T),
    Failed {
        reason: String,
        loaded_before: Option<T>,
    },
}

impl<T> LoadState<T> {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    #[must_use]
    pub const fn pending_since(&self) -> Option<Instant> {
        match self {
            Self::Loading { since, .. } => Some(*since),
            Self::Idle | Self::Loaded(_) | Self::Failed { .. } => None,
        }
    }

    /// The value of the most recent request if it succeeded.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Idle | Self::Loading { .. } | Self::Failed { .. } => None,
        }
    }

    /// The most recent value, possibly loaded by an earlier request.
    #[must_use]
    pub const fn last_value(&self) -> Option<&T> {
        match self {
            Self::Idle => None,
            Self::Loaded(value) => Some(value),
            Self::Loading { loaded_before, .. } | Self::Failed { loaded_before, .. } => {
                loaded_before.as_ref()
            }
        }
    }

    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason, .. } => Some(reason),
            Self::Idle | Self::Loading { .. } | Self::Loaded(_) => None,
        }
    }

    fn take_last_value(&mut self) -> Option<T> {
        match mem::replace(self, Self::Idle) {
            Self::Idle => None,
            Self::Loaded(value) => Some(value),
            Self::Loading { loaded_before, .. } | Self::Failed { loaded_before, .. } => {
                loaded_before
            }
        }
    }

    pub fn start_loading(&mut self, since: Instant) {
        let loaded_before = self.take_last_value();
        *self = Self::Loading {
            since,
            loaded_before,
        };
    }

    pub fn loading_succeeded(&mut self, value: T) {
        debug_assert!(self.is_loading());
        *self = Self::Loaded(value);
    }

    pub fn loading_failed(&mut self, reason: String) {
        debug_assert!(self.is_loading());
        let loaded_before = self.take_last_value();
        *self = Self::Failed {
            reason,
            loaded_before,
        };
    }

    pub fn reset(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        *self = Self::Idle;
        true
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Remote data with the state of the current roundtrip
#[derive(Debug, Clone)]
pub struct RemoteData<T> {
    roundtrip: Roundtrip,
    state: LoadState<T>,
}

impl<T> RemoteData<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            roundtrip: Roundtrip::new(),
            state: LoadState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState<T> {
        &self.state
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.roundtrip.is_pending()
    }

    /// Start the next round with a pending request
    ///
    /// Requests that are already pending will be discarded when finished.
    pub fn start_pending(&mut self, since: Instant) -> PendingToken {
        self.state.start_loading(since);
        self.roundtrip.start_pending()
    }

    #[must_use]
    pub fn is_latest(&self, token: PendingToken) -> bool {
        self.roundtrip.is_latest(token)
    }

    /// Finish a pending request
    ///
    /// Returns `false` and leaves the state untouched if the
    /// token is stale.
    pub fn finish_pending(&mut self, token: PendingToken, result: Result<T, String>) -> bool {
        if !self.roundtrip.finish_pending(token) {
            return false;
        }
        match result {
            Ok(value) => self.state.loading_succeeded(value),
            Err(reason) => self.state.loading_failed(reason),
        }
        true
    }

    /// Return to [`LoadState::Idle`] and invalidate pending requests.
    pub fn reset(&mut self) -> bool {
        let was_pending = self.roundtrip.is_pending();
        self.roundtrip.reset();
        self.state.reset() || was_pending
    }
}

impl<T> Default for RemoteData<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
