// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

type SequenceNumber = u64;

const INITIAL_SEQUENCE_NUMBER: SequenceNumber = 0;

/// Identifies a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToken(SequenceNumber);

/// Issues tokens for requests and tracks the most recent one.
///
/// Only the most recently issued token is accepted when finishing a
/// request. Results of all earlier requests are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roundtrip {
    sequence: SequenceNumber,
    pending: bool,
}

impl Roundtrip {
    pub const INITIAL: Self = Self {
        sequence: INITIAL_SEQUENCE_NUMBER,
        pending: false,
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::INITIAL
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start the next request
    ///
    /// Requests that are already pending will be discarded when finished.
    pub fn start_pending(&mut self) -> PendingToken {
        self.sequence = self.sequence.wrapping_add(1);
        self.pending = true;
        PendingToken(self.sequence)
    }

    /// Check if the token belongs to the request that is currently pending.
    #[must_use]
    pub fn is_latest(&self, token: PendingToken) -> bool {
        let PendingToken(sequence) = token;
        self.pending && self.sequence == sequence
    }

    /// Finish a pending request
    ///
    /// Returns `false` if the token is stale.
    pub fn finish_pending(&mut self, token: PendingToken) -> bool {
        if !self.is_latest(token) {
            return false;
        }
        self.pending = false;
        true
    }

    /// Invalidate all pending requests.
    pub fn reset(&mut self) {
        self.sequence = self.sequence.wrapping_add(1);
        self.pending = false;
    }
}

impl Default for Roundtrip {
    fn default() -> Self {
        Self::new()
    }
}
