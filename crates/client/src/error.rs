// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use reqwest::StatusCode;
use thiserror::Error;

/// Errors while requesting and decoding remote data.
///
/// Converted into state at the fetcher boundary and never
/// propagated to the renderer.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("Invalid response code: {}", .status.as_u16())]
    UnexpectedStatus {
        status: StatusCode,
        /// The message of an error payload in the response body, if any
        error_message: Option<String>,
    },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Query(String),

    #[error(transparent)]
    Invalid(anyhow::Error),
}

impl FetchError {
    /// The message of an error payload sent by the server, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatus { error_message, .. } => error_message.as_deref(),
            Self::Query(message) => Some(message),
            _ => None,
        }
    }
}
