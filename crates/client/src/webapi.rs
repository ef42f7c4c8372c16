// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use bytes::Bytes;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use movies_core_json::api::MutationResponse;

use crate::FetchError;

pub trait ClientEnvironment {
    fn client(&self) -> &Client;
    fn join_api_url(&self, path: &str) -> Result<Url, FetchError>;
}

/// Extract the message from an error payload `{ "error": { "message": ... } }`.
#[must_use]
pub fn error_message_from_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<MutationResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .map(|error| error.message)
}

/// Receive the body of a response.
///
/// Only status 200 is accepted. For any other status the error payload
/// is extracted from the body.
pub async fn receive_response_body(response: Response) -> Result<Bytes, FetchError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if status != StatusCode::OK {
        let error_message = error_message_from_body(&bytes);
        log::debug!("Received response with status {status}: {error_message:?}");
        return Err(FetchError::UnexpectedStatus {
            status,
            error_message,
        });
    }
    Ok(bytes)
}

pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(Into::into)
}
