// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, sync::Arc, time::Instant};

use bytes::Bytes;
use discro::Subscriber;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{
    FetchError, Handle, Observable, ObservableRef,
    remote::{LoadState, RemoteData},
    roundtrip::PendingToken,
    webapi::{ClientEnvironment, receive_response_body},
};

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(from: Method) -> Self {
        match from {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A single request relative to the API URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    pub target: String,
    pub body: Option<Bytes>,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    #[must_use]
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::Get, target)
    }

    #[must_use]
    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(Method::Delete, target)
    }

    #[must_use]
    pub fn post(target: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::new(Method::Post, target)
        }
    }

    pub fn post_json<T: Serialize>(
        target: impl Into<String>,
        body: &T,
    ) -> Result<Self, FetchError> {
        let body = serde_json::to_vec(body)?;
        Ok(Self::post(target, body).with_header(CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON))
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by its case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header_name, _)| header_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Send the request and receive the response body.
    ///
    /// Exactly one request is sent without retries.
    pub async fn send<E>(self, env: &E) -> Result<Bytes, FetchError>
    where
        E: ClientEnvironment + ?Sized,
    {
        let Self {
            method,
            target,
            body,
            headers,
        } = self;
        let url = env.join_api_url(&target)?;
        log::debug!("Sending request: {method} {url}");
        let mut request = env.client().request(method.into(), url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await?;
        receive_response_body(response).await
    }
}

/// Decodes the body of a successful response.
pub type Decoder<T> = fn(&[u8]) -> Result<T, FetchError>;

/// Send a request and decode the response body.
///
/// The returned task does not touch any state.
pub fn fetch_resource<T>(
    handle: Handle,
    request: RequestSpec,
    decode: Decoder<T>,
) -> impl Future<Output = Result<T, FetchError>> + Send + 'static
where
    T: Send + 'static,
{
    async move {
        let body = request.send(&*handle).await?;
        decode(&body)
    }
}

#[derive(Debug)]
pub struct FetchTaskContinuation {
    token: PendingToken,
}

/// Fetches a single resource and publishes its [`LoadState`].
///
/// Only the result of the most recent request is applied.
#[derive(Debug)]
pub struct ResourceFetcher<T> {
    state: Observable<RemoteData<T>>,
}

impl<T> Default for ResourceFetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceFetcher<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Observable::new(RemoteData::new()),
        }
    }

    #[must_use]
    pub fn read(&self) -> ObservableRef<'_, RemoteData<T>> {
        self.state.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<RemoteData<T>> {
        self.state.subscribe_changed()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState<T>
    where
        T: Clone,
    {
        self.read().state().clone()
    }

    /// Return to [`LoadState::Idle`] and discard pending results.
    #[allow(clippy::must_use_candidate)]
    pub fn reset(&self) -> bool {
        self.state.modify(RemoteData::reset)
    }

    /// Prepare a request
    ///
    /// The state switches to [`LoadState::Loading`] immediately, i.e.
    /// before the returned task is executed.
    #[must_use]
    pub fn fetch_task(
        &self,
        handle: &Handle,
        request: RequestSpec,
        decode: Decoder<T>,
    ) -> Option<(
        impl Future<Output = Result<T, FetchError>> + Send + 'static,
        FetchTaskContinuation,
    )>
    where
        T: Send + 'static,
    {
        let mut token = None;
        self.state.modify(|data| {
            token = Some(data.start_pending(Instant::now()));
            true
        });
        let Some(token) = token else {
            log::warn!("Failed to start fetching {target}", target = request.target);
            return None;
        };
        let task = fetch_resource(handle.clone(), request, decode);
        Some((task, FetchTaskContinuation { token }))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn fetch_task_completed(
        &self,
        result: Result<T, FetchError>,
        continuation: FetchTaskContinuation,
    ) -> bool {
        let FetchTaskContinuation { token } = continuation;
        let result = result.map_err(|err| {
            log::debug!("Fetching failed: {err}");
            err.to_string()
        });
        self.state.modify(|data| {
            if !data.finish_pending(token, result) {
                log::warn!("Discarding stale result of {token:?}");
                return false;
            }
            true
        })
    }

    /// Fetch a resource and wait for the result.
    pub async fn fetch(
        &self,
        handle: &Handle,
        request: RequestSpec,
        decode: Decoder<T>,
    ) -> LoadState<T>
    where
        T: Clone + Send + 'static,
    {
        if let Some((task, continuation)) = self.fetch_task(handle, request, decode) {
            let result = task.await;
            self.fetch_task_completed(result, continuation);
        }
        self.load_state()
    }

    /// Fetch a resource in the background.
    ///
    /// The result is discarded if the fetcher has been dropped in
    /// the meantime. The returned handle can be used for aborting
    /// the request.
    pub fn spawn_fetch(
        self: &Arc<Self>,
        handle: &Handle,
        request: RequestSpec,
        decode: Decoder<T>,
    ) -> Option<JoinHandle<bool>>
    where
        T: Send + Sync + 'static,
    {
        let (task, continuation) = self.fetch_task(handle, request, decode)?;
        let this = Arc::downgrade(self);
        let join_handle = tokio::spawn(async move {
            let result = task.await;
            let Some(this) = this.upgrade() else {
                log::debug!("Fetcher has been dropped: discarding result");
                return false;
            };
            this.fetch_task_completed(result, continuation)
        });
        Some(join_handle)
    }
}

#[cfg(test)]
mod tests;
