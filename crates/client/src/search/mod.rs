// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, sync::Arc, time::Instant};

use discro::Subscriber;
use tokio::task::JoinHandle;

use movies_core::Movie;

use crate::{
    FetchError, Handle, Observable, ObservableRef,
    fetch::fetch_resource,
    query::{self, decode_movies},
    remote::{LoadState, RemoteData},
    roundtrip::PendingToken,
};

pub mod tasklet;

/// The current search term and the movies found for it.
#[derive(Debug, Default)]
pub struct State {
    term: String,
    results: RemoteData<Vec<Movie>>,
}

impl State {
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub const fn results(&self) -> &LoadState<Vec<Movie>> {
        self.results.state()
    }

    /// The movies to display, possibly found for a previous term.
    #[must_use]
    pub fn movies(&self) -> Option<&[Movie]> {
        self.results().last_value().map(Vec::as_slice)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.results.is_pending()
    }

    fn update_term(&mut self, term: String) -> bool {
        if self.term == term {
            return false;
        }
        log::debug!("Updating search term: {term:?}");
        self.term = term;
        true
    }
}

pub type StateSubscriber = Subscriber<State>;

#[derive(Debug)]
pub struct SearchTaskContinuation {
    term: String,
    token: PendingToken,
}

/// Searches the catalog for the current term.
///
/// Results are only applied if they belong to the most recent request
/// and the term has not changed in the meantime.
#[derive(Debug)]
pub struct SearchController {
    state: Observable<State>,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Observable::new(State::default()),
        }
    }

    #[must_use]
    pub fn read(&self) -> ObservableRef<'_, State> {
        self.state.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> StateSubscriber {
        self.state.subscribe_changed()
    }

    /// Update the search term without searching.
    ///
    /// Returns `true` if the term has changed.
    #[allow(clippy::must_use_candidate)]
    pub fn set_term(&self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.state.modify(|state| state.update_term(term))
    }

    /// Start searching for the current term.
    ///
    /// Pending results for previous terms become stale.
    #[must_use]
    pub fn search_task(
        &self,
        handle: &Handle,
    ) -> Option<(
        impl Future<Output = Result<Vec<Movie>, FetchError>> + Send + 'static,
        SearchTaskContinuation,
    )> {
        let mut pending = None;
        self.state.modify(|state| {
            let token = state.results.start_pending(Instant::now());
            pending = Some((state.term.clone(), token));
            true
        });
        let Some((term, token)) = pending else {
            log::warn!("Failed to start searching");
            return None;
        };
        log::debug!("Searching for {term:?}");
        let graphql_path = &handle.config().graphql_path;
        let request = query::build(&term).into_request(graphql_path);
        let task = fetch_resource(handle.clone(), request, decode_movies);
        Some((task, SearchTaskContinuation { term, token }))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn search_task_completed(
        &self,
        result: Result<Vec<Movie>, FetchError>,
        continuation: SearchTaskContinuation,
    ) -> bool {
        let SearchTaskContinuation { term, token } = continuation;
        self.state.modify(|state| {
            if state.term != term {
                log::warn!(
                    "Search term changed from {term:?} to {actual:?}: discarding results",
                    actual = state.term,
                );
                return false;
            }
            if !state.results.is_latest(token) {
                log::warn!("Discarding stale results for {term:?}");
                return false;
            }
            let result = result.map_err(|err| {
                log::debug!("Searching for {term:?} failed: {err}");
                err.to_string()
            });
            if let Ok(movies) = &result {
                log::debug!("Found {count} movie(s) for {term:?}", count = movies.len());
            }
            state.results.finish_pending(token, result)
        })
    }

    /// Search for the current term and wait for the results.
    pub async fn search(&self, handle: &Handle) -> bool {
        let Some((task, continuation)) = self.search_task(handle) else {
            return false;
        };
        let result = task.await;
        self.search_task_completed(result, continuation)
    }

    /// Search for the initial term.
    pub async fn mount(&self, handle: &Handle) -> bool {
        self.search(handle).await
    }

    /// Update the term and search immediately.
    pub async fn change_term(&self, handle: &Handle, term: impl Into<String>) -> bool {
        self.set_term(term);
        self.search(handle).await
    }

    /// Search for the current term in the background.
    ///
    /// Results are discarded if the controller has been dropped in
    /// the meantime.
    pub fn spawn_search(self: &Arc<Self>, handle: &Handle) -> Option<JoinHandle<bool>> {
        let (task, continuation) = self.search_task(handle)?;
        let this = Arc::downgrade(self);
        let join_handle = tokio::spawn(async move {
            let result = task.await;
            let Some(this) = this.upgrade() else {
                log::debug!("Search controller has been dropped: discarding results");
                return false;
            };
            this.search_task_completed(result, continuation)
        });
        Some(join_handle)
    }
}

#[cfg(test)]
mod tests;
