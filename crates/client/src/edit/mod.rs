// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Editing a single movie.

use std::{future::Future, mem, time::Instant};

use discro::Subscriber;

use movies_core::{Movie, MovieId};
use movies_core_json::api::MutationResponse;

use crate::{
    FetchError, Handle, Observable, ObservableRef,
    catalog::{decode_movie, movie_request},
    fetch::{RequestSpec, fetch_resource},
    form::{FormField, MovieForm, ValidationErrors, validate},
    roundtrip::{PendingToken, Roundtrip},
    webapi::decode_json,
};

pub const CHANGES_SAVED_MESSAGE: &str = "Changes saved";

pub const MOVIE_DELETED_MESSAGE: &str = "Movie deleted";

#[must_use]
pub fn edit_movie_target() -> &'static str {
    "admin/editmovie"
}

#[must_use]
pub fn delete_movie_target(id: MovieId) -> String {
    format!("admin/deletemovie/{id}")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    None,
    Success,
    Error,
}

/// Outcome of the most recent submission or deletion.
///
/// Overwritten by each attempt and never dismissed automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NotificationKind::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Ready {
        form: MovieForm,
        errors: ValidationErrors,
        notification: Notification,
    },
    Loading {
        id: MovieId,
        since: Instant,
    },
    /// Terminal until another movie is loaded.
    LoadingFailed {
        id: MovieId,
        reason: String,
    },
    Submitting {
        form: MovieForm,
        since: Instant,
    },
    Deleting {
        form: MovieForm,
        since: Instant,
    },
}

impl Default for State {
    fn default() -> Self {
        Self::ready(MovieForm::new())
    }
}

impl State {
    fn ready(form: MovieForm) -> Self {
        Self::Ready {
            form,
            errors: Default::default(),
            notification: Default::default(),
        }
    }

    #[must_use]
    pub const fn pending_since(&self) -> Option<Instant> {
        match self {
            Self::Ready { .. } | Self::LoadingFailed { .. } => None,
            Self::Loading { since, .. }
            | Self::Submitting { since, .. }
            | Self::Deleting { since, .. } => Some(*since),
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending_since().is_some()
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// The form, unless loading.
    #[must_use]
    pub const fn form(&self) -> Option<&MovieForm> {
        match self {
            Self::Ready { form, .. }
            | Self::Submitting { form, .. }
            | Self::Deleting { form, .. } => Some(form),
            Self::Loading { .. } | Self::LoadingFailed { .. } => None,
        }
    }

    #[must_use]
    pub const fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Ready { errors, .. } => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Ready { notification, .. } => Some(notification),
            _ => None,
        }
    }

    #[must_use]
    pub fn loading_failed_reason(&self) -> Option<&str> {
        match self {
            Self::LoadingFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// The published state of an [`EditSession`]
#[derive(Debug, Default)]
pub struct Session {
    state: State,
    roundtrip: Roundtrip,
}

impl Session {
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    fn start_pending(&mut self, next_state: State) -> PendingToken {
        debug_assert!(next_state.is_pending());
        self.state = next_state;
        self.roundtrip.start_pending()
    }

    fn start_loading(&mut self, id: MovieId) -> Option<PendingToken> {
        if id.is_new() {
            log::debug!("Editing new movie");
            self.roundtrip.reset();
            self.state = State::default();
            return None;
        }
        log::debug!("Loading movie {id}");
        Some(self.start_pending(State::Loading {
            id,
            since: Instant::now(),
        }))
    }

    fn edit(&mut self, field: FormField, value: String) -> bool {
        let State::Ready { form, .. } = &mut self.state else {
            log::warn!("Cannot edit {field} while {state:?}", state = self.state);
            return false;
        };
        form.edit(field, value)
    }

    fn start_submitting(&mut self) -> Option<(PendingToken, MovieForm)> {
        let State::Ready { form, errors, .. } = &mut self.state else {
            log::warn!("Cannot submit while {state:?}", state = self.state);
            return None;
        };
        // Branch on the result of validating the current form
        let validation_errors = validate(form);
        if !validation_errors.is_empty() {
            log::debug!("Invalid form: {validation_errors:?}");
            *errors = validation_errors;
            return None;
        }
        let form = mem::take(form);
        let token = self.start_pending(State::Submitting {
            form: form.clone(),
            since: Instant::now(),
        });
        Some((token, form))
    }

    fn start_deleting(&mut self) -> Option<(PendingToken, MovieId)> {
        let State::Ready { form, .. } = &mut self.state else {
            log::warn!("Cannot delete while {state:?}", state = self.state);
            return None;
        };
        let id = form.id();
        if id.is_new() {
            log::warn!("Cannot delete an unsaved movie");
            return None;
        }
        let form = mem::take(form);
        let token = self.start_pending(State::Deleting {
            form,
            since: Instant::now(),
        });
        Some((token, id))
    }

    fn finish_pending(&mut self, token: PendingToken) -> bool {
        if self.roundtrip.finish_pending(token) {
            return true;
        }
        log::warn!(
            "Discarding stale result of {token:?} while {state:?}",
            state = self.state
        );
        false
    }
}

#[derive(Debug)]
pub struct LoadTaskContinuation {
    id: MovieId,
    token: PendingToken,
}

#[derive(Debug)]
pub struct SubmitTaskContinuation {
    token: PendingToken,
}

#[derive(Debug)]
pub struct DeleteTaskContinuation {
    token: PendingToken,
}

fn mutation_failed(err: &FetchError) -> Notification {
    let message = err
        .error_message()
        .map_or_else(|| err.to_string(), ToOwned::to_owned);
    Notification::error(message)
}

/// Send a mutation request and turn the response into a notification.
///
/// An error payload in the response body takes precedence over
/// the status code.
async fn send_mutation(
    handle: Handle,
    request: Result<RequestSpec, FetchError>,
    success_message: &'static str,
) -> Notification {
    let body = match request {
        Ok(request) => request.send(&*handle).await,
        Err(err) => Err(err),
    };
    match body.and_then(|body| decode_json::<MutationResponse>(&body)) {
        Ok(response) => {
            if let Some(message) = response.error_message() {
                Notification::error(message)
            } else {
                Notification::success(success_message)
            }
        }
        Err(err) => mutation_failed(&err),
    }
}

/// Loads, edits, submits and deletes a single movie.
#[derive(Debug)]
pub struct EditSession {
    session: Observable<Session>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// A session with a blank form for adding a new movie.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Observable::new(Session::default()),
        }
    }

    #[must_use]
    pub fn read(&self) -> ObservableRef<'_, Session> {
        self.session.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<Session> {
        self.session.subscribe_changed()
    }

    /// Start loading a movie.
    ///
    /// Restarts at [`State::Loading`] even if another movie is already
    /// loading. No request is needed for [`MovieId::NEW`] and `None` is
    /// returned.
    #[must_use]
    pub fn load_task(
        &self,
        handle: &Handle,
        id: MovieId,
    ) -> Option<(
        impl Future<Output = Result<Movie, FetchError>> + Send + 'static,
        LoadTaskContinuation,
    )> {
        let mut token = None;
        self.session.modify(|session| {
            token = session.start_loading(id);
            true
        });
        let token = token?;
        let task = fetch_resource(handle.clone(), movie_request(id), decode_movie);
        Some((task, LoadTaskContinuation { id, token }))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn load_task_completed(
        &self,
        result: Result<Movie, FetchError>,
        continuation: LoadTaskContinuation,
    ) -> bool {
        let LoadTaskContinuation { id, token } = continuation;
        self.session.modify(|session| {
            if !session.finish_pending(token) {
                return false;
            }
            if !matches!(session.state, State::Loading { id: loading_id, .. } if loading_id == id) {
                log::warn!(
                    "Illegal state after loading movie {id}: {state:?}",
                    state = session.state
                );
                return false;
            }
            session.state = match result {
                Ok(movie) => {
                    log::debug!("Loaded movie {id}");
                    State::ready(movie.into())
                }
                Err(err) => {
                    log::warn!("Failed to load movie {id}: {err}");
                    State::LoadingFailed {
                        id,
                        reason: err.to_string(),
                    }
                }
            };
            true
        })
    }

    /// Load a movie and wait until it has been loaded.
    ///
    /// Returns `false` if the result has been discarded.
    pub async fn load(&self, handle: &Handle, id: MovieId) -> bool {
        let Some((task, continuation)) = self.load_task(handle, id) else {
            return true;
        };
        let result = task.await;
        self.load_task_completed(result, continuation)
    }

    /// Update a single field of the form.
    ///
    /// Only possible while [`State::Ready`]. Does not validate.
    #[allow(clippy::must_use_candidate)]
    pub fn edit(&self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();
        self.session.modify(|session| session.edit(field, value))
    }

    /// Validate the current form and start submitting it if valid.
    ///
    /// Returns `None` without sending a request if validation
    /// failed. The validation errors are then published.
    #[must_use]
    pub fn submit_task(
        &self,
        handle: &Handle,
    ) -> Option<(
        impl Future<Output = Notification> + Send + 'static,
        SubmitTaskContinuation,
    )> {
        let mut submitting = None;
        self.session.modify(|session| {
            let errors_before = session.state.errors().cloned();
            submitting = session.start_submitting();
            submitting.is_some() || session.state.errors() != errors_before.as_ref()
        });
        let (token, form) = submitting?;
        let request = RequestSpec::post_json(edit_movie_target(), &form.to_payload());
        let task = send_mutation(handle.clone(), request, CHANGES_SAVED_MESSAGE);
        Some((task, SubmitTaskContinuation { token }))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn submit_task_completed(
        &self,
        notification: Notification,
        continuation: SubmitTaskContinuation,
    ) -> bool {
        let SubmitTaskContinuation { token } = continuation;
        self.session.modify(|session| {
            if !session.finish_pending(token) {
                return false;
            }
            let State::Submitting { form, .. } = &mut session.state else {
                log::warn!(
                    "Illegal state after submitting: {state:?}",
                    state = session.state
                );
                return false;
            };
            log::debug!("Submitted movie {id}: {notification:?}", id = form.id());
            session.state = State::Ready {
                form: mem::take(form),
                errors: ValidationErrors::default(),
                notification,
            };
            true
        })
    }

    /// Validate and submit the form.
    ///
    /// Returns `false` if no request has been sent.
    pub async fn submit(&self, handle: &Handle) -> bool {
        let Some((task, continuation)) = self.submit_task(handle) else {
            return false;
        };
        let notification = task.await;
        self.submit_task_completed(notification, continuation);
        true
    }

    /// Start deleting the loaded movie.
    #[must_use]
    pub fn delete_task(
        &self,
        handle: &Handle,
    ) -> Option<(
        impl Future<Output = Notification> + Send + 'static,
        DeleteTaskContinuation,
    )> {
        let mut deleting = None;
        self.session.modify(|session| {
            deleting = session.start_deleting();
            deleting.is_some()
        });
        let (token, id) = deleting?;
        let request = RequestSpec::delete(delete_movie_target(id));
        let task = send_mutation(handle.clone(), Ok(request), MOVIE_DELETED_MESSAGE);
        Some((task, DeleteTaskContinuation { token }))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn delete_task_completed(
        &self,
        notification: Notification,
        continuation: DeleteTaskContinuation,
    ) -> bool {
        let DeleteTaskContinuation { token } = continuation;
        self.session.modify(|session| {
            if !session.finish_pending(token) {
                return false;
            }
            let State::Deleting { form, .. } = &mut session.state else {
                log::warn!(
                    "Illegal state after deleting: {state:?}",
                    state = session.state
                );
                return false;
            };
            let form = if notification.is_error() {
                mem::take(form)
            } else {
                log::debug!("Deleted movie {id}", id = form.id());
                MovieForm::new()
            };
            session.state = State::Ready {
                form,
                errors: ValidationErrors::default(),
                notification,
            };
            true
        })
    }

    /// Delete the loaded movie.
    ///
    /// Returns `false` if no request has been sent.
    pub async fn delete(&self, handle: &Handle) -> bool {
        let Some((task, continuation)) = self.delete_task(handle) else {
            return false;
        };
        let notification = task.await;
        self.delete_task_completed(notification, continuation);
        true
    }
}
