// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::{Instant, sleep_until};

use crate::WeakHandle;

use super::{SearchController, StateSubscriber};

/// Wait until the term has been stable for the debounce period.
///
/// Returns the final term or `None` if the controller has disappeared.
async fn debounce_term(
    subscriber: &mut StateSubscriber,
    mut term: String,
    debounce: Duration,
) -> Option<String> {
    let mut deadline = Instant::now() + debounce;
    loop {
        tokio::select! {
            () = sleep_until(deadline) => {
                return Some(term);
            }
            changed = subscriber.changed() => {
                if changed.is_err() {
                    return None;
                }
                let new_term = subscriber.read_ack().term().to_owned();
                if new_term != term {
                    term = new_term;
                    deadline = Instant::now() + debounce;
                }
            }
        }
    }
}

/// Search whenever the term changes.
///
/// The search is issued after the term has been stable for the
/// `debounce` period. With [`Duration::ZERO`] every change triggers a
/// search immediately.
///
/// Stops when either the controller or the environment has been dropped.
pub fn on_term_changed_search(
    controller: &Arc<SearchController>,
    handle: WeakHandle,
    debounce: Duration,
) -> impl Future<Output = ()> + Send + 'static {
    let mut subscriber = controller.subscribe_changed();
    // Read the initial value immediately before spawning the async task
    let mut searched_term = subscriber.read_ack().term().to_owned();
    let controller = Arc::downgrade(controller);
    async move {
        log::debug!("Starting on_term_changed_search");
        loop {
            if subscriber.changed().await.is_err() {
                // Publisher has disappeared
                break;
            }
            let term = subscriber.read_ack().term().to_owned();
            if term == searched_term {
                // Only the results have changed
                continue;
            }
            let term = if debounce.is_zero() {
                term
            } else {
                let Some(term) = debounce_term(&mut subscriber, term, debounce).await else {
                    break;
                };
                term
            };
            let (Some(controller), Some(handle)) = (controller.upgrade(), handle.upgrade()) else {
                break;
            };
            log::debug!("Search term changed: {term:?}");
            searched_term = term;
            // Not awaited to keep tracking term changes while the request is pending
            drop(controller.spawn_search(&handle));
        }
        log::debug!("Stopping on_term_changed_search");
    }
}
