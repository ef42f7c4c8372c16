// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn keep_previous_value_while_loading() {
    let mut data = RemoteData::<u32>::new();
    assert!(data.state().is_idle());

    let token = data.start_pending(Instant::now());
    assert!(data.state().is_loading());
    assert!(data.state().last_value().is_none());
    assert!(data.finish_pending(token, Ok(1)));
    assert_eq!(Some(&1), data.state().loaded());

    let token = data.start_pending(Instant::now());
    assert!(data.state().loaded().is_none());
    assert_eq!(Some(&1), data.state().last_value());
    assert!(data.finish_pending(token, Err("failed".to_owned())));
    assert_eq!(Some("failed"), data.state().failure_reason());
    assert_eq!(Some(&1), data.state().last_value());
}

#[test]
fn discard_stale_result() {
    let mut data = RemoteData::<&str>::new();
    let first = data.start_pending(Instant::now());
    let second = data.start_pending(Instant::now());
    assert!(data.finish_pending(second, Ok("second")));
    assert!(!data.finish_pending(first, Ok("first")));
    assert_eq!(Some(&"second"), data.state().loaded());
}

#[test]
fn reset_while_pending() {
    let mut data = RemoteData::<u32>::new();
    assert!(!data.reset());
    let token = data.start_pending(Instant::now());
    assert!(data.reset());
    assert!(data.state().is_idle());
    assert!(!data.finish_pending(token, Ok(1)));
    assert!(data.state().is_idle());
}
