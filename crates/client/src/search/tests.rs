// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use movies_core::MovieId;

use crate::Config;

use super::*;

fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id: MovieId::new(id),
        title: title.to_owned(),
        ..Default::default()
    }
}

fn titles(controller: &SearchController) -> Option<Vec<String>> {
    controller
        .read()
        .results()
        .loaded()
        .map(|movies| movies.iter().map(|movie| movie.title.clone()).collect())
}

#[test]
fn set_term() {
    let controller = SearchController::new();
    assert_eq!("", controller.read().term());
    assert!(controller.set_term("Spider"));
    assert!(!controller.set_term("Spider"));
    assert!(controller.set_term(""));
}

#[test]
fn loading_keeps_previous_results() {
    let handle = Handle::new(Config::default()).unwrap();
    let controller = SearchController::new();
    let (_, continuation) = controller.search_task(&handle).unwrap();
    assert!(controller.read().is_pending());
    assert!(controller.search_task_completed(Ok(vec![movie(1, "Spiderman")]), continuation));
    assert_eq!(Some(vec!["Spiderman".to_owned()]), titles(&controller));

    let (_, _continuation) = controller.search_task(&handle).unwrap();
    assert!(controller.read().results().is_loading());
    assert_eq!(1, controller.read().movies().unwrap().len());
}

#[test]
fn discard_results_for_outdated_term() {
    let handle = Handle::new(Config::default()).unwrap();
    let controller = SearchController::new();
    controller.set_term("Spider");
    let (_, spider) = controller.search_task(&handle).unwrap();
    controller.set_term("Logan");
    assert!(!controller.search_task_completed(Ok(vec![movie(1, "Spiderman")]), spider));
    assert!(controller.read().results().is_loading());

    let (_, logan) = controller.search_task(&handle).unwrap();
    assert!(controller.search_task_completed(Ok(vec![movie(2, "Logan")]), logan));
    assert_eq!(Some(vec!["Logan".to_owned()]), titles(&controller));
}

#[test]
fn discard_stale_results_resolved_out_of_order() {
    let handle = Handle::new(Config::default()).unwrap();
    let controller = SearchController::new();
    controller.set_term("Spider");
    let (_, first) = controller.search_task(&handle).unwrap();
    let (_, second) = controller.search_task(&handle).unwrap();
    assert!(controller.search_task_completed(Ok(vec![movie(1, "Spiderman")]), second));
    assert!(!controller.search_task_completed(Ok(Vec::new()), first));
    assert_eq!(Some(vec!["Spiderman".to_owned()]), titles(&controller));
}

#[test]
fn empty_result_set() {
    let handle = Handle::new(Config::default()).unwrap();
    let controller = SearchController::new();
    controller.set_term("Nothing");
    let (_, continuation) = controller.search_task(&handle).unwrap();
    assert!(controller.search_task_completed(Ok(Vec::new()), continuation));
    assert_eq!(Some(Vec::new()), titles(&controller));
}

#[test]
fn failure() {
    let handle = Handle::new(Config::default()).unwrap();
    let controller = SearchController::new();
    let (_, continuation) = controller.search_task(&handle).unwrap();
    assert!(controller.search_task_completed(
        Err(FetchError::Query("syntax error".to_owned())),
        continuation
    ));
    assert_eq!(
        Some("syntax error"),
        controller.read().results().failure_reason()
    );
}
