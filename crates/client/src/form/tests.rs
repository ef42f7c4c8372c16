// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use movies_core::MpaaRating;

use super::*;

fn loaded_movie() -> Movie {
    Movie {
        id: MovieId::new(1),
        title: "The Shawshank Redemption".to_owned(),
        description: "Two imprisoned men bond over a number of years".to_owned(),
        year: Some(1994),
        release_date: Some(parse_date("1994-10-14T00:00:00Z").unwrap()),
        runtime_minutes: 142,
        mpaa_rating: Some(MpaaRating::R),
        rating: "5".to_owned(),
        genres: vec!["Drama".to_owned()],
        poster: None,
    }
}

#[test]
fn field_names() {
    assert_eq!(
        vec![
            "title",
            "release_date",
            "runtime",
            "mpaa_rating",
            "rating",
            "description",
        ],
        FormField::iter().map(FormField::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn blank_form_fails_all_fields() {
    let errors = validate(&MovieForm::new());
    assert_eq!(
        FormField::iter().collect::<Vec<_>>(),
        errors.iter().collect::<Vec<_>>()
    );
}

#[test]
fn validate_is_pure() {
    let mut form = MovieForm::new();
    form.edit(FormField::Title, "Logan");
    let first = validate(&form);
    let second = validate(&form);
    assert_eq!(first, second);
    assert!(!first.contains(FormField::Title));
    assert!(first.contains(FormField::Runtime));
}

#[test]
fn only_empty_strings_are_missing() {
    let mut form = MovieForm::new();
    for field in FormField::iter() {
        form.edit(field, " ");
    }
    assert!(validate(&form).is_empty());
}

#[test]
fn edit_updates_exactly_one_field() {
    let mut form = MovieForm::from(loaded_movie());
    let before = form.clone();
    assert!(form.edit(FormField::Title, "Logan"));
    assert!(!form.edit(FormField::Title, "Logan"));
    for field in FormField::iter().filter(|field| *field != FormField::Title) {
        assert_eq!(before.field(field), form.field(field));
    }
    assert_eq!("Logan", form.field(FormField::Title));
    assert_eq!(before.id(), form.id());
}

#[test]
fn load_normalizes_release_date() {
    let form = MovieForm::from(loaded_movie());
    assert_eq!("1994-10-14", form.field(FormField::ReleaseDate));
    assert_eq!("142", form.field(FormField::Runtime));
    assert_eq!("R", form.field(FormField::MpaaRating));
    assert_eq!("5", form.field(FormField::Rating));
    assert_eq!(&["Drama".to_owned()], form.genres());
    assert!(validate(&form).is_empty());
}

#[test]
fn payload_of_unedited_form_equals_record() {
    let movie = loaded_movie();
    assert_eq!(
        EditMovie::from(movie.clone()),
        MovieForm::from(movie).to_payload()
    );
}

#[test]
fn payload_derives_year_from_release_date() {
    let mut form = MovieForm::from(loaded_movie());
    form.edit(FormField::ReleaseDate, "2017-03-03");
    let payload = form.to_payload();
    assert_eq!("1", payload.id);
    assert_eq!("2017", payload.year);
    assert_eq!("2017-03-03", payload.release_date);
}

#[test]
fn payload_of_new_movie() {
    let mut form = MovieForm::new();
    form.edit(FormField::Title, "Logan");
    form.edit(FormField::ReleaseDate, "not a date");
    let payload = form.to_payload();
    assert_eq!("0", payload.id);
    assert_eq!("", payload.year);
    assert_eq!("not a date", payload.release_date);
}
