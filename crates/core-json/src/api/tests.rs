// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn movies_envelope_null() {
    let envelope = serde_json::from_str::<MoviesEnvelope>(r#"{"movies":null}"#).unwrap();
    assert!(envelope.try_into_movies().unwrap().is_empty());
}

#[test]
fn genres_envelope() {
    let genres = serde_json::from_str::<GenresEnvelope>(
        r#"{"genres":[{"id":1,"genre_name":"Drama"},{"id":2,"genre_name":"Crime"}]}"#,
    )
    .unwrap()
    .into_genres();
    assert_eq!(
        vec!["Drama", "Crime"],
        genres.into_iter().map(|genre| genre.name).collect::<Vec<_>>()
    );
}

#[test]
fn genre_envelope_with_movies_only() {
    let (genre, movies) = serde_json::from_str::<GenreEnvelope>(
        r#"{"movies":[{"id":1,"title":"Logan","genres":{"1":"Action"}}]}"#,
    )
    .unwrap()
    .try_into_parts()
    .unwrap();
    assert!(genre.is_none());
    assert_eq!(1, movies.len());
    assert_eq!("Logan", movies[0].title);
}

#[test]
fn edit_movie_from_loaded_record() {
    let movie: _core::Movie = serde_json::from_str::<Movie>(
        r#"{
            "id": 1,
            "title": "The Shawshank Redemption",
            "description": "Two imprisoned men",
            "year": 1994,
            "release_date": "1994-10-14T00:00:00Z",
            "runtime": 142,
            "rating": 5,
            "mpaa_rating": "R",
            "genres": {"1": "Drama"}
        }"#,
    )
    .unwrap()
    .try_into()
    .unwrap();
    assert_eq!(
        serde_json::json!({
            "id": "1",
            "title": "The Shawshank Redemption",
            "description": "Two imprisoned men",
            "year": "1994",
            "release_date": "1994-10-14",
            "runtime": "142",
            "rating": "5",
            "mpaa_rating": "R",
        }),
        serde_json::to_value(EditMovie::from(movie)).unwrap()
    );
}

#[test]
fn mutation_response() {
    let ok = serde_json::from_str::<MutationResponse>(r#"{"response":{"ok":true,"message":""}}"#)
        .unwrap();
    assert_eq!(
        Some(Acknowledgement {
            ok: true,
            message: String::new(),
        }),
        ok.response
    );
    assert!(ok.error_message().is_none());

    let err = serde_json::from_str::<MutationResponse>(r#"{"error":{"message":"duplicate title"}}"#)
        .unwrap();
    assert_eq!(Some("duplicate title"), err.error_message());
}
