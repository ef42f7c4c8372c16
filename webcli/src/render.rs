// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Plain text output.

use std::fmt::Write as _;

use movies_client::{
    edit::{Notification, NotificationKind},
    form::{FormField, MovieForm, ValidationErrors},
    genre::GenreMovies,
};
use movies_core::{Genre, Movie};
use strum::IntoEnumIterator as _;

pub(crate) fn movie_line(movie: &Movie) -> String {
    let Movie {
        id, title, year, ..
    } = movie;
    match year {
        Some(year) => format!("{id}\t{title} ({year})"),
        None => format!("{id}\t{title}"),
    }
}

pub(crate) fn movie_lines(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "No movies found".to_owned();
    }
    movies.iter().map(movie_line).collect::<Vec<_>>().join("\n")
}

pub(crate) fn movie_detail(movie: &Movie) -> String {
    let mut text = String::new();
    writeln!(text, "{title}", title = movie.title).ok();
    writeln!(
        text,
        "Released: {}",
        movie.release_date_string().unwrap_or_default()
    )
    .ok();
    writeln!(text, "Runtime: {} minutes", movie.runtime_minutes).ok();
    writeln!(
        text,
        "Rated: {}",
        movie
            .mpaa_rating
            .map(|rating| rating.as_str())
            .unwrap_or_default()
    )
    .ok();
    writeln!(text, "Rating: {}", movie.rating).ok();
    writeln!(text, "Genres: {}", movie.genres.join(", ")).ok();
    write!(text, "{}", movie.description).ok();
    text
}

pub(crate) fn genre_lines(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|Genre { id, name }| format!("{id}\t{name}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn genre_movies(genre_movies: &GenreMovies) -> String {
    let GenreMovies { genre, movies } = genre_movies;
    let lines = movie_lines(movies);
    match genre {
        Some(genre) => format!("{name}\n{lines}", name = genre.name),
        None => lines,
    }
}

pub(crate) fn form(form: &MovieForm, errors: Option<&ValidationErrors>) -> String {
    let mut text = String::new();
    writeln!(text, "id: {}", form.id()).ok();
    for field in FormField::iter() {
        let marker = if errors.is_some_and(|errors| errors.contains(field)) {
            " (required)"
        } else {
            ""
        };
        let value = form.field(field);
        writeln!(text, "{field}: {value}{marker}").ok();
    }
    write!(text, "genres: {}", form.genres().join(", ")).ok();
    text
}

pub(crate) fn notification(notification: &Notification) -> Option<String> {
    let Notification { kind, message } = notification;
    match kind {
        NotificationKind::None => None,
        NotificationKind::Success | NotificationKind::Error => Some(format!("{kind}: {message}")),
    }
}

#[cfg(test)]
mod tests {
    use movies_core::MovieId;

    use super::*;

    #[test]
    fn movie_line_with_and_without_year() {
        let mut movie = Movie {
            id: MovieId::new(1),
            title: "Spiderman".to_owned(),
            year: Some(2002),
            ..Default::default()
        };
        assert_eq!("1\tSpiderman (2002)", movie_line(&movie));
        movie.year = None;
        assert_eq!("1\tSpiderman", movie_line(&movie));
    }

    #[test]
    fn empty_movie_list() {
        assert_eq!("No movies found", movie_lines(&[]));
    }

    #[test]
    fn required_fields_are_marked() {
        let form = MovieForm::new();
        let errors = movies_client::form::validate(&form);
        let text = super::form(&form, Some(&errors));
        assert!(text.contains("title:  (required)"));
        assert!(text.contains("description:  (required)"));
    }

    #[test]
    fn no_notification() {
        assert!(notification(&Notification::default()).is_none());
        assert_eq!(
            Some("error: duplicate title".to_owned()),
            notification(&Notification::error("duplicate title"))
        );
    }
}
