// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Response envelopes and request payloads of the REST endpoints.

use movies_core::util::clock::format_date;

use crate::{genre::Genre, movie::Movie, prelude::*};

mod _core {
    pub(super) use movies_core::{genre::Genre, movie::Movie};
}

fn try_into_movies(movies: Option<Vec<Movie>>) -> anyhow::Result<Vec<_core::Movie>> {
    movies
        .unwrap_or_default()
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

///////////////////////////////////////////////////////////////////////
// Envelopes
///////////////////////////////////////////////////////////////////////

/// `GET movies`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoviesEnvelope {
    #[serde(default)]
    pub movies: Option<Vec<Movie>>,
}

impl MoviesEnvelope {
    pub fn try_into_movies(self) -> anyhow::Result<Vec<_core::Movie>> {
        let Self { movies } = self;
        try_into_movies(movies)
    }
}

/// `GET movies/{id}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieEnvelope {
    pub movie: Movie,
}

impl MovieEnvelope {
    pub fn try_into_movie(self) -> anyhow::Result<_core::Movie> {
        let Self { movie } = self;
        movie.try_into()
    }
}

/// `GET genres`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenresEnvelope {
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
}

impl GenresEnvelope {
    #[must_use]
    pub fn into_genres(self) -> Vec<_core::Genre> {
        let Self { genres } = self;
        genres
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

/// `GET genres/{id}`
///
/// Servers either send the movies of the genre or the genre
/// itself, or both.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenreEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<Movie>>,
}

impl GenreEnvelope {
    pub fn try_into_parts(self) -> anyhow::Result<(Option<_core::Genre>, Vec<_core::Movie>)> {
        let Self { genre, movies } = self;
        Ok((genre.map(Into::into), try_into_movies(movies)?))
    }
}

///////////////////////////////////////////////////////////////////////
// Mutations
///////////////////////////////////////////////////////////////////////

/// Request body of `POST admin/editmovie`.
///
/// All values are transmitted as strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditMovie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: String,
    pub release_date: String,
    pub runtime: String,
    pub rating: String,
    pub mpaa_rating: String,
}

impl From<_core::Movie> for EditMovie {
    fn from(from: _core::Movie) -> Self {
        let _core::Movie {
            id,
            title,
            description,
            year,
            release_date,
            runtime_minutes,
            mpaa_rating,
            rating,
            genres: _,
            poster: _,
        } = from;
        // The server derives the year from the release date
        let year = release_date
            .map(|date| date.year())
            .or(year)
            .map(|year| year.to_string())
            .unwrap_or_default();
        Self {
            id: id.to_string(),
            title,
            description,
            year,
            release_date: release_date.map(format_date).unwrap_or_default(),
            runtime: runtime_minutes.to_string(),
            rating,
            mpaa_rating: mpaa_rating
                .map(|rating| rating.as_str().to_owned())
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub ok: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub message: String,
}

/// Response of `POST admin/editmovie` and `DELETE admin/deletemovie/{id}`.
///
/// Also used for decoding the error payloads of all other endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Acknowledgement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMessage>,
}

impl MutationResponse {
    /// The error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|error| error.message.as_str())
    }
}

#[cfg(test)]
mod tests;
