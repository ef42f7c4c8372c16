// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Genre list and the movies of a genre.

use semval::Validate as _;

use movies_core::{Genre, GenreId, Movie};
use movies_core_json::api::{GenreEnvelope, GenresEnvelope};

use crate::{
    FetchError, Handle,
    fetch::{RequestSpec, ResourceFetcher},
    remote::LoadState,
    webapi::decode_json,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreMovies {
    /// Only available if sent by the server
    pub genre: Option<Genre>,
    pub movies: Vec<Movie>,
}

#[must_use]
pub fn genres_request() -> RequestSpec {
    RequestSpec::get("genres")
}

#[must_use]
pub fn genre_request(id: GenreId) -> RequestSpec {
    RequestSpec::get(format!("genres/{id}"))
}

pub fn decode_genres(body: &[u8]) -> Result<Vec<Genre>, FetchError> {
    let genres = decode_json::<GenresEnvelope>(body)?.into_genres();
    for genre in &genres {
        if let Err(err) = genre.validate() {
            let invalidities = err.into_iter().collect::<Vec<_>>();
            log::warn!("Inconsistent genre {id}: {invalidities:?}", id = genre.id);
        }
    }
    Ok(genres)
}

pub fn decode_genre_movies(body: &[u8]) -> Result<GenreMovies, FetchError> {
    let (genre, movies) = decode_json::<GenreEnvelope>(body)?
        .try_into_parts()
        .map_err(FetchError::Invalid)?;
    Ok(GenreMovies { genre, movies })
}

#[derive(Debug, Default)]
pub struct GenreList {
    fetcher: ResourceFetcher<Vec<Genre>>,
}

impl GenreList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fetcher(&self) -> &ResourceFetcher<Vec<Genre>> {
        &self.fetcher
    }

    pub async fn load(&self, handle: &Handle) -> LoadState<Vec<Genre>> {
        self.fetcher
            .fetch(handle, genres_request(), decode_genres)
            .await
    }
}

#[derive(Debug, Default)]
pub struct GenreDetail {
    fetcher: ResourceFetcher<GenreMovies>,
}

impl GenreDetail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fetcher(&self) -> &ResourceFetcher<GenreMovies> {
        &self.fetcher
    }

    pub async fn load(&self, handle: &Handle, id: GenreId) -> LoadState<GenreMovies> {
        self.fetcher
            .fetch(handle, genre_request(id), decode_genre_movies)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_without_name_are_kept() {
        let genres =
            decode_genres(br#"{"genres":[{"id":1,"genre_name":"Drama"},{"id":2}]}"#).unwrap();
        assert_eq!(
            vec![GenreId::new(1), GenreId::new(2)],
            genres.iter().map(|genre| genre.id).collect::<Vec<_>>()
        );
        assert!(genres[1].name.is_empty());
    }
}
