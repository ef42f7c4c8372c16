// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Movie list and movie detail.

use semval::Validate as _;

use movies_core::{Movie, MovieId};
use movies_core_json::api::{MovieEnvelope, MoviesEnvelope};

use crate::{
    FetchError, Handle,
    fetch::{RequestSpec, ResourceFetcher},
    remote::LoadState,
    webapi::decode_json,
};

#[must_use]
pub fn movies_request() -> RequestSpec {
    RequestSpec::get("movies")
}

#[must_use]
pub fn movie_request(id: MovieId) -> RequestSpec {
    RequestSpec::get(format!("movies/{id}"))
}

/// Check the consistency of a loaded movie.
///
/// Inconsistent movies are logged but not rejected. They can still be
/// displayed and fixed by editing.
#[must_use]
pub fn is_consistent(movie: &Movie) -> bool {
    let Err(err) = movie.validate() else {
        return true;
    };
    let invalidities = err.into_iter().collect::<Vec<_>>();
    log::warn!("Inconsistent movie {id}: {invalidities:?}", id = movie.id);
    false
}

pub fn decode_movies(body: &[u8]) -> Result<Vec<Movie>, FetchError> {
    let movies = decode_json::<MoviesEnvelope>(body)?
        .try_into_movies()
        .map_err(FetchError::Invalid)?;
    let inconsistent_count = movies.iter().filter(|movie| !is_consistent(movie)).count();
    if inconsistent_count > 0 {
        log::debug!(
            "Loaded {inconsistent_count} inconsistent of {count} movie(s)",
            count = movies.len()
        );
    }
    Ok(movies)
}

pub fn decode_movie(body: &[u8]) -> Result<Movie, FetchError> {
    let movie = decode_json::<MovieEnvelope>(body)?
        .try_into_movie()
        .map_err(FetchError::Invalid)?;
    // Only logged
    let _ = is_consistent(&movie);
    Ok(movie)
}

/// All movies of the catalog
#[derive(Debug, Default)]
pub struct MovieList {
    fetcher: ResourceFetcher<Vec<Movie>>,
}

impl MovieList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fetcher(&self) -> &ResourceFetcher<Vec<Movie>> {
        &self.fetcher
    }

    pub async fn load(&self, handle: &Handle) -> LoadState<Vec<Movie>> {
        self.fetcher
            .fetch(handle, movies_request(), decode_movies)
            .await
    }
}

/// A single movie
#[derive(Debug, Default)]
pub struct MovieDetail {
    fetcher: ResourceFetcher<Movie>,
}

impl MovieDetail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fetcher(&self) -> &ResourceFetcher<Movie> {
        &self.fetcher
    }

    pub async fn load(&self, handle: &Handle, id: MovieId) -> LoadState<Movie> {
        self.fetcher
            .fetch(handle, movie_request(id), decode_movie)
            .await
    }
}
