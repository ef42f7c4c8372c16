// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Responses of the structured query endpoint.

use crate::{movie::Movie, prelude::*};

mod _core {
    pub(super) use movies_core::movie::Movie;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryError {
    #[serde(default)]
    pub message: String,
}

/// The `data` member with the result of either the `list`
/// or the `search` field.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoviesQueryData {
    #[serde(default, rename = "list", alias = "search")]
    pub movies: Option<Vec<Movie>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoviesQueryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MoviesQueryData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<QueryError>>,
}

impl MoviesQueryResponse {
    /// The message of the first error, if any.
    #[must_use]
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(<[_]>::first)
            .map(|error| error.message.as_str())
    }

    /// Extract the resulting movies.
    ///
    /// A missing or `null` result is an empty list.
    pub fn try_into_movies(self) -> anyhow::Result<Vec<_core::Movie>> {
        let Self { data, errors: _ } = self;
        data.and_then(|data| data.movies)
            .unwrap_or_default()
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}
