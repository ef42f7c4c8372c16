// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Structured queries for listing and searching movies.

use movies_core::Movie;
use movies_core_json::graphql::MoviesQueryResponse;

use crate::{
    FetchError,
    fetch::{CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON, RequestSpec},
    webapi::decode_json,
};

/// Fields that are requested for each movie.
pub const MOVIE_FIELDS: &str = "id title runtime year description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// List all movies
    List,

    /// Search movies by a substring of their title
    Search { term: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub kind: QueryKind,

    /// The query document that is sent as the request body
    pub document: String,
}

/// Encode a string as a quoted literal.
///
/// Quotes, backslashes and control characters are escaped. JSON
/// strings are valid string values of the query language.
#[must_use]
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// Build the query for a search term.
///
/// The empty term lists all movies.
#[must_use]
pub fn build(search_term: &str) -> QuerySpec {
    if search_term.is_empty() {
        return QuerySpec {
            kind: QueryKind::List,
            document: format!("{{ list {{ {MOVIE_FIELDS} }} }}"),
        };
    }
    let literal = string_literal(search_term);
    QuerySpec {
        kind: QueryKind::Search {
            term: search_term.to_owned(),
        },
        document: format!("{{ search(titleContains: {literal}) {{ {MOVIE_FIELDS} }} }}"),
    }
}

impl QuerySpec {
    #[must_use]
    pub fn into_request(self, graphql_path: &str) -> RequestSpec {
        let Self { kind: _, document } = self;
        RequestSpec::post(graphql_path, document)
            .with_header(CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON)
    }
}

/// Decode the movies from a query response.
///
/// Errors reported by the server are failures even if some
/// data has been returned.
pub fn decode_movies(body: &[u8]) -> Result<Vec<Movie>, FetchError> {
    let response: MoviesQueryResponse = decode_json(body)?;
    if let Some(message) = response.first_error_message() {
        return Err(FetchError::Query(message.to_owned()));
    }
    response.try_into_movies().map_err(FetchError::Invalid)
}
