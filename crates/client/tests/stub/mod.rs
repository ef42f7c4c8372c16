// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A stub of the movie web API, bound to an ephemeral local port.

#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use movies_client::{Config, Handle};

/// Searching for this term takes a while.
pub const SLOW_TERM: &str = "slow";

/// Searching for this term fails with a query error.
pub const FAILING_TERM: &str = "fail";

pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_millis(300);

pub fn spiderman() -> Value {
    json!({
        "id": 1,
        "title": "Spiderman",
        "description": "Bitten by a spider",
        "year": 2002,
        "release_date": "2002-05-03T00:00:00Z",
        "runtime": 121,
        "rating": 5,
        "mpaa_rating": "PG13",
        "genres": { "3": "Adventure", "1": "Action" },
        "poster": "/spiderman.jpg",
    })
}

pub fn logan() -> Value {
    json!({
        "id": 2,
        "title": "Logan",
        "description": "An aging mutant",
        "year": 2017,
        "release_date": "2017-03-03T00:00:00Z",
        "runtime": 137,
        "rating": 4.5,
        "mpaa_rating": "R",
        "genres": { "2": "Drama" },
    })
}

fn all_movies() -> Vec<Value> {
    vec![spiderman(), logan()]
}

/// Only the fields requested by the structured queries.
fn query_fields(movie: &Value) -> Value {
    json!({
        "id": movie["id"],
        "title": movie["title"],
        "runtime": movie["runtime"],
        "year": movie["year"],
        "description": movie["description"],
    })
}

#[derive(Debug, Default)]
pub struct Stub {
    requests: AtomicUsize,
    queries: Mutex<Vec<String>>,
    edits: Mutex<Vec<Value>>,
    deletions: Mutex<Vec<u64>>,
}

impl Stub {
    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Query documents in order of arrival.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Request bodies of `POST admin/editmovie` in order of arrival.
    pub fn edits(&self) -> Vec<Value> {
        self.edits.lock().unwrap().clone()
    }

    pub fn deletions(&self) -> Vec<u64> {
        self.deletions.lock().unwrap().clone()
    }
}

async fn movies(State(stub): State<Arc<Stub>>) -> Json<Value> {
    stub.hit();
    Json(json!({ "movies": all_movies() }))
}

async fn movie(State(stub): State<Arc<Stub>>, Path(id): Path<u64>) -> Response {
    stub.hit();
    match all_movies()
        .into_iter()
        .find(|movie| movie["id"].as_u64() == Some(id))
    {
        Some(movie) => Json(json!({ "movie": movie })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn genres(State(stub): State<Arc<Stub>>) -> Json<Value> {
    stub.hit();
    Json(json!({
        "genres": [
            { "id": 1, "genre_name": "Action" },
            { "id": 2, "genre_name": "Drama" },
            { "id": 3, "genre_name": "Adventure" },
        ]
    }))
}

async fn genre(State(stub): State<Arc<Stub>>, Path(id): Path<u64>) -> Json<Value> {
    stub.hit();
    let key = id.to_string();
    let movies = all_movies()
        .into_iter()
        .filter(|movie| movie["genres"].get(&key).is_some())
        .collect::<Vec<_>>();
    if movies.is_empty() {
        return Json(json!({ "movies": null }));
    }
    Json(json!({ "movies": movies }))
}

fn search_term(document: &str) -> Option<String> {
    let (_, literal) = document.split_once("titleContains:")?;
    serde_json::Deserializer::from_str(literal.trim_start())
        .into_iter::<String>()
        .next()?
        .ok()
}

async fn graphql(State(stub): State<Arc<Stub>>, document: String) -> Json<Value> {
    stub.hit();
    stub.queries.lock().unwrap().push(document.clone());
    let Some(term) = search_term(&document) else {
        let list = all_movies().iter().map(query_fields).collect::<Vec<_>>();
        return Json(json!({ "data": { "list": list } }));
    };
    if term == SLOW_TERM {
        tokio::time::sleep(SLOW_RESPONSE_DELAY).await;
    }
    if term == FAILING_TERM {
        return Json(json!({
            "data": null,
            "errors": [{ "message": "search failed" }],
        }));
    }
    let found = all_movies()
        .iter()
        .filter(|movie| {
            movie["title"]
                .as_str()
                .is_some_and(|title| title.contains(term.as_str()))
        })
        .map(query_fields)
        .collect::<Vec<_>>();
    Json(json!({ "data": { "search": found } }))
}

async fn edit_movie(State(stub): State<Arc<Stub>>, Json(payload): Json<Value>) -> Response {
    stub.hit();
    stub.edits.lock().unwrap().push(payload.clone());
    let duplicate = all_movies()
        .iter()
        .any(|movie| {
            movie["title"] == payload["title"] && movie["id"].to_string() != payload["id"]
        });
    if duplicate {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "message": "duplicate title" } })),
        )
            .into_response();
    }
    Json(json!({ "response": { "ok": true } })).into_response()
}

async fn delete_movie(State(stub): State<Arc<Stub>>, Path(id): Path<u64>) -> Response {
    stub.hit();
    if id == 2 {
        // Rejected with an error payload despite the status
        return Json(json!({ "error": { "message": "movie is locked" } })).into_response();
    }
    stub.deletions.lock().unwrap().push(id);
    Json(json!({ "response": { "ok": true } })).into_response()
}

/// Start the stub server and return a handle for accessing it.
pub async fn start(stub: &Arc<Stub>) -> Handle {
    start_with_config(stub, |config| config).await
}

pub async fn start_with_config(
    stub: &Arc<Stub>,
    configure: impl FnOnce(Config) -> Config,
) -> Handle {
    let app = Router::new()
        .route("/v1/movies", get(movies))
        .route("/v1/movies/:id", get(movie))
        .route("/v1/genres", get(genres))
        .route("/v1/genres/:id", get(genre))
        .route("/v1/graphql", post(graphql))
        .route("/v1/admin/editmovie", post(edit_movie))
        .route("/v1/admin/deletemovie/:id", delete(delete_movie))
        .with_state(Arc::clone(stub));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let config = Config::with_base_url(format!("http://{addr}/").parse().unwrap());
    Handle::new(configure(config)).unwrap()
}
