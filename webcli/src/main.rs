// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, path::PathBuf, str::FromStr as _, sync::Arc};

use anyhow::{anyhow, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use movies_client::{
    Config, Handle, JoinedTask,
    catalog::{MovieDetail, MovieList},
    edit::{EditSession, State},
    form::FormField,
    genre::{GenreDetail, GenreList},
    remote::LoadState,
    search::SearchController,
};
use movies_core::{GenreId, MovieId};

mod render;

const DEFAULT_LOG_FILTER: &str = "info";

const API_URL_ENV: &str = "MOVIES_API_URL";

const API_URL_ARG: &str = "api-url";

const CONFIG_ARG: &str = "config";

const ID_ARG: &str = "id";

const TERM_ARG: &str = "term";

const SET_ARG: &str = "set";

const SUBMIT_ARG: &str = "submit";

fn loaded<T>(state: LoadState<T>) -> anyhow::Result<T> {
    match state {
        LoadState::Loaded(value) => Ok(value),
        LoadState::Failed { reason, .. } => Err(anyhow!(reason)),
        LoadState::Idle | LoadState::Loading { .. } => Err(anyhow!("no result")),
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = if let Some(file_path) = matches.get_one::<PathBuf>(CONFIG_ARG) {
        Config::load_from_file(file_path)?
    } else {
        Config::default()
    };
    let api_url = matches
        .get_one::<String>(API_URL_ARG)
        .cloned()
        .or_else(|| env::var(API_URL_ENV).ok());
    if let Some(api_url) = api_url {
        config.base_url = api_url.parse()?;
    }
    Ok(config)
}

fn parse_assignment(assignment: &str) -> anyhow::Result<(FormField, &str)> {
    let Some((field, value)) = assignment.split_once('=') else {
        bail!("expected <field>=<value> instead of \"{assignment}\"");
    };
    let field = FormField::from_str(field.trim())
        .map_err(|_| anyhow!("unknown field \"{field}\""))?;
    Ok((field, value))
}

async fn search(handle: &Handle, terms: Vec<String>) -> anyhow::Result<()> {
    let controller = Arc::new(SearchController::new());
    // One request per term without waiting for the previous results
    let tasks = terms
        .into_iter()
        .filter_map(|term| {
            controller.set_term(term);
            controller.spawn_search(handle)
        })
        .collect::<Vec<_>>();
    for task in tasks {
        match JoinedTask::join(task).await {
            JoinedTask::Completed(true) => (),
            JoinedTask::Completed(false) => log::debug!("Discarded outdated search results"),
            JoinedTask::Cancelled => log::warn!("Search cancelled"),
            JoinedTask::Panicked(err) => return Err(err),
        }
    }
    let state = controller.read();
    log::info!("Search results for {term:?}", term = state.term());
    if let Some(reason) = state.results().failure_reason() {
        bail!("{reason}");
    }
    println!(
        "{}",
        render::movie_lines(state.movies().unwrap_or_default())
    );
    Ok(())
}

async fn load_for_editing(handle: &Handle, id: MovieId) -> anyhow::Result<EditSession> {
    let session = EditSession::new();
    session.load(handle, id).await;
    if let Some(reason) = session.read().state().loading_failed_reason() {
        bail!("{reason}");
    }
    Ok(session)
}

fn print_form(session: &EditSession) {
    let session = session.read();
    let state = session.state();
    if let Some(form) = state.form() {
        println!("{}", render::form(form, state.errors()));
    }
}

/// Print the notification and fail on errors.
fn finish_with_notification(session: &EditSession) -> anyhow::Result<()> {
    let session = session.read();
    let Some(notification) = session.state().notification() else {
        return Ok(());
    };
    if let Some(text) = render::notification(notification) {
        println!("{text}");
    }
    if notification.is_error() {
        bail!("{}", notification.message);
    }
    Ok(())
}

async fn edit(handle: &Handle, id: MovieId, matches: &ArgMatches) -> anyhow::Result<()> {
    let session = load_for_editing(handle, id).await?;
    for assignment in matches.get_many::<String>(SET_ARG).unwrap_or_default() {
        let (field, value) = parse_assignment(assignment)?;
        if session.edit(field, value) {
            log::info!("Changed {field}");
        }
    }
    if !matches.get_flag(SUBMIT_ARG) {
        print_form(&session);
        return Ok(());
    }
    if !session.submit(handle).await {
        print_form(&session);
        bail!("missing required values");
    }
    debug_assert!(matches!(session.read().state(), State::Ready { .. }));
    finish_with_notification(&session)
}

async fn delete(handle: &Handle, id: MovieId) -> anyhow::Result<()> {
    let session = load_for_editing(handle, id).await?;
    if !session.delete(handle).await {
        bail!("cannot delete movie {id}");
    }
    finish_with_notification(&session)
}

async fn run(handle: &Handle, matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("movies", _)) => {
            let movies = loaded(MovieList::new().load(handle).await)?;
            println!("{}", render::movie_lines(&movies));
        }
        Some(("movie", matches)) => {
            let id = MovieId::new(*matches.get_one::<u64>(ID_ARG).expect("required"));
            let movie = loaded(MovieDetail::new().load(handle, id).await)?;
            println!("{}", render::movie_detail(&movie));
        }
        Some(("genres", _)) => {
            let genres = loaded(GenreList::new().load(handle).await)?;
            println!("{}", render::genre_lines(&genres));
        }
        Some(("genre", matches)) => {
            let id = GenreId::new(*matches.get_one::<u64>(ID_ARG).expect("required"));
            let genre_movies = loaded(GenreDetail::new().load(handle, id).await)?;
            println!("{}", render::genre_movies(&genre_movies));
        }
        Some(("search", matches)) => {
            let terms = matches
                .get_many::<String>(TERM_ARG)
                .unwrap_or_default()
                .cloned()
                .collect::<Vec<_>>();
            // Without any terms all movies are listed
            let terms = if terms.is_empty() {
                vec![String::new()]
            } else {
                terms
            };
            search(handle, terms).await?;
        }
        Some(("edit", matches)) => {
            let id = MovieId::new(*matches.get_one::<u64>(ID_ARG).expect("required"));
            edit(handle, id, matches).await?;
        }
        Some(("delete", matches)) => {
            let id = MovieId::new(*matches.get_one::<u64>(ID_ARG).expect("required"));
            delete(handle, id).await?;
        }
        Some((subcommand, _)) => {
            unreachable!("Unknown subcommand {subcommand}");
        }
        None => unreachable!("subcommand required"),
    }
    Ok(())
}

fn command() -> Command {
    let id_arg = Arg::new(ID_ARG)
        .num_args(1)
        .required(true)
        .value_parser(value_parser!(u64));
    Command::new("movies-cli")
        .about("A command line client for the movie catalog web API")
        .version("0.0")
        .subcommand_required(true)
        .arg(
            Arg::new(API_URL_ARG)
                .long(API_URL_ARG)
                .num_args(1)
                .required(false)
                .help(format!(
                    "The base URL of the web API, defaults to ${API_URL_ENV}"
                )),
        )
        .arg(
            Arg::new(CONFIG_ARG)
                .long(CONFIG_ARG)
                .num_args(1)
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("Load the configuration from a RON file"),
        )
        .subcommand(Command::new("movies").about("Lists all movies"))
        .subcommand(
            Command::new("movie")
                .about("Shows a single movie")
                .arg(id_arg.clone().help("The id of the movie")),
        )
        .subcommand(Command::new("genres").about("Lists all genres"))
        .subcommand(
            Command::new("genre")
                .about("Lists the movies of a genre")
                .arg(id_arg.clone().help("The id of the genre")),
        )
        .subcommand(
            Command::new("search")
                .about("Searches movies by title, one request per term")
                .arg(
                    Arg::new(TERM_ARG)
                        .num_args(0..)
                        .help("Only the results of the last term are shown"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Edits a movie, use id 0 for adding a new movie")
                .arg(id_arg.clone().help("The id of the movie"))
                .arg(
                    Arg::new(SET_ARG)
                        .long(SET_ARG)
                        .num_args(1)
                        .action(ArgAction::Append)
                        .value_name("FIELD=VALUE")
                        .help("Changes a field of the form"),
                )
                .arg(
                    Arg::new(SUBMIT_ARG)
                        .long(SUBMIT_ARG)
                        .action(ArgAction::SetTrue)
                        .help("Validates and saves the movie"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Deletes a movie")
                .arg(id_arg.help("The id of the movie")),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let matches = command().get_matches();
    let config = load_config(&matches)?;
    let handle = Handle::new(config)?;
    run(&handle, &matches).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command() {
        command().debug_assert();
    }

    #[test]
    fn parse_field_assignment() {
        assert_eq!(
            (FormField::MpaaRating, "PG13"),
            parse_assignment("mpaa_rating=PG13").unwrap()
        );
        assert_eq!(
            (FormField::Title, "A = B"),
            parse_assignment("title=A = B").unwrap()
        );
        assert!(parse_assignment("title").is_err());
        assert!(parse_assignment("poster=x").is_err());
    }

    #[test]
    fn api_url_overrides_config() {
        let matches = command()
            .try_get_matches_from([
                "movies-cli",
                "--api-url",
                "http://example.com:4000/",
                "movies",
            ])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!("http://example.com:4000/", config.base_url.as_str());
    }
}
