// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    ops::Deref,
    sync::{Arc, Weak},
};

use reqwest::Client;
use url::Url;

use crate::{Config, FetchError, webapi::ClientEnvironment};

/// Immutable environment
#[derive(Debug)]
pub struct Environment {
    config: Config,
    api_url: Url,
    client: Client,
}

impl Environment {
    /// Set up the runtime environment.
    ///
    /// The base URL of the web API is injected through the configuration.
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let mut api_path = config.api_path.clone();
        if !api_path.ends_with('/') {
            // Otherwise the last path segment would be replaced when joining
            api_path.push('/');
        }
        let api_url = config.base_url.join(&api_path)?;
        log::info!("Web API URL: {api_url}");
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            config,
            api_url,
            client,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl ClientEnvironment for Environment {
    fn client(&self) -> &Client {
        &self.client
    }

    fn join_api_url(&self, path: &str) -> Result<Url, FetchError> {
        self.api_url.join(path).map_err(Into::into)
    }
}

/// Shared runtime environment handle
///
/// A cheaply `Clone`able and `Send`able handle to a shared runtime environment
/// for invoking operations.
#[derive(Debug, Clone)]
pub struct Handle(Arc<Environment>);

impl Handle {
    /// Set up a shared runtime environment
    ///
    /// See also: [`Environment::new()`]
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let environment = Environment::new(config)?;
        Ok(Self(Arc::new(environment)))
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakHandle {
        WeakHandle(Arc::downgrade(&self.0))
    }
}

impl AsRef<Environment> for Handle {
    fn as_ref(&self) -> &Environment {
        &self.0
    }
}

impl Deref for Handle {
    type Target = Environment;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

static_assertions::assert_impl_all!(Handle: Send, Sync);

#[derive(Debug, Clone)]
pub struct WeakHandle(Weak<Environment>);

impl WeakHandle {
    #[must_use]
    pub fn upgrade(&self) -> Option<Handle> {
        self.0.upgrade().map(Handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_api_url() {
        let config = Config::with_base_url("http://localhost:4000".parse().unwrap());
        let env = Environment::new(config).unwrap();
        assert_eq!(
            "http://localhost:4000/v1/movies/1",
            env.join_api_url("movies/1").unwrap().as_str()
        );
        assert_eq!(
            "http://localhost:4000/v1/graphql",
            env.join_api_url("graphql").unwrap().as_str()
        );
    }

    #[test]
    fn join_api_url_without_trailing_slash() {
        let config = Config {
            api_path: "api/v2".to_owned(),
            ..Config::with_base_url("http://localhost:4000/movies/".parse().unwrap())
        };
        let env = Environment::new(config).unwrap();
        assert_eq!(
            "http://localhost:4000/movies/api/v2/genres",
            env.join_api_url("genres").unwrap().as_str()
        );
    }

    #[test]
    fn weak_handle() {
        let handle = Handle::new(Config::default()).unwrap();
        let weak = handle.downgrade();
        assert!(weak.upgrade().is_some());
        drop(handle);
        assert!(weak.upgrade().is_none());
    }
}
