// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

pub const DEFAULT_API_PATH: &str = "v1/";

pub const DEFAULT_GRAPHQL_PATH: &str = "graphql";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Client configuration
///
/// All fields are optional when loaded from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the web API
    pub base_url: Url,

    /// Path of the REST endpoints relative to [`Self::base_url`]
    pub api_path: String,

    /// Path of the structured query endpoint relative to [`Self::api_path`]
    pub graphql_path: String,

    pub request_timeout: Duration,

    /// Quiet period before a search is issued for a changed term
    ///
    /// [`Duration::ZERO`] issues one request per change.
    pub search_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_path: DEFAULT_API_PATH.to_owned(),
            graphql_path: DEFAULT_GRAPHQL_PATH.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid URL")
}

impl Config {
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Default::default()
        }
    }

    pub fn from_ron_str(input: &str) -> anyhow::Result<Self> {
        ron::from_str(input).map_err(Into::into)
    }

    pub fn to_ron_string(&self) -> anyhow::Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(Into::into)
    }

    pub fn load_from_file(file_path: &Path) -> anyhow::Result<Self> {
        log::info!("Loading configuration from file: {}", file_path.display());
        let input = fs::read_to_string(file_path)?;
        Self::from_ron_str(&input)
    }
}
