// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::prelude::*;

mod _core {
    pub(super) use movies_core::genre::{Genre, GenreId};
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Genre {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub genre_name: String,
}

impl From<Genre> for _core::Genre {
    fn from(from: Genre) -> Self {
        let Genre { id, genre_name } = from;
        Self {
            id: _core::GenreId::new(id),
            name: genre_name,
        }
    }
}

impl From<_core::Genre> for Genre {
    fn from(from: _core::Genre) -> Self {
        let _core::Genre { id, name } = from;
        Self {
            id: id.value(),
            genre_name: name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_ignores_unknown_fields() {
        let genre: _core::Genre = serde_json::from_str::<Genre>(
            r#"{"id":2,"genre_name":"Drama","created_at":"2021-05-17T00:00:00Z"}"#,
        )
        .unwrap()
        .into();
        assert_eq!(
            _core::Genre {
                id: _core::GenreId::new(2),
                name: "Drama".to_owned(),
            },
            genre
        );
    }
}
