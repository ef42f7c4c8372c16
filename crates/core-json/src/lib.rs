// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! JSON representation of the movie catalog web API.

pub mod prelude {
    pub(crate) use serde::{Deserialize, Serialize};
}

pub mod api;
pub mod genre;
pub mod graphql;
pub mod movie;
