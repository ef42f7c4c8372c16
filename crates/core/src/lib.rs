// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core domain model of the movie catalog.
//!
//! Independent of any serialization format. See `movies-core-json`
//! for the JSON representation of the web API.

pub mod genre;
pub use self::genre::{Genre, GenreId, GenreInvalidity};

pub mod movie;
pub use self::movie::{Movie, MovieId, MovieInvalidity, MpaaRating};

pub mod util;

pub mod prelude {
    pub(crate) use semval::prelude::*;
    // Re-export trait methods from semval
    pub use semval::{IsValid, Validate as _};

    pub(crate) use crate::util::clock::*;
}
