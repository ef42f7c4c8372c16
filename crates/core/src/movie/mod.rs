// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use derive_more::{Display, From};
use jiff::civil::Date;

use crate::prelude::*;

///////////////////////////////////////////////////////////////////////
// MovieId
///////////////////////////////////////////////////////////////////////

pub type MovieIdValue = u64;

/// Server-assigned identifier of a movie.
///
/// The value 0 is reserved for new movies that have not been saved yet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[repr(transparent)]
pub struct MovieId(MovieIdValue);

impl MovieId {
    pub const NEW: Self = Self(0);

    #[must_use]
    pub const fn new(value: MovieIdValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> MovieIdValue {
        let Self(value) = self;
        value
    }

    #[must_use]
    pub const fn is_new(self) -> bool {
        self.0 == Self::NEW.0
    }
}

///////////////////////////////////////////////////////////////////////
// MpaaRating
///////////////////////////////////////////////////////////////////////

/// Motion picture content rating.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
pub enum MpaaRating {
    #[strum(serialize = "G")]
    G,
    #[strum(serialize = "PG")]
    Pg,
    #[strum(serialize = "PG13")]
    Pg13,
    #[strum(serialize = "R")]
    R,
    #[strum(serialize = "NC17")]
    Nc17,
}

impl MpaaRating {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

///////////////////////////////////////////////////////////////////////
// Movie
///////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,

    pub title: String,

    pub description: String,

    /// Year of the release as reported by the server
    pub year: Option<YearType>,

    pub release_date: Option<Date>,

    /// Runtime in minutes
    ///
    /// Partial records, e.g. search results, may not contain the
    /// runtime in which case it is 0.
    pub runtime_minutes: u32,

    pub mpaa_rating: Option<MpaaRating>,

    /// Score as sent by the server
    ///
    /// Either an integer or a decimal number, kept as written.
    pub rating: String,

    /// Names of the genres in a stable order
    pub genres: Vec<String>,

    pub poster: Option<String>,
}

impl Movie {
    /// The release date formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn release_date_string(&self) -> Option<String> {
        self.release_date.map(format_date)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MovieInvalidity {
    TitleEmpty,
    ReleaseDateMissing,
    RuntimeZero,
    MpaaRatingMissing,
    GenresNotUnique,
}

impl Validate for Movie {
    type Invalidity = MovieInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            id: _,
            title,
            description: _,
            year: _,
            release_date,
            runtime_minutes,
            mpaa_rating,
            rating: _,
            genres,
            poster: _,
        } = self;
        let mut unique_genres = HashSet::with_capacity(genres.len());
        ValidationContext::new()
            .invalidate_if(title.trim().is_empty(), Self::Invalidity::TitleEmpty)
            .invalidate_if(
                release_date.is_none(),
                Self::Invalidity::ReleaseDateMissing,
            )
            .invalidate_if(*runtime_minutes == 0, Self::Invalidity::RuntimeZero)
            .invalidate_if(mpaa_rating.is_none(), Self::Invalidity::MpaaRatingMissing)
            .invalidate_if(
                !genres.iter().all(|genre| unique_genres.insert(genre)),
                Self::Invalidity::GenresNotUnique,
            )
            .into()
    }
}
