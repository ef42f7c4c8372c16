// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The editable snapshot of a movie and its validation.

use std::collections::BTreeSet;

use semval::prelude::*;
use strum::IntoEnumIterator as _;

use movies_core::{
    Movie, MovieId,
    util::clock::{YearType, normalize_date, parse_date},
};
use movies_core_json::api::EditMovie;

/// Editable fields of a movie.
///
/// Ordered as they appear in the form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum FormField {
    Title,
    ReleaseDate,
    Runtime,
    MpaaRating,
    Rating,
    Description,
}

impl FormField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Fields that currently fail validation.
///
/// Empty if and only if the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeSet<FormField>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<FormField> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FormField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Owned snapshot of all editable values of a movie.
///
/// All values are edited as strings. The id is assigned when
/// creating the form and cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    id: MovieId,
    title: String,
    release_date: String,
    runtime: String,
    mpaa_rating: String,
    rating: String,
    description: String,

    // Not editable
    year: Option<YearType>,
    genres: Vec<String>,
}

impl MovieForm {
    /// A blank form for adding a new movie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn id(&self) -> MovieId {
        self.id
    }

    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    #[must_use]
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::ReleaseDate => &self.release_date,
            FormField::Runtime => &self.runtime,
            FormField::MpaaRating => &self.mpaa_rating,
            FormField::Rating => &self.rating,
            FormField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::ReleaseDate => &mut self.release_date,
            FormField::Runtime => &mut self.runtime,
            FormField::MpaaRating => &mut self.mpaa_rating,
            FormField::Rating => &mut self.rating,
            FormField::Description => &mut self.description,
        }
    }

    /// Replace the value of a single field.
    ///
    /// Returns `true` if the value has changed.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();
        let current = self.field_mut(field);
        if *current == value {
            return false;
        }
        *current = value;
        true
    }

    /// The request payload for saving the movie.
    #[must_use]
    pub fn to_payload(&self) -> EditMovie {
        let Self {
            id,
            title,
            release_date,
            runtime,
            mpaa_rating,
            rating,
            description,
            year,
            genres: _,
        } = self;
        let year = parse_date(release_date)
            .ok()
            .map(|date| date.year())
            .or(*year)
            .map(|year| year.to_string())
            .unwrap_or_default();
        EditMovie {
            id: id.to_string(),
            title: title.clone(),
            description: description.clone(),
            year,
            release_date: normalize_date(release_date)
                .unwrap_or_else(|| release_date.clone()),
            runtime: runtime.clone(),
            rating: rating.clone(),
            mpaa_rating: mpaa_rating.clone(),
        }
    }
}

impl From<Movie> for MovieForm {
    fn from(from: Movie) -> Self {
        let release_date = from.release_date_string().unwrap_or_default();
        let Movie {
            id,
            title,
            description,
            year,
            release_date: _,
            runtime_minutes,
            mpaa_rating,
            rating,
            genres,
            poster: _,
        } = from;
        Self {
            id,
            title,
            release_date,
            runtime: runtime_minutes.to_string(),
            mpaa_rating: mpaa_rating
                .map(|rating| rating.as_str().to_owned())
                .unwrap_or_default(),
            rating,
            description,
            year,
            genres,
        }
    }
}

impl Validate for MovieForm {
    type Invalidity = FormField;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        FormField::iter()
            .fold(ValidationContext::new(), |context, field| {
                context.invalidate_if(self.field(field).is_empty(), field)
            })
            .into()
    }
}

/// Check that all required values are present.
#[must_use]
pub fn validate(form: &MovieForm) -> ValidationErrors {
    form.validate()
        .map_err(|err| err.into_iter().collect())
        .err()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
