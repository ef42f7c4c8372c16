// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use serde::{
    Deserializer, Serializer,
    de::{self, Visitor as SerdeDeserializeVisitor},
    ser::SerializeSeq as _,
};

use movies_core::util::clock::{YearType, format_date, parse_date};

use crate::prelude::*;

mod _core {
    pub(super) use movies_core::movie::{Movie, MovieId, MpaaRating};
}

///////////////////////////////////////////////////////////////////////
// Genres
///////////////////////////////////////////////////////////////////////

/// Genre names of a movie.
///
/// The server sends a map from the association id to the genre name.
/// Arrays of names and `null` are accepted as well. Map entries are
/// ordered by their numeric key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Genres(Vec<String>);

impl From<Genres> for Vec<String> {
    fn from(from: Genres) -> Self {
        let Genres(names) = from;
        names
    }
}

impl From<Vec<String>> for Genres {
    fn from(from: Vec<String>) -> Self {
        Self(from)
    }
}

impl Serialize for Genres {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for name in &self.0 {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

struct GenresDeserializeVisitor;

impl<'de> SerdeDeserializeVisitor<'de> for GenresDeserializeVisitor {
    type Value = Genres;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of genre names, an array of genre names, or null")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Genres::default())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Genres::default())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut names = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(name) = seq.next_element::<String>()? {
            names.push(name);
        }
        Ok(Genres(names))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((key, name)) = map.next_entry::<String, String>()? {
            // Non-numeric keys are sorted after all numeric keys
            let sort_key = key.parse::<u64>().map_err(|_| {
                log::debug!("Non-numeric genre key: {key}");
                key
            });
            entries.push((sort_key, name));
        }
        entries.sort_by(|(lhs, _), (rhs, _)| match (lhs, rhs) {
            (Ok(lhs), Ok(rhs)) => lhs.cmp(rhs),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(lhs), Err(rhs)) => lhs.cmp(rhs),
        });
        Ok(Genres(entries.into_iter().map(|(_, name)| name).collect()))
    }
}

impl<'de> Deserialize<'de> for Genres {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(GenresDeserializeVisitor)
    }
}

///////////////////////////////////////////////////////////////////////
// Rating
///////////////////////////////////////////////////////////////////////

/// Score of a movie.
///
/// Accepts integers, decimal numbers and strings. The value is kept
/// as written and serialized as a number whenever possible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Rating(String);

impl From<Rating> for String {
    fn from(from: Rating) -> Self {
        let Rating(score) = from;
        score
    }
}

impl From<String> for Rating {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let Self(score) = self;
        if let Ok(score) = score.parse::<i64>() {
            return serializer.serialize_i64(score);
        }
        match score.parse::<f64>() {
            Ok(score) if score.is_finite() => serializer.serialize_f64(score),
            _ => serializer.serialize_str(score),
        }
    }
}

struct RatingDeserializeVisitor;

impl SerdeDeserializeVisitor<'_> for RatingDeserializeVisitor {
    type Value = Rating;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number, a string, or null")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Rating::default())
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Rating(value.to_string()))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Rating(value.to_string()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Rating(value.to_string()))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Rating(value.trim().to_owned()))
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RatingDeserializeVisitor)
    }
}

///////////////////////////////////////////////////////////////////////
// Movie
///////////////////////////////////////////////////////////////////////

/// The zero timestamp that the server sends for unknown release dates.
const ZERO_RELEASE_DATE: &str = "0001-01-01";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Movie {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<i64>,

    #[serde(default)]
    pub rating: Rating,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpaa_rating: Option<String>,

    #[serde(default)]
    pub genres: Genres,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl TryFrom<Movie> for _core::Movie {
    type Error = anyhow::Error;

    fn try_from(from: Movie) -> anyhow::Result<Self> {
        let Movie {
            id,
            title,
            description,
            year,
            release_date,
            runtime,
            rating,
            mpaa_rating,
            genres,
            poster,
        } = from;
        let year = year
            .filter(|year| *year != 0)
            .map(YearType::try_from)
            .transpose()
            .map_err(|_| anyhow::anyhow!("year out of range"))?;
        let release_date = non_empty(release_date)
            .map(|input| parse_date(&input))
            .transpose()?
            .filter(|date| format_date(*date) != ZERO_RELEASE_DATE);
        let runtime_minutes = runtime
            .map(u32::try_from)
            .transpose()
            .map_err(|_| anyhow::anyhow!("invalid runtime"))?
            .unwrap_or_default();
        let mpaa_rating = non_empty(mpaa_rating)
            .map(|token| {
                token
                    .trim()
                    .parse::<_core::MpaaRating>()
                    .map_err(|_| anyhow::anyhow!("invalid MPAA rating \"{token}\""))
            })
            .transpose()?;
        let into = Self {
            id: _core::MovieId::new(id),
            title,
            description,
            year,
            release_date,
            runtime_minutes,
            mpaa_rating,
            rating: rating.into(),
            genres: genres.into(),
            poster: non_empty(poster),
        };
        Ok(into)
    }
}

impl From<_core::Movie> for Movie {
    fn from(from: _core::Movie) -> Self {
        let _core::Movie {
            id,
            title,
            description,
            year,
            release_date,
            runtime_minutes,
            mpaa_rating,
            rating,
            genres,
            poster,
        } = from;
        Self {
            id: id.value(),
            title,
            description,
            year: year.map(Into::into),
            release_date: release_date.map(format_date),
            runtime: Some(runtime_minutes.into()),
            rating: rating.into(),
            mpaa_rating: mpaa_rating.map(|rating| rating.as_str().to_owned()),
            genres: genres.into(),
            poster,
        }
    }
}
