// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use derive_more::{Display, From};

use crate::prelude::*;

pub type GenreIdValue = u64;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[repr(transparent)]
pub struct GenreId(GenreIdValue);

impl GenreId {
    #[must_use]
    pub const fn new(value: GenreIdValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> GenreIdValue {
        let Self(value) = self;
        value
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenreInvalidity {
    NameEmpty,
}

impl Validate for Genre {
    type Invalidity = GenreInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.name.trim().is_empty(), GenreInvalidity::NameEmpty)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate() {
        assert!(Genre {
            id: GenreId::new(1),
            name: "Drama".to_owned(),
        }
        .validate()
        .is_ok());
        assert!(Genre::default().validate().is_err());
    }
}
