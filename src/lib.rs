// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Facade of the movie catalog client crates.

pub use movies_core as core;

#[cfg(feature = "json")]
pub use movies_core_json as core_json;

#[cfg(feature = "client")]
pub use movies_client as client;

pub mod prelude {
    pub use movies_core::prelude::*;
    // Re-export trait methods from semval
    pub use semval::{IsValid as _, Validate as _};
}
