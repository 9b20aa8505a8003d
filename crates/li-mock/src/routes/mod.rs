// SPDX-License-Identifier: Apache-2.0
//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are assembled, and wrapped in authentication where needed,
//! by [`crate::app`].

pub mod licenses;
pub mod sessions;
pub mod version;
