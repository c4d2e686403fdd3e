//! Entity-editing workflow for the species catalogue and user profiles.
//!
//! The crate binds three pieces into one reusable dialog pattern:
//!
//! - [`schema`]: declarative field rules, normalization and messages
//! - [`editor`]: the dialog state machine (MVI reducer plus an async session)
//! - [`sync`]: create/update/delete against a [`store::RowStore`]
//!
//! Results flow out through [`feedback`] (toast notices) and [`refresh`]
//! (collection invalidation).

pub mod config;
pub mod editor;
pub mod feedback;
pub mod identity;
pub mod logging;
pub mod model;
pub mod refresh;
pub mod schema;
pub mod store;
pub mod sync;
