//! Core of the calrest service.
//!
//! This crate provides everything below the HTTP layer:
//! - `RecordStore`, the ordered in-memory collection every entity lives in
//! - `Query` / `Matcher` for partial-record lookups
//! - `IdGenerator` for record identities
//! - `model` types (`Calendar`, `CalendarEvent`, `Task`)
//! - seed loading and `ServerConfig`

pub mod config;
pub mod datasets;
pub mod error;
pub mod identity;
pub mod model;
pub mod query;
pub mod record;
pub mod seed;
pub mod store;

pub use datasets::Datasets;
pub use error::{CalrestError, CalrestResult};
pub use query::{Matcher, Query};
pub use record::Record;
pub use store::RecordStore;
