//! Domain types and report aggregation logic for the famifarm backend.
//!
//! Nothing in this crate touches the database or HTTP. Persistence is
//! reached through the [`reporting::store::EventStore`] trait, implemented
//! by `famifarm-db` in production and by
//! [`reporting::store::InMemoryEventStore`] in tests.

pub mod error;
pub mod event;
pub mod facility;
pub mod locale;
pub mod product;
pub mod reporting;
pub mod types;
