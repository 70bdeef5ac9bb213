//! # CrateNote Discogs Integration
//!
//! The raw entity resolver backed by the Discogs REST API, and the
//! cache-aside decorator that keeps resolved names out of the network path.

pub mod cached;
pub mod client;

pub use cached::CachedResolver;
pub use client::{DiscogsClient, DiscogsError};
