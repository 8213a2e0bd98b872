//! Canonical stop-sequence resolution for GTFS feeds.
//!
//! Some agencies publish each vehicle run as a single trip, even when it
//! goes out and comes back, and number its stops unreliably. Given
//! hand-authored canonical stop sequences for each route direction, this
//! crate answers: "which way is this trip going, and in what order does it
//! really serve its stops?"

pub mod agency;
pub mod domain;
pub mod feed;
pub mod resolve;
pub mod store;
