//! Core traits for the Site24x7 provider
//!
//! This module defines the abstract interfaces between the layers.
//!
//! - [`Site24x7Client`]: Reach the REST API, one accessor per collection
//! - [`Resource`]: Lifecycle operations of one resource kind

pub mod client;
pub mod resource;

pub use client::{Collection, Listing, Site24x7Client};
pub use resource::Resource;
