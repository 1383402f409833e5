// # site24x7-core
//
// Core library of the Site24x7 infrastructure-as-code provider.
//
// ## Architecture Overview
//
// This library translates between the host's flat resource state and the
// Site24x7 REST entities:
// - **Site24x7Client**: Trait for reaching the REST collections (HTTP lives
//   in `site24x7-client`)
// - **Resource**: Trait for the create/read/update/delete/exists lifecycle
//   of one resource kind
// - **ResourceKind**: Closed set of resource kinds, looked up by type name
// - **defaults**: First-listed fallback for unset profiles and user groups
// - **ResourceData / Schema**: Flat state and its declared fields
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Mapping logic is separate from transport
// 2. **Library-First**: All core functionality can be used as a library
// 3. **Fail Early**: Malformed input is rejected before any remote call

pub mod api;
pub mod config;
pub mod defaults;
pub mod error;
pub mod resources;
pub mod state;
pub mod traits;

// Re-export core types for convenience
pub use api::{Entity, Status};
pub use config::{AuthConfig, ClientConfig, RetryConfig};
pub use error::{ApiErrorBody, Error, Result};
pub use resources::ResourceKind;
pub use state::{ResourceData, Schema};
pub use traits::{Collection, Listing, Resource, Site24x7Client};
