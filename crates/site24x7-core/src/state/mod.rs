// # Managed Resource State
//
// The flat representation exchanged with the host, and the field tables
// that describe it per resource kind.

pub mod data;
pub mod schema;

pub use data::ResourceData;
pub use schema::{Field, FieldDefault, FieldKind, Schema};
