//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where an update
//!   flow exists

pub mod custom_request;
pub mod knowledge;
pub mod message;
pub mod template;
pub mod user;
