//! HTTP handlers, one module per resource.

pub mod assist;
pub mod chat;
pub mod checkout;
pub mod knowledge;
pub mod orders;
pub mod templates;
