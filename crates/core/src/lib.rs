//! Domain types and scheduling rules shared by the DocSched crates.

pub mod conflict;
pub mod errors;
pub mod locks;
pub mod models;
pub mod services;
pub mod store;
