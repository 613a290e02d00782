//! Domain layer containing core business entities.

pub mod entities;

pub use entities::*;
