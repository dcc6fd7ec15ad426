//! Shared helpers for contact arithmetic and symbol conversion.

pub mod converter;
pub(crate) mod modular;
