//! Core modules: identifier model, mapper interface, registry and dispatch.
//!
//! Backends implementing [`mapper::Mapper`] live in `crate::plugins`.

pub mod ark;
pub mod config;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod resolve;
