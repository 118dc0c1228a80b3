//! Pokédex library
//!
//! Exposes the cache, catalog client, application state, and CLI modules for
//! the `pokedex` binary and for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
