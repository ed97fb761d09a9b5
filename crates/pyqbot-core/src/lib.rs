//! Core domain + pipeline for the JEE PYQ papers bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind a
//! port (trait) implemented in the adapter crate; everything here is either
//! pure (link normalization, year classification, extraction, composition,
//! command dispatch) or touches only local files and the scrape target.

pub mod command;
pub mod compose;
pub mod config;
pub mod cursor;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod links;
pub mod logging;
pub mod messaging;
pub mod scrape;
pub mod year;

pub use errors::{Error, Result};
