//! Magnetarr - resolve movie and TV pages and sync them with Radarr and Sonarr
//!
//! A page URL from IMDB, TheTVDB or TMDB is resolved to canonical ids through
//! the [`provider`] registry, then checked against and optionally added to the
//! matching [`backend`]. [`session::Session`] ties the two together.

pub mod backend;
pub mod config;
pub mod error;
mod http;
pub mod metadata;
pub mod provider;
pub mod session;

pub use error::{Error, Result};
