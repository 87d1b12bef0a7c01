//! Radarr and Sonarr adapters.
//!
//! Both speak the v3 REST API and differ only in collection path, lookup term,
//! native id field and creation payload. [`BackendAdapter`] holds the shared
//! operations and dispatches those differences on
//! [`BackendKind`](magnetarr_common::BackendKind).

mod adapter;
mod client;
mod radarr;
mod registry;
mod sonarr;
mod types;

pub use adapter::BackendAdapter;
pub use client::build_base_url;
pub use registry::BackendRegistry;
pub use types::{QualityProfile, RootFolder, SystemStatus};
