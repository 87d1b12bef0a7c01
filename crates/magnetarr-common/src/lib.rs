//! Magnetarr-Common: the item model shared by identity resolution and the
//! backend adapters.
//!
//! - **Item**: the canonical identity record and its derived [`ItemState`]
//! - **Type tags**: [`ItemType`], [`ProviderKind`], [`BackendKind`]
//! - **Id helpers**: normalization of catalog ids encoded as strings or numbers
//!
//! # Examples
//!
//! ```
//! use magnetarr_common::{Item, ItemState, ItemType};
//!
//! let item = Item::new(ItemType::Series, Some("tt0111161".into()), Some("79488".into()));
//! assert!(item.is_resolved());
//! assert_eq!(item.state(), ItemState::Resolved);
//! ```

pub mod ids;
pub mod item;
pub mod types;

pub use item::{Item, ItemProperties, ItemState};
pub use types::*;
