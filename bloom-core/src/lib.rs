//! Community wall canvas layout and link preview planning.
//!
//! The core is the "bloom" layout: message cards scattered in seeded, layered
//! rings around one center card, deterministic per message id so the wall
//! looks the same on every render.

pub mod canvas;
pub mod error;
pub mod layout;
pub mod output;
pub mod previews;
pub mod wall;
pub mod wasm;

pub use error::{Result, WallError};
pub use layout::{layout_items, AnchorPolicy, LayoutConfig, LayoutResult, Placement, PointI};
pub use wall::{place_messages, PlacedMessage, WallMessage};
