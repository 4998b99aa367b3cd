//! Domain modules organized as vertical slices.
//!
//! - `order` — drafts, submission payloads, wire types, the draft controller
//! - `theme` — chain/token display catalog, the source of selectable options
//! - `wallet` — read-only wallet sources and effective-address resolution

pub mod order;
pub mod theme;
pub mod wallet;
