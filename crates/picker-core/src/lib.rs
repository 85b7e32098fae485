//! Catalog, search and persistence primitives for the emoji picker.
//!
//! Everything here is free of GUI and threading concerns; the session crate
//! builds the interactive state machine on top of these types.

pub mod alias;
pub mod catalog;
pub mod filter;
pub mod font;
pub mod key;
pub mod keymap;
pub mod mru;
pub mod search;
pub mod settings;
