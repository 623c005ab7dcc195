//! Navigation core for a radial marking menu.
//!
//! Pointer deltas go into a [`nav::Navigator`], which walks the eight binary
//! menu trees of a [`menu::MenuTree`] by direction and distance of travel.
//! [`guides`] turns the navigation state into drawable geometry and
//! [`session`] implements press, drag and release handling on top of it.

pub mod config;
pub mod geometry;
pub mod guides;
pub mod macros;
pub mod menu;
pub mod nav;
pub mod sector;
pub mod session;
pub mod settings;
