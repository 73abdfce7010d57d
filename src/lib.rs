//! Tether - floating overlay placement and interaction engine
//!
//! Positions tooltips, popovers and dropdown menus next to their triggers and
//! drives their show/hide lifecycle from pointer, focus and keyboard input.
//! Platform access goes through the traits in [`traits`], so the engine runs
//! the same against a terminal, a test fake or any other host.

pub mod binder;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod id;
pub mod locator;
pub mod logging;
pub mod placement;
pub mod prelude;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod traits;
