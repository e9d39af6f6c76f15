//! Browser instance manager.
//!
//! Launches or attaches to Chrome, opens pages, tracks the current page and
//! serves as the [`crate::interaction::BrowserSession`] of the click tools.

mod manager_core;
mod manager_pages;
mod manager_session;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
