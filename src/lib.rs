//! billed: expense-report front end
//!
//! Renders the employee bill list and the new-bill form as HTML fragments and
//! drives them through two controllers talking to a remote bill store.

pub mod config;
pub mod containers;
pub mod errors;
pub mod fixtures;
pub mod format;
pub mod models;
pub mod navigation;
pub mod overlay;
pub mod page;
pub mod session;
pub mod store;
pub mod views;

pub use errors::{BilledError, Result};
