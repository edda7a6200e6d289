//! Backend access for the Visconti storefront.
//!
//! This crate provides:
//! - `ApiClient` - reqwest client for the menu, gallery and offer endpoints
//! - `MenuSource` - the trait the rest of the workspace fetches through
//! - `BackendConfig` - base URL and timeouts, read from `VITE_BACKEND_URI`
//! - `FetchState` - load state with a manual "try again" transition
//! - `refresh_active_offer` - keeps the cached offer in step with the backend

mod client;
mod config;
mod offers;
mod state;

pub use client::*;
pub use config::*;
pub use offers::*;
pub use state::*;
