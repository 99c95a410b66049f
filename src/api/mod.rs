//! # API Module
//!
//! HTTP handlers of the local dashboard server.
//!
//! ## Endpoints
//!
//! - [`index`] - Landing page with the playlist link form
//! - [`dashboard`] - Builds and renders the dashboard for `?link=<playlist url>`
//! - [`health`] - Health check returning status and version
//!
//! Handlers share a [`DashboardState`] holding the catalog client and the
//! collector settings. Nothing else is shared between requests.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use playlistdash::api::{dashboard, health, index};
//!
//! let app = Router::new()
//!     .route("/", get(index))
//!     .route("/dashboard", get(dashboard))
//!     .route("/health", get(health))
//!     .with_state(state);
//! ```

mod dashboard;
mod health;

pub use dashboard::DashboardQuery;
pub use dashboard::DashboardState;
pub use dashboard::dashboard;
pub use dashboard::index;
pub use health::health;
