//! # dosehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST-ish JSON API** for programmatic access
//!   (`/api/versions`, `/api/devices`, …)
//! - Serve **server-side-rendered HTML forms** for registering versions and
//!   devices; the dependent version dropdown is rendered on the server from
//!   the version map, so the forms work without JavaScript
//! - Serve the version dropdown alone as an HTML fragment
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Dependency rule
//! Depends on `dosehub-app` (for port traits and services) and `dosehub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
