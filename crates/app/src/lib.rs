//! # dosehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `VersionRepository` — create and query device versions
//!   - `DeviceRepository` — create, query and delete devices
//!   - `Document` — read a control value and replace an element's content
//! - Define **use-case services**:
//!   - `VersionService` — register versions, build the version map
//!   - `DeviceService` — register devices, resolve display labels
//!   - `VersionSelector` — fill the dependent version dropdown of a form row
//!
//! ## Dependency rule
//! Depends on `dosehub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod selector;
pub mod services;
