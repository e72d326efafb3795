//! # dosehub-domain
//!
//! Pure domain model for the dosehub dosimeter registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **device types** (product lines such as `EPDN2` or `Hawk`)
//! - Define **versions** (firmware/hardware revisions of a device type)
//! - Define **devices** (physical units identified by a serial number)
//! - Define the **version map** (device type → ordered versions) used by forms
//! - Define a small **markup tree** so UI output is built and tested as data
//! - Render the dependent version `<select>` for a chosen device type
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod device_type;
pub mod field;
pub mod markup;
pub mod selector;
pub mod version;
pub mod version_map;
