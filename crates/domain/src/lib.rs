//! # homesim-domain
//!
//! Pure domain model for the homesim device simulator.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, status reports
//! - Define **Devices** (lights, fans, cameras, thermostats) and their
//!   power/setting transition rules
//! - Define the **Registry** (ordered, 1-indexed owning collection of devices)
//! - Define **Log entries** (the `"<device>: <action>"` records of the action log)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod report;

pub mod device;
pub mod log_entry;
pub mod registry;
