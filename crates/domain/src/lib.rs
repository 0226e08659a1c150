//! # shc-domain
//!
//! Pure model of the state reported by a smart-home controller's polling API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, validation errors, timestamps
//! - Declare the closed catalog of **device states** and validate documents
//!   against it ([`state::validate_device_state`])
//! - Validate the **entities** found in a poll cycle: rooms, devices and
//!   service data ([`entity::validate_entity`])
//! - Read the **poll event** envelope and reconcile events into a
//!   [`registry::Registry`] keyed by kind and id
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod error;
pub mod id;
pub mod time;
pub mod wire;

pub mod entity;
pub mod poll_event;
pub mod registry;
pub mod state;
