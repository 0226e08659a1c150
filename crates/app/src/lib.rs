//! # shc-app
//!
//! Application layer: the poll-event processor and its **port definitions**.
//!
//! ## Responsibilities
//! - Define the `ChangePublisher` port through which registry changes leave
//!   the core
//! - Apply poll cycles to the shared registry (`PollEventProcessor`), keeping
//!   a bounded log of rejected events
//! - Provide **in-process infrastructure** (change bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `shc-domain` only (plus `tokio::sync` for locks and channels).
//! Never imports adapter crates.

pub mod change;
pub mod change_bus;
pub mod ports;
pub mod rejection_log;
pub mod services;
