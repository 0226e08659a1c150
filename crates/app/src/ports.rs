//! Port definitions: traits that adapters implement.

pub mod change_publisher;

pub use change_publisher::ChangePublisher;
