//! Change publisher port: fan-out of registry changes.

use std::future::Future;

use crate::change::RegistryChange;

/// Publishes registry changes to interested subscribers.
///
/// Publishing is fire-and-forget: a subscriber that went away must not
/// prevent a poll cycle from completing.
pub trait ChangePublisher {
    fn publish(&self, change: RegistryChange) -> impl Future<Output = ()> + Send;
}

impl<T: ChangePublisher + Send + Sync> ChangePublisher for std::sync::Arc<T> {
    fn publish(&self, change: RegistryChange) -> impl Future<Output = ()> + Send {
        (**self).publish(change)
    }
}
