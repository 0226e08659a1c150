//! In-process change bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use crate::change::RegistryChange;
use crate::ports::ChangePublisher;

/// In-process change bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the change is simply dropped). Subscribers that fall more than
/// `capacity` changes behind observe a lag.
pub struct InProcessChangeBus {
    sender: broadcast::Sender<RegistryChange>,
}

impl InProcessChangeBus {
    /// Create a new bus with the given channel capacity.
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to changes published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryChange> {
        self.sender.subscribe()
    }
}

impl ChangePublisher for InProcessChangeBus {
    fn publish(&self, change: RegistryChange) -> impl Future<Output = ()> + Send {
        // fails only without receivers
        let _ = self.sender.send(change);
        async {}
    }
}
