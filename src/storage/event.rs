use tokio::sync::broadcast;

/// Capacity of the change-notification channel. Slow subscribers that fall
/// further behind than this lose the oldest events.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// A handle for receiving storage change notifications.
pub type Subscription = broadcast::Receiver<StorageEvent>;

/// Describes one change to the store. `key` is `None` when the whole store was cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

#[derive(Debug)]
pub(crate) struct StorageBus {
    tx: broadcast::Sender<StorageEvent>,
}

impl Default for StorageBus {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl StorageBus {
    pub(crate) fn subscribe(&self) -> Subscription {
        self.tx.subscribe()
    }

    pub(crate) fn publish(&self, ev: StorageEvent) {
        // send() only fails when nobody is listening, which is fine.
        let _ = self.tx.send(ev);
    }
}
