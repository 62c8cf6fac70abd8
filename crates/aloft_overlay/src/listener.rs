//! Shared listener table.
//!
//! One table per manager, shared by every instance it owns. Instances
//! hold [`ListenerGuard`]s; dropping a guard releases the subscription,
//! so a torn-down instance can never leave a listener behind.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ScrollContainer;
use crate::layer::LayerId;

/// What a subscription listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKey {
    /// Scroll events from one container.
    Scroll(ScrollContainer),
    /// Viewport resize.
    Resize,
    /// Pointer interaction anywhere.
    Pointer,
    /// Key presses.
    Key,
}

/// Subscriptions by key, in subscription order.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    table: Arc<Mutex<HashMap<ListenerKey, Vec<LayerId>>>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a layer; the subscription lives as long as the guard.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe(&self, key: ListenerKey, layer: LayerId) -> ListenerGuard {
        self.table.lock().entry(key).or_default().push(layer);
        ListenerGuard {
            registry: self.clone(),
            key,
            layer,
        }
    }

    /// Layers subscribed to a key, in subscription order.
    #[must_use]
    pub fn subscribers(&self, key: ListenerKey) -> Vec<LayerId> {
        self.table.lock().get(&key).cloned().unwrap_or_default()
    }

    /// Returns true if the layer holds a subscription for the key.
    #[must_use]
    pub fn is_subscribed(&self, key: ListenerKey, layer: LayerId) -> bool {
        self.table
            .lock()
            .get(&key)
            .is_some_and(|layers| layers.contains(&layer))
    }

    /// Total live subscriptions across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.lock().values().map(Vec::len).sum()
    }

    /// Returns true if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, key: ListenerKey, layer: LayerId) {
        let mut table = self.table.lock();
        if let Some(layers) = table.get_mut(&key) {
            if let Some(pos) = layers.iter().position(|l| *l == layer) {
                layers.remove(pos);
            }
            if layers.is_empty() {
                table.remove(&key);
            }
        }
    }
}

/// A live subscription. Unsubscribes on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: ListenerRegistry,
    key: ListenerKey,
    layer: LayerId,
}

impl ListenerGuard {
    /// The subscribed key.
    #[must_use]
    pub const fn key(&self) -> ListenerKey {
        self.key
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.release(self.key, self.layer);
    }
}
