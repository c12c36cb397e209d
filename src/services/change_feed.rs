//! Change feed for linkshelf.
//!
//! [`ChangeFeed`] is the abstract push channel the bookmark view listens on;
//! [`FeedHub`] is the in-process implementation, one `tokio::sync::broadcast`
//! channel per owner that the SQLite row store publishes to after every write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::types::errors::FeedError;
use crate::types::feed::ChangeEvent;

/// Source of owner-scoped change notifications.
#[async_trait(?Send)]
pub trait ChangeFeed {
    /// Opens a subscription that yields events for rows owned by `user_id`.
    async fn subscribe(&self, user_id: &str) -> Result<Box<dyn Subscription>, FeedError>;
}

/// A live feed subscription.
///
/// Implementations release their server-side slot on `unsubscribe` and on drop.
#[async_trait(?Send)]
pub trait Subscription {
    /// Waits for the next event. Returns `None` once unsubscribed.
    async fn next_event(&mut self) -> Option<Result<ChangeEvent, FeedError>>;

    /// Releases the subscription. Further calls are no-ops.
    fn unsubscribe(&mut self);
}

type ChannelMap = HashMap<String, broadcast::Sender<ChangeEvent>>;
type Channels = Mutex<ChannelMap>;

fn lock_channels(channels: &Channels) -> MutexGuard<'_, ChannelMap> {
    // The map stays consistent even if a holder panicked.
    channels.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process broadcast hub for change events.
///
/// Each owner gets their own channel, created on first subscribe and
/// removed when their last subscription is released. A busy owner can
/// only make their own subscribers lag.
#[derive(Clone)]
pub struct FeedHub {
    channels: Arc<Channels>,
    capacity: usize,
    active: Arc<AtomicUsize>,
}

impl FeedHub {
    /// Creates a hub buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publishes an event for rows owned by `user_id`.
    pub fn publish(&self, user_id: &str, event: ChangeEvent) {
        debug!(user_id, kind = ?event.kind(), id = event.id(), "publishing change");
        let channels = lock_channels(&self.channels);
        // No channel means nobody is watching this owner right now.
        if let Some(sender) = channels.get(user_id) {
            let _ = sender.send(event);
        }
    }

    /// Number of subscriptions that have not been released yet.
    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Number of owners with at least one live subscription.
    pub fn watched_owners(&self) -> usize {
        lock_channels(&self.channels).len()
    }

    /// Opens a subscription synchronously.
    pub fn open(&self, user_id: &str) -> Result<HubSubscription, FeedError> {
        if user_id.is_empty() {
            return Err(FeedError::SubscribeFailed("empty owner filter".to_string()));
        }
        let receiver = lock_channels(&self.channels)
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        self.active.fetch_add(1, Ordering::SeqCst);
        info!(user_id, "feed subscription opened");
        Ok(HubSubscription {
            user_id: user_id.to_string(),
            receiver: Some(receiver),
            channels: Arc::downgrade(&self.channels),
            active: Arc::clone(&self.active),
        })
    }
}

#[async_trait(?Send)]
impl ChangeFeed for FeedHub {
    async fn subscribe(&self, user_id: &str) -> Result<Box<dyn Subscription>, FeedError> {
        Ok(Box::new(self.open(user_id)?))
    }
}

/// Subscription handed out by [`FeedHub`] for one owner's channel.
///
/// Holds the hub's channel map weakly, so dropping the hub closes the feed.
pub struct HubSubscription {
    user_id: String,
    receiver: Option<broadcast::Receiver<ChangeEvent>>,
    channels: Weak<Channels>,
    active: Arc<AtomicUsize>,
}

impl HubSubscription {
    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }
}

#[async_trait(?Send)]
impl Subscription for HubSubscription {
    async fn next_event(&mut self) -> Option<Result<ChangeEvent, FeedError>> {
        let receiver = self.receiver.as_mut()?;
        match receiver.recv().await {
            Ok(event) => Some(Ok(event)),
            Err(broadcast::error::RecvError::Lagged(n)) => Some(Err(FeedError::Lagged(n))),
            Err(broadcast::error::RecvError::Closed) => Some(Err(FeedError::Closed)),
        }
    }

    fn unsubscribe(&mut self) {
        let Some(receiver) = self.receiver.take() else {
            return;
        };
        drop(receiver);
        if let Some(channels) = self.channels.upgrade() {
            let mut channels = lock_channels(&channels);
            let idle = channels
                .get(&self.user_id)
                .is_some_and(|sender| sender.receiver_count() == 0);
            if idle {
                channels.remove(&self.user_id);
            }
        }
        self.active.fetch_sub(1, Ordering::SeqCst);
        info!(user_id = %self.user_id, "feed subscription released");
    }
}

impl Drop for HubSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
