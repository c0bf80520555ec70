use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::{SurfaceId, log};
use super::{Interaction, InteractionSource, WaitError};

#[derive(Debug)]
struct Route {
    token: u64,
    sender: mpsc::Sender<Interaction>,
}

#[derive(Debug, Default)]
struct Routes {
    next_token: AtomicU64,
    by_surface: Mutex<HashMap<SurfaceId, Route>>,
}

impl Routes {
    fn lock(&self) -> MutexGuard<'_, HashMap<SurfaceId, Route>> {
        self.by_surface.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Routes inbound interactions to the session watching their surface.
///
/// Every watched surface gets its own bounded queue, so traffic on one
/// surface never pushes out clicks meant for another.
#[derive(Debug, Clone)]
pub struct InteractionHub {
    routes: Arc<Routes>,
    capacity: usize,
}

impl InteractionHub {
    /// `capacity` bounds the queue of each watched surface.
    pub fn new(capacity: usize) -> Self {
        Self {
            routes: Arc::new(Routes::default()),
            capacity: capacity.max(1),
        }
    }

    /// Returns `false` when nobody watches the surface or its queue is full.
    pub fn publish(&self, interaction: Interaction) -> bool {
        let mut routes = self.routes.lock();
        let Some(route) = routes.get(&interaction.surface) else {
            return false;
        };

        match route.sender.try_send(interaction) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                log!(
                    "Queue for {} is full, dropped '{}' from {}",
                    dropped.surface, dropped.custom_id, dropped.author
                );
                false
            }
            Err(TrySendError::Closed(dropped)) => {
                routes.remove(&dropped.surface);
                false
            }
        }
    }

    /// The subscription receives nothing until it watches a surface.
    pub fn subscribe(&self) -> InteractionSubscription {
        InteractionSubscription {
            routes: Arc::downgrade(&self.routes),
            capacity: self.capacity,
            token: self.routes.next_token.fetch_add(1, Ordering::Relaxed),
            watched: None,
        }
    }
}

/// One session's inbox. Dropping it stops routing to its surface.
#[derive(Debug)]
pub struct InteractionSubscription {
    routes: Weak<Routes>,
    capacity: usize,
    token: u64,
    watched: Option<(SurfaceId, mpsc::Receiver<Interaction>)>,
}

impl InteractionSubscription {
    fn unwatch(&mut self) {
        let Some((surface, _receiver)) = self.watched.take() else {
            return;
        };
        let Some(routes) = self.routes.upgrade() else {
            return;
        };

        let mut routes = routes.lock();
        // A later session may have taken the surface over.
        if routes.get(&surface).is_some_and(|route| route.token == self.token) {
            routes.remove(&surface);
        }
    }
}

impl Drop for InteractionSubscription {
    fn drop(&mut self) {
        self.unwatch();
    }
}

impl InteractionSource for InteractionSubscription {
    fn watch(&mut self, surface: SurfaceId) {
        if matches!(&self.watched, Some((current, _)) if *current == surface) {
            return;
        }
        self.unwatch();

        let Some(routes) = self.routes.upgrade() else {
            return;
        };
        let (sender, receiver) = mpsc::channel(self.capacity);
        let route = Route {
            token: self.token,
            sender,
        };
        if routes.lock().insert(surface.clone(), route).is_some() {
            log!("Surface {} taken over by another session", surface);
        }
        self.watched = Some((surface, receiver));
    }

    async fn await_interaction<F>(
        &mut self,
        filter: F,
        timeout: Duration,
    ) -> Result<Interaction, WaitError>
    where
        F: Fn(&Interaction) -> bool + Send,
    {
        let Some((_, receiver)) = self.watched.as_mut() else {
            return Err(WaitError::Closed);
        };

        let wait = async move {
            while let Some(interaction) = receiver.recv().await {
                if filter(&interaction) {
                    return Ok(interaction);
                }
            }
            Err(WaitError::Closed)
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => result,
            Err(_) => Err(WaitError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;

    fn click(author: &str, surface: &str, custom_id: &str) -> Interaction {
        Interaction::new(UserId::new(author), SurfaceId::new(surface), custom_id)
    }

    fn watching(hub: &InteractionHub, surface: &str) -> InteractionSubscription {
        let mut subscription = hub.subscribe();
        subscription.watch(SurfaceId::new(surface));
        subscription
    }

    #[tokio::test]
    async fn test_filter_skips_other_users_and_surfaces() {
        let hub = InteractionHub::new(16);
        let mut subscription = watching(&hub, "surface-1");

        assert!(hub.publish(click("intruder", "surface-1", "0 0")));
        assert!(!hub.publish(click("alice", "surface-2", "0 1")));
        assert!(hub.publish(click("alice", "surface-1", "1 1")));

        let received = subscription
            .await_interaction(|i| i.author.as_str() == "alice", Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(received.custom_id, "1 1");
    }

    #[tokio::test]
    async fn test_foreign_traffic_beyond_capacity_keeps_own_click() {
        let hub = InteractionHub::new(4);
        let mut alice = watching(&hub, "s-a");
        let _bob = watching(&hub, "s-b");

        assert!(hub.publish(click("alice", "s-a", "0 0")));
        for _ in 0..8 {
            hub.publish(click("bob", "s-b", "1 1"));
        }

        let received = alice
            .await_interaction(|i| i.author.as_str() == "alice", Duration::from_secs(1))
            .await;

        assert_eq!(received, Ok(click("alice", "s-a", "0 0")));
    }

    #[tokio::test]
    async fn test_full_queue_drops_only_its_own_surface() {
        let hub = InteractionHub::new(2);
        let _alice = watching(&hub, "s-a");
        let _bob = watching(&hub, "s-b");

        assert!(hub.publish(click("alice", "s-a", "0 0")));
        assert!(hub.publish(click("alice", "s-a", "0 1")));
        assert!(!hub.publish(click("alice", "s-a", "0 2")));
        assert!(hub.publish(click("bob", "s-b", "0 0")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out_and_ignored_interactions_do_not_extend_it() {
        let hub = InteractionHub::new(16);
        let mut subscription = watching(&hub, "surface-1");
        let publisher = hub.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(100)).await;
            publisher.publish(click("intruder", "surface-1", "0 0"));
        });

        let started = tokio::time::Instant::now();
        let result = subscription
            .await_interaction(|i| i.author.as_str() == "alice", Duration::from_secs(180))
            .await;

        assert_eq!(result, Err(WaitError::Timeout));
        assert!(started.elapsed() >= Duration::from_secs(180));
        assert!(started.elapsed() < Duration::from_secs(181));
    }

    #[tokio::test]
    async fn test_closed_hub_ends_wait() {
        let hub = InteractionHub::new(4);
        let mut subscription = watching(&hub, "surface-1");
        drop(hub);

        let result = subscription
            .await_interaction(|_| true, Duration::from_secs(5))
            .await;

        assert_eq!(result, Err(WaitError::Closed));
    }

    #[tokio::test]
    async fn test_unwatched_subscription_cannot_wait() {
        let hub = InteractionHub::new(4);
        let mut subscription = hub.subscribe();

        let result = subscription
            .await_interaction(|_| true, Duration::from_secs(5))
            .await;

        assert_eq!(result, Err(WaitError::Closed));
    }

    #[tokio::test]
    async fn test_rewatching_same_surface_keeps_queued_clicks() {
        let hub = InteractionHub::new(4);
        let mut subscription = watching(&hub, "surface-1");
        hub.publish(click("alice", "surface-1", "2 2"));

        subscription.watch(SurfaceId::new("surface-1"));
        let received = subscription
            .await_interaction(|_| true, Duration::from_secs(1))
            .await;

        assert_eq!(received, Ok(click("alice", "surface-1", "2 2")));
    }

    #[test]
    fn test_dropped_subscription_stops_routing() {
        let hub = InteractionHub::new(4);

        assert!(!hub.publish(click("alice", "surface-1", "0 0")));

        let subscription = watching(&hub, "surface-1");
        assert!(hub.publish(click("alice", "surface-1", "0 0")));

        drop(subscription);
        assert!(!hub.publish(click("alice", "surface-1", "0 0")));
    }

    #[test]
    fn test_takeover_survives_previous_owner_drop() {
        let hub = InteractionHub::new(4);
        let first = watching(&hub, "surface-1");
        let _second = watching(&hub, "surface-1");

        drop(first);

        assert!(hub.publish(click("alice", "surface-1", "0 0")));
    }
}
