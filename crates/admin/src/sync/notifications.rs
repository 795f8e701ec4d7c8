//! Notification center: optimistic edits plus a polling refresh.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Method;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use ybs_core::NotificationId;

use super::optimistic::{Reconcile, apply_then_reconcile};
use super::resource::{DataResource, ResourceSnapshot};
use crate::api::endpoints;
use crate::config::DataMode;
use crate::models::NotificationFeed;
use crate::session::SessionManager;

/// Background task that refreshes the feed on a fixed interval.
///
/// Dropping the poller stops it at the next tick boundary. A refresh already
/// in flight runs to completion so the feed never stays in `loading`.
#[derive(Debug)]
pub struct NotificationPoller {
    handle: JoinHandle<()>,
    _stop: oneshot::Sender<()>,
}

impl NotificationPoller {
    fn spawn(resource: DataResource<NotificationFeed>, period: Duration) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            // The first tick is one period out; the caller refreshes on mount.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {}
                }
                debug!("Polling notifications");
                resource.refresh().await;
            }
            debug!("Notification poller stopped");
        });
        Self {
            handle,
            _stop: stop,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// The notification feed with mark-read, mark-all-read and delete.
///
/// Edits are optimistic: the feed changes immediately and the backend call
/// runs in the background without rollback on failure.
#[derive(Debug)]
pub struct NotificationCenter {
    resource: DataResource<NotificationFeed>,
    session: SessionManager,
    poll_interval: Duration,
    poller: Mutex<Option<NotificationPoller>>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new(session: SessionManager, mode: DataMode, poll_interval: Duration) -> Self {
        Self {
            resource: DataResource::new(session.clone(), mode),
            session,
            poll_interval,
            poller: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn resource(&self) -> &DataResource<NotificationFeed> {
        &self.resource
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceSnapshot<NotificationFeed> {
        self.resource.snapshot()
    }

    pub async fn refresh(&self) -> ResourceSnapshot<NotificationFeed> {
        self.resource.refresh().await
    }

    /// Mark one notification read.
    pub fn mark_read(&self, id: &NotificationId) -> Reconcile {
        let client = self.session.client();
        let path = endpoints::notification_read(id);
        let id = id.clone();
        apply_then_reconcile(
            &self.resource,
            move |feed| {
                feed.mark_read(&id);
            },
            async move { client.command(Method::PATCH, &path?).await },
        )
    }

    pub fn mark_all_read(&self) -> Reconcile {
        let client = self.session.client();
        apply_then_reconcile(
            &self.resource,
            NotificationFeed::mark_all_read,
            async move {
                client
                    .command(Method::PATCH, endpoints::NOTIFICATIONS_READ_ALL)
                    .await
            },
        )
    }

    /// Delete one notification.
    pub fn delete(&self, id: &NotificationId) -> Reconcile {
        let client = self.session.client();
        let path = endpoints::notification(id);
        let id = id.clone();
        apply_then_reconcile(
            &self.resource,
            move |feed| {
                feed.remove(&id);
            },
            async move { client.command(Method::DELETE, &path?).await },
        )
    }

    /// Start refreshing on the configured interval.
    ///
    /// Any poller already running is stopped first, so there is never more
    /// than one.
    pub fn start_polling(&self) {
        let poller = NotificationPoller::spawn(self.resource.clone(), self.poll_interval);
        let previous = self.poller.lock().replace(poller);
        if previous.is_some() {
            debug!("Replaced running notification poller");
        }
        info!(interval_secs = self.poll_interval.as_secs(), "Notification polling started");
    }

    pub fn stop_polling(&self) {
        if self.poller.lock().take().is_some() {
            info!("Notification polling stopped");
        }
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .as_ref()
            .is_some_and(|poller| !poller.is_finished())
    }
}
