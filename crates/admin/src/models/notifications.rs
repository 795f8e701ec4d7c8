//! Admin notification feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ybs_core::{NotificationId, NotificationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    /// Console route the notification points at.
    pub link: Option<String>,
}

/// The notification list plus its unread badge count.
///
/// The local edit methods keep `unread_count` consistent with the list so an
/// optimistic update never shows a stale badge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: u64,
}

impl NotificationFeed {
    /// Mark one notification read. Returns `false` if it is not in the feed.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        let Some(notification) = self.notifications.iter_mut().find(|n| &n.id == id) else {
            return false;
        };
        notification.is_read = true;
        self.recount();
        true
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.unread_count = 0;
    }

    /// Remove one notification. Returns `false` if it is not in the feed.
    pub fn remove(&mut self, id: &NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| &n.id != id);
        let removed = self.notifications.len() != before;
        if removed {
            self.recount();
        }
        removed
    }

    /// Recompute `unread_count` from the list.
    pub fn recount(&mut self) {
        self.unread_count = self.notifications.iter().filter(|n| !n.is_read).count() as u64;
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| &n.id == id)
    }
}
