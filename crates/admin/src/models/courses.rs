//! Courses awaiting or past moderation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ybs_core::{Amount, CourseId, CourseStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub instructor: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default)]
    pub price: Amount,
    #[serde(default)]
    pub enrolled_count: u64,
    pub submitted_at: DateTime<Utc>,
    /// Reviewer notes attached when the course was sent back or rejected.
    pub review_notes: Option<String>,
}

/// The moderation queue as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseList {
    pub courses: Vec<Course>,
}

impl CourseList {
    #[must_use]
    pub fn find(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == id)
    }

    /// Number of courses in the given status.
    #[must_use]
    pub fn count(&self, status: CourseStatus) -> usize {
        self.courses.iter().filter(|c| c.status == status).count()
    }
}
