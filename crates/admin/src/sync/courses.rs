//! Course moderation queue.
//!
//! Approve and reject go to the backend. "Revision requested" is kept on this
//! side together with the reviewer's notes and overlaid on the fetched list
//! until the course is approved or rejected.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::Method;
use serde::Serialize;
use tracing::{info, instrument};

use ybs_core::{CourseId, CourseStatus};

use super::resource::{DataResource, ResourceSnapshot};
use crate::api::endpoints;
use crate::config::DataMode;
use crate::error::AppError;
use crate::models::CourseList;
use crate::session::SessionManager;
use crate::validation::require_text;

/// A revision request recorded by a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRequest {
    pub notes: String,
    pub requested_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct Rejection<'a> {
    reason: &'a str,
}

#[derive(Debug)]
pub struct CourseModeration {
    resource: DataResource<CourseList>,
    session: SessionManager,
    revisions: RwLock<HashMap<CourseId, RevisionRequest>>,
}

impl CourseModeration {
    #[must_use]
    pub fn new(session: SessionManager, mode: DataMode) -> Self {
        Self {
            resource: DataResource::new(session.clone(), mode),
            session,
            revisions: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn resource(&self) -> &DataResource<CourseList> {
        &self.resource
    }

    /// Current list with local revision requests applied.
    #[must_use]
    pub fn snapshot(&self) -> ResourceSnapshot<CourseList> {
        let mut snapshot = self.resource.snapshot();
        self.overlay(&mut snapshot.data);
        snapshot
    }

    pub async fn refresh(&self) -> ResourceSnapshot<CourseList> {
        self.resource.refresh().await;
        self.snapshot()
    }

    #[must_use]
    pub fn revision(&self, id: &CourseId) -> Option<RevisionRequest> {
        self.revisions.read().get(id).cloned()
    }

    fn overlay(&self, list: &mut CourseList) {
        let revisions = self.revisions.read();
        for course in &mut list.courses {
            if let Some(revision) = revisions.get(&course.id) {
                course.status = CourseStatus::RevisionRequested;
                course.review_notes = Some(revision.notes.clone());
            }
        }
    }

    /// Approve a course, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the backend refuses.
    #[instrument(skip(self), fields(course_id = %id))]
    pub async fn approve(&self, id: &CourseId) -> Result<(), AppError> {
        self.session
            .client()
            .command(Method::POST, &endpoints::course_approve(id)?)
            .await?;
        self.revisions.write().remove(id);
        info!("Course approved");
        self.resource.refresh().await;
        Ok(())
    }

    /// Reject a course with a reason, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank reason, or `AppError::Api`
    /// if the backend refuses.
    #[instrument(skip(self, reason), fields(course_id = %id))]
    pub async fn reject(&self, id: &CourseId, reason: &str) -> Result<(), AppError> {
        let reason = require_text("Rejection reason", reason)?;
        self.session
            .client()
            .command_with(
                Method::POST,
                &endpoints::course_reject(id)?,
                &Rejection { reason: &reason },
            )
            .await?;
        self.revisions.write().remove(id);
        info!("Course rejected");
        self.resource.refresh().await;
        Ok(())
    }

    /// Send a course back to its instructor with notes, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for blank notes.
    #[instrument(skip(self, notes), fields(course_id = %id))]
    pub async fn request_revision(&self, id: &CourseId, notes: &str) -> Result<(), AppError> {
        let notes = require_text("Review notes", notes)?;
        self.revisions.write().insert(
            id.clone(),
            RevisionRequest {
                notes,
                requested_at: Utc::now(),
            },
        );
        info!("Revision requested");
        self.resource.refresh().await;
        Ok(())
    }
}
