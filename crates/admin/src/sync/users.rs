//! User directory: a paged, filtered list plus account mutations.
//!
//! Mutations are not optimistic. Each successful call is followed by a
//! refresh so the list shows what the backend actually stored.

use parking_lot::RwLock;
use reqwest::Method;
use serde::Serialize;
use tracing::{info, instrument};

use ybs_core::{UserId, UserStatus};

use super::resource::{DataResource, ResourceSnapshot};
use crate::api::endpoints;
use crate::config::DataMode;
use crate::error::AppError;
use crate::models::{ManagedUser, NewUser, UserPage, UserQuery, UserUpdate};
use crate::session::SessionManager;
use crate::validation::{validate_new_user, validate_pagination, validate_user_update};

#[derive(Serialize)]
struct StatusChange {
    status: UserStatus,
}

#[derive(Debug)]
pub struct UserDirectory {
    resource: DataResource<UserPage>,
    session: SessionManager,
    query: RwLock<UserQuery>,
}

impl UserDirectory {
    /// Create a directory showing the first page at `page_size` per page.
    #[must_use]
    pub fn new(session: SessionManager, mode: DataMode, page_size: u32) -> Self {
        let query = UserQuery {
            limit: page_size,
            ..UserQuery::default()
        };
        let resource = DataResource::new(session.clone(), mode);
        resource.set_query(query.to_pairs());
        Self {
            resource,
            session,
            query: RwLock::new(query),
        }
    }

    #[must_use]
    pub const fn resource(&self) -> &DataResource<UserPage> {
        &self.resource
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceSnapshot<UserPage> {
        self.resource.snapshot()
    }

    #[must_use]
    pub fn query(&self) -> UserQuery {
        self.query.read().clone()
    }

    pub async fn refresh(&self) -> ResourceSnapshot<UserPage> {
        self.resource.refresh().await
    }

    /// Replace the filters and fetch the matching page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an out-of-range page or page size;
    /// the current filters are kept in that case.
    pub async fn apply_query(&self, query: UserQuery) -> Result<ResourceSnapshot<UserPage>, AppError> {
        validate_pagination(query.page, query.limit)?;
        self.resource.set_query(query.to_pairs());
        *self.query.write() = query;
        Ok(self.resource.refresh().await)
    }

    /// Move to another page keeping the other filters.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for page 0.
    pub async fn go_to_page(&self, page: u32) -> Result<ResourceSnapshot<UserPage>, AppError> {
        let query = UserQuery {
            page,
            ..self.query()
        };
        self.apply_query(query).await
    }

    /// Fetch a single user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the request fails.
    pub async fn get(&self, id: &UserId) -> Result<ManagedUser, AppError> {
        Ok(self.session.client().get(&endpoints::user(id)?, &[]).await?)
    }

    /// Create a user, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` without sending when the form is
    /// invalid, or `AppError::Api` if the backend refuses.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create(&self, user: NewUser) -> Result<(), AppError> {
        let user = validate_new_user(user)?;
        self.session
            .client()
            .command_with(Method::POST, endpoints::USERS, &user)
            .await?;
        info!("User created");
        self.resource.refresh().await;
        Ok(())
    }

    /// Update profile fields, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty or malformed update, or
    /// `AppError::Api` if the backend refuses.
    #[instrument(skip(self, update), fields(user_id = %id))]
    pub async fn update(&self, id: &UserId, update: UserUpdate) -> Result<(), AppError> {
        let update = validate_user_update(update)?;
        self.session
            .client()
            .command_with(Method::PUT, &endpoints::user(id)?, &update)
            .await?;
        info!("User updated");
        self.resource.refresh().await;
        Ok(())
    }

    /// Delete a user, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the backend refuses.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &UserId) -> Result<(), AppError> {
        self.session
            .client()
            .command(Method::DELETE, &endpoints::user(id)?)
            .await?;
        info!("User deleted");
        self.resource.refresh().await;
        Ok(())
    }

    /// Change account status (activate, suspend, ban), then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the backend refuses.
    #[instrument(skip(self), fields(user_id = %id, status = %status))]
    pub async fn set_status(&self, id: &UserId, status: UserStatus) -> Result<(), AppError> {
        self.session
            .client()
            .command_with(Method::PATCH, &endpoints::user_status(id)?, &StatusChange { status })
            .await?;
        info!("User status changed");
        self.resource.refresh().await;
        Ok(())
    }
}
