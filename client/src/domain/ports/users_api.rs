//! Driven port for user administration endpoints.

use async_trait::async_trait;

use crate::domain::{BalanceAdjustment, BalanceRange, Registration, UserId, UserRecord, UserUpdate};

use super::ApiError;

/// Page size sent when the users screen fetches the whole collection.
///
/// The users list is filtered and paged client-side, so every matching
/// record is requested at once. Large installations will feel this.
pub const FETCH_ALL_PAGE_SIZE: usize = 1_000_000;

/// One response of `GET /users`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserList {
    pub users: Vec<UserRecord>,
    pub total: u64,
}

/// User listing, lookup and mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// List users whose balance lies within `balance`.
    async fn list_users(
        &self,
        balance: &BalanceRange,
        per_page: usize,
    ) -> Result<UserList, ApiError>;

    /// Fetch one user by id.
    async fn user_by_id(&self, id: UserId) -> Result<UserRecord, ApiError>;

    /// Change editable fields.
    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<(), ApiError>;

    /// Refill or write off funds.
    async fn adjust_balance(
        &self,
        id: UserId,
        adjustment: BalanceAdjustment,
    ) -> Result<(), ApiError>;

    /// Create an account.
    async fn create_user(&self, registration: &Registration) -> Result<(), ApiError>;
}
