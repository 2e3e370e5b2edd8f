//! User models.
//!
//! Maps to the `users` table. Accounts are created by the identity provider;
//! this layer only reads them.

use advent_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
}
