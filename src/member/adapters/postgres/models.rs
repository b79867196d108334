//! Diesel row models for member persistence.

use super::schema::members;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for member records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Member identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Login identifier.
    pub login_id: String,
    /// Password hash.
    pub password_hash: String,
    /// Contact email.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for member records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub struct NewMemberRow {
    /// Member identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Login identifier.
    pub login_id: String,
    /// Password hash.
    pub password_hash: String,
    /// Contact email.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
