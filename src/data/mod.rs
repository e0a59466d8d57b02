//! Database repository layer for all document collections.
//!
//! Repositories hold a reference to the database connection, perform the queries
//! and writes for one collection, and convert entity models into domain models so
//! entities never leak past this layer.

pub mod bot_config;
pub mod guild_event;
pub mod inventory;
pub mod leyline_points;
pub mod leyline_user;
pub mod punishment;
pub mod reaction_collector;
pub mod scheduled_task;
pub mod user_xp;

#[cfg(test)]
mod test;

/// Whether `err` is a primary key or unique index violation.
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
