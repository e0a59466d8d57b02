//! LeylineBot Test Utils
//!
//! Shared testing utilities for the bot's unit and integration tests. This crate
//! offers a builder for test contexts backed by in-memory SQLite databases,
//! factories for seeding rows, and Serenity model fixtures.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Seeded rows with sensible defaults
//! - **serenity**: Serenity structs built from JSON as Discord would send them
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_collector_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_collector_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
