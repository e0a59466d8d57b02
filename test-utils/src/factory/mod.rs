//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*`
//! convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let account = factory::leyline_user::create_linked_user(&db, 42).await?;
//!
//! // Customize
//! let record = factory::reaction_collector::ReactionCollectorFactory::new(&db)
//!     .author_id(42)
//!     .approved_by(7)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `leyline_user` - Linked accounts
//! - `reaction_collector` - Collector records and their reaction receipts
//! - `guild_event` - Claim events
//! - `helpers` - Unique id generation

pub mod guild_event;
pub mod helpers;
pub mod leyline_user;
pub mod reaction_collector;

pub use guild_event::create_guild_event;
pub use leyline_user::create_linked_user;
pub use reaction_collector::{create_reacted_user, create_reaction_collector};
