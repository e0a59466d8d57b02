//! Test factories for creating Serenity API objects.
//!
//! These build valid Serenity structs by deserializing JSON shaped like what
//! Discord's gateway sends.
//!
//! # Available Factories
//!
//! - `message::create_test_attachment` - Message attachments
//! - `reaction::create_test_reaction` - Reaction add events

pub mod message;
pub mod reaction;

pub use message::create_test_attachment;
pub use reaction::create_test_reaction;
