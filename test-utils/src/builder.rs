use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables, then call `build()` to create the in-memory database.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{LeylineUser, LeylinePoints};
///
/// let test = TestBuilder::new()
///     .with_table(LeylineUser)
///     .with_table(LeylinePoints)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements, executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys should be added after the tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the reward ledger tables: LeylineUser, LeylinePoints, InventoryItem.
    pub fn with_ledger_tables(self) -> Self {
        self.with_table(LeylineUser)
            .with_table(LeylinePoints)
            .with_table(InventoryItem)
    }

    /// Adds every table a reaction collector touches.
    ///
    /// Ledger tables plus ReactionCollector, ReactedUser and BotConfig.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_collector_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_collector_tables(self) -> Self {
        self.with_ledger_tables()
            .with_table(ReactionCollector)
            .with_table(ReactedUser)
            .with_table(BotConfig)
    }

    /// Adds the moderation tables: Punishment and ScheduledTask.
    pub fn with_moderation_tables(self) -> Self {
        self.with_table(Punishment).with_table(ScheduledTask)
    }

    /// Adds the claim event tables along with the ledger they pay into.
    pub fn with_guild_event_tables(self) -> Self {
        self.with_ledger_tables()
            .with_table(GuildEvent)
            .with_table(GuildEventClaim)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
