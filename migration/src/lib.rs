pub use sea_orm_migration::prelude::*;

mod m20260112_000001_create_campaign_tables;
mod m20260206_000002_add_store_played_games;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260112_000001_create_campaign_tables::Migration),
            Box::new(m20260206_000002_add_store_played_games::Migration),
        ]
    }
}
