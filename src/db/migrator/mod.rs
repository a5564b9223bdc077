use sea_orm_migration::prelude::*;

mod m20250301_initial;
mod m20250305_add_indexes;
mod m20250310_add_movie_search_text;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_initial::Migration),
            Box::new(m20250305_add_indexes::Migration),
            Box::new(m20250310_add_movie_search_text::Migration),
        ]
    }
}
