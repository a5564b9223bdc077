use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::domain::search_text;
use crate::entities::movies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("movies", "search_text").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Movies::Table)
                        .add_column(
                            ColumnDef::new(Movies::SearchText)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .to_owned(),
                )
                .await?;
        }

        // Backfill rows written before the column existed.
        let conn = manager.get_connection();
        let stale = movies::Entity::find()
            .filter(movies::Column::SearchText.eq(""))
            .all(conn)
            .await?;

        for movie in stale {
            let folded = search_text(&movie.title, &movie.description);
            let mut active: movies::ActiveModel = movie.into();
            active.search_text = Set(folded);
            active.update(conn).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Movies::Table)
                    .drop_column(Movies::SearchText)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    SearchText,
}
