use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str)] = &[
    (
        "idx_favorites_user_movie",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_favorites_user_movie ON favorites(user_id, movie_id)",
    ),
    (
        "idx_messages_sender",
        "CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender_id)",
    ),
    (
        "idx_messages_receiver",
        "CREATE INDEX IF NOT EXISTS idx_messages_receiver ON messages(receiver_id)",
    ),
    (
        "idx_watch_history_user_time",
        "CREATE INDEX IF NOT EXISTS idx_watch_history_user_time ON watch_history(user_id, watched_at)",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (_, sql) in INDEXES {
            conn.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, _) in INDEXES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {name}"))
                .await?;
        }

        Ok(())
    }
}
