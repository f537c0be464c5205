//! Messages migration.
//!
//! Creates the messages table holding each posted message and the
//! object-store reference of its image.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(MESSAGES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS messages;")
            .await?;
        Ok(())
    }
}

// file_extension and created_at stay nullable: rows written before the
// extension was recorded are listed with a `.jpg` suffix.
const MESSAGES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS messages (
    id BIGINT NOT NULL AUTO_INCREMENT,
    message TEXT NOT NULL,
    image_id VARCHAR(64) NOT NULL,
    file_extension VARCHAR(255) NULL,
    created_at DATETIME(6) NULL,
    PRIMARY KEY (id),
    UNIQUE KEY uq_messages_image_id (image_id),
    KEY idx_messages_created_at (created_at)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;
";
