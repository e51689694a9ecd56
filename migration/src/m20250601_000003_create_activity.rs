use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserActivity::Table)
                    .if_not_exists()
                    .col(pk_auto(UserActivity::Id))
                    .col(integer(UserActivity::UserId))
                    .col(string(UserActivity::Kind))
                    .col(integer_null(UserActivity::MovieId))
                    .col(integer_null(UserActivity::ReviewId))
                    .col(integer_null(UserActivity::TargetUserId))
                    .col(big_integer(UserActivity::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_activity_user")
                            .from(UserActivity::Table, UserActivity::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_activity_user")
                    .table(UserActivity::Table)
                    .col(UserActivity::UserId)
                    .col(UserActivity::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer(Notification::UserId))
                    .col(string(Notification::Title))
                    .col(text(Notification::Message))
                    .col(boolean(Notification::IsRead))
                    .col(big_integer(Notification::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_user")
                            .from(Notification::Table, Notification::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_user")
                    .table(Notification::Table)
                    .col(Notification::UserId)
                    .col(Notification::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Notification::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(UserActivity::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum UserActivity {
    Table,
    Id,
    UserId,
    Kind,
    MovieId,
    ReviewId,
    TargetUserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notification {
    Table,
    Id,
    UserId,
    Title,
    Message,
    IsRead,
    CreatedAt,
}
