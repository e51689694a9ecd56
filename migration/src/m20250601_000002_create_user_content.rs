use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(pk_auto(Review::Id))
                    .col(integer(Review::MovieId))
                    .col(integer(Review::UserId))
                    .col(integer(Review::Rating))
                    .col(text(Review::Comment))
                    .col(big_integer(Review::CreatedAt))
                    .col(big_integer(Review::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_movie")
                            .from(Review::Table, Review::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_movie_user_unique")
                    .table(Review::Table)
                    .col(Review::MovieId)
                    .col(Review::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReviewLike::Table)
                    .if_not_exists()
                    .col(pk_auto(ReviewLike::Id))
                    .col(integer(ReviewLike::ReviewId))
                    .col(integer(ReviewLike::UserId))
                    .col(big_integer(ReviewLike::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_like_review")
                            .from(ReviewLike::Table, ReviewLike::ReviewId)
                            .to(Review::Table, Review::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_like_user")
                            .from(ReviewLike::Table, ReviewLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_like_unique")
                    .table(ReviewLike::Table)
                    .col(ReviewLike::ReviewId)
                    .col(ReviewLike::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserFollow::Table)
                    .if_not_exists()
                    .col(pk_auto(UserFollow::Id))
                    .col(integer(UserFollow::FollowerId))
                    .col(integer(UserFollow::FolloweeId))
                    .col(big_integer(UserFollow::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_follow_follower")
                            .from(UserFollow::Table, UserFollow::FollowerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_follow_followee")
                            .from(UserFollow::Table, UserFollow::FolloweeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_follow_unique")
                    .table(UserFollow::Table)
                    .col(UserFollow::FollowerId)
                    .col(UserFollow::FolloweeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Collection::Table)
                    .if_not_exists()
                    .col(pk_auto(Collection::Id))
                    .col(string(Collection::Name))
                    .col(text(Collection::Description))
                    .col(integer(Collection::OwnerId))
                    .col(boolean(Collection::IsPublic))
                    .col(big_integer(Collection::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_owner")
                            .from(Collection::Table, Collection::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionMovie::Table)
                    .if_not_exists()
                    .col(integer(CollectionMovie::CollectionId))
                    .col(integer(CollectionMovie::MovieId))
                    .primary_key(
                        Index::create()
                            .col(CollectionMovie::CollectionId)
                            .col(CollectionMovie::MovieId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_movie_collection")
                            .from(CollectionMovie::Table, CollectionMovie::CollectionId)
                            .to(Collection::Table, Collection::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_movie_movie")
                            .from(CollectionMovie::Table, CollectionMovie::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Watchlist::Table)
                    .if_not_exists()
                    .col(pk_auto(Watchlist::Id))
                    .col(integer(Watchlist::UserId))
                    .col(integer(Watchlist::MovieId))
                    .col(big_integer(Watchlist::AddedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watchlist_user")
                            .from(Watchlist::Table, Watchlist::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watchlist_movie")
                            .from(Watchlist::Table, Watchlist::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_watchlist_unique")
                    .table(Watchlist::Table)
                    .col(Watchlist::UserId)
                    .col(Watchlist::MovieId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieList::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieList::Id))
                    .col(integer(MovieList::UserId))
                    .col(integer(MovieList::MovieId))
                    .col(string(MovieList::Kind))
                    .col(big_integer(MovieList::AddedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_list_user")
                            .from(MovieList::Table, MovieList::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_list_movie")
                            .from(MovieList::Table, MovieList::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_list_unique")
                    .table(MovieList::Table)
                    .col(MovieList::UserId)
                    .col(MovieList::MovieId)
                    .col(MovieList::Kind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieReport::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieReport::Id))
                    .col(integer(MovieReport::MovieId))
                    .col(integer(MovieReport::UserId))
                    .col(string(MovieReport::Kind))
                    .col(text(MovieReport::Description))
                    .col(boolean(MovieReport::IsResolved))
                    .col(big_integer(MovieReport::CreatedAt))
                    .col(big_integer_null(MovieReport::ResolvedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_report_movie")
                            .from(MovieReport::Table, MovieReport::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_report_user")
                            .from(MovieReport::Table, MovieReport::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieReport::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieList::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Watchlist::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(CollectionMovie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Collection::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(UserFollow::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ReviewLike::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    MovieId,
    UserId,
    Rating,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReviewLike {
    Table,
    Id,
    ReviewId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserFollow {
    Table,
    Id,
    FollowerId,
    FolloweeId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Collection {
    Table,
    Id,
    Name,
    Description,
    OwnerId,
    IsPublic,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CollectionMovie {
    Table,
    CollectionId,
    MovieId,
}

#[derive(DeriveIden)]
enum Watchlist {
    Table,
    Id,
    UserId,
    MovieId,
    AddedAt,
}

#[derive(DeriveIden)]
enum MovieList {
    Table,
    Id,
    UserId,
    MovieId,
    Kind,
    AddedAt,
}

#[derive(DeriveIden)]
enum MovieReport {
    Table,
    Id,
    MovieId,
    UserId,
    Kind,
    Description,
    IsResolved,
    CreatedAt,
    ResolvedAt,
}
