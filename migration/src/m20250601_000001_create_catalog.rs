use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Username))
                    .col(string_null(User::Email))
                    .col(string(User::PasswordHash))
                    .col(boolean(User::IsStaff))
                    .col(big_integer(User::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_username_unique")
                    .table(User::Table)
                    .col(User::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuthToken::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthToken::Id))
                    .col(integer(AuthToken::UserId))
                    .col(string(AuthToken::Token))
                    .col(big_integer(AuthToken::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_token_user")
                            .from(AuthToken::Table, AuthToken::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auth_token_unique")
                    .table(AuthToken::Table)
                    .col(AuthToken::Token)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string(Genre::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Country::Table)
                    .if_not_exists()
                    .col(pk_auto(Country::Id))
                    .col(string(Country::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(pk_auto(Person::Id))
                    .col(string(Person::Name))
                    .col(text(Person::Bio))
                    .col(string_null(Person::BirthDate))
                    .col(string_null(Person::PhotoPath))
                    .col(string(Person::Role))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string(Movie::Title))
                    .col(string(Movie::OriginalTitle))
                    .col(text(Movie::Description))
                    .col(string(Movie::ReleaseDate))
                    .col(integer(Movie::DurationMin))
                    .col(double(Movie::Rating))
                    .col(string(Movie::Language))
                    .col(string(Movie::AgeRating))
                    .col(double_null(Movie::Budget))
                    .col(double_null(Movie::BoxOffice))
                    .col(boolean(Movie::IsFeatured))
                    .col(integer(Movie::ViewsCount))
                    .col(string_null(Movie::PosterPath))
                    .col(string_null(Movie::TrailerPath))
                    .col(big_integer(Movie::CreatedAt))
                    .col(big_integer(Movie::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_title")
                    .table(Movie::Table)
                    .col(Movie::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_release_date")
                    .table(Movie::Table)
                    .col(Movie::ReleaseDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_rating")
                    .table(Movie::Table)
                    .col(Movie::Rating)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieGenre::Table)
                    .if_not_exists()
                    .col(integer(MovieGenre::MovieId))
                    .col(integer(MovieGenre::GenreId))
                    .primary_key(
                        Index::create()
                            .col(MovieGenre::MovieId)
                            .col(MovieGenre::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_movie")
                            .from(MovieGenre::Table, MovieGenre::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_genre")
                            .from(MovieGenre::Table, MovieGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieCountry::Table)
                    .if_not_exists()
                    .col(integer(MovieCountry::MovieId))
                    .col(integer(MovieCountry::CountryId))
                    .primary_key(
                        Index::create()
                            .col(MovieCountry::MovieId)
                            .col(MovieCountry::CountryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_country_movie")
                            .from(MovieCountry::Table, MovieCountry::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_country_country")
                            .from(MovieCountry::Table, MovieCountry::CountryId)
                            .to(Country::Table, Country::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieCredit::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieCredit::Id))
                    .col(integer(MovieCredit::MovieId))
                    .col(integer(MovieCredit::PersonId))
                    .col(string(MovieCredit::Role))
                    .col(string_null(MovieCredit::CharacterName))
                    .col(boolean(MovieCredit::IsMainCharacter))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_credit_movie")
                            .from(MovieCredit::Table, MovieCredit::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_credit_person")
                            .from(MovieCredit::Table, MovieCredit::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_credit_unique")
                    .table(MovieCredit::Table)
                    .col(MovieCredit::MovieId)
                    .col(MovieCredit::PersonId)
                    .col(MovieCredit::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Award::Table)
                    .if_not_exists()
                    .col(pk_auto(Award::Id))
                    .col(string(Award::Name))
                    .col(string(Award::Organization))
                    .col(text(Award::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieAward::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieAward::Id))
                    .col(integer(MovieAward::MovieId))
                    .col(integer(MovieAward::AwardId))
                    .col(integer(MovieAward::Year))
                    .col(string(MovieAward::Category))
                    .col(boolean(MovieAward::Winner))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_award_movie")
                            .from(MovieAward::Table, MovieAward::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_award_award")
                            .from(MovieAward::Table, MovieAward::AwardId)
                            .to(Award::Table, Award::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subtitle::Table)
                    .if_not_exists()
                    .col(pk_auto(Subtitle::Id))
                    .col(integer(Subtitle::MovieId))
                    .col(string(Subtitle::Language))
                    .col(string(Subtitle::FilePath))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subtitle_movie")
                            .from(Subtitle::Table, Subtitle::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subtitle_unique")
                    .table(Subtitle::Table)
                    .col(Subtitle::MovieId)
                    .col(Subtitle::Language)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieSeason::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieSeason::Id))
                    .col(integer(MovieSeason::MovieId))
                    .col(integer(MovieSeason::SeasonNumber))
                    .col(string(MovieSeason::Title))
                    .col(text(MovieSeason::Description))
                    .col(string(MovieSeason::ReleaseDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_season_movie")
                            .from(MovieSeason::Table, MovieSeason::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_season_unique")
                    .table(MovieSeason::Table)
                    .col(MovieSeason::MovieId)
                    .col(MovieSeason::SeasonNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieEpisode::Table)
                    .if_not_exists()
                    .col(pk_auto(MovieEpisode::Id))
                    .col(integer(MovieEpisode::SeasonId))
                    .col(integer(MovieEpisode::EpisodeNumber))
                    .col(string(MovieEpisode::Title))
                    .col(text(MovieEpisode::Description))
                    .col(integer(MovieEpisode::DurationMin))
                    .col(string_null(MovieEpisode::VideoPath))
                    .col(string(MovieEpisode::AirDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_episode_season")
                            .from(MovieEpisode::Table, MovieEpisode::SeasonId)
                            .to(MovieSeason::Table, MovieSeason::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_episode_unique")
                    .table(MovieEpisode::Table)
                    .col(MovieEpisode::SeasonId)
                    .col(MovieEpisode::EpisodeNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieEpisode::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieSeason::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Subtitle::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieAward::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Award::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieCredit::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieCountry::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieGenre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Country::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(AuthToken::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    IsStaff,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuthToken {
    Table,
    Id,
    UserId,
    Token,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Country {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Person {
    Table,
    Id,
    Name,
    Bio,
    BirthDate,
    PhotoPath,
    Role,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    OriginalTitle,
    Description,
    ReleaseDate,
    DurationMin,
    Rating,
    Language,
    AgeRating,
    Budget,
    BoxOffice,
    IsFeatured,
    ViewsCount,
    PosterPath,
    TrailerPath,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MovieGenre {
    Table,
    MovieId,
    GenreId,
}

#[derive(DeriveIden)]
enum MovieCountry {
    Table,
    MovieId,
    CountryId,
}

#[derive(DeriveIden)]
enum MovieCredit {
    Table,
    Id,
    MovieId,
    PersonId,
    Role,
    CharacterName,
    IsMainCharacter,
}

#[derive(DeriveIden)]
enum Award {
    Table,
    Id,
    Name,
    Organization,
    Description,
}

#[derive(DeriveIden)]
enum MovieAward {
    Table,
    Id,
    MovieId,
    AwardId,
    Year,
    Category,
    Winner,
}

#[derive(DeriveIden)]
enum Subtitle {
    Table,
    Id,
    MovieId,
    Language,
    FilePath,
}

#[derive(DeriveIden)]
enum MovieSeason {
    Table,
    Id,
    MovieId,
    SeasonNumber,
    Title,
    Description,
    ReleaseDate,
}

#[derive(DeriveIden)]
enum MovieEpisode {
    Table,
    Id,
    SeasonId,
    EpisodeNumber,
    Title,
    Description,
    DurationMin,
    VideoPath,
    AirDate,
}
