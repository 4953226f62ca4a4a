use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Referenced tables are declared before the tables pointing at them.
        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::FilmId))
                    .col(string_len(Film::Title, 255))
                    .col(integer_null(Film::ReleaseYear))
                    .col(string_len_null(Film::Genre, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmActor::Table)
                    .if_not_exists()
                    .col(pk_auto(FilmActor::ActorId))
                    .col(integer(FilmActor::FilmId))
                    .col(string_len(FilmActor::ActorName, 255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_actor_film")
                            .from(FilmActor::Table, FilmActor::FilmId)
                            .to(Film::Table, Film::FilmId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(pk_auto(Store::StoreId))
                    .col(string_len(Store::StoreName, 255))
                    .col(string_len(Store::Location, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(pk_auto(Availability::AvailabilityId))
                    .col(integer(Availability::StoreId))
                    .col(integer(Availability::FilmId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_store")
                            .from(Availability::Table, Availability::StoreId)
                            .to(Store::Table, Store::StoreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_film")
                            .from(Availability::Table, Availability::FilmId)
                            .to(Film::Table, Film::FilmId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Availability::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Store::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(FilmActor::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Film {
    Table,
    FilmId,
    Title,
    ReleaseYear,
    Genre,
}

#[derive(DeriveIden)]
enum FilmActor {
    Table,
    ActorId,
    FilmId,
    ActorName,
}

#[derive(DeriveIden)]
enum Store {
    Table,
    StoreId,
    StoreName,
    Location,
}

#[derive(DeriveIden)]
enum Availability {
    Table,
    AvailabilityId,
    StoreId,
    FilmId,
}
