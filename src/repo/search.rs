use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait, Select,
};
use tracing::debug;

use super::Repository;
use crate::{
    entities::{availability, film, film_actor, store},
    error::StoreResult,
    models::{StoreSearch, StoreWithFilm},
};

/// store ⋈ availability ⋈ film, projected onto (store_id, store_name, location, film_name).
fn stores_with_films() -> Select<store::Entity> {
    store::Entity::find()
        .select_only()
        .column(store::Column::StoreId)
        .column(store::Column::StoreName)
        .column(store::Column::Location)
        .column_as(film::Column::Title, "film_name")
        .join(JoinType::InnerJoin, store::Relation::Availability.def())
        .join(JoinType::InnerJoin, availability::Relation::Film.def())
}

impl Repository {
    pub async fn search_stores(&self, search: StoreSearch) -> StoreResult<Vec<StoreWithFilm>> {
        let kind = search.kind();
        let rows = match search {
            StoreSearch::FilmName(title) => self.stores_by_film(title).await?,
            StoreSearch::Genre(genre) => self.stores_by_genre(genre).await?,
            StoreSearch::Actor(actor) => self.stores_by_actor(actor).await?,
        };
        debug!(kind, matches = rows.len(), "store search");
        Ok(rows)
    }

    pub async fn stores_by_film(&self, title: String) -> StoreResult<Vec<StoreWithFilm>> {
        self.exec
            .run("stores by film", move |txn| {
                Box::pin(async move {
                    stores_with_films()
                        .filter(film::Column::Title.eq(title))
                        .into_model::<StoreWithFilm>()
                        .all(txn)
                        .await
                })
            })
            .await
    }

    pub async fn stores_by_genre(&self, genre: String) -> StoreResult<Vec<StoreWithFilm>> {
        self.exec
            .run("stores by genre", move |txn| {
                Box::pin(async move {
                    stores_with_films()
                        .filter(film::Column::Genre.eq(genre))
                        .into_model::<StoreWithFilm>()
                        .all(txn)
                        .await
                })
            })
            .await
    }

    pub async fn stores_by_actor(&self, actor: String) -> StoreResult<Vec<StoreWithFilm>> {
        self.exec
            .run("stores by actor", move |txn| {
                Box::pin(async move {
                    stores_with_films()
                        .join(JoinType::InnerJoin, film::Relation::FilmActor.def())
                        .filter(film_actor::Column::ActorName.eq(actor))
                        .into_model::<StoreWithFilm>()
                        .all(txn)
                        .await
                })
            })
            .await
    }
}
