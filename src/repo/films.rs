use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{entities::film, error::StoreResult, models::FilmCreate};

fn active_model(input: &FilmCreate) -> film::ActiveModel {
    film::ActiveModel {
        title: Set(input.title.clone()),
        release_year: Set(Some(input.release_year)),
        genre: Set(Some(input.genre.clone())),
        ..Default::default()
    }
}

impl Repository {
    pub async fn create_film(&self, input: &FilmCreate) -> StoreResult<i32> {
        let model = active_model(input);
        let film_id = self
            .exec
            .run("create film", move |txn| {
                Box::pin(async move {
                    film::Entity::insert(model).exec(txn).await.map(|r| r.last_insert_id)
                })
            })
            .await?;
        debug!(film_id, title = %input.title, "film created");
        Ok(film_id)
    }

    pub async fn list_films(&self) -> StoreResult<Vec<film::Model>> {
        self.exec
            .run("list films", move |txn| {
                Box::pin(async move {
                    film::Entity::find().order_by_asc(film::Column::FilmId).all(txn).await
                })
            })
            .await
    }

    pub async fn update_film(
        &self,
        film_id: i32,
        input: &FilmCreate,
    ) -> StoreResult<Option<film::Model>> {
        let changes = active_model(input);
        self.exec
            .run("update film", move |txn| {
                Box::pin(async move {
                    let res = film::Entity::update_many()
                        .set(changes)
                        .filter(film::Column::FilmId.eq(film_id))
                        .exec(txn)
                        .await?;
                    debug!(film_id, rows = res.rows_affected, "film updated");
                    if res.rows_affected == 0 {
                        return Ok(None);
                    }
                    film::Entity::find_by_id(film_id).one(txn).await
                })
            })
            .await
    }

    pub async fn delete_film(&self, film_id: i32) -> StoreResult<u64> {
        let res = self
            .exec
            .run("delete film", move |txn| {
                Box::pin(async move { film::Entity::delete_by_id(film_id).exec(txn).await })
            })
            .await?;
        debug!(film_id, rows = res.rows_affected, "film deleted");
        Ok(res.rows_affected)
    }
}
