use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{entities::film_actor, error::StoreResult, models::FilmActorCreate};

fn active_model(input: &FilmActorCreate) -> film_actor::ActiveModel {
    film_actor::ActiveModel {
        film_id: Set(input.film_id),
        actor_name: Set(input.actor_name.clone()),
        ..Default::default()
    }
}

impl Repository {
    pub async fn create_film_actor(&self, input: &FilmActorCreate) -> StoreResult<i32> {
        let model = active_model(input);
        let actor_id = self
            .exec
            .run("create film actor", move |txn| {
                Box::pin(async move {
                    film_actor::Entity::insert(model).exec(txn).await.map(|r| r.last_insert_id)
                })
            })
            .await?;
        debug!(actor_id, film_id = input.film_id, "film actor created");
        Ok(actor_id)
    }

    pub async fn list_film_actors(&self) -> StoreResult<Vec<film_actor::Model>> {
        self.exec
            .run("list film actors", move |txn| {
                Box::pin(async move {
                    film_actor::Entity::find()
                        .order_by_asc(film_actor::Column::ActorId)
                        .all(txn)
                        .await
                })
            })
            .await
    }

    pub async fn update_film_actor(
        &self,
        actor_id: i32,
        input: &FilmActorCreate,
    ) -> StoreResult<Option<film_actor::Model>> {
        let changes = active_model(input);
        self.exec
            .run("update film actor", move |txn| {
                Box::pin(async move {
                    let res = film_actor::Entity::update_many()
                        .set(changes)
                        .filter(film_actor::Column::ActorId.eq(actor_id))
                        .exec(txn)
                        .await?;
                    debug!(actor_id, rows = res.rows_affected, "film actor updated");
                    if res.rows_affected == 0 {
                        return Ok(None);
                    }
                    film_actor::Entity::find_by_id(actor_id).one(txn).await
                })
            })
            .await
    }

    pub async fn delete_film_actor(&self, actor_id: i32) -> StoreResult<u64> {
        let res = self
            .exec
            .run("delete film actor", move |txn| {
                Box::pin(async move { film_actor::Entity::delete_by_id(actor_id).exec(txn).await })
            })
            .await?;
        debug!(actor_id, rows = res.rows_affected, "film actor deleted");
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::StoreError, models::FilmCreate, repo::test_repository};

    #[tokio::test]
    async fn actor_requires_existing_film() {
        let repo = test_repository().await;
        let input = FilmActorCreate { film_id: 9, actor_name: "Rebecca Ferguson".into() };
        let err = repo.create_film_actor(&input).await.unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn actor_crud_cycle() {
        let repo = test_repository().await;
        let film = FilmCreate { title: "Heat".into(), release_year: 1995, genre: "Crime".into() };
        let film_id = repo.create_film(&film).await.unwrap();

        let input = FilmActorCreate { film_id, actor_name: "Al Pacino".into() };
        let actor_id = repo.create_film_actor(&input).await.unwrap();

        let renamed = FilmActorCreate { film_id, actor_name: "Robert De Niro".into() };
        let updated = repo.update_film_actor(actor_id, &renamed).await.unwrap().unwrap();
        assert_eq!(updated.actor_name, "Robert De Niro");
        assert_eq!(repo.update_film_actor(actor_id + 1, &renamed).await.unwrap(), None);

        assert_eq!(repo.delete_film_actor(actor_id).await.unwrap(), 1);
        assert!(repo.list_film_actors().await.unwrap().is_empty());
    }
}
