use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{entities::availability, error::StoreResult, models::AvailabilityCreate};

fn active_model(input: &AvailabilityCreate) -> availability::ActiveModel {
    availability::ActiveModel {
        store_id: Set(input.store_id),
        film_id: Set(input.film_id),
        ..Default::default()
    }
}

impl Repository {
    pub async fn create_availability(&self, input: &AvailabilityCreate) -> StoreResult<i32> {
        let model = active_model(input);
        let availability_id = self
            .exec
            .run("create availability", move |txn| {
                Box::pin(async move {
                    availability::Entity::insert(model).exec(txn).await.map(|r| r.last_insert_id)
                })
            })
            .await?;
        debug!(
            availability_id,
            store_id = input.store_id,
            film_id = input.film_id,
            "availability created"
        );
        Ok(availability_id)
    }

    pub async fn list_availability(&self) -> StoreResult<Vec<availability::Model>> {
        self.exec
            .run("list availability", move |txn| {
                Box::pin(async move {
                    availability::Entity::find()
                        .order_by_asc(availability::Column::AvailabilityId)
                        .all(txn)
                        .await
                })
            })
            .await
    }

    pub async fn update_availability(
        &self,
        availability_id: i32,
        input: &AvailabilityCreate,
    ) -> StoreResult<Option<availability::Model>> {
        let changes = active_model(input);
        self.exec
            .run("update availability", move |txn| {
                Box::pin(async move {
                    let res = availability::Entity::update_many()
                        .set(changes)
                        .filter(availability::Column::AvailabilityId.eq(availability_id))
                        .exec(txn)
                        .await?;
                    debug!(availability_id, rows = res.rows_affected, "availability updated");
                    if res.rows_affected == 0 {
                        return Ok(None);
                    }
                    availability::Entity::find_by_id(availability_id).one(txn).await
                })
            })
            .await
    }

    pub async fn delete_availability(&self, availability_id: i32) -> StoreResult<u64> {
        let res = self
            .exec
            .run("delete availability", move |txn| {
                Box::pin(async move {
                    availability::Entity::delete_by_id(availability_id).exec(txn).await
                })
            })
            .await?;
        debug!(availability_id, rows = res.rows_affected, "availability deleted");
        Ok(res.rows_affected)
    }
}
