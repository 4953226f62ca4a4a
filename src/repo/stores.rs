use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::Repository;
use crate::{entities::store, error::StoreResult, models::StoreCreate};

fn active_model(input: &StoreCreate) -> store::ActiveModel {
    store::ActiveModel {
        store_name: Set(input.store_name.clone()),
        location: Set(input.location.clone()),
        ..Default::default()
    }
}

impl Repository {
    pub async fn create_store(&self, input: &StoreCreate) -> StoreResult<i32> {
        let model = active_model(input);
        let store_id = self
            .exec
            .run("create store", move |txn| {
                Box::pin(async move {
                    store::Entity::insert(model).exec(txn).await.map(|r| r.last_insert_id)
                })
            })
            .await?;
        debug!(store_id, store_name = %input.store_name, "store created");
        Ok(store_id)
    }

    pub async fn list_stores(&self) -> StoreResult<Vec<store::Model>> {
        self.exec
            .run("list stores", move |txn| {
                Box::pin(async move {
                    store::Entity::find().order_by_asc(store::Column::StoreId).all(txn).await
                })
            })
            .await
    }

    pub async fn update_store(
        &self,
        store_id: i32,
        input: &StoreCreate,
    ) -> StoreResult<Option<store::Model>> {
        let changes = active_model(input);
        self.exec
            .run("update store", move |txn| {
                Box::pin(async move {
                    let res = store::Entity::update_many()
                        .set(changes)
                        .filter(store::Column::StoreId.eq(store_id))
                        .exec(txn)
                        .await?;
                    debug!(store_id, rows = res.rows_affected, "store updated");
                    if res.rows_affected == 0 {
                        return Ok(None);
                    }
                    store::Entity::find_by_id(store_id).one(txn).await
                })
            })
            .await
    }

    pub async fn delete_store(&self, store_id: i32) -> StoreResult<u64> {
        let res = self
            .exec
            .run("delete store", move |txn| {
                Box::pin(async move { store::Entity::delete_by_id(store_id).exec(txn).await })
            })
            .await?;
        debug!(store_id, rows = res.rows_affected, "store deleted");
        Ok(res.rows_affected)
    }
}
