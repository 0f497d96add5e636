use sea_orm::{entity::prelude::*, ActiveValue::Unchanged, ConnectionTrait, FromJsonQueryResult, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

/// Ordered list of opaque media references stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MediaList(pub Vec<String>);

impl From<Vec<String>> for MediaList {
    fn from(v: Vec<String>) -> Self { Self(v) }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    #[sea_orm(column_type = "Json")]
    pub images: MediaList,
    #[sea_orm(column_type = "Json")]
    pub videos: MediaList,
    pub color: String,
    pub rotation: f64,
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// All rows, oldest first.
pub async fn find_all_ordered<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Timestamp).all(db).await?)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Timestamp of the newest row, if any.
pub async fn latest_timestamp<C: ConnectionTrait>(db: &C) -> Result<Option<DateTimeWithTimeZone>, errors::ModelError> {
    let newest = Entity::find().order_by_desc(Column::Timestamp).one(db).await?;
    Ok(newest.map(|m| m.timestamp))
}

pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        text: Set(model.text),
        images: Set(model.images),
        videos: Set(model.videos),
        color: Set(model.color),
        rotation: Set(model.rotation),
        timestamp: Set(model.timestamp),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite the mutable columns of an existing row. `id` and `timestamp` are never written.
pub async fn update_content<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Unchanged(model.id),
        name: Set(model.name),
        text: Set(model.text),
        images: Set(model.images),
        videos: Set(model.videos),
        color: Set(model.color),
        rotation: Set(model.rotation),
        timestamp: Unchanged(model.timestamp),
    };
    Ok(am.update(db).await?)
}

/// Returns whether a row was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
