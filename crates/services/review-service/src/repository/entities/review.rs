//! Review database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Review;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub product_id: Uuid,
    pub author_id: Uuid,
    pub rating: Option<i16>,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Review {
            id: model.id,
            product_id: model.product_id,
            author_id: model.author_id,
            rating: model.rating,
            comment: model.comment,
            parent_id: model.parent_id,
            created_at: model.created_at,
        }
    }
}
