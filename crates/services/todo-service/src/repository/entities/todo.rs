//! Todo database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Todo;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(indexed)]
    pub user_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub completed: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Todo {
    fn from(model: Model) -> Self {
        Todo::restore(
            model.id,
            model.user_id,
            model.title,
            model.description,
            model.completed,
            model.created_at,
            model.updated_at,
            model.completed_at,
        )
    }
}

impl From<&Todo> for ActiveModel {
    fn from(todo: &Todo) -> Self {
        ActiveModel {
            id: Set(todo.id().to_string()),
            user_id: Set(todo.user_id().to_string()),
            title: Set(todo.title().to_string()),
            description: Set(todo.description().to_string()),
            completed: Set(todo.is_completed()),
            created_at: Set(todo.created_at()),
            updated_at: Set(todo.updated_at()),
            completed_at: Set(todo.completed_at()),
        }
    }
}
