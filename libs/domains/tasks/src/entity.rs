use crate::models::{CreateTask, Task, TaskPriority};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the `tasks` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub completed: bool,
    pub priority: TaskPriority,
    pub due_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            completed: model.completed,
            priority: model.priority,
            due_date: model.due_date,
        }
    }
}

// Id left unset so BIGSERIAL assigns it
impl From<CreateTask> for ActiveModel {
    fn from(input: CreateTask) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            completed: Set(input.completed),
            priority: Set(input.priority),
            due_date: Set(input.due_date),
        }
    }
}

impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            name: Set(task.name),
            description: Set(task.description),
            completed: Set(task.completed),
            priority: Set(task.priority),
            due_date: Set(task.due_date),
        }
    }
}
