use chrono::NaiveDate;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use ts_rs::TS;
use utoipa::ToSchema;

/// Task priority levels, ordered `Low < Medium < High`.
///
/// The Postgres enum `task_priority` declares its labels in the same order,
/// so `ORDER BY priority DESC` puts `HIGH` first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
    TS,
)]
#[ts(export)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier assigned by the store, never reused
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    /// Secondary sort key
    pub description: String,
    pub completed: bool,
    pub priority: TaskPriority,
    /// Optional due date, `YYYY-MM-DD`
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
}

/// DTO for creating a new task.
///
/// An `id` sent by the client is ignored; the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub priority: TaskPriority,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
}

/// Body of `PUT /tasks/{id}`: a full task whose `id` may be omitted.
///
/// When present, `id` must match the path identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    #[ts(type = "number | null")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub completed: bool,
    pub priority: TaskPriority,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
}

impl CreateTask {
    /// Materialize the task once the store has picked an id.
    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            name: self.name,
            description: self.description,
            completed: self.completed,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}

impl UpdateTask {
    /// Full replacement of task `id` with this body.
    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            name: self.name,
            description: self.description,
            completed: self.completed,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}
