use async_trait::async_trait;
use sea_orm::sea_query::{OnConflict, Order};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Select};

use crate::{
    entity,
    error::TaskResult,
    models::{CreateTask, Task},
    repository::{SortDirection, TaskRepository, TaskSort, TaskSortField},
};

pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(field: TaskSortField) -> entity::Column {
    match field {
        TaskSortField::Id => entity::Column::Id,
        TaskSortField::Name => entity::Column::Name,
        TaskSortField::Description => entity::Column::Description,
        TaskSortField::Completed => entity::Column::Completed,
        TaskSortField::Priority => entity::Column::Priority,
        TaskSortField::DueDate => entity::Column::DueDate,
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// `SELECT ... FROM tasks ORDER BY <keys>`
pub(crate) fn sorted_query(sort: &TaskSort) -> Select<entity::Entity> {
    sort.keys()
        .iter()
        .fold(entity::Entity::find(), |query, (field, direction)| {
            query.order_by(column(*field), Order::from(*direction))
        })
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_all(&self, sort: &TaskSort) -> TaskResult<Vec<Task>> {
        let models = sorted_query(sort).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn insert(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn update(&self, task: Task) -> TaskResult<Option<Task>> {
        let id = task.id;
        let active_model: entity::ActiveModel = task.into();

        // UPDATE ... WHERE id = $1 RETURNING *; no row means no update
        match entity::Entity::update(active_model).exec(&self.db).await {
            Ok(model) => {
                tracing::info!(task_id = id, "Updated task");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let active_model: entity::ActiveModel = task.into();

        let model = entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(entity::Column::Id)
                    .update_columns([
                        entity::Column::Name,
                        entity::Column::Description,
                        entity::Column::Completed,
                        entity::Column::Priority,
                        entity::Column::DueDate,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        tracing::info!(task_id = id, "Saved task");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, QueryTrait};

    fn model(id: i64, description: &str, priority: TaskPriority) -> entity::Model {
        entity::Model {
            id,
            name: format!("task {}", id),
            description: description.to_string(),
            completed: false,
            priority,
            due_date: None,
        }
    }

    #[test]
    fn test_sorted_query_orders_by_keys() {
        let sort = TaskSort::by(TaskSortField::Priority, SortDirection::Desc)
            .then(TaskSortField::Description, SortDirection::Asc)
            .then(TaskSortField::Id, SortDirection::Asc);

        let sql = sorted_query(&sort)
            .build(DatabaseBackend::Postgres)
            .to_string();

        let priority = sql.find(r#""priority" DESC"#).unwrap();
        let description = sql.find(r#""description" ASC"#).unwrap();
        let id = sql.rfind(r#""id" ASC"#).unwrap();
        assert!(sql.contains("ORDER BY"));
        assert!(priority < description && description < id);
    }

    #[tokio::test]
    async fn test_find_all_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(2, "b", TaskPriority::High),
                model(1, "a", TaskPriority::Low),
            ]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let sort = TaskSort::by(TaskSortField::Priority, SortDirection::Desc);
        let tasks = repo.find_all(&sort).await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 2);
        assert_eq!(tasks[0].priority, TaskPriority::High);
    }

    #[tokio::test]
    async fn test_find_by_id_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "report", TaskPriority::Medium)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task = repo
            .insert(CreateTask {
                name: "task 7".to_string(),
                description: "report".to_string(),
                completed: false,
                priority: TaskPriority::Medium,
                due_date: None,
            })
            .await
            .unwrap();

        assert_eq!(task.id, 7);
        assert_eq!(task.description, "report");
    }

    #[tokio::test]
    async fn test_update_returns_updated_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3, "renamed", TaskPriority::High)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let updated = repo
            .update(model(3, "renamed", TaskPriority::High).into())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, 3);
        assert_eq!(updated.priority, TaskPriority::High);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let result = repo
            .update(model(9, "gone", TaskPriority::Low).into())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_database_errors_propagate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.find_by_id(1).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
