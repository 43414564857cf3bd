use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task};
use crate::repository::{SortDirection, TaskRepository, TaskSort, TaskSortField};

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Listing order: priority descending, then description ascending, with
    /// id as the final tie-break.
    pub fn canonical_sort() -> TaskSort {
        TaskSort::by(TaskSortField::Priority, SortDirection::Desc)
            .then(TaskSortField::Description, SortDirection::Asc)
            .then(TaskSortField::Id, SortDirection::Asc)
    }

    /// Create a new task and return it with its assigned id
    #[instrument(skip(self, input), fields(task_name = %input.name))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        self.repository.insert(input).await
    }

    /// All tasks in canonical order
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.find_all(&Self::canonical_sort()).await
    }

    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Replace every field of an existing task
    #[instrument(skip(self, task), fields(task_id = task.id))]
    pub async fn update_task(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        self.repository
            .update(task)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}
