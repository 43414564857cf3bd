use async_trait::async_trait;
use std::cmp::Ordering;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Task attributes a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
    Id,
    Name,
    Description,
    Completed,
    Priority,
    DueDate,
}

/// Ordered list of sort keys; earlier keys take precedence.
///
/// ```
/// use domain_tasks::repository::{SortDirection, TaskSort, TaskSortField};
///
/// let sort = TaskSort::by(TaskSortField::Priority, SortDirection::Desc)
///     .then(TaskSortField::Description, SortDirection::Asc);
/// assert_eq!(sort.keys().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSort {
    keys: Vec<(TaskSortField, SortDirection)>,
}

impl TaskSort {
    pub fn by(field: TaskSortField, direction: SortDirection) -> Self {
        Self {
            keys: vec![(field, direction)],
        }
    }

    pub fn then(mut self, field: TaskSortField, direction: SortDirection) -> Self {
        self.keys.push((field, direction));
        self
    }

    pub fn keys(&self) -> &[(TaskSortField, SortDirection)] {
        &self.keys
    }

    /// Compare two tasks by these keys. Strings compare byte-wise and
    /// `None` due dates sort before any date.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        self.keys
            .iter()
            .map(|(field, direction)| {
                let ordering = match field {
                    TaskSortField::Id => a.id.cmp(&b.id),
                    TaskSortField::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
                    TaskSortField::Description => {
                        a.description.as_bytes().cmp(b.description.as_bytes())
                    }
                    TaskSortField::Completed => a.completed.cmp(&b.completed),
                    TaskSortField::Priority => a.priority.cmp(&b.priority),
                    TaskSortField::DueDate => a.due_date.cmp(&b.due_date),
                };
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Repository trait for Task persistence
///
/// Stores carry no business rules: `update` and `delete_by_id` report absence
/// as `None`/`false`. The service decides what is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All stored tasks ordered by `sort`
    async fn find_all(&self, sort: &TaskSort) -> TaskResult<Vec<Task>>;

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Store a new task under a freshly assigned id
    async fn insert(&self, input: CreateTask) -> TaskResult<Task>;

    /// Fully replace an existing task; `None` if `task.id` is not stored.
    /// Never inserts.
    async fn update(&self, task: Task) -> TaskResult<Option<Task>>;

    /// Insert or fully replace the task with `task.id`
    async fn save(&self, task: Task) -> TaskResult<Task>;

    /// Returns `true` if a task was removed
    async fn delete_by_id(&self, id: i64) -> TaskResult<bool>;
}
