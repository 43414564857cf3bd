//! In-memory task store for tests and embedding.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::{
    error::{TaskError, TaskResult},
    models::{CreateTask, Task},
    repository::{TaskRepository, TaskSort},
};

/// Thread-safe in-memory task repository.
///
/// Ids start at 1 and are never reused, even after deletes or saves with an
/// explicit id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<i64, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> TaskError {
    TaskError::Database(format!("task store lock poisoned: {}", err))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_all(&self, sort: &TaskSort) -> TaskResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| sort.compare(a, b));
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn insert(&self, input: CreateTask) -> TaskResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.last_id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| TaskError::Database("task id space exhausted".to_string()))?;
        let task = input.into_task(state.last_id);
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: Task) -> TaskResult<Option<Task>> {
        let mut state = self.state.write().map_err(poisoned)?;
        match state.tasks.get_mut(&task.id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.last_id = state.last_id.max(task.id);
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.tasks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;
    use crate::repository::{SortDirection, TaskSortField};

    fn create(name: &str) -> CreateTask {
        CreateTask {
            name: name.to_string(),
            description: name.to_lowercase(),
            completed: false,
            priority: TaskPriority::Medium,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.insert(create("A")).await.unwrap();
        assert!(repo.delete_by_id(first.id).await.unwrap());

        let second = repo.insert(create("B")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_save_upserts_and_advances_counter() {
        let repo = InMemoryTaskRepository::new();

        let explicit = create("A").into_task(10);
        repo.save(explicit.clone()).await.unwrap();
        assert_eq!(repo.find_by_id(10).await.unwrap(), Some(explicit));

        let next = repo.insert(create("B")).await.unwrap();
        assert_eq!(next.id, 11);

        let mut replaced = next.clone();
        replaced.completed = true;
        repo.save(replaced.clone()).await.unwrap();
        assert_eq!(repo.find_by_id(11).await.unwrap(), Some(replaced));
    }

    #[tokio::test]
    async fn test_update_replaces_existing_only() {
        let repo = InMemoryTaskRepository::new();
        let created = repo.insert(create("A")).await.unwrap();

        let replaced = Task {
            completed: true,
            ..created.clone()
        };
        assert_eq!(repo.update(replaced.clone()).await.unwrap(), Some(replaced.clone()));
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(replaced));

        let ghost = create("ghost").into_task(99);
        assert_eq!(repo.update(ghost).await.unwrap(), None);
        assert_eq!(repo.find_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_after_delete_does_not_resurrect() {
        let repo = InMemoryTaskRepository::new();
        let created = repo.insert(create("A")).await.unwrap();
        repo.delete_by_id(created.id).await.unwrap();

        assert_eq!(repo.update(created.clone()).await.unwrap(), None);
        let sort = TaskSort::by(TaskSortField::Id, SortDirection::Asc);
        assert!(repo.find_all(&sort).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_after_max_id_fails_instead_of_overflowing() {
        let repo = InMemoryTaskRepository::new();
        repo.save(create("last").into_task(i64::MAX)).await.unwrap();

        let err = repo.insert(create("next")).await.unwrap_err();
        assert!(matches!(err, TaskError::Database(msg) if msg.contains("exhausted")));
    }

    #[tokio::test]
    async fn test_find_all_applies_sort() {
        let repo = InMemoryTaskRepository::new();
        for name in ["B", "C", "A"] {
            repo.insert(create(name)).await.unwrap();
        }

        let sort = TaskSort::by(TaskSortField::Name, SortDirection::Asc);
        let names: Vec<_> = repo
            .find_all(&sort)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = InMemoryTaskRepository::new();
        assert!(!repo.delete_by_id(404).await.unwrap());
    }
}
