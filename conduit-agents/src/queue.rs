//! Insertion-ordered task storage

use crate::Task;
use conduit_core::{TaskId, TaskStatus};
use std::collections::HashMap;

/// Tasks in submission order with id lookup.
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return its id.
    pub fn push(&mut self, task: Task) -> TaskId {
        let task_id = task.task_id.clone();
        self.index.insert(task_id.clone(), self.tasks.len());
        self.tasks.push(task);
        task_id
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.index.get(task_id).and_then(|&i| self.tasks.get(i))
    }

    pub fn get_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        match self.index.get(task_id) {
            Some(&i) => self.tasks.get_mut(i),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Ids of `Queued` tasks, oldest first.
    pub fn queued_ids(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Queued)
            .map(|t| t.task_id.clone())
            .collect()
    }

    pub fn count_by_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
