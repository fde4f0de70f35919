//! TaskSet — one imported file and its ordered tasks.
//!
//! The file entity carries `total_tasks`/`completed_tasks`, which are
//! redundant caches of the task list. Every mutation goes through this type
//! so the counters never drift:
//! - total_tasks == tasks.len()
//! - completed_tasks == count(status == Completado)
//!
//! Task order is insertion order from extraction and mirrors the source
//! spreadsheet layout; nothing here sorts or deduplicates.

use crate::stats::Stats;
use crate::task::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted file entity (one imported workbook).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Assigned by the store on first save.
    pub id: Option<String>,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskSetError {
    #[error("no task with id `{id}` in this file")]
    UnknownTask { id: String },
}

/// An imported file plus its tasks, with the counters kept consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSet {
    meta: FileMeta,
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Build a set from a fresh extraction. Counters start at
    /// `total = tasks.len()`, `completed = 0` (extraction always yields
    /// pending tasks).
    pub fn from_extraction(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        let now = Utc::now();
        let mut set = Self {
            meta: FileMeta {
                id: None,
                name: name.into(),
                uploaded_at: now,
                updated_at: now,
                total_tasks: 0,
                completed_tasks: 0,
            },
            tasks,
        };
        set.refresh_counters();
        set
    }

    /// Rehydrate a set loaded from the store. Counters are recomputed from
    /// the tasks rather than trusted, so a drifted row heals on load.
    pub fn from_parts(meta: FileMeta, tasks: Vec<Task>) -> Self {
        let mut set = Self { meta, tasks };
        set.refresh_counters();
        set
    }

    pub fn meta(&self) -> &FileMeta {
        &self.meta
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id.as_deref() == Some(id))
    }

    /// Change one task's status. Unknown ids are an error and leave the set
    /// untouched.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<(), TaskSetError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id.as_deref() == Some(id))
            .ok_or_else(|| TaskSetError::UnknownTask { id: id.to_string() })?;
        task.status = status;
        self.refresh_counters();
        self.meta.updated_at = Utc::now();
        Ok(())
    }

    /// Remove one task, returning it.
    pub fn remove_task(&mut self, id: &str) -> Result<Task, TaskSetError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id.as_deref() == Some(id))
            .ok_or_else(|| TaskSetError::UnknownTask { id: id.to_string() })?;
        let task = self.tasks.remove(pos);
        self.refresh_counters();
        self.meta.updated_at = Utc::now();
        Ok(task)
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.tasks)
    }

    fn refresh_counters(&mut self) {
        self.meta.total_tasks = self.tasks.len() as u32;
        self.meta.completed_tasks = self.tasks.iter().filter(|t| t.is_completed()).count() as u32;
    }
}
