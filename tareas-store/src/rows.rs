//! Wire row shapes for the `excel_files` and `todos` tables, plus
//! conversions to and from the core types.
//!
//! The Rust side uses English names; serde maps them onto the store's
//! Spanish columns (`nombre`, `cantidad`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tareas_core::{FileMeta, Task, TaskSet, TaskStatus};

/// One `excel_files` row as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRow {
    pub id: String,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
}

/// One `todos` row as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub excel_file_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: Option<String>,
    pub status: TaskStatus,
    pub sheet_name: String,
    pub row_number: u32,
    pub cell_ref: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A file with its embedded tasks (`select=*,todos(*)`).
#[derive(Debug, Clone, Deserialize)]
pub struct FileWithTasks {
    #[serde(flatten)]
    pub file: FileRow,
    pub todos: Vec<TaskRow>,
}

/// Insert payload for a new file; the store assigns id and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct NewFileRow {
    pub name: String,
    pub total_tasks: u32,
    pub completed_tasks: u32,
}

/// Insert payload for a new task row.
#[derive(Debug, Clone, Serialize)]
pub struct NewTaskRow {
    pub excel_file_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: Option<String>,
    pub status: TaskStatus,
    pub sheet_name: String,
    pub row_number: u32,
    pub cell_ref: String,
}

impl NewTaskRow {
    pub fn from_task(task: &Task, excel_file_id: &str) -> Self {
        Self {
            excel_file_id: excel_file_id.to_string(),
            name: task.name.clone(),
            quantity: task.quantity.clone(),
            status: task.status,
            sheet_name: task.sheet.clone(),
            row_number: task.row,
            cell_ref: task.cell_ref.clone(),
        }
    }
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: Some(row.id),
            name: row.name,
            quantity: row.quantity,
            status: row.status,
            sheet: row.sheet_name,
            row: row.row_number,
            cell_ref: row.cell_ref,
        }
    }
}

impl From<FileRow> for FileMeta {
    fn from(row: FileRow) -> Self {
        FileMeta {
            id: Some(row.id),
            name: row.name,
            uploaded_at: row.uploaded_at,
            updated_at: row.updated_at,
            total_tasks: row.total_tasks,
            completed_tasks: row.completed_tasks,
        }
    }
}

impl FileWithTasks {
    pub fn into_task_set(self) -> TaskSet {
        let tasks = self.todos.into_iter().map(Task::from).collect();
        TaskSet::from_parts(self.file.into(), tasks)
    }
}
