//! Task model for imported spreadsheet rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a task.
///
/// The wire spellings are the exact strings the store's check constraint
/// accepts; serde rejects anything else at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pendiente,
    EnProceso,
    Completado,
    Cancelado,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pendiente => "pendiente",
            TaskStatus::EnProceso => "en-proceso",
            TaskStatus::Completado => "completado",
            TaskStatus::Cancelado => "cancelado",
        }
    }

    /// Short marker for list output.
    pub fn glyph(&self) -> &'static str {
        match self {
            TaskStatus::Pendiente => "[ ]",
            TaskStatus::EnProceso => "[~]",
            TaskStatus::Completado => "[x]",
            TaskStatus::Cancelado => "[-]",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status `{0}` (expected pendiente, en-proceso, completado or cancelado)")]
pub struct StatusParseError(String);

impl FromStr for TaskStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pendiente" => Ok(TaskStatus::Pendiente),
            "en-proceso" => Ok(TaskStatus::EnProceso),
            "completado" => Ok(TaskStatus::Completado),
            "cancelado" => Ok(TaskStatus::Cancelado),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// One extracted unit of work.
///
/// Provenance fields (`sheet`, `row`, `cell_ref`) are set once at extraction
/// and never change; only `status` is mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the store on first save; `None` until then.
    pub id: Option<String>,

    /// Trimmed, non-empty task text.
    pub name: String,

    /// Trimmed quantity text; `None` when the sheet has no quantity column
    /// or the cell was empty. Never an empty string.
    pub quantity: Option<String>,

    pub status: TaskStatus,

    /// Originating sheet name.
    pub sheet: String,

    /// 1-based row number within the sheet.
    pub row: u32,

    /// A1-style coordinate of the name cell, e.g. "B5".
    pub cell_ref: String,
}

impl Task {
    /// A freshly extracted task: pending, not yet persisted.
    pub fn extracted(
        name: impl Into<String>,
        sheet: impl Into<String>,
        row: u32,
        cell_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity: None,
            status: TaskStatus::Pendiente,
            sheet: sheet.into(),
            row,
            cell_ref: cell_ref.into(),
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completado
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::EnProceso).unwrap(),
            "\"en-proceso\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pendiente).unwrap(),
            "\"pendiente\""
        );
    }

    #[test]
    fn status_rejects_unknown_wire_value() {
        let r: Result<TaskStatus, _> = serde_json::from_str("\"done\"");
        assert!(r.is_err());
    }

    #[test]
    fn status_parses_from_cli_input() {
        assert_eq!("completado".parse::<TaskStatus>().unwrap(), TaskStatus::Completado);
        assert_eq!(" en-proceso ".parse::<TaskStatus>().unwrap(), TaskStatus::EnProceso);
        assert!("hecho".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn extracted_task_starts_pending_and_unsaved() {
        let t = Task::extracted("Tornillos", "Hoja1", 2, "A2").with_quantity("40");
        assert_eq!(t.status, TaskStatus::Pendiente);
        assert!(t.id.is_none());
        assert_eq!(t.quantity.as_deref(), Some("40"));
    }
}
