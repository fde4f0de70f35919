//! Per-status counts and completion percentage, recomputed on demand.

use crate::task::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Derived view over a task list. Pure and stateless: recomputing on an
/// unchanged list yields an identical value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub cancelled: u32,
    /// 100 * completed / total; exactly 0.0 for an empty list.
    pub completion_percentage: f64,
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Self {
        let mut s = Stats::default();
        for t in tasks {
            s.total += 1;
            match t.status {
                TaskStatus::Pendiente => s.pending += 1,
                TaskStatus::EnProceso => s.in_progress += 1,
                TaskStatus::Completado => s.completed += 1,
                TaskStatus::Cancelado => s.cancelled += 1,
            }
        }
        s.completion_percentage = percentage(s.completed, s.total);
        s
    }

    /// Fold another file's stats into this one (aggregate view).
    pub fn merge(&mut self, other: &Stats) {
        self.total += other.total;
        self.pending += other.pending;
        self.in_progress += other.in_progress;
        self.completed += other.completed;
        self.cancelled += other.cancelled;
        self.completion_percentage = percentage(self.completed, self.total);
    }

    /// One-line summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "{} tareas | {} pendiente | {} en-proceso | {} completado | {} cancelado | {:.0}% completado",
            self.total,
            self.pending,
            self.in_progress,
            self.completed,
            self.cancelled,
            self.completion_percentage
        )
    }
}

fn percentage(completed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * f64::from(completed) / f64::from(total)
    }
}
