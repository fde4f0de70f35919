//! tareas-store: persistence client for the hosted task store.
//!
//! Talks PostgREST to the backing database (`excel_files` and `todos`
//! tables), converts between wire rows and core types, and provides the
//! debounced autosave scheduler used by interactive sessions.

pub mod autosave;
pub mod client;
pub mod error;
pub mod rows;

pub use autosave::{AutosaveScheduler, DEFAULT_AUTOSAVE_DELAY};
pub use client::{StoreClient, StoreConfig};
pub use error::StoreError;
pub use rows::{FileRow, FileWithTasks, NewFileRow, NewTaskRow, TaskRow};
