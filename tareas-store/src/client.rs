//! PostgREST client for the hosted task store.
//!
//! Endpoints mirror the backing schema: `/rest/v1/excel_files` and
//! `/rest/v1/todos`, authenticated with the project API key. Row filters
//! use the `id=eq.<uuid>` convention.

use chrono::Utc;
use reqwest::Response;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tareas_core::{Task, TaskStatus};

use crate::error::StoreError;
use crate::rows::{FileRow, FileWithTasks, NewFileRow, NewTaskRow};

/// Connection settings for one store project.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://myproject.supabase.co`.
    pub url: String,
    /// Project API key (anon key).
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct StoreClient {
    http: reqwest::Client,
    base: String,
}

impl StoreClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        if config.url.trim().is_empty() || config.api_key.trim().is_empty() {
            return Err(StoreError::Config(
                "missing store URL or API key (run `tareas setup`)".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|_| StoreError::Config("API key contains invalid characters".to_string()))?;
        headers.insert("apikey", key);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))
            .map_err(|_| StoreError::Config("API key contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Config(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base: config.url.trim().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base, table)
    }

    /// Reachability and credential probe. A failure here means setup, not
    /// data, is the problem.
    pub async fn check_connection(&self) -> Result<(), StoreError> {
        let resp = self
            .http
            .get(self.endpoint("excel_files"))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        ensure_ok(resp).await?;
        Ok(())
    }

    /// Persist one imported workbook: the file row first, then every task
    /// row. All-or-nothing — when the task insert fails, the just-created
    /// file row is deleted again before the error propagates.
    pub async fn save_file(&self, name: &str, tasks: &[Task]) -> Result<FileWithTasks, StoreError> {
        let new_file = NewFileRow {
            name: name.to_string(),
            total_tasks: tasks.len() as u32,
            completed_tasks: 0,
        };

        let resp = self
            .http
            .post(self.endpoint("excel_files"))
            .header("Prefer", "return=representation")
            .json(&new_file)
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        let resp = ensure_ok(resp).await?;
        let mut rows: Vec<FileRow> = resp.json().await.map_err(StoreError::Decode)?;
        let file = rows.pop().ok_or(StoreError::NotFound {
            what: "inserted file row".to_string(),
        })?;

        let new_tasks: Vec<NewTaskRow> = tasks
            .iter()
            .map(|t| NewTaskRow::from_task(t, &file.id))
            .collect();

        if let Err(err) = self.insert_tasks(&new_tasks).await {
            let _ = self.delete_file(&file.id).await;
            return Err(StoreError::PartialFailure {
                file_id: file.id,
                source: Box::new(err),
            });
        }

        self.load_file(&file.id).await
    }

    async fn insert_tasks(&self, rows: &[NewTaskRow]) -> Result<(), StoreError> {
        if rows.is_empty() {
            return Ok(());
        }
        let resp = self
            .http
            .post(self.endpoint("todos"))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        ensure_ok(resp).await?;
        Ok(())
    }

    /// Every file with its tasks, most recently updated first.
    pub async fn load_files(&self) -> Result<Vec<FileWithTasks>, StoreError> {
        let resp = self
            .http
            .get(self.endpoint("excel_files"))
            .query(&[("select", "*,todos(*)"), ("order", "updated_at.desc")])
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        let resp = ensure_ok(resp).await?;
        resp.json().await.map_err(StoreError::Decode)
    }

    /// One file with its tasks.
    pub async fn load_file(&self, file_id: &str) -> Result<FileWithTasks, StoreError> {
        let resp = self
            .http
            .get(self.endpoint("excel_files"))
            .query(&[
                ("select", "*,todos(*)".to_string()),
                ("id", format!("eq.{file_id}")),
            ])
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        let resp = ensure_ok(resp).await?;
        let mut rows: Vec<FileWithTasks> = resp.json().await.map_err(StoreError::Decode)?;
        rows.pop().ok_or(StoreError::NotFound {
            what: format!("file {file_id}"),
        })
    }

    /// PATCH one task's status. Callers update local state only after this
    /// succeeds; there is no optimistic apply to roll back.
    pub async fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<(), StoreError> {
        #[derive(Serialize)]
        struct Patch {
            status: TaskStatus,
        }

        let resp = self
            .http
            .patch(self.endpoint("todos"))
            .query(&[("id", format!("eq.{task_id}"))])
            .json(&Patch { status })
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        ensure_ok(resp).await?;
        Ok(())
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<(), StoreError> {
        let resp = self
            .http
            .delete(self.endpoint("todos"))
            .query(&[("id", format!("eq.{task_id}"))])
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        ensure_ok(resp).await?;
        Ok(())
    }

    /// Delete a file; its tasks go with it (cascade at the store).
    pub async fn delete_file(&self, file_id: &str) -> Result<(), StoreError> {
        let resp = self
            .http
            .delete(self.endpoint("excel_files"))
            .query(&[("id", format!("eq.{file_id}"))])
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        ensure_ok(resp).await?;
        Ok(())
    }

    /// Push the recomputed counters (and a fresh `updated_at`) after task
    /// mutations, keeping the file row consistent with its task set.
    pub async fn sync_counters(
        &self,
        file_id: &str,
        total_tasks: u32,
        completed_tasks: u32,
    ) -> Result<(), StoreError> {
        #[derive(Serialize)]
        struct Patch {
            total_tasks: u32,
            completed_tasks: u32,
            updated_at: chrono::DateTime<Utc>,
        }

        let resp = self
            .http
            .patch(self.endpoint("excel_files"))
            .query(&[("id", format!("eq.{file_id}"))])
            .json(&Patch {
                total_tasks,
                completed_tasks,
                updated_at: Utc::now(),
            })
            .send()
            .await
            .map_err(StoreError::Connectivity)?;
        ensure_ok(resp).await?;
        Ok(())
    }
}

async fn ensure_ok(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StoreClient {
        StoreClient::new(StoreConfig {
            url: "https://demo.supabase.co/".to_string(),
            api_key: "anon-key".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn endpoint_joins_base_without_double_slash() {
        let c = client();
        assert_eq!(
            c.endpoint("excel_files"),
            "https://demo.supabase.co/rest/v1/excel_files"
        );
        assert_eq!(c.endpoint("todos"), "https://demo.supabase.co/rest/v1/todos");
    }

    #[test]
    fn empty_config_is_a_setup_problem() {
        let err = StoreClient::new(StoreConfig {
            url: String::new(),
            api_key: String::new(),
        })
        .unwrap_err();
        assert!(err.needs_setup());
        assert!(!err.is_retryable());
    }
}
