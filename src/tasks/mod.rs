//! The task repository: the four CRUD operations plus their status mapping.
//!
//! Every operation returns an [`Outcome`], the payload/status pair that
//! becomes the HTTP response. Title validation happens upstream in the
//! dispatcher; the repository accepts whatever it is given. All storage-layer
//! errors collapse to a single opaque failure kind reported as 500 with the
//! error message in the body.

use axum::http::StatusCode;
use serde::Serialize;
use std::sync::Arc;

use crate::storage::{Storage, TaskRow};

/// Response payload: an empty or error string, one task, or all tasks.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Task(TaskRow),
    Tasks(Vec<TaskRow>),
}

/// The result of one repository operation.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: StatusCode,
    pub payload: Payload,
}

impl Outcome {
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            payload: Payload::Text(String::new()),
        }
    }

    fn task(status: StatusCode, row: TaskRow) -> Self {
        Self {
            status,
            payload: Payload::Task(row),
        }
    }

    fn storage_failure(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            payload: Payload::Text(err.to_string()),
        }
    }
}

/// CRUD operations over the task store.
#[derive(Clone)]
pub struct TaskRepository {
    storage: Arc<Storage>,
}

/// An absent or non-i64 id never matches a record.
fn parse_id(id: Option<&str>) -> Option<i64> {
    id.and_then(|s| s.parse::<i64>().ok())
}

impl TaskRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Insert a task and return it as freshly read back, status 201.
    ///
    /// The caller has already validated the title.
    pub async fn create(&self, title: &str) -> Outcome {
        let id = match self.storage.insert_task(title).await {
            Ok(id) => id,
            Err(e) => return Outcome::storage_failure(e),
        };
        match self.storage.get_task(id).await {
            Ok(Some(row)) => Outcome::task(StatusCode::CREATED, row),
            Ok(None) => Outcome::storage_failure(anyhow::anyhow!("task not found after insert")),
            Err(e) => Outcome::storage_failure(e),
        }
    }

    /// All tasks, status 200.
    pub async fn list(&self) -> Outcome {
        match self.storage.list_tasks().await {
            Ok(rows) => Outcome {
                status: StatusCode::OK,
                payload: Payload::Tasks(rows),
            },
            Err(e) => Outcome::storage_failure(e),
        }
    }

    /// The task matching `id`, status 200; empty 404 when no record matches.
    pub async fn get(&self, id: Option<&str>) -> Outcome {
        let Some(id) = parse_id(id) else {
            return Outcome::empty(StatusCode::NOT_FOUND);
        };
        match self.storage.get_task(id).await {
            Ok(Some(row)) => Outcome::task(StatusCode::OK, row),
            Ok(None) => Outcome::empty(StatusCode::NOT_FOUND),
            Err(e) => Outcome::storage_failure(e),
        }
    }

    /// Rewrite the title of the task matching `id`, then return the result of
    /// [`get`](Self::get) — a nonexistent id yields 404, not a distinct
    /// update-failed status.
    pub async fn update(&self, id: Option<&str>, title: &str) -> Outcome {
        let Some(num) = parse_id(id) else {
            return Outcome::empty(StatusCode::NOT_FOUND);
        };
        if let Err(e) = self.storage.update_task_title(num, title).await {
            return Outcome::storage_failure(e);
        }
        self.get(id).await
    }

    /// Delete the task matching `id`. Reads first: a missing or erroring read
    /// is returned unchanged, propagating its status.
    pub async fn delete(&self, id: Option<&str>) -> Outcome {
        let read = self.get(id).await;
        if read.status != StatusCode::OK {
            return read;
        }
        // The read succeeded, so the id parsed and the record exists.
        let Some(num) = parse_id(id) else {
            return Outcome::empty(StatusCode::NOT_FOUND);
        };
        match self.storage.delete_task(num).await {
            Ok(()) => Outcome::empty(StatusCode::OK),
            Err(e) => Outcome::storage_failure(e),
        }
    }
}
