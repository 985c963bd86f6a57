//! Dispatch: selects one repository operation from the normalized request
//! fields and packages the outcome into the final response shape.

use axum::http::StatusCode;

use crate::request::{self, RequestFields};
use crate::tasks::{Outcome, TaskRepository};

/// One packaged response: an integer status code plus a JSON-serialized body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status_code: u16,
    pub body: String,
}

impl Outcome {
    pub fn into_reply(self) -> Reply {
        Reply {
            status_code: self.status.as_u16(),
            body: serde_json::to_string(&self.payload).unwrap_or_default(),
        }
    }
}

/// Interpret a raw request, run the selected operation, package the response.
pub async fn handle(tasks: &TaskRepository, method: Option<&str>, raw_path: &str) -> Reply {
    let fields = request::interpret(method, raw_path);
    dispatch(tasks, &fields).await.into_reply()
}

/// Select and run one repository operation.
///
/// Title validity is checked before the POST/PUT branch, so an invalid title
/// short-circuits to 400 before a PUT's id is consulted. A method outside
/// GET/POST/PUT/DELETE carrying a valid title is rejected with 405.
pub async fn dispatch(tasks: &TaskRepository, req: &RequestFields) -> Outcome {
    match req.method.as_str() {
        "GET" if req.id.is_some() => tasks.get(req.id.as_deref()).await,
        "GET" => tasks.list().await,
        // An absent id is treated as not-found by the repository.
        "DELETE" => tasks.delete(req.id.as_deref()).await,
        method => {
            let title = match req.title.as_deref() {
                Some(t) if request::title_is_valid(Some(t)) => t,
                _ => return Outcome::empty(StatusCode::BAD_REQUEST),
            };
            match method {
                "POST" => tasks.create(title).await,
                "PUT" => tasks.update(req.id.as_deref(), title).await,
                _ => Outcome::empty(StatusCode::METHOD_NOT_ALLOWED),
            }
        }
    }
}
