pub mod config;
pub mod dispatch;
pub mod request;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::Config;
use storage::Storage;
use tasks::TaskRepository;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub storage: Arc<Storage>,
    pub tasks: Arc<TaskRepository>,
}
