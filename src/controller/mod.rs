//! Controller module - Application logic and event handling
//!
//! - `input`: Key and mouse event handling
//! - `search`: Search/pagination orchestration against the TMDB client

mod input;
mod search;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AppModel, MovieSearch};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) client: Arc<dyn MovieSearch>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, client: Arc<dyn MovieSearch>) -> Self {
        Self { model, client }
    }
}
