use std::sync::Arc;

use linq_store::Db;

use crate::retry::{RetryPolicy, Sleeper};
use crate::upstream::Upstream;

pub struct AppState {
    pub db: Db,
    pub upstream: Arc<dyn Upstream>,
    pub sleeper: Arc<dyn Sleeper>,
    pub upstream_retry: RetryPolicy,
    pub token_secret: String,
    pub token_ttl_secs: i64,
}
