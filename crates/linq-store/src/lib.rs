pub mod pool;
pub mod queries;

pub use pool::{init_store, Db};
