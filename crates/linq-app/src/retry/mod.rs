pub mod controller;
pub mod policy;
pub mod sleep;

pub use controller::{call_with_retry, RetryExhausted};
pub use policy::RetryPolicy;
pub use sleep::{Sleeper, TokioSleeper};
