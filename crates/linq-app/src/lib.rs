pub mod app;
pub mod auth;
pub mod contacts;
pub mod error;
pub mod health;
pub mod notes;
pub mod retry;
pub mod settings;
pub mod shutdown;
pub mod simulate;
pub mod state;
pub mod telemetry;
pub mod testsupport;
pub mod upstream;
