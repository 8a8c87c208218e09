pub mod contacts;
pub mod notes;
