use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::queries::contacts::ContactRow;
use crate::queries::notes::NoteRow;

/// Both collections plus their id counters. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) contacts: Vec<ContactRow>,
    pub(crate) last_contact_id: u64,
    pub(crate) notes: Vec<NoteRow>,
    pub(crate) last_note_id: u64,
}

impl Tables {
    pub(crate) fn next_contact_id(&mut self) -> u64 {
        self.last_contact_id += 1;
        self.last_contact_id
    }

    pub(crate) fn next_note_id(&mut self) -> u64 {
        self.last_note_id += 1;
        self.last_note_id
    }
}

/// Cheap-to-clone handle to the in-memory tables. Nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub(crate) tables: Arc<RwLock<Tables>>,
}

pub type Db = Store;

pub fn init_store() -> Db {
    let store = Store::default();
    info!("In-memory store ready");
    store
}
