use serde::{Deserialize, Serialize};

use crate::pool::Db;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRow {
    pub id: u64,
    #[serde(rename = "contactId")]
    pub contact_id: u64,
    pub body: String,
}

// Notes are not checked against the contacts table; a note may outlive its contact.
pub async fn insert_note(db: &Db, contact_id: u64, body: &str) -> NoteRow {
    let mut tables = db.tables.write().await;
    let row = NoteRow {
        id: tables.next_note_id(),
        contact_id,
        body: body.to_string(),
    };
    tables.notes.push(row.clone());
    row
}

pub async fn list_notes_by_contact(db: &Db, contact_id: u64) -> Vec<NoteRow> {
    db.tables
        .read()
        .await
        .notes
        .iter()
        .filter(|n| n.contact_id == contact_id)
        .cloned()
        .collect()
}

pub async fn get_note_by_id(db: &Db, id: u64) -> Option<NoteRow> {
    db.tables
        .read()
        .await
        .notes
        .iter()
        .find(|n| n.id == id)
        .cloned()
}

pub async fn update_note(db: &Db, id: u64, body: Option<&str>) -> Option<NoteRow> {
    let mut tables = db.tables.write().await;
    let note = tables.notes.iter_mut().find(|n| n.id == id)?;

    if let Some(body) = body {
        note.body = body.to_string();
    }

    Some(note.clone())
}

pub async fn delete_note(db: &Db, id: u64) -> bool {
    let mut tables = db.tables.write().await;
    match tables.notes.iter().position(|n| n.id == id) {
        Some(index) => {
            tables.notes.remove(index);
            true
        }
        None => false,
    }
}
