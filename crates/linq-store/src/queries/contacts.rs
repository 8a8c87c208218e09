use serde::{Deserialize, Serialize};

use crate::pool::Db;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRow {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Fields to overwrite on update; `None` leaves the stored value alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactPatch<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
}

pub async fn insert_contact(db: &Db, name: &str, email: &str) -> ContactRow {
    let mut tables = db.tables.write().await;
    let row = ContactRow {
        id: tables.next_contact_id(),
        name: name.to_string(),
        email: email.to_string(),
    };
    tables.contacts.push(row.clone());
    row
}

pub async fn list_contacts(db: &Db) -> Vec<ContactRow> {
    db.tables.read().await.contacts.clone()
}

pub async fn get_contact_by_id(db: &Db, id: u64) -> Option<ContactRow> {
    db.tables
        .read()
        .await
        .contacts
        .iter()
        .find(|c| c.id == id)
        .cloned()
}

pub async fn update_contact(db: &Db, id: u64, patch: ContactPatch<'_>) -> Option<ContactRow> {
    let mut tables = db.tables.write().await;
    let contact = tables.contacts.iter_mut().find(|c| c.id == id)?;

    if let Some(name) = patch.name {
        contact.name = name.to_string();
    }
    if let Some(email) = patch.email {
        contact.email = email.to_string();
    }

    Some(contact.clone())
}

/// Returns `false` when no contact had this id.
pub async fn delete_contact(db: &Db, id: u64) -> bool {
    let mut tables = db.tables.write().await;
    match tables.contacts.iter().position(|c| c.id == id) {
        Some(index) => {
            tables.contacts.remove(index);
            true
        }
        None => false,
    }
}
