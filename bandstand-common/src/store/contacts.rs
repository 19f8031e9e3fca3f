//! Contact submission operations
//!
//! Submissions are write-once; there is no update or delete path.

use crate::store::models::ContactMessage;
use crate::store::{Store, CONTACTS};
use crate::Result;

/// All submissions, in insertion order
pub async fn list(store: &Store) -> Vec<ContactMessage> {
    store.load::<ContactMessage>(CONTACTS).await
}

/// Append a new submission
pub async fn insert(store: &Store, message: ContactMessage) -> Result<ContactMessage> {
    store
        .mutate::<ContactMessage, _, _>(CONTACTS, move |messages| {
            messages.push(message.clone());
            Ok(message)
        })
        .await
}
