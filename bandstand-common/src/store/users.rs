//! User collection operations
//!
//! Email uniqueness is enforced here at write time (case-sensitive exact
//! match), not by the generic store.

use uuid::Uuid;

use crate::store::models::User;
use crate::store::{Store, USERS};
use crate::{Error, Result};

/// Look up a user by email
pub async fn find_by_email(store: &Store, email: &str) -> Option<User> {
    store
        .load::<User>(USERS)
        .await
        .into_iter()
        .find(|u| u.email == email)
}

/// Look up a user by identifier
pub async fn find_by_id(store: &Store, id: Uuid) -> Option<User> {
    store
        .load::<User>(USERS)
        .await
        .into_iter()
        .find(|u| u.id == id)
}

/// Append a new user; fails with `Conflict` when the email is taken
pub async fn insert(store: &Store, user: User) -> Result<User> {
    store
        .mutate::<User, _, _>(USERS, move |users| {
            if users.iter().any(|u| u.email == user.email) {
                return Err(Error::Conflict(format!(
                    "A user already exists with email {}",
                    user.email
                )));
            }
            users.push(user.clone());
            Ok(user)
        })
        .await
}

/// Update a user's newsletter preference
pub async fn set_newsletter(store: &Store, id: Uuid, subscribed: bool) -> Result<User> {
    store
        .mutate::<User, _, _>(USERS, move |users| {
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
            user.newsletter_subscribed = subscribed;
            Ok(user.clone())
        })
        .await
}

/// All users currently subscribed to the newsletter
pub async fn subscribers(store: &Store) -> Vec<User> {
    store
        .load::<User>(USERS)
        .await
        .into_iter()
        .filter(|u| u.newsletter_subscribed)
        .collect()
}
