//! Single-item authorization decisions.
//!
//! A pure function over an already-fetched snippet: callers resolve the id
//! first and only consult the guard for records that exist. Reads succeed
//! for public snippets and for the owner; updates and deletes succeed for
//! the owner only, visibility notwithstanding.

use thiserror::Error;
use uuid::Uuid;

use crate::models::Snippet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenyReason {
    #[error("You do not have access to this snippet")]
    NotVisible,
    #[error("You do not own this snippet")]
    NotOwner,
}

pub fn check(snippet: &Snippet, requester: Uuid, operation: Operation) -> Result<(), DenyReason> {
    match operation {
        Operation::Read => {
            if snippet.is_public || snippet.owner_id == requester {
                Ok(())
            } else {
                Err(DenyReason::NotVisible)
            }
        }
        Operation::Update | Operation::Delete => {
            if snippet.owner_id == requester {
                Ok(())
            } else {
                Err(DenyReason::NotOwner)
            }
        }
    }
}
