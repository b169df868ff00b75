//! Hosted entity-service client
//!
//! The entity service is an external collaborator: a hosted backend exposing
//! list/filter/create/update per entity type plus the current-user lookup.
//! [`EntityService`] is the seam; [`RestEntityClient`] talks to the real
//! backend, [`StubEntityService`] is the in-memory double used by tests and
//! the CLI's offline mode.

mod client;
mod stub;
mod types;

pub use client::RestEntityClient;
pub use stub::StubEntityService;
pub use types::{Predicate, SortSpec, User};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Abstract entity data service
///
/// `Predicate` is exact-match field equality only. Range and substring
/// filtering happen client-side in the filter pipeline, never at this
/// boundary.
#[async_trait]
pub trait EntityService: Send + Sync {
    /// List entities of a type, optionally sorted and capped
    async fn list(
        &self,
        entity_type: &str,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>>;

    /// Filter entities by exact-match field predicate
    async fn filter(
        &self,
        entity_type: &str,
        predicate: &Predicate,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>>;

    /// Create an entity from a JSON field object
    async fn create(&self, entity_type: &str, fields: Value) -> Result<Value>;

    /// Update an entity's fields by id
    async fn update(&self, entity_type: &str, id: &str, fields: Value) -> Result<Value>;

    /// Look up the authenticated user
    async fn current_user(&self) -> Result<User>;
}
