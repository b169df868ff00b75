//! In-memory entity service for tests and offline demos

use super::types::{Predicate, SortSpec, User};
use super::EntityService;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory stand-in for the hosted entity service
///
/// Collections are keyed by entity type. Read failures can be injected per
/// type to exercise degraded load paths.
#[derive(Default)]
pub struct StubEntityService {
    collections: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    user: Arc<RwLock<Option<User>>>,
    failing_types: Arc<RwLock<HashSet<String>>>,
}

impl StubEntityService {
    /// Empty service with no authenticated user
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, replacing any existing records of that type
    pub async fn seed(&self, entity_type: &str, records: Vec<Value>) {
        self.collections
            .write()
            .await
            .insert(entity_type.to_string(), records);
    }

    /// Set the authenticated user returned by `current_user`
    pub async fn set_user(&self, user: User) {
        *self.user.write().await = Some(user);
    }

    /// Make every read of an entity type fail until cleared
    pub async fn fail_reads(&self, entity_type: &str) {
        self.failing_types
            .write()
            .await
            .insert(entity_type.to_string());
    }

    async fn check_injected_failure(&self, entity_type: &str) -> Result<()> {
        if self.failing_types.read().await.contains(entity_type) {
            return Err(Error::Fetch(format!(
                "injected failure for entity type '{}'",
                entity_type
            )));
        }
        Ok(())
    }

    fn apply_sort_and_limit(
        mut records: Vec<Value>,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Vec<Value> {
        if let Some(sort) = sort {
            records.sort_by(|a, b| {
                let ordering = compare_fields(a.get(&sort.field), b.get(&sort.field));
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        records
    }
}

/// Order two JSON field values: numbers numerically, everything else by
/// string rendering (RFC 3339 dates order correctly this way).
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl EntityService for StubEntityService {
    async fn list(
        &self,
        entity_type: &str,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        self.check_injected_failure(entity_type).await?;
        let records = self
            .collections
            .read()
            .await
            .get(entity_type)
            .cloned()
            .unwrap_or_default();
        Ok(Self::apply_sort_and_limit(records, sort, limit))
    }

    async fn filter(
        &self,
        entity_type: &str,
        predicate: &Predicate,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        self.check_injected_failure(entity_type).await?;
        let records: Vec<Value> = self
            .collections
            .read()
            .await
            .get(entity_type)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| predicate.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self::apply_sort_and_limit(records, sort, limit))
    }

    async fn create(&self, entity_type: &str, mut fields: Value) -> Result<Value> {
        let object = fields
            .as_object_mut()
            .ok_or_else(|| Error::Entity("create fields must be a JSON object".to_string()))?;
        object
            .entry("id")
            .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
        object
            .entry("created_date")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));

        self.collections
            .write()
            .await
            .entry(entity_type.to_string())
            .or_default()
            .push(fields.clone());
        Ok(fields)
    }

    async fn update(&self, entity_type: &str, id: &str, fields: Value) -> Result<Value> {
        let patch = fields
            .as_object()
            .ok_or_else(|| Error::Entity("update fields must be a JSON object".to_string()))?;

        let mut collections = self.collections.write().await;
        let records = collections.get_mut(entity_type).ok_or_else(|| {
            Error::Entity(format!("no collection for entity type '{}'", entity_type))
        })?;

        let record = records
            .iter_mut()
            .find(|record| record.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| Error::Entity(format!("{} '{}' not found", entity_type, id)))?;

        if let Some(object) = record.as_object_mut() {
            for (key, value) in patch {
                object.insert(key.clone(), value.clone());
            }
        }
        Ok(record.clone())
    }

    async fn current_user(&self) -> Result<User> {
        self.user
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::Fetch("not authenticated".to_string()))
    }
}
