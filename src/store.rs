//! Storage collaborator for items, containers and the audit log.
//!
//! `InventoryStore` is the only seam the core talks through. `MemoryStore`
//! is the bundled realisation: records keyed by id with a secondary index
//! from container id to the items placed in it. Every method is a single
//! atomic read-modify-write under the store lock.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{ActionLog, Container, Item, LogFilter, NewActionLog};
use crate::types::Position;

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access interface used by the inventory service.
///
/// Implementations must make every method atomic on its own; callers that
/// need more than one call to be consistent hold a container lock around them.
///
/// # Examples
/// ```
/// use stowage::store::{InventoryStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// assert!(store.get_all_items().unwrap().is_empty());
/// assert_eq!(store.current_time().unwrap(), None);
/// ```
pub trait InventoryStore: Send + Sync {
    /// Looks up a single item.
    ///
    /// # Returns
    /// `None` when no item has this id.
    fn get_item_by_id(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Case-insensitive substring match on the item name.
    fn get_items_by_name(&self, pattern: &str) -> StoreResult<Vec<Item>>;

    /// Every item, placed or not, ordered by id.
    fn get_all_items(&self) -> StoreResult<Vec<Item>>;

    /// Items currently placed in the container, ordered by id.
    fn get_items_by_container(&self, container_id: &str) -> StoreResult<Vec<Item>>;

    fn get_container_by_id(&self, id: &str) -> StoreResult<Option<Container>>;

    /// Every container, ordered by id.
    fn all_containers(&self) -> StoreResult<Vec<Container>>;

    /// Fails with `Duplicate` if the id is taken.
    fn create_container(&self, container: Container) -> StoreResult<Container>;

    /// Fails with `Duplicate` if the id is taken.
    fn create_item(&self, item: Item) -> StoreResult<Item>;

    /// Moves an item into a container at the given box.
    ///
    /// The item takes over the container's zone. No collision check happens
    /// here; that is the caller's job under the container lock.
    ///
    /// # Parameters
    /// * `id` - Item to move
    /// * `container_id` - Destination container
    /// * `position` - Box inside the destination
    ///
    /// # Returns
    /// The updated item, or `ItemNotFound` / `ContainerNotFound`.
    fn update_item_position(
        &self,
        id: &str,
        container_id: &str,
        position: Position,
    ) -> StoreResult<Item>;

    /// Increments the usage count by one, saturating at `max_uses`.
    fn update_item_usage(&self, id: &str) -> StoreResult<Item>;

    /// Deletes the given items and returns how many existed.
    fn remove_items(&self, ids: &[String]) -> StoreResult<usize>;

    /// Deletes every item placed in the container and returns the count.
    ///
    /// Selection and deletion happen as one step, so an item moved into or
    /// out of the container concurrently is either fully counted or untouched.
    fn remove_items_in_container(&self, container_id: &str) -> StoreResult<usize>;

    /// Appends an audit record and returns it with its assigned id.
    fn log_action(&self, entry: NewActionLog) -> StoreResult<ActionLog>;

    /// Audit records matching the filter, ordered by timestamp.
    fn query_logs(&self, filter: &LogFilter) -> StoreResult<Vec<ActionLog>>;

    /// Simulated mission time, if the clock has been advanced.
    fn current_time(&self) -> StoreResult<Option<DateTime<Utc>>>;

    /// Moves the mission clock. Later calls to `current_time` return `now`.
    fn set_current_time(&self, now: DateTime<Utc>) -> StoreResult<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    items: HashMap<String, Item>,
    containers: HashMap<String, Container>,
    // container id -> ids of the items placed in it
    by_container: HashMap<String, BTreeSet<String>>,
    logs: Vec<ActionLog>,
    next_log_id: u64,
    clock: Option<DateTime<Utc>>,
}

impl MemoryState {
    fn index(&mut self, item: &Item) {
        if let Some(container_id) = &item.container_id {
            self.by_container
                .entry(container_id.clone())
                .or_default()
                .insert(item.id.clone());
        }
    }

    fn unindex(&mut self, item: &Item) {
        if let Some(container_id) = &item.container_id {
            if let Some(ids) = self.by_container.get_mut(container_id) {
                ids.remove(&item.id);
                if ids.is_empty() {
                    self.by_container.remove(container_id);
                }
            }
        }
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.items.remove(id) {
            Some(item) => {
                self.unindex(&item);
                true
            }
            None => false,
        }
    }
}

/// In-memory store. Not durable across restarts.
///
/// A single `RwLock` guards all records, so reads run in parallel and each
/// write is one critical section.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InventoryStore for MemoryStore {
    fn get_item_by_id(&self, id: &str) -> StoreResult<Option<Item>> {
        Ok(self.read().items.get(id).cloned())
    }

    fn get_items_by_name(&self, pattern: &str) -> StoreResult<Vec<Item>> {
        let needle = pattern.to_lowercase();
        let state = self.read();
        let mut items: Vec<Item> = state
            .items
            .values()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    fn get_all_items(&self) -> StoreResult<Vec<Item>> {
        let mut items: Vec<Item> = self.read().items.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    fn get_items_by_container(&self, container_id: &str) -> StoreResult<Vec<Item>> {
        let state = self.read();
        let items = state
            .by_container
            .get(container_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.items.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    fn get_container_by_id(&self, id: &str) -> StoreResult<Option<Container>> {
        Ok(self.read().containers.get(id).cloned())
    }

    fn all_containers(&self) -> StoreResult<Vec<Container>> {
        let mut containers: Vec<Container> = self.read().containers.values().cloned().collect();
        containers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(containers)
    }

    fn create_container(&self, container: Container) -> StoreResult<Container> {
        let mut state = self.write();
        if state.containers.contains_key(&container.id) {
            return Err(StoreError::Duplicate(container.id));
        }
        state
            .containers
            .insert(container.id.clone(), container.clone());
        Ok(container)
    }

    fn create_item(&self, item: Item) -> StoreResult<Item> {
        let mut state = self.write();
        if state.items.contains_key(&item.id) {
            return Err(StoreError::Duplicate(item.id));
        }
        state.index(&item);
        state.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    fn update_item_position(
        &self,
        id: &str,
        container_id: &str,
        position: Position,
    ) -> StoreResult<Item> {
        let mut state = self.write();
        let zone = state
            .containers
            .get(container_id)
            .ok_or_else(|| StoreError::ContainerNotFound(container_id.to_string()))?
            .zone
            .clone();
        let mut item = state
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))?;

        state.unindex(&item);
        item.container_id = Some(container_id.to_string());
        item.zone = zone;
        item.position = Some(position);
        state.index(&item);
        state.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    fn update_item_usage(&self, id: &str) -> StoreResult<Item> {
        let mut state = self.write();
        let item = state
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))?;
        let next = item.usage_count.saturating_add(1);
        item.usage_count = match item.max_uses {
            Some(max_uses) => next.min(max_uses),
            None => next,
        };
        Ok(item.clone())
    }

    fn remove_items(&self, ids: &[String]) -> StoreResult<usize> {
        let mut state = self.write();
        Ok(ids.iter().filter(|id| state.remove(id)).count())
    }

    fn remove_items_in_container(&self, container_id: &str) -> StoreResult<usize> {
        let mut state = self.write();
        let ids: Vec<String> = state
            .by_container
            .get(container_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default();
        Ok(ids.iter().filter(|id| state.remove(id)).count())
    }

    fn log_action(&self, entry: NewActionLog) -> StoreResult<ActionLog> {
        let mut state = self.write();
        state.next_log_id += 1;
        let log = ActionLog {
            id: state.next_log_id,
            action_type: entry.action_type,
            user_id: entry.user_id,
            item_id: entry.item_id,
            item_name: entry.item_name,
            timestamp: entry.timestamp,
            details: entry.details,
        };
        state.logs.push(log.clone());
        Ok(log)
    }

    fn query_logs(&self, filter: &LogFilter) -> StoreResult<Vec<ActionLog>> {
        let mut logs: Vec<ActionLog> = self
            .read()
            .logs
            .iter()
            .filter(|log| filter.matches(log))
            .cloned()
            .collect();
        logs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(logs)
    }

    fn current_time(&self) -> StoreResult<Option<DateTime<Utc>>> {
        Ok(self.read().clock)
    }

    fn set_current_time(&self, now: DateTime<Utc>) -> StoreResult<()> {
        self.write().clock = Some(now);
        Ok(())
    }
}
