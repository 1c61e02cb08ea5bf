//! Inventory service.
//!
//! Wires the storage collaborator, the container locks and the planners into
//! the operations exposed to the request layer. The planners themselves are
//! pure; every mutation goes through the store here.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::{InventoryError, Result};
use crate::locks::ContainerLocks;
use crate::model::{
    ActionLog, ActionType, Container, Item, ItemRef, LogFilter, NewActionLog, RetrievalStep,
    ValidationError, WasteItem,
};
use crate::placement::check_placement;
use crate::retrieval::{BlockingOrder, blocking_count, plan_retrieval};
use crate::selector::select;
use crate::simulation::{SimulationOutcome, SimulationSpan, simulate};
use crate::store::InventoryStore;
use crate::types::Position;
use crate::waste::{ReturnPlan, identify_waste, plan_return};

/// Tuning knobs for the planners.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Order in which blocking items are set aside.
    pub blocking_order: BlockingOrder,
    /// Reject boxes that reach outside the container, not only oversized ones.
    pub enforce_container_bounds: bool,
    /// User id recorded for actions the system performs on its own.
    pub system_user: String,
}

impl PlannerConfig {
    pub const DEFAULT_ENFORCE_CONTAINER_BOUNDS: bool = true;
    pub const DEFAULT_SYSTEM_USER: &'static str = "system";

    pub fn builder() -> PlannerConfigBuilder {
        PlannerConfigBuilder::default()
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            blocking_order: BlockingOrder::default(),
            enforce_container_bounds: Self::DEFAULT_ENFORCE_CONTAINER_BOUNDS,
            system_user: Self::DEFAULT_SYSTEM_USER.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PlannerConfigBuilder {
    config: PlannerConfig,
}

impl PlannerConfigBuilder {
    pub fn blocking_order(mut self, order: BlockingOrder) -> Self {
        self.config.blocking_order = order;
        self
    }

    pub fn enforce_container_bounds(mut self, enforce: bool) -> Self {
        self.config.enforce_container_bounds = enforce;
        self
    }

    pub fn system_user(mut self, user: impl Into<String>) -> Self {
        self.config.system_user = user.into();
        self
    }

    pub fn build(self) -> PlannerConfig {
        self.config
    }
}

/// Result of a search.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub found: bool,
    pub item: Option<Item>,
    pub retrieval_steps: Vec<RetrievalStep>,
}

/// One placed item in an arrangement export.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementEntry {
    pub item_id: String,
    pub container_id: String,
    pub position: Position,
}

pub struct Inventory {
    store: Arc<dyn InventoryStore>,
    locks: ContainerLocks,
    /// Held for a whole simulation: clock read, usage and clock write.
    clock: Mutex<()>,
    config: PlannerConfig,
}

impl Inventory {
    pub fn new(store: Arc<dyn InventoryStore>, config: PlannerConfig) -> Self {
        Self {
            store,
            locks: ContainerLocks::new(),
            clock: Mutex::new(()),
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Mission time: the simulated clock if it has been advanced, else wall-clock.
    pub fn now(&self) -> Result<DateTime<Utc>> {
        Ok(self.store.current_time()?.unwrap_or_else(Utc::now))
    }

    fn container(&self, id: &str) -> Result<Container> {
        self.store
            .get_container_by_id(id)?
            .ok_or_else(|| InventoryError::ContainerNotFound(id.to_string()))
    }

    fn item(&self, id: &str) -> Result<Item> {
        self.store
            .get_item_by_id(id)?
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))
    }

    fn log(
        &self,
        action_type: ActionType,
        user_id: &str,
        item_id: &str,
        item_name: Option<&str>,
        timestamp: DateTime<Utc>,
        details: Option<String>,
    ) -> Result<ActionLog> {
        Ok(self.store.log_action(NewActionLog {
            action_type,
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            item_name: item_name.map(str::to_string),
            timestamp,
            details,
        })?)
    }

    pub fn create_container(&self, container: Container) -> Result<Container> {
        container.validate()?;
        let created = self.store.create_container(container)?;
        info!(container_id = %created.id, "container created");
        Ok(created)
    }

    pub fn containers(&self) -> Result<Vec<Container>> {
        Ok(self.store.all_containers()?)
    }

    /// Adds an item. A placed item goes through the placement validator first.
    pub fn create_item(&self, mut item: Item) -> Result<Item> {
        item.validate()?;
        match (item.container_id.clone(), item.position) {
            (Some(container_id), Some(position)) => {
                let container = self.container(&container_id)?;
                item.zone = item.zone.or(container.zone.clone());
                self.locks.with_lock(&container_id, || -> Result<Item> {
                    let occupants = self.store.get_items_by_container(&container_id)?;
                    check_placement(
                        &container,
                        &occupants,
                        &item.id,
                        &position,
                        self.config.enforce_container_bounds,
                    )?;
                    Ok(self.store.create_item(item)?)
                })
            }
            (None, None) => Ok(self.store.create_item(item)?),
            _ => Err(ValidationError::InvalidField(
                "containerId and position must be given together".to_string(),
            )
            .into()),
        }
    }

    /// Validates and commits a placement.
    ///
    /// The occupant read, the collision check and the write happen under the
    /// container lock, so two concurrent placements cannot both claim the same
    /// space.
    pub fn place(
        &self,
        container_id: &str,
        item_id: &str,
        position: Position,
        user_id: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Item> {
        let container = self.container(container_id)?;
        self.item(item_id)?;

        let placed = self.locks.with_lock(container_id, || -> Result<Item> {
            let occupants = self.store.get_items_by_container(container_id)?;
            if let Err(err) = check_placement(
                &container,
                &occupants,
                item_id,
                &position,
                self.config.enforce_container_bounds,
            ) {
                warn!(item_id, container_id, error = %err, "placement rejected");
                return Err(err);
            }
            Ok(self
                .store
                .update_item_position(item_id, container_id, position)?)
        })?;

        let timestamp = match timestamp {
            Some(ts) => ts,
            None => self.now()?,
        };
        self.log(
            ActionType::Place,
            user_id,
            &placed.id,
            Some(&placed.name),
            timestamp,
            Some(format!("placed in {}", container_id)),
        )?;
        info!(item_id, container_id, "item placed");
        Ok(placed)
    }

    /// Retrieval plan for an item in its current container.
    pub fn retrieval_plan(&self, item: &Item) -> Result<Vec<RetrievalStep>> {
        let occupants = match &item.container_id {
            Some(container_id) => self.store.get_items_by_container(container_id)?,
            None => Vec::new(),
        };
        Ok(plan_retrieval(item, &occupants, self.config.blocking_order))
    }

    fn complexity(&self, item: &Item) -> usize {
        let occupants = item
            .container_id
            .as_deref()
            .map(|container_id| self.store.get_items_by_container(container_id))
            .transpose()
            .unwrap_or_else(|err| {
                warn!(item_id = %item.id, error = %err, "could not load occupants");
                None
            })
            .unwrap_or_default();
        blocking_count(item, &occupants)
    }

    /// Finds the best matching item and how to get it out.
    ///
    /// A search with a `user_id` is recorded in the audit log.
    pub fn search(&self, reference: &ItemRef, user_id: Option<&str>) -> Result<SearchOutcome> {
        let candidates = match reference {
            ItemRef::ById(id) => self.store.get_item_by_id(id)?.into_iter().collect(),
            ItemRef::ByName(name) => self.store.get_items_by_name(name)?,
        };
        let selected = select(&candidates, |item| self.complexity(item));

        if let Some(user_id) = user_id {
            let (item_id, item_name) = match (selected, reference) {
                (Some(item), _) => (item.id.as_str(), Some(item.name.as_str())),
                (None, ItemRef::ById(id)) => (id.as_str(), None),
                (None, ItemRef::ByName(name)) => ("", Some(name.as_str())),
            };
            self.log(ActionType::Search, user_id, item_id, item_name, self.now()?, None)?;
        }

        let Some(selected) = selected else {
            return Ok(SearchOutcome {
                found: false,
                item: None,
                retrieval_steps: Vec::new(),
            });
        };
        let retrieval_steps = self.retrieval_plan(selected)?;
        Ok(SearchOutcome {
            found: true,
            item: Some(selected.clone()),
            retrieval_steps,
        })
    }

    /// Marks one use of an item. The increment is a single atomic store update.
    pub fn retrieve(
        &self,
        item_id: &str,
        user_id: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Item> {
        let item = self.store.update_item_usage(item_id)?;
        let timestamp = match timestamp {
            Some(ts) => ts,
            None => self.now()?,
        };
        self.log(
            ActionType::Retrieve,
            user_id,
            &item.id,
            Some(&item.name),
            timestamp,
            None,
        )?;
        info!(item_id, usage_count = item.usage_count, "item retrieved");
        Ok(item)
    }

    /// Advances the mission clock and consumes supplies.
    ///
    /// Simulations run one at a time so that concurrent requests advance the
    /// clock by the sum of their spans.
    pub fn simulate(&self, span: SimulationSpan, usage: &[ItemRef]) -> Result<SimulationOutcome> {
        let _clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.now()?;
        let outcome = simulate(self.store.as_ref(), span, usage, now)?;
        self.store.set_current_time(outcome.new_date)?;
        self.log(
            ActionType::Simulation,
            &self.config.system_user,
            "simulation",
            None,
            outcome.new_date,
            Some(format!("Simulated {} day(s)", outcome.days)),
        )?;
        info!(
            days = outcome.days,
            new_date = %outcome.new_date.to_rfc3339(),
            "simulation advanced the clock"
        );
        Ok(outcome)
    }

    pub fn identify_waste(&self) -> Result<Vec<WasteItem>> {
        let items = self.store.get_all_items()?;
        Ok(identify_waste(&items, self.now()?))
    }

    /// Plans moving waste into the undocking container within `max_weight`.
    pub fn plan_return(
        &self,
        undocking_container_id: &str,
        undocking_date: DateTime<Utc>,
        max_weight: f64,
    ) -> Result<ReturnPlan> {
        if !max_weight.is_finite() || max_weight < 0.0 {
            return Err(ValidationError::InvalidWeight(format!(
                "maxWeight must not be negative, got: {}",
                max_weight
            ))
            .into());
        }
        let destination = self.container(undocking_container_id)?;
        let items = self.store.get_all_items()?;
        let waste = identify_waste(&items, self.now()?);
        let plan = plan_return(
            &waste,
            &items,
            &destination,
            max_weight,
            undocking_date,
            self.config.blocking_order,
        );
        info!(
            container_id = undocking_container_id,
            items = plan.return_plan.len(),
            total_weight = plan.return_manifest.total_weight,
            "return plan generated"
        );
        Ok(plan)
    }

    /// Removes every item in the undocking container. Irreversible.
    pub fn complete_undocking(
        &self,
        undocking_container_id: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<usize> {
        let removed = self.locks.with_lock(undocking_container_id, || {
            self.store.remove_items_in_container(undocking_container_id)
        })?;
        if removed == 0 {
            return Err(InventoryError::EmptyContainer(
                undocking_container_id.to_string(),
            ));
        }

        let timestamp = match timestamp {
            Some(ts) => ts,
            None => self.now()?,
        };
        self.log(
            ActionType::Undocking,
            &self.config.system_user,
            undocking_container_id,
            None,
            timestamp,
            Some(format!("Undocking container with {} items", removed)),
        )?;
        info!(container_id = undocking_container_id, removed, "undocking completed");
        Ok(removed)
    }

    pub fn logs(&self, filter: &LogFilter) -> Result<Vec<ActionLog>> {
        Ok(self.store.query_logs(filter)?)
    }

    /// Every placed item with its container and box.
    pub fn arrangement(&self) -> Result<Vec<ArrangementEntry>> {
        Ok(self
            .store
            .get_all_items()?
            .into_iter()
            .filter_map(|item| {
                let (container_id, position) = item.placement()?;
                Some(ArrangementEntry {
                    item_id: item.id.clone(),
                    container_id: container_id.to_string(),
                    position: *position,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RetrievalAction;
    use crate::model::tests::{container, item};
    use crate::store::MemoryStore;
    use crate::types::Coordinates;
    use chrono::{Duration, TimeZone};

    fn boxed(start: (f64, f64, f64), end: (f64, f64, f64)) -> Position {
        Position::new(start.into(), end.into())
    }

    fn unplaced(id: &str) -> Item {
        Item {
            container_id: None,
            position: None,
            ..item(id, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0))
        }
    }

    fn inventory() -> Inventory {
        let inv = Inventory::new(Arc::new(MemoryStore::new()), PlannerConfig::default());
        inv.create_container(container("contA", (100.0, 100.0, 100.0)))
            .unwrap();
        inv.create_container(container("undock", (100.0, 100.0, 100.0)))
            .unwrap();
        inv
    }

    #[test]
    fn disjoint_items_place_and_overlapping_items_collide() {
        let inv = inventory();
        for id in ["x", "y", "z"] {
            inv.create_item(unplaced(id)).unwrap();
        }
        inv.place("contA", "x", boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0)), "u", None)
            .unwrap();
        inv.place("contA", "y", boxed((10.0, 0.0, 0.0), (20.0, 10.0, 10.0)), "u", None)
            .unwrap();
        let err = inv
            .place("contA", "z", boxed((5.0, 5.0, 5.0), (15.0, 15.0, 15.0)), "u", None)
            .unwrap_err();
        assert_eq!(err.code(), "collision_detected");
        assert!(inv.store.get_item_by_id("z").unwrap().unwrap().container_id.is_none());
    }

    #[test]
    fn placement_into_unknown_container_fails() {
        let inv = inventory();
        inv.create_item(unplaced("x")).unwrap();
        let err = inv
            .place("nowhere", "x", boxed((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)), "u", None)
            .unwrap_err();
        assert_eq!(err, InventoryError::ContainerNotFound("nowhere".into()));
    }

    #[test]
    fn placement_of_unknown_item_fails() {
        let inv = inventory();
        let err = inv
            .place("contA", "ghost", boxed((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)), "u", None)
            .unwrap_err();
        assert_eq!(err, InventoryError::ItemNotFound("ghost".into()));
    }

    #[test]
    fn oversized_placement_is_item_too_large() {
        let inv = inventory();
        inv.create_item(unplaced("x")).unwrap();
        let err = inv
            .place("contA", "x", boxed((0.0, 0.0, 0.0), (101.0, 10.0, 10.0)), "u", None)
            .unwrap_err();
        assert_eq!(err.code(), "item_too_large");
    }

    #[test]
    fn placed_item_takes_container_zone_and_is_logged() {
        let inv = inventory();
        inv.create_item(unplaced("x")).unwrap();
        let ts = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
        let placed = inv
            .place("contA", "x", boxed((0.0, 0.0, 0.0), (5.0, 5.0, 5.0)), "astro", Some(ts))
            .unwrap();
        assert_eq!(placed.zone.as_deref(), Some("Storage"));

        let logs = inv.logs(&LogFilter::default()).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action_type, ActionType::Place);
        assert_eq!(logs[0].user_id, "astro");
        assert_eq!(logs[0].timestamp, ts);
    }

    #[test]
    fn concurrent_placements_into_one_spot_admit_a_single_winner() {
        let inv = Arc::new(inventory());
        let ids: Vec<String> = (0..8).map(|i| format!("item-{}", i)).collect();
        for id in &ids {
            inv.create_item(unplaced(id)).unwrap();
        }

        let handles: Vec<_> = ids
            .iter()
            .cloned()
            .map(|id| {
                let inv = Arc::clone(&inv);
                std::thread::spawn(move || {
                    inv.place("contA", &id, boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0)), "u", None)
                        .is_ok()
                })
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(inv.store.get_items_by_container("contA").unwrap().len(), 1);
    }

    #[test]
    fn create_item_validates_initial_placement() {
        let inv = inventory();
        inv.create_item(item("a", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0)))
            .unwrap();
        let err = inv
            .create_item(item("b", (5.0, 5.0, 5.0), (15.0, 15.0, 15.0)))
            .unwrap_err();
        assert_eq!(err.code(), "collision_detected");

        let half = Item {
            position: None,
            ..item("c", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0))
        };
        assert_eq!(inv.create_item(half).unwrap_err().code(), "invalid_input");
    }

    #[test]
    fn search_by_name_picks_soonest_expiry_and_plans_retrieval() {
        let inv = inventory();
        let mut low = item("low", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        low.name = "Oxygen Canister".into();
        low.expiry_date = Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        let mut lid = item("lid", (0.0, 0.0, 10.0), (10.0, 10.0, 20.0));
        lid.name = "Oxygen Canister".into();
        lid.expiry_date = Some(Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap());
        inv.create_item(low).unwrap();
        inv.create_item(lid).unwrap();

        let outcome = inv
            .search(&ItemRef::ByName("oxygen".into()), Some("astro"))
            .unwrap();
        assert!(outcome.found);
        assert_eq!(outcome.item.unwrap().id, "low");
        let actions: Vec<RetrievalAction> = outcome.retrieval_steps.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                RetrievalAction::SetAside,
                RetrievalAction::Retrieve,
                RetrievalAction::PlaceBack
            ]
        );
        let searches = inv
            .logs(&LogFilter {
                action_type: Some(ActionType::Search),
                ..LogFilter::default()
            })
            .unwrap();
        assert_eq!(searches.len(), 1);
    }

    #[test]
    fn search_with_equal_expiry_prefers_easier_item() {
        let inv = inventory();
        let mut buried = item("buried", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        buried.name = "Wrench".into();
        let lid = item("lid", (0.0, 0.0, 10.0), (10.0, 10.0, 20.0));
        let mut free = item("free", (50.0, 50.0, 0.0), (60.0, 60.0, 10.0));
        free.name = "Wrench".into();
        for it in [buried, lid, free] {
            inv.create_item(it).unwrap();
        }
        let outcome = inv.search(&ItemRef::ByName("wrench".into()), None).unwrap();
        assert_eq!(outcome.item.unwrap().id, "free");
        assert!(inv.logs(&LogFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn search_for_missing_item_is_not_found() {
        let inv = inventory();
        let outcome = inv.search(&ItemRef::ById("nope".into()), None).unwrap();
        assert!(!outcome.found);
        assert!(outcome.item.is_none());
        assert!(outcome.retrieval_steps.is_empty());
    }

    #[test]
    fn retrieve_increments_usage_and_logs() {
        let inv = inventory();
        inv.create_item(unplaced("kit")).unwrap();
        assert_eq!(inv.retrieve("kit", "astro", None).unwrap().usage_count, 1);
        assert_eq!(inv.retrieve("kit", "astro", None).unwrap().usage_count, 2);
        assert_eq!(
            inv.retrieve("ghost", "astro", None).unwrap_err(),
            InventoryError::ItemNotFound("ghost".into())
        );
        let retrievals = inv
            .logs(&LogFilter {
                item_id: Some("kit".into()),
                ..LogFilter::default()
            })
            .unwrap();
        assert_eq!(retrievals.len(), 2);
    }

    #[test]
    fn concurrent_retrievals_do_not_lose_updates() {
        let inv = Arc::new(inventory());
        inv.create_item(unplaced("kit")).unwrap();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let inv = Arc::clone(&inv);
                std::thread::spawn(move || inv.retrieve("kit", "u", None).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(inv.store.get_item_by_id("kit").unwrap().unwrap().usage_count, 16);
    }

    #[test]
    fn simulation_moves_the_clock_used_by_waste_identification() {
        let inv = inventory();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        inv.store.set_current_time(start).unwrap();
        let mut milk = item("milk", (0.0, 0.0, 0.0), (5.0, 5.0, 5.0));
        milk.expiry_date = Some(start + Duration::days(3));
        inv.create_item(milk).unwrap();

        assert!(inv.identify_waste().unwrap().is_empty());
        let outcome = inv.simulate(SimulationSpan::Days(5), &[]).unwrap();
        assert_eq!(outcome.new_date, start + Duration::days(5));
        assert_eq!(inv.now().unwrap(), start + Duration::days(5));
        assert_eq!(inv.identify_waste().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_simulations_advance_the_clock_by_every_span() {
        let inv = Arc::new(inventory());
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        inv.store.set_current_time(start).unwrap();
        inv.create_item(unplaced("kit")).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let inv = Arc::clone(&inv);
                std::thread::spawn(move || {
                    inv.simulate(SimulationSpan::Days(50), &[ItemRef::ById("kit".into())])
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(inv.now().unwrap(), start + Duration::days(200));
        assert_eq!(inv.store.get_item_by_id("kit").unwrap().unwrap().usage_count, 200);
    }

    #[test]
    fn oversized_simulation_leaves_the_clock_alone() {
        let inv = inventory();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        inv.store.set_current_time(start).unwrap();
        let err = inv.simulate(SimulationSpan::Days(u32::MAX), &[]).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(inv.now().unwrap(), start);
    }

    #[test]
    fn return_plan_requires_known_container() {
        let inv = inventory();
        let err = inv.plan_return("ghost", Utc::now(), 10.0).unwrap_err();
        assert_eq!(err, InventoryError::ContainerNotFound("ghost".into()));
        assert_eq!(
            inv.plan_return("undock", Utc::now(), -1.0).unwrap_err().code(),
            "invalid_input"
        );
    }

    #[test]
    fn complete_undocking_removes_items_once() {
        let inv = inventory();
        for (idx, id) in ["a", "b", "c"].into_iter().enumerate() {
            let x = idx as f64 * 10.0;
            let it = Item {
                container_id: Some("undock".into()),
                ..item(id, (x, 0.0, 0.0), (x + 10.0, 10.0, 10.0))
            };
            inv.create_item(it).unwrap();
        }
        inv.create_item(item("keep", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)))
            .unwrap();

        assert_eq!(inv.complete_undocking("undock", None).unwrap(), 3);
        assert_eq!(
            inv.complete_undocking("undock", None).unwrap_err(),
            InventoryError::EmptyContainer("undock".into())
        );
        assert_eq!(inv.store.get_all_items().unwrap().len(), 1);
    }

    #[test]
    fn complete_undocking_spares_items_moved_out_first() {
        let inv = inventory();
        for (id, x) in [("a", 0.0), ("b", 20.0)] {
            let it = Item {
                container_id: Some("undock".into()),
                ..item(id, (x, 0.0, 0.0), (x + 10.0, 10.0, 10.0))
            };
            inv.create_item(it).unwrap();
        }
        inv.place("contA", "a", boxed((50.0, 0.0, 0.0), (60.0, 10.0, 10.0)), "u", None)
            .unwrap();

        assert_eq!(inv.complete_undocking("undock", None).unwrap(), 1);
        let survivor = inv.store.get_item_by_id("a").unwrap().unwrap();
        assert_eq!(survivor.container_id.as_deref(), Some("contA"));
        assert!(inv.store.get_item_by_id("b").unwrap().is_none());
    }

    #[test]
    fn arrangement_lists_placed_items_only() {
        let inv = inventory();
        inv.create_item(item("a", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)))
            .unwrap();
        inv.create_item(unplaced("loose")).unwrap();
        let arrangement = inv.arrangement().unwrap();
        assert_eq!(arrangement.len(), 1);
        assert_eq!(arrangement[0].container_id, "contA");
        assert_eq!(
            arrangement[0].position.end,
            Coordinates::new(1.0, 1.0, 1.0)
        );
    }
}
