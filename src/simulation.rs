//! Time simulation: advance the mission clock and consume supplies.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::error::{Result, StoreError};
use crate::model::{Item, ItemRef, ValidationError};
use crate::selector::select;
use crate::store::{InventoryStore, StoreResult};

const SECONDS_PER_DAY: i64 = 86_400;

/// Longest span a single simulation may cover (about 100 years).
pub const MAX_SIMULATION_DAYS: u32 = 36_500;

/// How far the clock moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimulationSpan {
    /// A fixed number of days.
    Days(u32),
    /// Up to a target time; a partial last day counts as a full day.
    Until(DateTime<Utc>),
}

fn span_too_long(days: impl std::fmt::Display) -> ValidationError {
    ValidationError::InvalidField(format!(
        "simulation span of {} days exceeds the limit of {} days",
        days, MAX_SIMULATION_DAYS
    ))
}

impl SimulationSpan {
    /// Target time and number of usage days, starting at `now`.
    ///
    /// A target in the past leaves the clock where it is. A partial day counts
    /// as a full day of usage.
    ///
    /// # Returns
    /// `(new_date, days)`, or `InvalidField` when the span is longer than
    /// [`MAX_SIMULATION_DAYS`] or the new date is out of the calendar range.
    pub fn resolve(
        &self,
        now: DateTime<Utc>,
    ) -> std::result::Result<(DateTime<Utc>, u32), ValidationError> {
        match *self {
            SimulationSpan::Days(days) => {
                if days > MAX_SIMULATION_DAYS {
                    return Err(span_too_long(days));
                }
                let new_date = now
                    .checked_add_signed(Duration::days(i64::from(days)))
                    .ok_or_else(|| {
                        ValidationError::InvalidField(format!(
                            "simulating {} days from {} leaves the supported date range",
                            days, now
                        ))
                    })?;
                Ok((new_date, days))
            }
            SimulationSpan::Until(target) if target <= now => Ok((now, 0)),
            SimulationSpan::Until(target) => {
                let seconds = (target - now).num_seconds();
                let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
                match u32::try_from(days) {
                    Ok(days) if days <= MAX_SIMULATION_DAYS => Ok((target, days)),
                    _ => Err(span_too_long(days)),
                }
            }
        }
    }
}

/// Usage snapshot of one item after the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemUsage {
    pub item_id: String,
    pub name: String,
    /// `None` for items without a usage limit.
    pub remaining_uses: Option<u32>,
}

impl From<&Item> for ItemUsage {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            remaining_uses: item.remaining_uses(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulationChanges {
    pub items_used: Vec<ItemUsage>,
    pub items_expired: Vec<ItemUsage>,
    pub items_depleted_today: Vec<ItemUsage>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutcome {
    pub new_date: DateTime<Utc>,
    pub days: u32,
    pub changes: SimulationChanges,
}

/// Resolves a reference to a concrete item.
///
/// Name lookups prefer exact (case-insensitive) matches over substring
/// matches and then pick the item that expires first.
pub fn resolve_item(store: &dyn InventoryStore, reference: &ItemRef) -> StoreResult<Option<Item>> {
    match reference {
        ItemRef::ById(id) => store.get_item_by_id(id),
        ItemRef::ByName(name) => {
            let candidates = store.get_items_by_name(name)?;
            let exact: Vec<Item> = candidates
                .iter()
                .filter(|item| item.name.eq_ignore_ascii_case(name.trim()))
                .cloned()
                .collect();
            let pool = if exact.is_empty() { &candidates } else { &exact };
            Ok(select(pool, |_| 0).cloned())
        }
    }
}

/// Uses each referenced item once per simulated day and reports the effects.
///
/// Depleted items are not used further. Unknown references are skipped.
/// The store clock is not moved here.
///
/// # Errors
/// `InvalidInput` for a span that cannot be simulated (see
/// [`SimulationSpan::resolve`]); nothing is used in that case.
pub fn simulate(
    store: &dyn InventoryStore,
    span: SimulationSpan,
    usage: &[ItemRef],
    now: DateTime<Utc>,
) -> Result<SimulationOutcome> {
    let (new_date, days) = span.resolve(now)?;

    let mut targets: Vec<String> = Vec::new();
    for reference in usage {
        match resolve_item(store, reference)? {
            Some(item) if !targets.contains(&item.id) => targets.push(item.id),
            Some(_) => {}
            None => warn!(%reference, "simulation skips unknown item"),
        }
    }

    let mut used: Vec<Item> = Vec::new();
    let mut depleted: Vec<Item> = Vec::new();
    for _ in 0..days {
        for id in &targets {
            let Some(before) = store.get_item_by_id(id)? else {
                continue;
            };
            if before.is_depleted() {
                continue;
            }
            let after = match store.update_item_usage(id) {
                Ok(item) => item,
                Err(StoreError::ItemNotFound(_)) => continue,
                Err(err) => return Err(err.into()),
            };
            if after.is_depleted() {
                depleted.push(after.clone());
            }
            match used.iter_mut().find(|item| item.id == after.id) {
                Some(slot) => *slot = after,
                None => used.push(after),
            }
        }
    }

    let mut expired_ids: HashSet<String> = HashSet::new();
    let mut expired: Vec<ItemUsage> = Vec::new();
    for item in used.iter().filter(|item| item.is_expired(now)) {
        if expired_ids.insert(item.id.clone()) {
            expired.push(ItemUsage::from(item));
        }
    }
    for item in store.get_all_items()? {
        let expires_in_window = item
            .expiry_date
            .is_some_and(|expiry| now < expiry && expiry <= new_date);
        if expires_in_window && expired_ids.insert(item.id.clone()) {
            expired.push(ItemUsage::from(&item));
        }
    }

    debug!(
        days,
        used = used.len(),
        expired = expired.len(),
        depleted = depleted.len(),
        "simulation finished"
    );

    Ok(SimulationOutcome {
        new_date,
        days,
        changes: SimulationChanges {
            items_used: used.iter().map(ItemUsage::from).collect(),
            items_expired: expired,
            items_depleted_today: depleted.iter().map(ItemUsage::from).collect(),
        },
    })
}
