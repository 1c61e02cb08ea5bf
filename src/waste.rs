//! Waste identification and return planning.
//!
//! Items become waste when they expire or run out of uses. A return plan moves
//! as many of them as the weight budget allows into the undocking container,
//! expired items first, and lists how to dig each one out.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{Container, Item, RetrievalStep, WasteItem, WasteReason};
use crate::retrieval::{BlockingOrder, plan_retrieval};

/// Moving one waste item to the undocking container.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStep {
    pub step: usize,
    pub item_id: String,
    pub item_name: String,
    pub from_container: Option<String>,
    pub to_container: String,
}

/// Manifest line for an accepted waste item.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    pub item_id: String,
    pub name: String,
    pub reason: WasteReason,
}

/// Summary of what leaves with the undocking container.
///
/// # Fields
/// * `undocking_container_id` - Destination of every accepted item
/// * `undocking_date` - Planned undocking time, echoed from the request
/// * `return_items` - Accepted items in plan order
/// * `total_volume` - Sum of the accepted items' box volumes, 0 for unplaced ones
/// * `total_weight` - Sum of the accepted items' weights, never above the budget
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnManifest {
    pub undocking_container_id: String,
    pub undocking_date: DateTime<Utc>,
    pub return_items: Vec<ReturnItem>,
    pub total_volume: f64,
    pub total_weight: f64,
}

/// Result of [`plan_return`]: moves, the digging steps behind them and the manifest.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPlan {
    pub return_plan: Vec<ReturnStep>,
    pub retrieval_steps: Vec<RetrievalStep>,
    pub return_manifest: ReturnManifest,
}

/// Classifies an item, checking expiry before usage.
pub fn waste_reason(item: &Item, now: DateTime<Utc>) -> Option<WasteReason> {
    if item.is_expired(now) {
        Some(WasteReason::Expired)
    } else if item.is_depleted() {
        Some(WasteReason::OutOfUses)
    } else {
        None
    }
}

/// Every item that is expired at `now` or has no uses left, in input order.
pub fn identify_waste(items: &[Item], now: DateTime<Utc>) -> Vec<WasteItem> {
    items
        .iter()
        .filter_map(|item| {
            waste_reason(item, now).map(|reason| WasteItem {
                item_id: item.id.clone(),
                name: item.name.clone(),
                reason,
                container_id: item.container_id.clone(),
                position: item.position,
            })
        })
        .collect()
}

/// Builds a return plan under a weight budget.
///
/// Waste items are taken expired-first (stable within each reason) and
/// accepted greedily while the running weight stays within `max_weight`. An
/// item that does not fit is skipped for good, even if a lighter one later
/// would. Waste entries whose item is no longer in `items` are ignored.
///
/// Retrieval steps for all accepted items are concatenated and numbered
/// contiguously. Items already moved out earlier in the plan no longer block
/// later ones.
///
/// Because of that, the steps for an item can be shorter than what a
/// standalone search for the same item would produce: a blocker that is
/// itself waste and was accepted earlier is not set aside or placed back
/// again. The first accepted item always matches its search plan.
pub fn plan_return(
    waste: &[WasteItem],
    items: &[Item],
    destination: &Container,
    max_weight: f64,
    undocking_date: DateTime<Utc>,
    order: BlockingOrder,
) -> ReturnPlan {
    let by_id: HashMap<&str, &Item> = items.iter().map(|item| (item.id.as_str(), item)).collect();

    let mut ordered: Vec<&WasteItem> = waste.iter().collect();
    ordered.sort_by_key(|entry| entry.reason);

    let mut accepted: Vec<(&WasteItem, &Item)> = Vec::new();
    let mut total_weight = 0.0;
    for entry in ordered {
        let Some(&item) = by_id.get(entry.item_id.as_str()) else {
            continue;
        };
        if total_weight + item.weight > max_weight {
            continue;
        }
        total_weight += item.weight;
        accepted.push((entry, item));
    }

    let mut return_plan = Vec::with_capacity(accepted.len());
    let mut retrieval_steps = Vec::new();
    let mut moved: HashSet<&str> = HashSet::new();

    for (idx, (entry, item)) in accepted.iter().enumerate() {
        return_plan.push(ReturnStep {
            step: idx + 1,
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            from_container: item.container_id.clone(),
            to_container: destination.id.clone(),
        });

        let occupants: Vec<Item> = match &item.container_id {
            Some(container_id) => items
                .iter()
                .filter(|other| other.container_id.as_deref() == Some(container_id.as_str()))
                .filter(|other| !moved.contains(other.id.as_str()))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        for mut step in plan_retrieval(item, &occupants, order) {
            step.step = retrieval_steps.len() + 1;
            retrieval_steps.push(step);
        }
        moved.insert(entry.item_id.as_str());
    }

    let return_items: Vec<ReturnItem> = accepted
        .iter()
        .map(|(entry, _)| ReturnItem {
            item_id: entry.item_id.clone(),
            name: entry.name.clone(),
            reason: entry.reason,
        })
        .collect();
    let total_volume: f64 = accepted.iter().map(|(_, item)| item.volume()).sum();

    ReturnPlan {
        return_plan,
        retrieval_steps,
        return_manifest: ReturnManifest {
            undocking_container_id: destination.id.clone(),
            undocking_date,
            return_items,
            total_volume,
            total_weight,
        },
    }
}
