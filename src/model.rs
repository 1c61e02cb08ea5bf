//! Data model of the stowage inventory.
//!
//! - `Item`: a stored supply with usage and expiry tracking
//! - `Container`: a fixed-size storage unit; items reference it by id
//! - `ActionLog`: append-only audit record
//! - `WasteItem` / `RetrievalStep`: derived values computed on demand

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::types::{Coordinates, Position};

/// Validation error for incoming records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

fn validate_dimension(value: f64, name: &str) -> Result<(), ValidationError> {
    if value <= 0.0 || !value.is_finite() {
        return Err(ValidationError::InvalidDimension(format!(
            "{} must be positive, got: {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_weight_value(value: f64, name: &str) -> Result<(), ValidationError> {
    if value < 0.0 || !value.is_finite() {
        return Err(ValidationError::InvalidWeight(format!(
            "{} must not be negative, got: {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_id(value: &str, name: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidField(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(())
}

/// Checks that a requested position is a proper box (`end >= start`, finite).
pub fn validate_position(position: &Position) -> Result<(), ValidationError> {
    if !position.is_well_formed() {
        return Err(ValidationError::InvalidPosition(format!(
            "end coordinates must be >= start coordinates on every axis, got {:?}",
            position
        )));
    }
    Ok(())
}

/// A stored supply.
///
/// `container_id` and `position` are set together when the item is placed.
///
/// # Fields
/// * `id` - Unique identifier, chosen by the caller
/// * `name` - Display name, used for name lookups
/// * `container_id` - Container the item sits in, `None` while unplaced
/// * `zone` - Zone inherited from the container on placement
/// * `position` - Occupied box in the container's frame
/// * `expiry_date` - Moment after which the item counts as expired
/// * `usage_count` - Uses consumed so far
/// * `max_uses` - Usage limit, `None` for unlimited items
/// * `weight` - Mass in kg
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "item-001",
    "name": "Food Packet",
    "containerId": "contA",
    "zone": "Crew Quarters",
    "position": {
        "startCoordinates": {"width": 0.0, "depth": 0.0, "height": 0.0},
        "endCoordinates": {"width": 10.0, "depth": 10.0, "height": 20.0}
    },
    "expiryDate": "2026-12-01T00:00:00Z",
    "usageCount": 0,
    "maxUses": 30,
    "weight": 5.0
}))]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub weight: f64,
}

impl Item {
    /// Checks the record invariants before it enters the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(&self.id, "Item id")?;
        validate_id(&self.name, "Item name")?;
        validate_weight_value(self.weight, "Item weight")?;
        if let Some(position) = &self.position {
            validate_position(position)?;
        }
        if let Some(max_uses) = self.max_uses {
            if self.usage_count > max_uses {
                return Err(ValidationError::InvalidField(format!(
                    "usageCount ({}) exceeds maxUses ({})",
                    self.usage_count, max_uses
                )));
            }
        }
        Ok(())
    }

    /// The item's box, if it is currently placed in a container.
    pub fn placement(&self) -> Option<(&str, &Position)> {
        match (&self.container_id, &self.position) {
            (Some(container_id), Some(position)) => Some((container_id.as_str(), position)),
            _ => None,
        }
    }

    /// Expired strictly before `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use stowage::model::Item;
    ///
    /// let now = Utc::now();
    /// let item = Item {
    ///     id: "milk".into(),
    ///     name: "Milk".into(),
    ///     container_id: None,
    ///     zone: None,
    ///     position: None,
    ///     expiry_date: Some(now),
    ///     usage_count: 0,
    ///     max_uses: None,
    ///     weight: 1.0,
    /// };
    /// assert!(!item.is_expired(now));
    /// assert!(item.is_expired(now + Duration::seconds(1)));
    /// ```
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < now)
    }

    /// All uses consumed. Items without a usage limit never deplete.
    pub fn is_depleted(&self) -> bool {
        self.max_uses
            .is_some_and(|max_uses| self.usage_count >= max_uses)
    }

    /// Remaining uses, `None` for unlimited items.
    pub fn remaining_uses(&self) -> Option<u32> {
        self.max_uses
            .map(|max_uses| max_uses.saturating_sub(self.usage_count))
    }

    /// Volume of the occupied box, zero when unplaced.
    pub fn volume(&self) -> f64 {
        self.position
            .as_ref()
            .map(crate::geometry::volume)
            .unwrap_or(0.0)
    }
}

/// A fixed-size storage unit.
///
/// Its interior spans from the origin to `dimensions`.
///
/// # Fields
/// * `id` - Unique identifier
/// * `name` - Optional display name
/// * `zone` - Module or area the container belongs to
/// * `dimensions` - Interior width, depth and height
/// * `max_weight` - Rated load in kg, informational only
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "contA",
    "name": "Galley Rack A",
    "zone": "Crew Quarters",
    "dimensions": {"width": 100.0, "depth": 85.0, "height": 200.0},
    "maxWeight": 500.0
}))]
pub struct Container {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    pub dimensions: Coordinates,
    #[serde(default)]
    pub max_weight: f64,
}

impl Container {
    /// Checks the record invariants before it enters the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(&self.id, "Container id")?;
        validate_dimension(self.dimensions.width, "Container width")?;
        validate_dimension(self.dimensions.depth, "Container depth")?;
        validate_dimension(self.dimensions.height, "Container height")?;
        validate_weight_value(self.max_weight, "Container max weight")?;
        Ok(())
    }

    /// Interior region of the container in its own frame.
    pub fn bounds(&self) -> Position {
        Position::from_origin(self.dimensions)
    }
}

/// Kind of action recorded in the audit log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// An item was located and a retrieval plan produced.
    Search,
    Retrieve,
    Place,
    Simulation,
    Undocking,
}

impl ActionType {
    /// Wire name, also used in log queries.
    ///
    /// # Returns
    /// The camelCase name, e.g. `"undocking"` for [`ActionType::Undocking`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Search => "search",
            ActionType::Retrieve => "retrieve",
            ActionType::Place => "place",
            ActionType::Simulation => "simulation",
            ActionType::Undocking => "undocking",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit entry before the store assigns its id.
///
/// `item_id` holds the container id for undocking entries and `"simulation"`
/// for simulation entries.
#[derive(Clone, Debug)]
pub struct NewActionLog {
    pub action_type: ActionType,
    pub user_id: String,
    pub item_id: String,
    pub item_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

/// Write-once audit record.
///
/// # Fields
/// * `id` - Sequence number assigned by the store, starting at 1
/// * `action_type` - What happened
/// * `user_id` - Who did it; the system user for simulations and undocking
/// * `item_id` - Subject of the action
/// * `item_name` - Item name at the time of the action, if known
/// * `timestamp` - Mission time of the action
/// * `details` - Free-form description
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionLog {
    pub id: u64,
    pub action_type: ActionType,
    pub user_id: String,
    pub item_id: String,
    pub item_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

/// Filter for audit log queries. Unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct LogFilter {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub item_id: Option<String>,
    pub user_id: Option<String>,
    pub action_type: Option<ActionType>,
}

impl LogFilter {
    /// Bounds are inclusive.
    pub fn matches(&self, log: &ActionLog) -> bool {
        self.start.is_none_or(|start| log.timestamp >= start)
            && self.end.is_none_or(|end| log.timestamp <= end)
            && self
                .item_id
                .as_deref()
                .is_none_or(|item_id| log.item_id == item_id)
            && self
                .user_id
                .as_deref()
                .is_none_or(|user_id| log.user_id == user_id)
            && self
                .action_type
                .is_none_or(|action_type| log.action_type == action_type)
    }
}

/// Why an item is considered waste.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum WasteReason {
    /// Expiry date has passed.
    Expired,
    /// Every allowed use has been consumed.
    #[serde(rename = "Out of Uses")]
    OutOfUses,
}

/// An item that is no longer usable and awaits disposal.
///
/// # Fields
/// * `item_id` - The waste item
/// * `name` - Its display name
/// * `reason` - Expiry wins when both reasons apply
/// * `container_id` - Where it currently sits, if placed
/// * `position` - Its box there, if placed
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteItem {
    pub item_id: String,
    pub name: String,
    pub reason: WasteReason,
    pub container_id: Option<String>,
    pub position: Option<Position>,
}

/// What the crew does with an item during a retrieval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RetrievalAction {
    /// Move a blocking item out of the way.
    SetAside,
    /// Take out the requested item.
    Retrieve,
    /// Return a blocking item to its original box.
    PlaceBack,
}

/// One instruction of a retrieval sequence. Steps are numbered from 1.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalStep {
    pub step: usize,
    pub action: RetrievalAction,
    pub item_id: String,
    pub item_name: String,
}

/// Reference to an item by id or by name, resolved once at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemRef {
    ById(String),
    ByName(String),
}

impl ItemRef {
    /// Builds a reference from optional parts. The id wins when both are set.
    ///
    /// Blank strings count as absent.
    ///
    /// # Examples
    /// ```
    /// use stowage::model::ItemRef;
    ///
    /// let by_id = ItemRef::from_parts(Some("item-7".into()), Some("Wrench".into()));
    /// assert_eq!(by_id, Some(ItemRef::ById("item-7".into())));
    ///
    /// let by_name = ItemRef::from_parts(Some("  ".into()), Some("Wrench".into()));
    /// assert_eq!(by_name, Some(ItemRef::ByName("Wrench".into())));
    ///
    /// assert_eq!(ItemRef::from_parts(None, None), None);
    /// ```
    pub fn from_parts(item_id: Option<String>, name: Option<String>) -> Option<Self> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        match (non_blank(item_id), non_blank(name)) {
            (Some(id), _) => Some(ItemRef::ById(id)),
            (None, Some(name)) => Some(ItemRef::ByName(name)),
            (None, None) => None,
        }
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemRef::ById(id) => write!(f, "id '{}'", id),
            ItemRef::ByName(name) => write!(f, "name '{}'", name),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn item(id: &str, start: (f64, f64, f64), end: (f64, f64, f64)) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            container_id: Some("contA".to_string()),
            zone: Some("Storage".to_string()),
            position: Some(Position::new(start.into(), end.into())),
            expiry_date: None,
            usage_count: 0,
            max_uses: None,
            weight: 1.0,
        }
    }

    pub(crate) fn container(id: &str, dims: (f64, f64, f64)) -> Container {
        Container {
            id: id.to_string(),
            name: None,
            zone: Some("Storage".to_string()),
            dimensions: dims.into(),
            max_weight: 1000.0,
        }
    }

    #[test]
    fn item_rejects_usage_beyond_limit() {
        let mut it = item("a", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        it.max_uses = Some(2);
        it.usage_count = 3;
        assert!(matches!(
            it.validate(),
            Err(ValidationError::InvalidField(_))
        ));
    }

    #[test]
    fn item_rejects_inverted_position() {
        let it = item("a", (2.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        assert!(matches!(
            it.validate(),
            Err(ValidationError::InvalidPosition(_))
        ));
    }

    #[test]
    fn container_requires_positive_dimensions() {
        assert!(container("c", (10.0, 10.0, 10.0)).validate().is_ok());
        assert!(matches!(
            container("c", (10.0, 0.0, 10.0)).validate(),
            Err(ValidationError::InvalidDimension(_))
        ));
    }

    #[test]
    fn expiry_is_strictly_before_now() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut it = item("a", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        assert!(!it.is_expired(now));
        it.expiry_date = Some(now);
        assert!(!it.is_expired(now));
        it.expiry_date = Some(now - chrono::Duration::seconds(1));
        assert!(it.is_expired(now));
    }

    #[test]
    fn unlimited_items_never_deplete() {
        let mut it = item("a", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        it.usage_count = 1_000;
        assert!(!it.is_depleted());
        assert_eq!(it.remaining_uses(), None);

        it.max_uses = Some(1_000);
        assert!(it.is_depleted());
        assert_eq!(it.remaining_uses(), Some(0));
    }

    #[test]
    fn item_ref_prefers_id() {
        assert_eq!(
            ItemRef::from_parts(Some("x".into()), Some("Name".into())),
            Some(ItemRef::ById("x".into()))
        );
        assert_eq!(
            ItemRef::from_parts(Some("  ".into()), Some("Name".into())),
            Some(ItemRef::ByName("Name".into()))
        );
        assert_eq!(ItemRef::from_parts(None, None), None);
    }

    #[test]
    fn waste_reason_uses_display_labels() {
        assert_eq!(
            serde_json::to_value(WasteReason::OutOfUses).unwrap(),
            json!("Out of Uses")
        );
        assert_eq!(
            serde_json::to_value(RetrievalAction::SetAside).unwrap(),
            json!("setAside")
        );
    }

    #[test]
    fn log_filter_matches_on_all_set_fields() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let log = ActionLog {
            id: 1,
            action_type: ActionType::Retrieve,
            user_id: "astro".into(),
            item_id: "a".into(),
            item_name: None,
            timestamp: ts,
            details: None,
        };
        assert!(LogFilter::default().matches(&log));
        let filter = LogFilter {
            start: Some(ts - chrono::Duration::hours(1)),
            end: Some(ts),
            user_id: Some("astro".into()),
            action_type: Some(ActionType::Retrieve),
            ..LogFilter::default()
        };
        assert!(filter.matches(&log));
        let wrong_type = LogFilter {
            action_type: Some(ActionType::Place),
            ..LogFilter::default()
        };
        assert!(!wrong_type.matches(&log));
    }
}
