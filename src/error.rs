//! Error types for inventory operations.

use crate::model::ValidationError;
use crate::types::Coordinates;

/// Failures raised by the storage collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No item with this id.
    #[error("Item {0} not found")]
    ItemNotFound(String),
    /// No container with this id.
    #[error("Container {0} not found")]
    ContainerNotFound(String),
    /// An item or container with this id already exists.
    #[error("A record with id {0} already exists")]
    Duplicate(String),
}

/// Every failure a core operation can report to its caller.
///
/// The request layer maps these onto HTTP statuses: the not-found kinds to
/// 404, collisions and duplicates to 409, everything else to 422.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InventoryError {
    #[error("Container {0} does not exist")]
    ContainerNotFound(String),

    #[error("Item {0} does not exist")]
    ItemNotFound(String),

    /// The box is larger than the container, or reaches outside it while
    /// bounds are enforced.
    ///
    /// # Fields
    /// * `item_id` - Item being placed
    /// * `container_id` - Target container
    /// * `extents` - Size of the requested box
    /// * `dimensions` - Interior size of the container
    #[error("Item {item_id} ({extents:?}) does not fit in container {container_id} ({dimensions:?})")]
    ItemTooLarge {
        item_id: String,
        container_id: String,
        extents: Coordinates,
        dimensions: Coordinates,
    },

    /// The box overlaps an item already in the container. `with` names the
    /// first occupant found.
    #[error("Item {item_id} collides with item {with} in container {container_id}")]
    CollisionDetected {
        item_id: String,
        container_id: String,
        with: String,
    },

    /// Undocking found nothing to remove.
    #[error("No items found in container {0}")]
    EmptyContainer(String),

    #[error("A record with id {0} already exists")]
    DuplicateId(String),

    /// A request value failed validation.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
}

impl InventoryError {
    /// Stable machine-readable code for API responses.
    ///
    /// # Returns
    /// A snake_case identifier that does not change with the message text.
    ///
    /// # Examples
    /// ```
    /// use stowage::error::InventoryError;
    ///
    /// let err = InventoryError::EmptyContainer("undock".into());
    /// assert_eq!(err.code(), "empty_container");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::ContainerNotFound(_) => "container_not_found",
            InventoryError::ItemNotFound(_) => "item_not_found",
            InventoryError::ItemTooLarge { .. } => "item_too_large",
            InventoryError::CollisionDetected { .. } => "collision_detected",
            InventoryError::EmptyContainer(_) => "empty_container",
            InventoryError::DuplicateId(_) => "duplicate_id",
            InventoryError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ItemNotFound(id) => InventoryError::ItemNotFound(id),
            StoreError::ContainerNotFound(id) => InventoryError::ContainerNotFound(id),
            StoreError::Duplicate(id) => InventoryError::DuplicateId(id),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
