//! Placement validation.
//!
//! Decides whether a requested box may be committed to a container given the
//! items already stored there. The check is pure; committing happens in
//! [`crate::inventory::Inventory::place`] under the container lock.

use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::geometry::{contains, fits, overlaps};
use crate::model::{Container, Item, validate_position};
use crate::types::Position;

/// Checks a requested placement against the container and its occupants.
///
/// Rejections, in order:
/// 1. `InvalidInput` if the box is malformed (`end < start` on some axis)
/// 2. `ItemTooLarge` if the box extents exceed the container dimensions, or,
///    with `enforce_bounds`, if the box reaches outside the container
/// 3. `CollisionDetected` for the first occupant whose box overlaps it
///
/// An occupant with the same id as `item_id` is the item's own previous
/// placement and is ignored.
pub fn check_placement(
    container: &Container,
    occupants: &[Item],
    item_id: &str,
    requested: &Position,
    enforce_bounds: bool,
) -> Result<()> {
    validate_position(requested)?;

    let bounds = container.bounds();
    let too_large = !fits(requested, &bounds) || (enforce_bounds && !contains(&bounds, requested));
    if too_large {
        return Err(InventoryError::ItemTooLarge {
            item_id: item_id.to_string(),
            container_id: container.id.clone(),
            extents: requested.extents(),
            dimensions: container.dimensions,
        });
    }

    let conflict = occupants
        .iter()
        .filter(|occupant| occupant.id != item_id)
        .find(|occupant| {
            occupant
                .position
                .as_ref()
                .is_some_and(|taken| overlaps(taken, requested))
        });
    if let Some(occupant) = conflict {
        debug!(
            item_id,
            container_id = %container.id,
            with = %occupant.id,
            "placement collides"
        );
        return Err(InventoryError::CollisionDetected {
            item_id: item_id.to_string(),
            container_id: container.id.clone(),
            with: occupant.id.clone(),
        });
    }

    Ok(())
}
