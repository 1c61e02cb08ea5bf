//! Retrieval planning.
//!
//! An occupant blocks a target when it rests at or above the target's top
//! face and its footprint intersects the target's footprint. Blocking items
//! are set aside one by one, the target is taken out, and the blocking items
//! are put back in reverse order so the container ends up as it started.

use std::cmp::Ordering;

use crate::geometry::footprints_overlap;
use crate::model::{Item, RetrievalAction, RetrievalStep};
use crate::types::Position;

/// Order in which blocking items are removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockingOrder {
    /// Lowest vertical start first (the obstruction closest to the target).
    #[default]
    NearestFirst,
    /// Highest vertical start first (top of the stack first).
    TopFirst,
}

impl BlockingOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "nearest_first" | "nearest" | "ascending" | "asc" => Some(BlockingOrder::NearestFirst),
            "top_first" | "top" | "descending" | "desc" => Some(BlockingOrder::TopFirst),
            _ => None,
        }
    }

    fn compare(&self, a: &Position, b: &Position) -> Ordering {
        let ascending = a
            .start
            .height
            .partial_cmp(&b.start.height)
            .unwrap_or(Ordering::Equal);
        match self {
            BlockingOrder::NearestFirst => ascending,
            BlockingOrder::TopFirst => ascending.reverse(),
        }
    }
}

/// Checks whether `occupant` must be moved before `target` can be taken out.
pub fn is_blocking(occupant: &Position, target: &Position) -> bool {
    occupant.start.height >= target.end.height && footprints_overlap(occupant, target)
}

/// Occupants blocking the target, in removal order.
///
/// The target itself and occupants without a position are skipped. Items with
/// equal priority keep their input order.
pub fn blocking_items<'a>(target: &Item, occupants: &'a [Item], order: BlockingOrder) -> Vec<&'a Item> {
    let Some(target_position) = target.position.as_ref() else {
        return Vec::new();
    };

    let mut blocking: Vec<(&Item, &Position)> = occupants
        .iter()
        .filter(|occupant| occupant.id != target.id)
        .filter_map(|occupant| occupant.position.as_ref().map(|pos| (occupant, pos)))
        .filter(|(_, pos)| is_blocking(pos, target_position))
        .collect();

    blocking.sort_by(|(_, a), (_, b)| order.compare(a, b));
    blocking.into_iter().map(|(item, _)| item).collect()
}

/// Number of occupants that have to be moved to reach the target.
pub fn blocking_count(target: &Item, occupants: &[Item]) -> usize {
    blocking_items(target, occupants, BlockingOrder::default()).len()
}

/// Computes the set-aside / retrieve / place-back sequence for a target.
///
/// With `k` blocking items the plan has `2k + 1` steps numbered from 1:
/// `k` set-aside steps, the retrieval, then `k` place-back steps mirroring
/// the set-aside order. Stored state is not touched.
pub fn plan_retrieval(target: &Item, occupants: &[Item], order: BlockingOrder) -> Vec<RetrievalStep> {
    let blocking = blocking_items(target, occupants, order);

    let set_aside = blocking.iter().map(|item| (RetrievalAction::SetAside, *item));
    let retrieve = std::iter::once((RetrievalAction::Retrieve, target));
    let place_back = blocking.iter().rev().map(|item| (RetrievalAction::PlaceBack, *item));

    set_aside
        .chain(retrieve)
        .chain(place_back)
        .enumerate()
        .map(|(idx, (action, item))| RetrievalStep {
            step: idx + 1,
            action,
            item_id: item.id.clone(),
            item_name: item.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::item;

    fn summary(steps: &[RetrievalStep]) -> Vec<(usize, RetrievalAction, String)> {
        steps
            .iter()
            .map(|s| (s.step, s.action, s.item_id.clone()))
            .collect()
    }

    #[test]
    fn unblocked_target_needs_a_single_step() {
        let target = item("x", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let beside = item("b", (10.0, 0.0, 0.0), (20.0, 10.0, 10.0));
        let steps = plan_retrieval(&target, &[target.clone(), beside], BlockingOrder::NearestFirst);
        assert_eq!(summary(&steps), vec![(1, RetrievalAction::Retrieve, "x".into())]);
    }

    #[test]
    fn item_directly_above_is_set_aside_and_replaced() {
        let x = item("X", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let y = item("Y", (0.0, 0.0, 10.0), (10.0, 10.0, 20.0));
        let steps = plan_retrieval(&x, &[y], BlockingOrder::NearestFirst);
        assert_eq!(
            summary(&steps),
            vec![
                (1, RetrievalAction::SetAside, "Y".into()),
                (2, RetrievalAction::Retrieve, "X".into()),
                (3, RetrievalAction::PlaceBack, "Y".into()),
            ]
        );
        assert_eq!(steps[0].item_name, "Item Y");
    }

    #[test]
    fn stack_is_unwound_in_priority_order_and_mirrored() {
        let target = item("t", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let occupants = vec![
            item("top", (0.0, 0.0, 30.0), (10.0, 10.0, 40.0)),
            item("low", (0.0, 0.0, 10.0), (10.0, 10.0, 20.0)),
            item("mid", (2.0, 2.0, 20.0), (8.0, 8.0, 30.0)),
        ];

        let steps = plan_retrieval(&target, &occupants, BlockingOrder::NearestFirst);
        let k = 3;
        assert_eq!(steps.len(), 2 * k + 1);
        let ids: Vec<&str> = steps.iter().map(|s| s.item_id.as_str()).collect();
        assert_eq!(ids, vec!["low", "mid", "top", "t", "top", "mid", "low"]);
        for (idx, step) in steps.iter().enumerate() {
            assert_eq!(step.step, idx + 1);
            let expected = match idx {
                0..=2 => RetrievalAction::SetAside,
                3 => RetrievalAction::Retrieve,
                _ => RetrievalAction::PlaceBack,
            };
            assert_eq!(step.action, expected);
        }

        let top_first = plan_retrieval(&target, &occupants, BlockingOrder::TopFirst);
        let ids: Vec<&str> = top_first.iter().map(|s| s.item_id.as_str()).collect();
        assert_eq!(ids, vec!["top", "mid", "low", "t", "low", "mid", "top"]);
    }

    #[test]
    fn footprint_must_overlap_with_positive_area() {
        let target = item("t", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let touching_edge = item("edge", (10.0, 0.0, 10.0), (20.0, 10.0, 20.0));
        let partial = item("part", (9.0, 9.0, 10.0), (19.0, 19.0, 20.0));
        let occupants = vec![touching_edge, partial];
        let blocking: Vec<&str> = blocking_items(&target, &occupants, BlockingOrder::NearestFirst)
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(blocking, vec!["part"]);
    }

    #[test]
    fn items_below_or_level_do_not_block() {
        let target = item("t", (0.0, 0.0, 10.0), (10.0, 10.0, 20.0));
        let below = item("below", (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let overlapping_height = item("side", (0.0, 0.0, 15.0), (10.0, 10.0, 25.0));
        assert_eq!(blocking_count(&target, &[below, overlapping_height]), 0);
    }

    #[test]
    fn equal_priority_keeps_input_order() {
        let target = item("t", (0.0, 0.0, 0.0), (20.0, 10.0, 10.0));
        let occupants = vec![
            item("second", (10.0, 0.0, 10.0), (20.0, 10.0, 20.0)),
            item("first", (0.0, 0.0, 10.0), (10.0, 10.0, 20.0)),
        ];
        let ids: Vec<&str> = blocking_items(&target, &occupants, BlockingOrder::NearestFirst)
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn parses_order_names() {
        assert_eq!(BlockingOrder::parse("top_first"), Some(BlockingOrder::TopFirst));
        assert_eq!(BlockingOrder::parse(" Nearest_First "), Some(BlockingOrder::NearestFirst));
        assert_eq!(BlockingOrder::parse("sideways"), None);
    }
}
