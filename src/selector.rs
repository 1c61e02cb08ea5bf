//! Picks the best item among several that match a query.
//!
//! Preference: earliest expiry first (items without expiry last), then the
//! fewest blocking items. Remaining ties keep the input order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::Item;

fn compare_expiry(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Selects the preferred candidate.
///
/// `complexity` scores how hard an item is to reach, usually the number of
/// items blocking it. Returns `None` only for an empty candidate list, which
/// callers are expected to rule out beforehand.
pub fn select<'a>(candidates: &'a [Item], complexity: impl Fn(&Item) -> usize) -> Option<&'a Item> {
    let mut ranked: Vec<(&Item, usize)> = candidates
        .iter()
        .map(|item| (item, complexity(item)))
        .collect();

    // `sort_by` is stable, so equal keys preserve the input order.
    ranked.sort_by(|(a, a_cost), (b, b_cost)| {
        compare_expiry(a.expiry_date, b.expiry_date).then(a_cost.cmp(b_cost))
    });

    ranked.first().map(|(item, _)| *item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::item;
    use chrono::TimeZone;

    fn dated(id: &str, day: Option<u32>) -> Item {
        let mut it = item(id, (0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        it.expiry_date = day.map(|d| Utc.with_ymd_and_hms(2026, 6, d, 0, 0, 0).unwrap());
        it
    }

    #[test]
    fn earliest_expiry_wins() {
        let items = vec![dated("late", Some(20)), dated("none", None), dated("soon", Some(3))];
        assert_eq!(select(&items, |_| 0).unwrap().id, "soon");
    }

    #[test]
    fn items_without_expiry_sort_last() {
        let items = vec![dated("none", None), dated("dated", Some(28))];
        assert_eq!(select(&items, |_| 0).unwrap().id, "dated");
    }

    #[test]
    fn complexity_breaks_expiry_ties() {
        let items = vec![dated("buried", Some(5)), dated("easy", Some(5))];
        let cost = |it: &Item| if it.id == "buried" { 3 } else { 1 };
        assert_eq!(select(&items, cost).unwrap().id, "easy");
    }

    #[test]
    fn full_tie_keeps_input_order() {
        let items = vec![dated("first", None), dated("second", None)];
        assert_eq!(select(&items, |_| 2).unwrap().id, "first");
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(select(&[], |_| 0).is_none());
    }
}
