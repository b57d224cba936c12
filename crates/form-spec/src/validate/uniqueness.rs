//! Document-wide widget identifier uniqueness.
//!
//! Runs after the node descent over the identifiers it collected. Blank
//! identifiers are skipped; the descent already reports them.

use std::collections::HashMap;

use crate::validate::node::WidgetOccurrence;
use crate::violation::{FieldPath, Violation, ViolationKind};

/// One violation per repeated identifier, ordered by first occurrence and
/// reported at the second.
pub fn check_unique_widget_ids(occurrences: &[WidgetOccurrence<'_>]) -> Vec<Violation> {
    let mut order: Vec<(&str, Vec<&FieldPath>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for occurrence in occurrences.iter().filter(|o| !o.id.is_empty()) {
        match positions.get(occurrence.id) {
            Some(&position) => order[position].1.push(&occurrence.path),
            None => {
                positions.insert(occurrence.id, order.len());
                order.push((occurrence.id, vec![&occurrence.path]));
            }
        }
    }

    order
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(id, paths)| {
            let locations = paths
                .iter()
                .map(|path| path.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Violation::new(
                paths[1],
                ViolationKind::DuplicateIdentifier,
                format!(
                    "widget id '{id}' is declared {} times ({locations})",
                    paths.len()
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(id: &'static str, page: usize, widget: usize) -> WidgetOccurrence<'static> {
        WidgetOccurrence {
            id,
            path: FieldPath::root()
                .item("pages", page)
                .item("sections", 0)
                .item("widgets", widget)
                .field("id"),
        }
    }

    #[test]
    fn unique_ids_pass() {
        let seen = vec![occurrence("a", 0, 0), occurrence("b", 0, 1)];
        assert!(check_unique_widget_ids(&seen).is_empty());
    }

    #[test]
    fn each_repeated_id_is_reported_once_in_first_seen_order() {
        let seen = vec![
            occurrence("b", 0, 0),
            occurrence("a", 0, 1),
            occurrence("a", 1, 0),
            occurrence("b", 1, 1),
            occurrence("a", 2, 0),
        ];
        let violations = check_unique_widget_ids(&seen);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("'b'"));
        assert_eq!(violations[0].path, "pages[1].sections[0].widgets[1].id");
        assert!(violations[1].message.contains("'a' is declared 3 times"));
        assert_eq!(violations[1].path, "pages[1].sections[0].widgets[0].id");
    }

    #[test]
    fn blank_ids_are_ignored() {
        let seen = vec![occurrence("", 0, 0), occurrence("", 0, 1)];
        assert!(check_unique_widget_ids(&seen).is_empty());
    }
}
