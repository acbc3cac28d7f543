//! Reduction rules for the shadow scenario.

/// Fixed category to multiplier table, matched case-sensitively.
///
/// Adding a category means adding a row here; the aggregation and selection
/// logic never touch this table directly.
const REDUCTIONS: &[(&str, f64)] = &[
    ("Subscriptions", 0.5),
    ("Transport", 0.6),
    ("Food", 0.75),
];

/// Returns the reduction multiplier for a category.
///
/// Unrecognized categories keep their amount unchanged.
pub(crate) fn multiplier(category: &str) -> f64 {
    REDUCTIONS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(1.0, |(_, factor)| *factor)
}
