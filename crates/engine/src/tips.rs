//! Advisory tips keyed by spending category.

/// Fixed category to tip table. Selection depends only on the
/// highest-spending category of the submitted expenses.
const TIPS: &[(&str, &str)] = &[
    ("Food", "Try home cooking or meal prep to cut down food expenses!"),
    (
        "Transport",
        "Consider public transport or carpooling to save money.",
    ),
    (
        "Subscriptions",
        "Review your subscriptions: do you use them all?",
    ),
    (
        "Entertainment",
        "Reduce entertainment costs by opting for free activities.",
    ),
    (
        "Shopping",
        "Try a no-spend challenge or buy only what you need.",
    ),
    (
        "Utilities",
        "Save on electricity with energy-efficient habits!",
    ),
];

const FALLBACK: &str = "Consider reviewing your expenses to boost savings!";

/// Returns the tip for a category, falling back to a generic suggestion.
pub(crate) fn tip_for(category: &str) -> &'static str {
    TIPS.iter()
        .find(|(name, _)| *name == category)
        .map_or(FALLBACK, |(_, tip)| *tip)
}
