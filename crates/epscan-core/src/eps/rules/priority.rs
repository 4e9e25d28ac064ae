//! Picks one figure when several label categories produced a value.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::eps::{Candidate, Category};

/// Resolution precedence, identical for every document.
pub const PRIORITY_ORDER: [Category; 4] = [
    Category::Basic,
    Category::Loss,
    Category::Diluted,
    Category::PerShareFirst,
];

/// The candidate from the highest-priority category present.
pub fn select(candidates: &BTreeMap<Category, Candidate>) -> Option<&Candidate> {
    PRIORITY_ORDER
        .iter()
        .find_map(|category| candidates.get(category))
}

/// The resolved EPS value, or `None` when no category produced one.
pub fn resolve(candidates: &BTreeMap<Category, Candidate>) -> Option<Decimal> {
    select(candidates).map(|c| c.value)
}
