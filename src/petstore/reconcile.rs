//! Client-side list reconciliation.
//!
//! The inventory listing fetches one status at a time, so a record can
//! show up in more than one response (the service is eventually consistent
//! about status transitions). These helpers are pure functions over fetched
//! lists, independent of fetch timing.

use std::collections::HashSet;

use crate::petstore::types::{Pet, PetStatus};

/// Flattens the given lists in order, keeping the first occurrence of each id.
///
/// Records with no id are treated as a single duplicate group.
pub fn dedupe_by_id<I>(lists: I) -> Vec<Pet>
where
    I: IntoIterator<Item = Vec<Pet>>,
{
    let mut seen: HashSet<Option<i64>> = HashSet::new();
    let mut unique = Vec::new();

    for list in lists {
        for pet in list {
            if seen.insert(pet.id) {
                unique.push(pet);
            }
        }
    }

    unique
}

/// Case-insensitive substring match over a pet's name, category and tags.
///
/// A blank search term matches everything.
pub fn matches_search(pet: &Pet, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let name = pet.name.as_deref().unwrap_or_default().to_lowercase();
    let category = pet
        .category
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .unwrap_or_default()
        .to_lowercase();
    let tags = pet
        .tags
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|t| t.name.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    name.contains(&needle) || category.contains(&needle) || tags.contains(&needle)
}

/// Applies the optional status filter and search term, preserving order.
pub fn filter_pets(pets: &[Pet], status: Option<PetStatus>, term: Option<&str>) -> Vec<Pet> {
    pets.iter()
        .filter(|pet| status.map_or(true, |s| pet.status == s))
        .filter(|pet| term.map_or(true, |t| matches_search(pet, t)))
        .cloned()
        .collect()
}
