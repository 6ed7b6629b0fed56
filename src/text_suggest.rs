//! Suggestion engine
//!
//! Plain substring matching in catalog order. The catalog is small, so
//! there is no fuzzy scoring and no relevance ranking.

/*--- Use ----------------------------------------------------------------------------------------*/

use crate::{filter::normalize, recipe::Recipe};

/*--- Const --------------------------------------------------------------------------------------*/

pub const DEFAULT_LIMIT: usize = 7;

/*--- Types --------------------------------------------------------------------------------------*/

/// One autocomplete entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Recipe name, what gets put into the search box
    pub label: String,
    pub recipe_id: String,
    pub country: String,
}

/*--- Impl ---------------------------------------------------------------------------------------*/

/// Get suggestions for a partial query
pub fn suggest(catalog: &[Recipe], query: &str, limit: usize) -> Vec<Suggestion> {
    let Some(q) = normalize(query) else {
        return vec![];
    };

    catalog
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&q)
                || r.country.to_lowercase().contains(&q)
                || r.cuisine.to_lowercase().contains(&q)
        })
        .take(limit)
        .map(|r| Suggestion {
            label: r.name.clone(),
            recipe_id: r.id.clone(),
            country: r.country.clone(),
        })
        .collect()
}

/*--- Tests --------------------------------------------------------------------------------------*/


/*--------------------------------------------- EOF ----------------------------------------------*/
