//! Filter pipeline
//!
//! Stages run in a fixed order, each narrowing the previous result:
//! favorites, cuisine, healthy, vegetarian, then the text query. Catalog
//! order is preserved.

/*--- Use ----------------------------------------------------------------------------------------*/

use std::collections::HashSet;

use crate::recipe::Recipe;

/*--- Const --------------------------------------------------------------------------------------*/

/// Cuisine selection that disables the cuisine stage
pub const ALL_CUISINES: &str = "all";

/*--- Types --------------------------------------------------------------------------------------*/

/// Current search text and toggles
///
/// Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    /// [ALL_CUISINES] or an exact cuisine tag
    pub cuisine: String,
    pub healthy_only: bool,
    pub vegetarian_only: bool,
    pub favorites_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cuisine: ALL_CUISINES.to_string(),
            healthy_only: false,
            vegetarian_only: false,
            favorites_only: false,
        }
    }
}

impl FilterState {
    /// Trimmed, lower-cased query, `None` when there is nothing to match
    pub fn normalized_query(&self) -> Option<String> {
        normalize(&self.query)
    }

    pub fn cuisine_selected(&self) -> Option<&str> {
        if self.cuisine == ALL_CUISINES {
            None
        } else {
            Some(&self.cuisine)
        }
    }
}

/*--- Impl ---------------------------------------------------------------------------------------*/

pub(crate) fn normalize(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        None
    } else {
        Some(q)
    }
}

/// Does `needle` (already lower-cased) occur in name, country, cuisine or ingredients
pub fn matches_query(recipe: &Recipe, needle: &str) -> bool {
    recipe.name.to_lowercase().contains(needle)
        || recipe.country.to_lowercase().contains(needle)
        || recipe.cuisine.to_lowercase().contains(needle)
        || recipe.ingredients_joined().to_lowercase().contains(needle)
}

/// Visible recipes for `state`
///
/// An empty result is a normal outcome.
pub fn filter<'c>(
    catalog: &'c [Recipe],
    state: &FilterState,
    favorite_ids: &HashSet<&str>,
) -> Vec<&'c Recipe> {
    let query = state.normalized_query();
    let cuisine = state.cuisine_selected();

    catalog
        .iter()
        .filter(|r| !state.favorites_only || favorite_ids.contains(r.id.as_str()))
        .filter(|r| cuisine.map_or(true, |c| r.cuisine == c))
        .filter(|r| !state.healthy_only || r.healthy)
        .filter(|r| !state.vegetarian_only || r.vegetarian)
        .filter(|r| query.as_deref().map_or(true, |q| matches_query(r, q)))
        .collect()
}

/*--- Tests --------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ids<'r>(recipes: &[&'r Recipe]) -> Vec<&'r str> {
        recipes.iter().map(|r| r.id.as_str()).collect()
    }

    fn recipe(id: &str, name: &str, cuisine: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.into(),
            name: name.into(),
            country: "Testland".into(),
            country_code: String::new(),
            cuisine: cuisine.into(),
            healthy: false,
            vegetarian: false,
            image_url: String::new(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec![],
            fact: None,
        }
    }

    #[test]
    fn default_state_returns_everything_in_order() {
        let catalog = Catalog::fixture().unwrap();
        let out = filter(catalog.all(), &FilterState::default(), &HashSet::new());
        assert_eq!(out.len(), catalog.len());
        assert_eq!(ids(&out), vec!["r1", "r2", "r3", "r4", "r5", "r6"]);
    }

    #[test]
    fn cuisine_exact_match_keeps_order() {
        let catalog = vec![
            recipe("a", "Pasta", "Italian", &[]),
            recipe("b", "Dal", "Indian", &[]),
            recipe("c", "Ramen", "Japanese", &[]),
            recipe("d", "Risotto", "Italian", &[]),
        ];
        let state = FilterState { cuisine: "Italian".into(), ..Default::default() };
        assert_eq!(ids(&filter(&catalog, &state, &HashSet::new())), vec!["a", "d"]);

        let state = FilterState { cuisine: "italian".into(), ..Default::default() };
        assert!(filter(&catalog, &state, &HashSet::new()).is_empty());
    }

    #[test]
    fn query_searches_all_four_fields() {
        let catalog = vec![
            recipe("cake", "Chocolate Lava Cake", "Dessert", &["Flour"]),
            recipe("mole", "Mole", "Mexican", &["Dark CHOCOLATE 50g"]),
            recipe("soup", "Tomato Soup", "Soup", &["Tomatoes"]),
        ];
        let state = FilterState { query: "  Choc ".into(), ..Default::default() };
        assert_eq!(ids(&filter(&catalog, &state, &HashSet::new())), vec!["cake", "mole"]);

        let state = FilterState { query: "testland".into(), ..Default::default() };
        assert_eq!(filter(&catalog, &state, &HashSet::new()).len(), 3);

        let state = FilterState { query: "dessert".into(), ..Default::default() };
        assert_eq!(ids(&filter(&catalog, &state, &HashSet::new())), vec!["cake"]);
    }

    #[test]
    fn blank_query_is_no_filter() {
        let catalog = Catalog::fixture().unwrap();
        let state = FilterState { query: "   ".into(), ..Default::default() };
        assert_eq!(filter(catalog.all(), &state, &HashSet::new()).len(), catalog.len());
    }

    #[test]
    fn diet_toggles() {
        let catalog = Catalog::fixture().unwrap();

        let state = FilterState { healthy_only: true, ..Default::default() };
        assert_eq!(ids(&filter(catalog.all(), &state, &HashSet::new())), vec!["r3", "r5", "r6"]);

        let state = FilterState { vegetarian_only: true, ..Default::default() };
        assert_eq!(ids(&filter(catalog.all(), &state, &HashSet::new())), vec!["r1", "r4", "r6"]);

        let state = FilterState { healthy_only: true, vegetarian_only: true, ..Default::default() };
        assert_eq!(ids(&filter(catalog.all(), &state, &HashSet::new())), vec!["r6"]);
    }

    #[test]
    fn favorites_only() {
        let catalog = Catalog::fixture().unwrap();
        let favs: HashSet<&str> = ["r5", "r2", "missing"].into_iter().collect();

        let state = FilterState { favorites_only: true, ..Default::default() };
        assert_eq!(ids(&filter(catalog.all(), &state, &favs)), vec!["r2", "r5"]);

        let state = FilterState { favorites_only: true, ..Default::default() };
        assert!(filter(catalog.all(), &state, &HashSet::new()).is_empty());
    }

    #[test]
    fn stages_compose() {
        let catalog = Catalog::fixture().unwrap();
        let favs: HashSet<&str> = ["r1", "r3", "r6"].into_iter().collect();
        let state = FilterState {
            query: "egg".into(),
            cuisine: "Middle Eastern".into(),
            healthy_only: true,
            vegetarian_only: true,
            favorites_only: true,
        };
        assert_eq!(ids(&filter(catalog.all(), &state, &favs)), vec!["r6"]);
    }

    #[test]
    fn empty_catalog() {
        assert!(filter(&[], &FilterState::default(), &HashSet::new()).is_empty());
    }
}

/*--------------------------------------------- EOF ----------------------------------------------*/
