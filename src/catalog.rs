//! Catalog store
//!
//! Holds the full, immutable recipe list. Only the loader replaces it, and
//! always as a whole sequence.

/*--- Use ----------------------------------------------------------------------------------------*/

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    filter::ALL_CUISINES,
    recipe::Recipe,
};

/*--- Const --------------------------------------------------------------------------------------*/

const FIXTURE_YAML: &str = include_str!("../assets/recipes.yaml");

/*--- Impl ---------------------------------------------------------------------------------------*/

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The bundled offline catalog
    pub fn fixture() -> Result<Self> {
        let recipes: Vec<Recipe> = serde_yaml::from_str(FIXTURE_YAML)?;
        debug!(count = recipes.len(), "loaded fixture catalog");
        Ok(Self::new(recipes))
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Look a recipe up by id
    ///
    /// A miss is [Error::NotFound]; callers show an empty state and carry on.
    pub fn by_id(&self, id: &str) -> Result<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Swap in a whole new sequence (remote refresh)
    pub fn replace(&mut self, recipes: Vec<Recipe>) {
        info!(old = self.recipes.len(), new = recipes.len(), "catalog replaced");
        self.recipes = recipes;
    }

    /// Cuisine chips: the "all" sentinel, then each cuisine in first-seen order
    pub fn cuisines(&self) -> Vec<&str> {
        let mut out = vec![ALL_CUISINES];
        for r in &self.recipes {
            if !out.contains(&r.cuisine.as_str()) {
                out.push(&r.cuisine);
            }
        }
        out
    }
}

/// Uniform pick, used for "surprise me" and the featured recipe
pub fn pick_random<'r, R: Rng + ?Sized>(recipes: &[&'r Recipe], rng: &mut R) -> Option<&'r Recipe> {
    recipes.choose(rng).copied()
}

/*--- Tests --------------------------------------------------------------------------------------*/


/*--------------------------------------------- EOF ----------------------------------------------*/
