//! Application state
//!
//! Owns the catalog, both persisted sets and the filter state. Front ends
//! call the mutation methods, show the returned [Notice], then re-render
//! from [AppState::visible] and friends.

/*--- Use ----------------------------------------------------------------------------------------*/

use std::fmt;

use rand::Rng;
use tracing::debug;

use crate::{
    catalog::{pick_random, Catalog},
    config::Config,
    data_store::{KeyValueStore, PersistedSet},
    error::{Error, Result},
    filter::{filter, FilterState},
    recipe::Recipe,
    text_suggest::{suggest, Suggestion},
};

/*--- Types --------------------------------------------------------------------------------------*/

/// Result of a voice capture, delivered by whatever does the recognition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceInput {
    Transcript(String),
    /// No recognizer on this platform
    Unsupported,
    /// Recognizer ran but failed
    Failed,
}

/// Message for the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    AddedToFavorites,
    RemovedFromFavorites,
    Added(String),
    AlreadyInList(String),
    AddedItems(usize),
    AllIngredientsPresent,
    Removed(String),
    NotInList(String),
    ListCleared,
    RecipeNotFound(String),
    Heard(String),
    VoiceUnsupported,
    VoiceError,
}

impl Notice {
    /// Negative notices are shown differently (red toast)
    pub fn is_bad(&self) -> bool {
        matches!(
            self,
            Notice::RemovedFromFavorites
                | Notice::ListCleared
                | Notice::RecipeNotFound(_)
                | Notice::VoiceUnsupported
                | Notice::VoiceError
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AddedToFavorites => write!(f, "Added to favorites"),
            Notice::RemovedFromFavorites => write!(f, "Removed from favorites"),
            Notice::Added(item) => write!(f, "Added “{item}”"),
            Notice::AlreadyInList(item) => write!(f, "“{item}” is already on the list"),
            Notice::AddedItems(n) => write!(f, "Added {n} items to list"),
            Notice::AllIngredientsPresent => write!(f, "All ingredients already added"),
            Notice::Removed(item) => write!(f, "Removed “{item}”"),
            Notice::NotInList(item) => write!(f, "“{item}” is not on the list"),
            Notice::ListCleared => write!(f, "List cleared"),
            Notice::RecipeNotFound(id) => write!(f, "No recipe with id {id}"),
            Notice::Heard(text) => write!(f, "You said: “{text}”"),
            Notice::VoiceUnsupported => write!(f, "Voice not supported on this platform"),
            Notice::VoiceError => write!(f, "Voice error"),
        }
    }
}

pub struct AppState<S> {
    pub catalog: Catalog,
    pub filters: FilterState,
    favorites: PersistedSet<String, S>,
    list: PersistedSet<String, S>,
    suggestion_limit: usize,
}

/*--- Impl ---------------------------------------------------------------------------------------*/

impl<S> AppState<S>
where
    S: KeyValueStore + Clone,
{
    /// Load both sets from `storage` using the keys in `config`
    pub fn new(catalog: Catalog, storage: S, config: &Config) -> Self {
        Self {
            catalog,
            filters: FilterState::default(),
            favorites: PersistedSet::load(storage.clone(), &config.storage.favorites_key),
            list: PersistedSet::load(storage, &config.storage.list_key),
            suggestion_limit: config.suggestions.limit,
        }
    }

    pub fn favorites(&self) -> &[String] {
        self.favorites.items()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains_key(id)
    }

    pub fn shopping_list(&self) -> &[String] {
        self.list.items()
    }

    /// Recipes passing the current filters, in catalog order
    pub fn visible(&self) -> Vec<&Recipe> {
        filter(self.catalog.all(), &self.filters, &self.favorites.keys())
    }

    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        suggest(self.catalog.all(), query, self.suggestion_limit)
    }

    pub fn recipe(&self, id: &str) -> Result<&Recipe> {
        self.catalog.by_id(id)
    }

    /// Random recipe among the visible ones
    pub fn surprise<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Recipe> {
        pick_random(&self.visible(), rng)
    }

    // -- filters

    pub fn set_query(&mut self, query: &str) {
        self.filters.query = query.to_string();
    }

    pub fn set_cuisine(&mut self, cuisine: &str) {
        self.filters.cuisine = cuisine.to_string();
    }

    pub fn set_healthy_only(&mut self, on: bool) {
        self.filters.healthy_only = on;
    }

    pub fn set_vegetarian_only(&mut self, on: bool) {
        self.filters.vegetarian_only = on;
    }

    /// Flip the favorites-only view, returns the new value
    pub fn toggle_favorites_only(&mut self) -> bool {
        self.filters.favorites_only = !self.filters.favorites_only;
        self.filters.favorites_only
    }

    // -- favorites

    pub fn toggle_favorite(&mut self, id: &str) -> Result<Notice> {
        let toggled = self.favorites.toggle(id.to_string())?;
        Ok(if toggled.was_added {
            Notice::AddedToFavorites
        } else {
            Notice::RemovedFromFavorites
        })
    }

    // -- shopping list

    /// Add free text or a single ingredient; blank input is ignored
    pub fn add_to_list(&mut self, item: &str) -> Result<Option<Notice>> {
        let item = item.trim();
        if item.is_empty() {
            return Ok(None);
        }

        Ok(Some(if self.list.add(item.to_string())? {
            Notice::Added(item.to_string())
        } else {
            Notice::AlreadyInList(item.to_string())
        }))
    }

    /// Add every ingredient of a recipe
    ///
    /// An unknown id is reported as a notice, not an error.
    pub fn add_recipe_to_list(&mut self, id: &str) -> Result<Notice> {
        let ingredients = match self.catalog.by_id(id) {
            Ok(r) => r.ingredients.clone(),
            Err(Error::NotFound(id)) => {
                debug!(%id, "add-all for unknown recipe");
                return Ok(Notice::RecipeNotFound(id));
            }
            Err(e) => return Err(e),
        };

        let added = self.list.add_many(ingredients)?;
        Ok(match added.added_count {
            0 => Notice::AllIngredientsPresent,
            n => Notice::AddedItems(n),
        })
    }

    pub fn remove_from_list(&mut self, item: &str) -> Result<Notice> {
        Ok(if self.list.remove_by_key(item)? {
            Notice::Removed(item.to_string())
        } else {
            Notice::NotInList(item.to_string())
        })
    }

    pub fn clear_list(&mut self) -> Result<Notice> {
        self.list.clear()?;
        Ok(Notice::ListCleared)
    }

    /// Bullet list, one item per line
    pub fn export_list(&self) -> String {
        export_text(self.list.items())
    }

    // -- voice

    /// Feed a voice capture outcome; a transcript becomes the query
    pub fn apply_voice(&mut self, input: VoiceInput) -> Notice {
        match input {
            VoiceInput::Transcript(text) => {
                self.set_query(&text);
                Notice::Heard(text)
            }
            VoiceInput::Unsupported => {
                let e = Error::UnsupportedCapability("voice recognition");
                debug!(error = %e, "voice input");
                Notice::VoiceUnsupported
            }
            VoiceInput::Failed => Notice::VoiceError,
        }
    }
}

pub fn export_text(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("• {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/*--- Tests --------------------------------------------------------------------------------------*/


/*--------------------------------------------- EOF ----------------------------------------------*/
