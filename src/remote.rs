//! Remote recipe source
//!
//! Searches a TheMealDB compatible endpoint and maps its records into
//! [Recipe]s. This is the only place that knows about the remote shape;
//! everything past [map_meal] sees the same recipes as the bundled catalog.

/*--- Use ----------------------------------------------------------------------------------------*/

use std::collections::{HashMap, HashSet};

use cached::{proc_macro::cached, SizedCache};
use lazy_static::lazy_static;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    config::RemoteConfig,
    error::{Error, Result},
    recipe::Recipe,
};

/*--- Const --------------------------------------------------------------------------------------*/

/// TheMealDB numbers its ingredient/measure pairs 1 through 20
pub const MAX_INGREDIENTS: usize = 20;

pub const DEFAULT_COUNTRY: &str = "Global";
pub const DEFAULT_CUISINE: &str = "Unknown";
pub const REMOTE_FACT: &str = "Chef's tip: taste as you go!";

const HEALTHY_KEYWORDS: [&str; 3] = ["salad", "grill", "fish"];
const VEGETARIAN_KEYWORDS: [&str; 2] = ["vegetarian", "vegan"];

lazy_static! {
    /// Area name to country code, for the flag
    static ref AREA_CODES: HashMap<&'static str, &'static str> = [
        ("Italy", "IT"),
        ("India", "IN"),
        ("Japan", "JP"),
        ("France", "FR"),
        ("Mexico", "MX"),
    ]
    .into_iter()
    .collect();
}

/*--- Types --------------------------------------------------------------------------------------*/

/// One meal as returned by `search.php`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id_meal: String,
    pub str_meal: String,
    #[serde(default)]
    pub str_area: Option<String>,
    #[serde(default)]
    pub str_category: Option<String>,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
    #[serde(default)]
    pub str_instructions: Option<String>,

    /// `strIngredientN` / `strMeasureN` and whatever else the API adds
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    meals: Option<Vec<Meal>>,
}

pub struct MealDbClient {
    client: Client,
    base_url: String,
}

/*--- Mapping ------------------------------------------------------------------------------------*/

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(k))
}

pub fn guess_code(area: &str) -> &'static str {
    AREA_CODES.get(area).copied().unwrap_or("")
}

impl Meal {
    fn numbered(&self, field: &str, n: usize) -> Option<&str> {
        non_blank(self.extra.get(&format!("{field}{n}")).and_then(|v| v.as_str()))
    }
}

/// `"{ingredient} — {measure}"` for every filled pair, in number order
pub fn collect_ingredients(meal: &Meal) -> Vec<String> {
    let mut seen = HashSet::new();
    (1..=MAX_INGREDIENTS)
        .filter_map(|n| {
            let ingredient = meal.numbered("strIngredient", n)?;
            Some(match meal.numbered("strMeasure", n) {
                Some(measure) => format!("{ingredient} — {measure}"),
                None => ingredient.to_string(),
            })
        })
        .filter(|i| seen.insert(i.clone()))
        .collect()
}

/// Split a line after every `.` followed by a whitespace run
///
/// The period stays on the sentence, the whitespace is dropped.
fn sentences(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '.' || !chars.peek().map_or(false, |(_, next)| next.is_whitespace()) {
            continue;
        }
        out.push(&line[start..=i]);

        start = line.len();
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                start = j;
                break;
            }
            chars.next();
        }
    }

    if start < line.len() {
        out.push(&line[start..]);
    }
    out
}

/// Break an instructions blob into steps on newlines and sentence ends
pub fn split_steps(instructions: &str) -> Vec<String> {
    instructions
        .lines()
        .flat_map(sentences)
        .map(str::trim)
        .map(|s| s.trim_end_matches('.').trim_end())
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with(['!', '?']) {
                s.to_string()
            } else {
                format!("{s}.")
            }
        })
        .collect()
}

/// Normalize a remote record into a [Recipe]
pub fn map_meal(meal: &Meal) -> Recipe {
    let country = non_blank(meal.str_area.as_deref()).unwrap_or(DEFAULT_COUNTRY);
    let category = non_blank(meal.str_category.as_deref());

    Recipe {
        id: meal.id_meal.clone(),
        name: meal.str_meal.trim().to_string(),
        country: country.to_string(),
        country_code: guess_code(country).to_string(),
        cuisine: category.unwrap_or(DEFAULT_CUISINE).to_string(),
        healthy: category.map_or(false, |c| contains_any(c, &HEALTHY_KEYWORDS)),
        vegetarian: category.map_or(false, |c| contains_any(c, &VEGETARIAN_KEYWORDS)),
        image_url: meal.str_meal_thumb.clone().unwrap_or_default(),
        ingredients: collect_ingredients(meal),
        steps: split_steps(meal.str_instructions.as_deref().unwrap_or_default()),
        fact: Some(REMOTE_FACT.to_string()),
    }
}

/*--- Client -------------------------------------------------------------------------------------*/

/// Successful lookups are cached per endpoint and query
#[cached(
    type = "SizedCache<String, Vec<Recipe>>",
    create = "{ SizedCache::with_size(50) }",
    convert = "{ format!(\"{}|{}\", base_url, query) }",
    result = true
)]
fn search_cached(client: &Client, base_url: &str, query: &str) -> Result<Vec<Recipe>> {
    let url = format!("{}/search.php", base_url.trim_end_matches('/'));
    let response: SearchResponse = client
        .get(&url)
        .query(&[("s", query)])
        .send()?
        .error_for_status()?
        .json()?;

    let recipes: Vec<Recipe> = response.meals.unwrap_or_default().iter().map(map_meal).collect();
    if recipes.is_empty() {
        return Err(Error::RemoteUnavailable(format!("no results for {query:?}")));
    }
    Ok(recipes)
}

impl MealDbClient {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, base_url: config.base_url.clone() })
    }

    /// Search by free text
    ///
    /// Network failures and empty results are both [Error::RemoteUnavailable].
    pub fn search(&self, query: &str) -> Result<Vec<Recipe>> {
        search_cached(&self.client, &self.base_url, query.trim())
    }
}

/// Catalog for a session
///
/// Uses the remote source when enabled and falls back to the bundled
/// catalog on any remote failure. The fallback is silent to the user.
pub fn load_catalog(config: &RemoteConfig, query: &str) -> Result<Catalog> {
    if !config.enabled {
        return Catalog::fixture();
    }

    let fetched = MealDbClient::new(config).and_then(|client| client.search(query));
    match fetched {
        Ok(recipes) => {
            info!(count = recipes.len(), query, "loaded remote catalog");
            Ok(Catalog::new(recipes))
        }
        Err(e) => {
            warn!(error = %e, "remote catalog unavailable, using bundled recipes");
            Catalog::fixture()
        }
    }
}

/*--- Tests --------------------------------------------------------------------------------------*/


/*--------------------------------------------- EOF ----------------------------------------------*/
