//! Recipe record

/*--- Use ----------------------------------------------------------------------------------------*/

use serde::{Deserialize, Serialize};

/*--- Const --------------------------------------------------------------------------------------*/

/// Shown when a recipe has no usable country code
pub const GLOBE: &str = "\u{1F30D}";

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/*--- Types --------------------------------------------------------------------------------------*/

/// A single recipe
///
/// Owned by the [Catalog](crate::catalog::Catalog) and never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub country: String,

    /// ISO 3166 alpha-2, may be empty
    #[serde(default)]
    pub country_code: String,

    pub cuisine: String,
    #[serde(default)]
    pub healthy: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub image_url: String,

    /// Display order, no duplicates within one recipe
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub fact: Option<String>,
}

/*--- Impl ---------------------------------------------------------------------------------------*/

impl Recipe {
    /// Flag glyph derived from [Recipe::country_code]
    pub fn flag(&self) -> String {
        country_flag(&self.country_code)
    }

    /// "Healthy"/"Indulgent" plus a "Veg" marker, as shown on cards
    pub fn badges(&self) -> String {
        let mut s = String::from(if self.healthy { "Healthy" } else { "Indulgent" });
        if self.vegetarian {
            s.push_str(" • Veg");
        }
        s
    }

    /// Text the query filter searches besides name/country/cuisine
    pub fn ingredients_joined(&self) -> String {
        self.ingredients.join(" ")
    }
}

/// Turn a two letter country code into a pair of regional indicator symbols
///
/// Anything that is not an ASCII letter is skipped; an empty result falls
/// back to [GLOBE].
pub fn country_flag(code: &str) -> String {
    let flag: String = code
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .filter_map(|c| {
            let offset = c.to_ascii_uppercase() as u32 - 'A' as u32;
            char::from_u32(REGIONAL_INDICATOR_A + offset)
        })
        .collect();

    if flag.is_empty() {
        GLOBE.to_string()
    } else {
        flag
    }
}

/*--- Tests --------------------------------------------------------------------------------------*/


/*--------------------------------------------- EOF ----------------------------------------------*/
