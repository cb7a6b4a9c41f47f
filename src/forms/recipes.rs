use crate::error::ChefError;
use log::info;

const DEFAULT_COOKING_TIME: &str = "30 minutes";
const DEFAULT_TIME_LABEL: &str = "30 min";
const DEFAULT_SERVINGS: &str = "4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSuggestion {
    pub title: String,
    pub time: String,
    pub servings: String,
}

/// Offline recipe ideas built from templates; no backend is involved.
#[derive(Debug, Clone, Default)]
pub struct RecipeForm {
    /// Comma-separated; the first item names the pasta dish.
    pub ingredients: String,
    pub cuisine: String,
    pub cooking_time: String,
    pub servings: String,
    pub dietary_restrictions: String,
    suggestions: Vec<RecipeSuggestion>,
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() { fallback } else { value }
}

/// "Quick {cuisine} Pasta" with the cuisine word dropped when none was given.
fn styled(prefix: &str, cuisine: &str, rest: &str) -> String {
    if cuisine.is_empty() {
        format!("{} {}", prefix, rest)
    } else {
        format!("{} {} {}", prefix, cuisine, rest)
    }
}

impl RecipeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suggestions(&self) -> &[RecipeSuggestion] {
        &self.suggestions
    }

    pub fn submit(&mut self) -> Result<&[RecipeSuggestion], ChefError> {
        if self.ingredients.trim().is_empty() {
            return Err(ChefError::validation("Available ingredients are required"));
        }

        let main_ingredient = self.ingredients.split(',').next().unwrap_or_default().trim();
        let cuisine = self.cuisine.trim();
        let cooking_time = or_default(&self.cooking_time, DEFAULT_COOKING_TIME);
        let servings = or_default(&self.servings, DEFAULT_SERVINGS);

        let mut titles = vec![
            styled("Quick", cuisine, &format!("Pasta with {}", main_ingredient)),
            styled("Healthy", cuisine, "Bowl with Fresh Vegetables"),
            styled("One-Pan", cuisine, &format!("Dish - Ready in {}", cooking_time)),
            styled("Family-Style", cuisine, &format!("Casserole (Serves {})", servings))
        ];

        let restrictions = self.dietary_restrictions.trim();
        if !restrictions.is_empty() {
            for title in titles.iter_mut() {
                title.push_str(&format!(" ({} friendly)", restrictions));
            }
        }

        let time_label = or_default(&self.cooking_time, DEFAULT_TIME_LABEL).to_string();
        let servings_label = servings.to_string();
        self.suggestions = titles
            .into_iter()
            .map(|title| RecipeSuggestion {
                title,
                time: time_label.clone(),
                servings: servings_label.clone(),
            })
            .collect();
        info!("Generated {} recipe suggestions", self.suggestions.len());

        Ok(&self.suggestions)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
