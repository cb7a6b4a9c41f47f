pub mod chat;
pub mod recipes;
pub mod substitution;

pub use chat::ChatInput;
pub use recipes::{ RecipeForm, RecipeSuggestion };
pub use substitution::SubstitutionForm;

/// Splits comma-separated free text into trimmed, non-empty items.
/// Returns `None` when nothing is left, so the field is omitted from requests.
pub fn parse_list(text: &str) -> Option<Vec<String>> {
    let items: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_list(" banana, flaxseed ,,"),
            Some(vec!["banana".to_string(), "flaxseed".to_string()])
        );
        assert_eq!(parse_list("  , "), None);
        assert_eq!(parse_list(""), None);
    }
}
