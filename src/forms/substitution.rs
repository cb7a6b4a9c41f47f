use super::parse_list;
use crate::error::ChefError;
use crate::models::substitution::Substitution;
use crate::session::ChefSession;
use log::info;

#[derive(Debug, Clone, Default)]
pub struct SubstitutionForm {
    pub ingredient: String,
    /// Comma-separated, e.g. "vegan, gluten-free".
    pub dietary_restrictions: String,
    /// Comma-separated ingredients on hand.
    pub available_ingredients: String,
    result: Option<Substitution>,
}

impl SubstitutionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> Option<&Substitution> {
        self.result.as_ref()
    }

    /// Looks up a substitute. Nothing is sent when the ingredient is blank.
    pub async fn submit(&mut self, session: &ChefSession) -> Result<&Substitution, ChefError> {
        let ingredient = self.ingredient.trim();
        if ingredient.is_empty() {
            return Err(ChefError::validation("Ingredient to substitute is required"));
        }

        let restrictions = parse_list(&self.dietary_restrictions);
        let available = parse_list(&self.available_ingredients);
        let found = session.get_substitution(
            ingredient,
            restrictions.as_deref(),
            available.as_deref()
        ).await?;
        info!("Substitution found for {}: {}", ingredient, found.substitution);

        let shown: &Substitution = self.result.insert(found);
        Ok(shown)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockChefApi;
    use std::sync::Arc;

    fn flax_egg() -> Substitution {
        Substitution {
            substitution: "flax egg".into(),
            ratio: "1 tbsp flax + 3 tbsp water = 1 egg".into(),
            notes: "binds well".into(),
        }
    }

    #[tokio::test]
    async fn empty_ingredient_makes_no_request() {
        let api = Arc::new(MockChefApi::new());
        let session = ChefSession::new(api.clone(), "New Cooking Chat");
        let mut form = SubstitutionForm {
            ingredient: "   ".into(),
            dietary_restrictions: "vegan".into(),
            ..SubstitutionForm::default()
        };

        let err = form.submit(&session).await.unwrap_err();
        assert!(matches!(err, ChefError::Validation(_)));
        assert!(api.recorded_calls().is_empty());
        assert!(form.result().is_none());
    }

    #[tokio::test]
    async fn submit_splits_lists_and_keeps_result() {
        let api = Arc::new(MockChefApi::new());
        api.set_substitution(flax_egg());
        let session = ChefSession::new(api.clone(), "New Cooking Chat");
        let mut form = SubstitutionForm {
            ingredient: "eggs".into(),
            dietary_restrictions: "vegan".into(),
            available_ingredients: "banana, flaxseed".into(),
            ..SubstitutionForm::default()
        };

        let result = form.submit(&session).await.unwrap().clone();
        assert_eq!(result, flax_egg());
        assert_eq!(form.result(), Some(&flax_egg()));
        assert_eq!(api.recorded_calls(), vec![
            r#"substitute eggs Some(["vegan"]) Some(["banana", "flaxseed"])"#.to_string(),
        ]);
    }

    #[tokio::test]
    async fn blank_optional_fields_are_omitted() {
        let api = Arc::new(MockChefApi::new());
        api.set_substitution(flax_egg());
        let session = ChefSession::new(api.clone(), "New Cooking Chat");
        let mut form = SubstitutionForm { ingredient: "butter".into(), ..SubstitutionForm::default() };

        form.submit(&session).await.unwrap();
        assert_eq!(api.recorded_calls(), vec!["substitute butter None None".to_string()]);
    }

    #[tokio::test]
    async fn reset_clears_fields_and_result() {
        let api = Arc::new(MockChefApi::new());
        api.set_substitution(flax_egg());
        let session = ChefSession::new(api.clone(), "New Cooking Chat");
        let mut form = SubstitutionForm { ingredient: "eggs".into(), ..SubstitutionForm::default() };
        form.submit(&session).await.unwrap();

        form.reset();
        assert!(form.ingredient.is_empty());
        assert!(form.result().is_none());
    }
}
