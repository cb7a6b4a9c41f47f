use serde::{ Serialize, Deserialize };

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub substitution: String,
    pub ratio: String,
    pub notes: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SubstitutionRequest {
    pub ingredient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_ingredients: Option<Vec<String>>,
}
