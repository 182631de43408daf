use serde::{Deserialize, Serialize};
use validator::Validate;

/// An integer as clients send it: a JSON number or a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl IntegerInput {
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Self::Float(_) => None,
            Self::Text(v) => v.trim().parse().ok(),
        }
    }
}

impl From<i64> for IntegerInput {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientAmount {
    pub id: String,
    pub amount: IntegerInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInput {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmount>,
    /// `data:image/<ext>;base64,<payload>`
    pub image: String,
    pub name: String,
    pub description: String,
    pub cooking_time: IntegerInput,
}

/// Same payload as [`CreateInput`], a missing image keeps the stored one.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInput {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmount>,
    #[serde(default)]
    pub image: Option<String>,
    pub name: String,
    pub description: String,
    pub cooking_time: IntegerInput,
}

#[derive(Validate)]
pub(crate) struct Payload {
    pub tags: Vec<String>,
    pub ingredients: Vec<IngredientAmount>,
    pub image: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub cooking_time: IntegerInput,
}

impl From<CreateInput> for Payload {
    fn from(value: CreateInput) -> Self {
        Self {
            tags: value.tags,
            ingredients: value.ingredients,
            image: Some(value.image),
            name: value.name,
            description: value.description,
            cooking_time: value.cooking_time,
        }
    }
}

impl From<UpdateInput> for Payload {
    fn from(value: UpdateInput) -> Self {
        Self {
            tags: value.tags,
            ingredients: value.ingredients,
            image: value.image,
            name: value.name,
            description: value.description,
            cooking_time: value.cooking_time,
        }
    }
}
