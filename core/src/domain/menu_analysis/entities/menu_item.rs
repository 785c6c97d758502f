use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl MenuItem {
    /// Builds an item from raw strings, trimming everything and dropping
    /// blank ingredients. Returns `None` when the name is blank.
    pub fn new<I, S>(name: &str, ingredients: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let ingredients = ingredients
            .into_iter()
            .map(|ingredient| ingredient.as_ref().trim().to_string())
            .filter(|ingredient| !ingredient.is_empty())
            .collect();

        Some(Self {
            name: name.to_string(),
            ingredients,
        })
    }
}

/// Flattens items into a single text blob: names and space-joined ingredients,
/// all separated by spaces.
pub fn menu_items_to_text(items: &[MenuItem]) -> String {
    let mut fragments = Vec::new();
    for item in items {
        fragments.push(item.name.clone());
        if !item.ingredients.is_empty() {
            fragments.push(item.ingredients.join(" "));
        }
    }
    fragments.join(" ")
}
