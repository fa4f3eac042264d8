use serde::{Serialize, Deserialize};

/// Rarity tier of an item. Display-only: the draw and upgrade math never
/// look at it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Classified,
    Covert,
}

/// A virtual-goods item as supplied by the inventory collaborator.
///
/// The core only reads these; inventory mutation after an outcome is the
/// caller's job. `image` is an opaque reference for the render layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub rarity: Rarity,
    pub price: f64,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>, image: impl Into<String>, rarity: Rarity, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            rarity,
            price,
        }
    }
}
