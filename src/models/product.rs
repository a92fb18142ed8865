//! Product model matching the frontend's persisted product shape.

use serde::{Deserialize, Serialize};

/// Product price as stored by the frontend: either free text or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    /// A price counts as empty only when it is blank text.
    pub fn is_empty(&self) -> bool {
        match self {
            Price::Number(_) => false,
            Price::Text(t) => t.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{}", n),
            Price::Text(t) => write!(f, "{}", t),
        }
    }
}

/// A sellable item. The whole product list is persisted as one JSON blob,
/// so `image` serializes as an explicit `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
}

/// Request body for adding a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Price,
    /// Local image reference picked on the device; only the string is kept.
    #[serde(default)]
    pub image: Option<String>,
}
