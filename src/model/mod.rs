//! Vehicle record types
//!
//! `Carro` is the stored record; `NewCarro` is what a client submits before
//! the store assigns an identifier.
//!
//! JSON field names follow the public API (`marca`, `modelo`, `ano`, `cor`,
//! `preco`). The English names are accepted as aliases on input.

mod price;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store.
pub type CarroId = u32;

/// A stored vehicle record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carro {
    /// Store-assigned identifier, never reused
    pub id: CarroId,
    #[serde(rename = "marca", alias = "brand")]
    pub brand: String,
    #[serde(rename = "modelo", alias = "model")]
    pub model: String,
    #[serde(rename = "ano", alias = "year")]
    pub year: i32,
    #[serde(rename = "cor", alias = "color", default)]
    pub color: Option<String>,
    #[serde(rename = "preco", alias = "price", with = "price")]
    pub price: BigDecimal,
}

/// A vehicle submitted for insertion.
///
/// Missing fields fall back to their defaults so that validation, not
/// deserialization, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCarro {
    #[serde(rename = "marca", alias = "brand", default)]
    pub brand: String,
    #[serde(rename = "modelo", alias = "model", default)]
    pub model: String,
    #[serde(rename = "ano", alias = "year", default)]
    pub year: i32,
    #[serde(rename = "cor", alias = "color", default)]
    pub color: Option<String>,
    #[serde(rename = "preco", alias = "price", with = "price", default)]
    pub price: BigDecimal,
}

impl NewCarro {
    /// Create a new vehicle submission
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        color: Option<String>,
        price: BigDecimal,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            year,
            color,
            price,
        }
    }

    /// Attach a store-assigned identifier.
    pub fn into_carro(self, id: CarroId) -> Carro {
        Carro {
            id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            color: self.color,
            price: self.price,
        }
    }
}
