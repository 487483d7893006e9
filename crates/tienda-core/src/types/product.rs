//! Catalogue products and their kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ProductId;
use crate::{Error, Result};

/// Kind-specific product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Plain product with no extra attributes.
    Generic,
    /// Electronic product covered by a warranty.
    Electronic {
        /// Warranty length in months
        warranty_months: u32,
    },
    /// Garment with size and colour.
    Clothing {
        /// Garment size (free text, e.g. "M", "42")
        size: String,
        /// Garment colour
        color: String,
    },
}

impl ProductKind {
    /// Wire tag for this kind: `generico`, `electronico` or `ropa`.
    pub fn tag(&self) -> ProductTag {
        match self {
            Self::Generic => ProductTag::Generic,
            Self::Electronic { .. } => ProductTag::Electronic,
            Self::Clothing { .. } => ProductTag::Clothing,
        }
    }
}

/// Kind tag without the kind-specific data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductTag {
    /// `generico`
    Generic,
    /// `electronico`
    Electronic,
    /// `ropa`
    Clothing,
}

impl ProductTag {
    /// Wire representation (always lower case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generico",
            Self::Electronic => "electronico",
            Self::Clothing => "ropa",
        }
    }
}

impl fmt::Display for ProductTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductTag {
    type Err = Error;

    /// Parses a wire tag, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "generico" => Ok(Self::Generic),
            "electronico" => Ok(Self::Electronic),
            "ropa" => Ok(Self::Clothing),
            _ => Err(Error::InvalidProductKind(s.to_string())),
        }
    }
}

/// Unvalidated product draft, as submitted by a client.
///
/// Kind-specific fields are optional here; [`NewProduct::into_product`]
/// enforces which ones each kind requires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    /// Kind tag (`generico`, `electronico`, `ropa`), case-insensitive
    pub kind: String,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Initial stock
    pub stock: u32,
    /// Warranty months (electronic only)
    pub warranty_months: Option<u32>,
    /// Size (clothing only)
    pub size: Option<String>,
    /// Colour (clothing only)
    pub color: Option<String>,
}

impl NewProduct {
    /// Validates the draft and builds a [`Product`] with a fresh ID.
    pub fn into_product(self) -> Result<Product> {
        let tag: ProductTag = self.kind.parse()?;

        if self.name.trim().is_empty() {
            return Err(Error::validation_field("nombre", "must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::validation_field(
                "precio",
                "must be a non-negative number",
            ));
        }

        let kind = match tag {
            ProductTag::Generic => ProductKind::Generic,
            ProductTag::Electronic => {
                let warranty_months = self.warranty_months.ok_or_else(|| {
                    Error::validation_field(
                        "meses_garantia",
                        "meses_garantia is required for electronic products",
                    )
                })?;
                ProductKind::Electronic { warranty_months }
            }
            ProductTag::Clothing => match (self.size, self.color) {
                (Some(size), Some(color)) => ProductKind::Clothing { size, color },
                _ => {
                    return Err(Error::validation(
                        "talla and color are required for clothing products",
                    ));
                }
            },
        };

        Ok(Product {
            id: ProductId::new(),
            name: self.name,
            price: self.price,
            stock: self.stock,
            kind,
        })
    }
}

/// A product in the store catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique ID
    pub id: ProductId,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Units on hand
    pub stock: u32,
    /// Kind-specific data
    pub kind: ProductKind,
}

impl Product {
    /// Whether at least `quantity` units are on hand.
    pub fn has_stock(&self, quantity: u64) -> bool {
        u64::from(self.stock) >= quantity
    }

    /// Adds a signed delta to the stock.
    ///
    /// Fails without modifying the stock if the result would be negative or
    /// would overflow.
    pub fn adjust_stock(&mut self, delta: i64) -> Result<()> {
        let next = i64::from(self.stock)
            .checked_add(delta)
            .ok_or_else(|| Error::validation_field("stock", "stock would overflow"))?;
        if next < 0 {
            return Err(Error::InsufficientStock {
                product: self.name.clone(),
                requested: delta.unsigned_abs(),
                available: self.stock,
            });
        }
        self.stock = u32::try_from(next)
            .map_err(|_| Error::validation_field("stock", "stock would overflow"))?;
        Ok(())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - ${:.2} ({} available)",
            self.id, self.name, self.price, self.stock
        )?;
        match &self.kind {
            ProductKind::Generic => Ok(()),
            ProductKind::Electronic { warranty_months } => {
                write!(f, " | Warranty: {warranty_months} months")
            }
            ProductKind::Clothing { size, color } => {
                write!(f, " | Size: {size}, Color: {color}")
            }
        }
    }
}
