//! Product domain model and the add/edit form buffer.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Reasons a product or draft is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductValidationError {
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),

    #[error("price must be a finite, non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("{0} is required")]
    BlankField(DraftField),

    #[error("{field} expects a number, got '{value}'")]
    NotANumber { field: DraftField, value: String },
}

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<i64> for Rating {
    type Error = ProductValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ProductValidationError::RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

/// Non-negative, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = ProductValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(ProductValidationError::InvalidPrice(value))
        }
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A product listed by a seller.
///
/// `id` is assigned by the backend; the client never invents one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub rating: Rating,
    pub price: Price,
}

/// Form fields of the add/edit dialog, named as the form names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum DraftField {
    ImageUrl,
    Name,
    Description,
    Rating,
    Price,
}

/// Transient buffer behind the add/edit dialog.
///
/// Holds raw user input; nothing is enforced until [`ProductDraft::validate`]
/// runs on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub rating: i64,
    pub price: f64,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            name: String::new(),
            description: String::new(),
            rating: 5,
            price: 0.0,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            image_url: product.image_url.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            rating: product.rating.into(),
            price: product.price.into(),
        }
    }
}

impl ProductDraft {
    /// Applies one form change. Numeric fields must parse.
    pub fn set(&mut self, field: DraftField, value: &str) -> Result<(), ProductValidationError> {
        match field {
            DraftField::ImageUrl => self.image_url = value.to_string(),
            DraftField::Name => self.name = value.to_string(),
            DraftField::Description => self.description = value.to_string(),
            DraftField::Rating => {
                self.rating = value.trim().parse().map_err(|_| {
                    ProductValidationError::NotANumber {
                        field,
                        value: value.to_string(),
                    }
                })?
            }
            DraftField::Price => {
                self.price = value.trim().parse().map_err(|_| {
                    ProductValidationError::NotANumber {
                        field,
                        value: value.to_string(),
                    }
                })?
            }
        }
        Ok(())
    }

    /// Checks the buffer the way the form's `required`/`min`/`max` would.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        for (field, text) in [
            (DraftField::ImageUrl, &self.image_url),
            (DraftField::Name, &self.name),
            (DraftField::Description, &self.description),
        ] {
            if text.trim().is_empty() {
                return Err(ProductValidationError::BlankField(field));
            }
        }
        Rating::try_from(self.rating)?;
        Price::try_from(self.price)?;
        Ok(())
    }
}
