//! Request and response bodies for product endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Price, Product, ProductChanges, ProductDetails};
use crate::domain::foundation::{Timestamp, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub depo: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub num_in_stock: u32,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl TryFrom<CreateProductRequest> for ProductDetails {
    type Error = ValidationError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            description: req.description,
            price: Price::new(req.price, req.currency)?,
            depo: req.depo,
            category: req.category,
            brand: req.brand,
            num_in_stock: req.num_in_stock,
            colors: req.colors,
            sizes: req.sizes,
        })
    }
}

/// Partial update. A new price needs both amount and currency; a lone
/// amount keeps the current currency.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub depo: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub num_in_stock: Option<u32>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
}

impl UpdateProductRequest {
    /// True when only one half of the price was sent.
    pub fn needs_current_price(&self) -> bool {
        self.price.is_some() != self.currency.is_some()
    }

    /// Builds the change set, filling a missing price half from `current`.
    pub fn into_changes(self, current: Option<&Price>) -> Result<ProductChanges, ValidationError> {
        let price = match (self.price, self.currency) {
            (None, None) => None,
            (Some(amount), Some(currency)) => Some(Price::new(amount, currency)?),
            (Some(amount), None) => {
                let current = current.ok_or_else(|| ValidationError::empty_field("currency"))?;
                Some(Price::new(amount, current.currency())?)
            }
            (None, Some(currency)) => {
                let current = current.ok_or_else(|| ValidationError::empty_field("price"))?;
                Some(Price::new(current.amount(), currency)?)
            }
        };
        Ok(ProductChanges {
            name: self.name,
            description: self.description,
            price,
            depo: self.depo,
            category: self.category,
            brand: self.brand,
            num_in_stock: self.num_in_stock,
            colors: self.colors,
            sizes: self.sizes,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteImageRequest {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductSearch {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub depo: String,
    pub category: String,
    pub brand: Option<String>,
    pub num_in_stock: u32,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    pub rating: f32,
    pub num_reviews: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        let d = product.details();
        Self {
            id: product.id().to_string(),
            name: d.name.clone(),
            description: d.description.clone(),
            price: d.price.amount(),
            currency: d.price.currency().to_string(),
            depo: d.depo.clone(),
            category: d.category.clone(),
            brand: d.brand.clone(),
            num_in_stock: d.num_in_stock,
            colors: d.colors.clone(),
            sizes: d.sizes.clone(),
            images: product.images().to_vec(),
            rating: product.rating(),
            num_reviews: product.num_reviews(),
            created_at: *product.created_at(),
            updated_at: *product.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> Price {
        Price::new(25.0, "NGN").unwrap()
    }

    #[test]
    fn lone_amount_keeps_currency() {
        let req = UpdateProductRequest {
            price: Some(30.0),
            ..Default::default()
        };
        assert!(req.needs_current_price());
        let changes = req.into_changes(Some(&current())).unwrap();
        assert_eq!(changes.price, Some(Price::new(30.0, "NGN").unwrap()));
    }

    #[test]
    fn untouched_price_stays_none() {
        let req = UpdateProductRequest {
            name: Some("Denim".into()),
            ..Default::default()
        };
        assert!(!req.needs_current_price());
        let changes = req.into_changes(None).unwrap();
        assert!(changes.price.is_none());
        assert_eq!(changes.name.as_deref(), Some("Denim"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name":"Cap","description":"Wool cap","price":-1,"currency":"USD",
                "depo":"Lagos","category":"hats"}"#,
        )
        .unwrap();
        assert!(ProductDetails::try_from(req).is_err());
    }
}
