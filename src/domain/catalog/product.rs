//! Product aggregate.

use crate::domain::authorization::{Subject, SubjectType};
use crate::domain::foundation::{ProductId, Timestamp, ValidationError};

use super::Price;

/// Editable product attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub depo: String,
    pub category: String,
    pub brand: Option<String>,
    pub num_in_stock: u32,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

impl ProductDetails {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("depo", &self.depo),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }
        Ok(())
    }
}

/// Partial product update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub depo: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub num_in_stock: Option<u32>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
}

/// A catalog item.
///
/// # Invariants
///
/// - `name`, `description`, `depo` and `category` are non-empty
/// - `images` holds public URLs of uploaded blobs, without duplicates
/// - `rating` stays within 0.0..=5.0
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    details: ProductDetails,
    images: Vec<String>,
    rating: f32,
    num_reviews: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Product {
    pub fn new(id: ProductId, details: ProductDetails) -> Result<Self, ValidationError> {
        details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            details,
            images: Vec::new(),
            rating: 0.0,
            num_reviews: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a product from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProductId,
        details: ProductDetails,
        images: Vec<String>,
        rating: f32,
        num_reviews: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            details,
            images,
            rating,
            num_reviews,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    pub fn num_reviews(&self) -> u32 {
        self.num_reviews
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn apply(&mut self, changes: ProductChanges) -> Result<(), ValidationError> {
        let mut details = self.details.clone();
        if let Some(name) = changes.name {
            details.name = name;
        }
        if let Some(description) = changes.description {
            details.description = description;
        }
        if let Some(price) = changes.price {
            details.price = price;
        }
        if let Some(depo) = changes.depo {
            details.depo = depo;
        }
        if let Some(category) = changes.category {
            details.category = category;
        }
        if let Some(brand) = changes.brand {
            details.brand = Some(brand).filter(|b| !b.trim().is_empty());
        }
        if let Some(stock) = changes.num_in_stock {
            details.num_in_stock = stock;
        }
        if let Some(colors) = changes.colors {
            details.colors = colors;
        }
        if let Some(sizes) = changes.sizes {
            details.sizes = sizes;
        }
        details.validate()?;

        self.details = details;
        self.touch();
        Ok(())
    }

    pub fn add_image(&mut self, url: String) {
        if !self.images.contains(&url) {
            self.images.push(url);
            self.touch();
        }
    }

    /// Removes an image URL. Returns false when it was not attached.
    pub fn remove_image(&mut self, url: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|existing| existing != url);
        let removed = self.images.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl Subject for Product {
    const SUBJECT_TYPE: SubjectType = SubjectType::Product;

    fn subject_id(&self) -> String {
        self.id.to_string()
    }
}
