use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// URL-safe slug: letters, digits, hyphens and underscores
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !SLUG_PATTERN.is_match(slug) {
        let mut err = ValidationError::new("invalid_slug");
        err.message =
            Some("slug may only contain letters, numbers, hyphens and underscores.".into());
        return Err(err);
    }
    Ok(())
}

/// Price rule: non-negative decimal, at most 10 total digits, 2 fractional digits.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("min_value");
        err.message = Some("price must be greater than or equal to 0.".into());
        return Err(err);
    }

    if price.normalize().scale() > 2 {
        let mut err = ValidationError::new("max_decimal_places");
        err.message = Some("price supports at most 2 decimal places.".into());
        return Err(err);
    }

    // 8 integer digits + 2 fractional digits = 10 total
    if price >= &Decimal::new(100_000_000, 0) {
        let mut err = ValidationError::new("max_digits");
        err.message = Some("price supports at most 10 digits in total.".into());
        return Err(err);
    }

    Ok(())
}

fn default_active() -> bool {
    true
}

/// Category entity - a named, sluggable classification tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// URL-safe slug
    pub slug: String,
    /// Free-form description
    pub description: String,
    /// Whether the category is active
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Category as rendered in API responses (and nested inside products)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub active: bool,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
            slug: category.slug,
            description: category.description,
            active: category.active,
        }
    }
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// DTO for updating an existing category (partial semantics)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl Category {
    /// Create a new category from the CreateCategory DTO
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            slug: input.slug,
            description: input.description,
            active: input.active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from the UpdateCategory DTO; absent fields keep their value
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }
}

/// Product entity - a sellable item referencing a set of categories
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Display title (unique case-insensitively across products)
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Price with two fractional digits
    pub price: Decimal,
    /// Whether the product is active
    pub active: bool,
    /// Associated categories
    pub categories: Vec<Category>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Product as rendered in API responses.
///
/// Categories appear as nested objects sorted by title; the `category_ids`
/// write field is never present here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Serialized as a string with two fractional digits, e.g. "99.90"
    #[schema(value_type = String)]
    pub price: Decimal,
    pub active: bool,
    pub categories: Vec<CategoryResponse>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let mut categories: Vec<CategoryResponse> = product
            .categories
            .into_iter()
            .map(CategoryResponse::from)
            .collect();
        categories.sort_by(|a, b| a.title.cmp(&b.title));

        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            active: product.active,
            categories,
        }
    }
}

/// DTO for creating a new product.
///
/// `category_ids` is write-only: the identifiers are resolved against the
/// category store and the product is created with exactly that set.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 3, message = "title must be at least 3 characters."))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Accepts a decimal string ("99.90") or a JSON number
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String)]
    pub price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub category_ids: Option<Vec<Uuid>>,
}

/// DTO for updating an existing product (partial semantics).
///
/// Only present fields are applied. `category_ids` present (even as an empty
/// list) replaces the association set wholesale; absent leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 3, message = "title must be at least 3 characters."))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub active: Option<bool>,
    pub category_ids: Option<Vec<Uuid>>,
}

impl Product {
    /// Create a new product from the CreateProduct DTO and resolved categories.
    ///
    /// The price is normalized to two fractional digits so "100" persists and
    /// renders as "100.00".
    pub fn new(input: CreateProduct, categories: Vec<Category>) -> Self {
        let mut price = input.price;
        price.rescale(2);

        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            price,
            active: input.active,
            categories,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply scalar updates from the UpdateProduct DTO; absent fields keep
    /// their value. Category replacement is decided by the caller, which owns
    /// the resolved category set.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(mut price) = update.price {
            price.rescale(2);
            self.price = price;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }
}
