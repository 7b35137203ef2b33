use serde::{Deserialize, Serialize};

use grocer_core::ServiceError;

/// Shown wherever a list has no delivery address.
pub const ADDRESS_NOT_SPECIFIED: &str = "Not specified";

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A reusable named product with a default price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    #[serde(rename = "price")]
    pub default_price: f64,
}

/// A price as sent by the list builder: a JSON number, or the raw text of
/// an input field such as `"45.00"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    pub fn to_price(&self) -> Result<f64, ServiceError> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ServiceError::Validation(format!("price '{s}' is not a number")))?,
        };
        check_price(value)
    }
}

/// Trim a catalog item name and reject blanks.
pub fn check_name(name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation("name must not be blank".into()));
    }
    Ok(trimmed.to_string())
}

/// Prices are finite and non-negative.
pub fn check_price(price: f64) -> Result<f64, ServiceError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ServiceError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(price)
}

/// `POST /add_common_item`.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: Option<String>,
    pub price: Option<PriceInput>,
}

impl AddItemRequest {
    /// Returns `(name, price)` once both are present and well-formed.
    pub fn validate(self) -> Result<(String, f64), ServiceError> {
        required_entry(self.name, self.price)
    }
}

/// `POST /update_common_item`.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<PriceInput>,
}

impl UpdateItemRequest {
    pub fn validate(self) -> Result<(i64, String, f64), ServiceError> {
        let id = self
            .id
            .ok_or_else(|| ServiceError::Validation("item id required".into()))?;
        let (name, price) = required_entry(self.name, self.price)?;
        Ok((id, name, price))
    }
}

/// `POST /delete_common_item`.
#[derive(Debug, Deserialize)]
pub struct DeleteItemRequest {
    pub id: Option<i64>,
}

impl DeleteItemRequest {
    pub fn validate(self) -> Result<i64, ServiceError> {
        self.id
            .ok_or_else(|| ServiceError::Validation("item id required".into()))
    }
}

fn required_entry(
    name: Option<String>,
    price: Option<PriceInput>,
) -> Result<(String, f64), ServiceError> {
    let (Some(name), Some(price)) = (name, price) else {
        return Err(ServiceError::Validation("name and price required".into()));
    };
    Ok((check_name(&name)?, price.to_price()?))
}

// ---------------------------------------------------------------------------
// Saved lists
// ---------------------------------------------------------------------------

/// One row of a saved list. `total` is whatever the client computed; it is
/// stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    pub total: f64,
}

impl LineItem {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ServiceError::Validation(format!(
                "quantity of '{}' must be greater than zero",
                self.name
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ServiceError::Validation(format!(
                "price of '{}' must be a non-negative number",
                self.name
            )));
        }
        if !self.total.is_finite() {
            return Err(ServiceError::Validation(format!(
                "total of '{}' must be a number",
                self.name
            )));
        }
        Ok(())
    }
}

/// A saved, immutable grocery list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryList {
    pub id: i64,
    pub created_date: String,
    pub delivery_address: Option<String>,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
}

impl GroceryList {
    pub fn display_address(&self) -> &str {
        display_address(self.delivery_address.as_deref())
    }
}

/// Row of the saved-lists index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    pub id: i64,
    pub created_date: String,
    pub delivery_address: Option<String>,
    pub total_amount: f64,
}

impl ListSummary {
    pub fn display_address(&self) -> &str {
        display_address(self.delivery_address.as_deref())
    }
}

fn display_address(address: Option<&str>) -> &str {
    match address {
        Some(a) if !a.is_empty() => a,
        _ => ADDRESS_NOT_SPECIFIED,
    }
}

/// `POST /save_list`.
#[derive(Debug, Deserialize)]
pub struct SaveListRequest {
    pub date: Option<String>,
    pub address: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub total: Option<f64>,
}

/// A list that passed request validation and is ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewList {
    pub created_date: String,
    pub delivery_address: Option<String>,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
}

impl SaveListRequest {
    pub fn validate(self) -> Result<NewList, ServiceError> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push("date");
        }
        if self.items.is_none() {
            missing.push("items");
        }
        if self.total.is_none() {
            missing.push("total");
        }
        match (self.date, self.items, self.total) {
            (Some(created_date), Some(items), Some(total_amount)) => Ok(NewList {
                created_date,
                delivery_address: self.address,
                items,
                total_amount,
            }),
            _ => Err(ServiceError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}
