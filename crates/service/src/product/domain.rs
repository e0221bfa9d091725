use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use models::product::{NewProduct, PRODUCT_RULES};
use models::validation::{self, FieldSource, FieldValue, ValidationErrors};

/// Product payload as received over HTTP. Every field is optional here so
/// that presence is checked by the rule table instead of the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// Body of `POST /products`.
pub type CreateProductDto = ProductInput;
/// Body of `PUT /products/{id}`.
pub type UpdateProductDto = ProductInput;

impl FieldSource for ProductInput {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(self.name.as_deref()),
            "category" => FieldValue::Text(self.category.as_deref()),
            "description" => FieldValue::Text(self.description.as_deref()),
            "price" => FieldValue::Number(self.price),
            "stockQuantity" => FieldValue::Number(self.stock_quantity.map(Decimal::from)),
            _ => FieldValue::Text(None),
        }
    }
}

impl ProductInput {
    /// Run the shape rules and produce concrete product fields.
    pub fn validate(self) -> Result<NewProduct, ValidationErrors> {
        validation::validate(&PRODUCT_RULES, &self)?;
        match (self.name, self.category, self.price, self.stock_quantity) {
            (Some(name), Some(category), Some(price), Some(stock_quantity)) => Ok(NewProduct {
                name,
                category,
                description: self.description,
                price,
                stock_quantity,
            }),
            // unreachable while every field above carries a Required rule
            _ => {
                let mut errors = ValidationErrors::default();
                errors.add("body", "Required product fields are missing.");
                Err(errors)
            }
        }
    }
}
