use once_cell::sync::Lazy;
use sea_orm::{entity::prelude::*, ActiveValue::{NotSet, Set, Unchanged}, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::validation::{Constraint, FieldRules, Rule};

pub const NAME_MAX: usize = 100;
pub const CATEGORY_MAX: usize = 50;
pub const DESCRIPTION_MAX: usize = 500;
/// Decimal places the `price` column stores.
pub const PRICE_SCALE: u32 = 2;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    pub stock_quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Product fields without an id; what a client may supply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
}

impl NewProduct {
    /// Attach a persisted id.
    pub fn with_id(self, id: i32) -> Model {
        Model {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
        }
    }
}

impl Model {
    /// Replace every mutable field, keeping `id`.
    pub fn overwrite_with(&mut self, fields: NewProduct) {
        self.name = fields.name;
        self.category = fields.category;
        self.description = fields.description;
        self.price = fields.price;
        self.stock_quantity = fields.stock_quantity;
    }
}

/// Field rules shared by the create and update payloads. Keys are JSON names.
pub static PRODUCT_RULES: Lazy<Vec<FieldRules>> = Lazy::new(|| {
    vec![
        FieldRules::new("name", vec![
            Rule::new(Constraint::Required, "Product Name is required."),
            Rule::new(Constraint::MaxLength(NAME_MAX), "Product Name can't exceed 100 characters."),
        ]),
        FieldRules::new("category", vec![
            Rule::new(Constraint::Required, "Category is required."),
            Rule::new(Constraint::MaxLength(CATEGORY_MAX), "Category can't exceed 50 characters."),
        ]),
        FieldRules::new("description", vec![
            Rule::new(Constraint::MaxLength(DESCRIPTION_MAX), "Description can't exceed 500 characters."),
        ]),
        FieldRules::new("price", vec![
            Rule::new(Constraint::Required, "Price is required."),
            Rule::new(Constraint::GreaterThan(Decimal::ZERO), "Price must be greater than zero."),
            // sub-cent amounts would be rounded by the column, possibly to 0.00
            Rule::new(Constraint::MaxScale(PRICE_SCALE), "Price must be greater than zero."),
        ]),
        FieldRules::new("stockQuantity", vec![
            Rule::new(Constraint::Required, "Stock Quantity is required."),
            Rule::new(Constraint::AtLeast(Decimal::ZERO), "Stock Quantity can't be negative."),
        ]),
    ]
});

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert and return the row with its database-assigned id.
pub async fn insert(db: &DatabaseConnection, fields: NewProduct) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        category: Set(fields.category),
        description: Set(fields.description),
        price: Set(fields.price),
        stock_quantity: Set(fields.stock_quantity),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Full replacement of the row identified by `product.id`.
pub async fn replace(db: &DatabaseConnection, product: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Unchanged(product.id),
        name: Set(product.name),
        category: Set(product.category),
        description: Set(product.description),
        price: Set(product.price),
        stock_quantity: Set(product.stock_quantity),
    };
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Returns the number of rows removed (0 when the id is unknown).
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
