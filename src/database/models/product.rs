use serde::Serialize;
use sqlx::FromRow;

/// A row of `Products`. Unquoted Postgres identifiers fold to lower case, so
/// `Product_ID` etc. decode straight into these snake_case fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub product_name: String,
    pub all_ingredients: String,
    pub concern_id: i32,
    pub skin_type_id: i32,
    pub brand_id: i32,
    pub product_type_id: i32,
    pub key_ingredients_id: i32,
}

/// Column list shared by every statement that returns whole products
pub const PRODUCT_COLUMNS: &str = "Product_ID, Product_Name, All_Ingredients, Concern_ID, \
     Skin_Type_ID, Brand_ID, Product_Type_ID, Key_Ingredients_ID";
