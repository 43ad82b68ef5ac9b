use serde_json::{Map, Value};
use sqlx::FromRow;

use super::product::Product;

/// The five lookup tables a product points into.
///
/// Each table is a plain `(id, label)` pair; everything that differs between
/// them (table name, column names, route segment, JSON keys) hangs off this
/// enum so the CRUD surface can be generated from one description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Brand,
    Concern,
    SkinType,
    ProductType,
    KeyIngredient,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 5] = [
        ReferenceKind::Brand,
        ReferenceKind::Concern,
        ReferenceKind::SkinType,
        ReferenceKind::ProductType,
        ReferenceKind::KeyIngredient,
    ];

    /// Table name; the label column shares it
    pub fn table(self) -> &'static str {
        match self {
            ReferenceKind::Brand => "Brand",
            ReferenceKind::Concern => "Concern",
            ReferenceKind::SkinType => "Skin_Type",
            ReferenceKind::ProductType => "Product_Type",
            ReferenceKind::KeyIngredient => "Key_Ingredients",
        }
    }

    /// Primary key column, also the foreign key column on `Products`
    pub fn id_column(self) -> &'static str {
        match self {
            ReferenceKind::Brand => "Brand_ID",
            ReferenceKind::Concern => "Concern_ID",
            ReferenceKind::SkinType => "Skin_Type_ID",
            ReferenceKind::ProductType => "Product_Type_ID",
            ReferenceKind::KeyIngredient => "Key_Ingredients_ID",
        }
    }

    pub fn label_column(self) -> &'static str {
        self.table()
    }

    pub fn route_segment(self) -> &'static str {
        match self {
            ReferenceKind::Brand => "brand",
            ReferenceKind::Concern => "concerns",
            ReferenceKind::SkinType => "skin_type",
            ReferenceKind::ProductType => "product_type",
            ReferenceKind::KeyIngredient => "key_ingredients",
        }
    }

    /// JSON / query-string key carrying the identifier
    pub fn id_key(self) -> &'static str {
        match self {
            ReferenceKind::Brand => "brand_id",
            ReferenceKind::Concern => "concern_id",
            ReferenceKind::SkinType => "skin_type_id",
            ReferenceKind::ProductType => "product_type_id",
            ReferenceKind::KeyIngredient => "key_ingredients_id",
        }
    }

    /// Query-string key carrying the label on create and update
    pub fn label_key(self) -> &'static str {
        match self {
            ReferenceKind::Brand => "brand",
            ReferenceKind::Concern => "concern",
            ReferenceKind::SkinType => "skin_type",
            ReferenceKind::ProductType => "product_type",
            ReferenceKind::KeyIngredient => "key_ingredients",
        }
    }

    /// JSON key carrying the label in responses. Key ingredients answer with
    /// `ingredient` while accepting `key_ingredients` on input.
    pub fn response_label_key(self) -> &'static str {
        match self {
            ReferenceKind::KeyIngredient => "ingredient",
            other => other.label_key(),
        }
    }

    /// Body message of a successful delete
    pub fn delete_message(self) -> &'static str {
        match self {
            ReferenceKind::Brand => "Brand deleted",
            ReferenceKind::Concern => "Concern deleted",
            ReferenceKind::SkinType => "Skin Type deleted",
            ReferenceKind::ProductType => "Product Type deleted",
            ReferenceKind::KeyIngredient => "Key Ingredient deleted",
        }
    }

    /// Human-readable name used in log and error messages
    pub fn display_name(self) -> &'static str {
        match self {
            ReferenceKind::Brand => "Brand",
            ReferenceKind::Concern => "Concern",
            ReferenceKind::SkinType => "Skin type",
            ReferenceKind::ProductType => "Product type",
            ReferenceKind::KeyIngredient => "Key ingredient",
        }
    }

    /// The product's foreign key into this table
    pub fn key_of(self, product: &Product) -> i32 {
        match self {
            ReferenceKind::Brand => product.brand_id,
            ReferenceKind::Concern => product.concern_id,
            ReferenceKind::SkinType => product.skin_type_id,
            ReferenceKind::ProductType => product.product_type_id,
            ReferenceKind::KeyIngredient => product.key_ingredients_id,
        }
    }
}

/// One row of a reference table. Selected as `<Table>_ID AS id, <Table> AS label`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ReferenceRecord {
    pub id: i32,
    pub label: String,
}

impl ReferenceRecord {
    pub fn new(id: i32, label: impl Into<String>) -> Self {
        Self { id, label: label.into() }
    }

    /// Wire shape, e.g. `{"brand_id": 1, "brand": "Acme"}`
    pub fn to_json(&self, kind: ReferenceKind) -> Value {
        let mut map = Map::with_capacity(2);
        map.insert(kind.id_key().to_string(), Value::from(self.id));
        map.insert(kind.response_label_key().to_string(), Value::from(self.label.clone()));
        Value::Object(map)
    }
}
