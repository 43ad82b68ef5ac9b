use crate::database::models::RecommendationFilter;

/// A statement plus its positional parameters (`$1`, `$2`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<i32>,
}

const SELECT_CLAUSE: &str = "SELECT p.Product_Name AS product_name, \
     p.All_Ingredients AS all_ingredients, \
     b.Brand AS brand, \
     c.Concern AS concern, \
     k.Key_Ingredients AS key_ingredients, \
     s.Skin_Type AS skin_type";

// Inner joins only: a product whose keys do not all resolve drops out.
const FROM_CLAUSE: &str = "FROM Products p \
     INNER JOIN Brand b ON p.Brand_ID = b.Brand_ID \
     INNER JOIN Concern c ON p.Concern_ID = c.Concern_ID \
     INNER JOIN Key_Ingredients k ON p.Key_Ingredients_ID = k.Key_Ingredients_ID \
     INNER JOIN Skin_Type s ON p.Skin_Type_ID = s.Skin_Type_ID";

const ORDER_CLAUSE: &str = "ORDER BY p.Product_Type_ID ASC, p.Product_ID ASC";

/// Builds the single join statement behind both recommendation routes
pub struct RecommendationQuery {
    conditions: Vec<String>,
    params: Vec<i32>,
}

impl RecommendationQuery {
    pub fn new(filter: &RecommendationFilter) -> Self {
        let mut query = Self {
            conditions: vec![],
            params: vec![],
        };
        query.push_eq("p.Concern_ID", filter.concern_id.get());
        query.push_eq("p.Skin_Type_ID", filter.skin_type_id.get());
        if let Some(product_type_id) = filter.product_type_id {
            query.push_eq("p.Product_Type_ID", product_type_id.get());
        }
        query
    }

    fn push_eq(&mut self, column: &'static str, value: i32) {
        self.params.push(value);
        self.conditions.push(format!("{} = ${}", column, self.params.len()));
    }

    pub fn to_sql(&self) -> SqlResult {
        let query = [
            SELECT_CLAUSE.to_string(),
            FROM_CLAUSE.to_string(),
            format!("WHERE {}", self.conditions.join(" AND ")),
            ORDER_CLAUSE.to_string(),
        ]
        .join(" ");

        SqlResult {
            query,
            params: self.params.clone(),
        }
    }
}
