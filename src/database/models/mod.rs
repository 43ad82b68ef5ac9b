pub mod product;
pub mod recommendation;
pub mod reference;

pub use product::{Product, PRODUCT_COLUMNS};
pub use recommendation::{RecommendationFilter, RecommendationResult};
pub use reference::{ReferenceKind, ReferenceRecord};
