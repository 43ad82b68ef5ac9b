pub mod health;
pub mod params;
pub mod products;
pub mod reference;
