pub mod handlers;
pub mod products;

pub use products::{Catalog, Product, ProductSummary};
