//! SeaORM entities and connection setup for the products database.

pub mod db;
pub mod product;
