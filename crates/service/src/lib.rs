//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Repositories are traits so the SeaORM store can be swapped for the in-memory one.

pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test_support;
