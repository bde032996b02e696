//! Product module: three-layer architecture (domain, repository, service).
//!
//! The service depends only on the `ProductRepository` trait; `repo::seaorm` is the
//! Postgres-backed implementation and `repository::mock` the in-memory one.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use repository::ProductRepository;
pub use service::ProductService;
