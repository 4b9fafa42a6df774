//! Repository layer: one zero-sized struct per table, with async associated
//! functions taking `&PgPool`.

pub mod drug_repo;

pub use drug_repo::DrugRepo;
