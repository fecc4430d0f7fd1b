//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods
//! that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod harvest_basket_repo;
pub mod packing_basket_repo;
pub mod packing_repo;
pub mod product_repo;
pub mod production_line_repo;

pub use event_repo::EventRepo;
pub use harvest_basket_repo::HarvestBasketRepo;
pub use packing_basket_repo::PackingBasketRepo;
pub use packing_repo::PackingRepo;
pub use product_repo::ProductRepo;
pub use production_line_repo::ProductionLineRepo;
