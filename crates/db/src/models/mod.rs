//! Row types mapped from the reporting tables.

pub mod event;
pub mod packing;
pub mod product;
