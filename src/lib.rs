pub mod graph;
pub mod cust_error;
pub mod forest;
pub mod fvs_instance;
pub mod kernelization;
pub mod bounded_search;
pub mod iterative_compression;
pub mod compression;
pub mod mif;

pub use bounded_search::fvs_disjoint;
pub use forest::is_fvs;
pub use iterative_compression::{fvs_via_compression, fvs_via_ic};
pub use mif::{fvs_via_mif, max_induced_forest, ForestBound};

#[cfg(test)]
mod testing;
