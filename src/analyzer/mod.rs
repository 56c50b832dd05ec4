pub mod context;
pub mod outlet;
pub mod research;
pub mod summary;
pub mod workflow;
