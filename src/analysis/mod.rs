pub mod analyzer;
pub mod cleaning;
pub mod dataset;
pub mod error;
pub mod export;
pub mod statistics;
