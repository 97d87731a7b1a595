// Domain layer - Equipment records and the statistics/comparison core
pub mod chart;
pub mod comparison;
pub mod dashboard;
pub mod equipment;
pub mod error;
pub mod history;
pub mod selection;
pub mod statistics;
pub mod summary;
