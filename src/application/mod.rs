// Application layer - Use cases over the dataset repository
pub mod chart_projector;
pub mod comparison_workspace;
pub mod dataset_repository;
pub mod dataset_service;
