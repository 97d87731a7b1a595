// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod equipment_api_repository;
pub mod http_response;
