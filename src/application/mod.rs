/// Application layer - Use cases, query objects and DTOs
///
/// This layer contains the application logic that orchestrates
/// the query engine and coordinates with infrastructure through ports.
pub mod dto;
pub mod entities;
pub mod factories;
pub mod queries;
pub mod use_cases;
