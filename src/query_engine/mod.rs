//! Query engine - entities, parameter model and the pure aggregation services
//!
//! Nothing in here knows about HTTP; remote access goes through the
//! outbound ports.
pub mod domain;
pub mod services;
