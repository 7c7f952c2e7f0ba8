//! Domain layer for Style Guardian
//!
//! CDD Principle: Domain Model - findings, violations and the host syntax view
//! - Contains the core entities and value objects the checks and reports share
//! - Independent of file discovery, configuration files and output formats

pub mod syntax;
pub mod violations;

// Re-export main domain types for convenience
pub use syntax::*;
pub use violations::*;
