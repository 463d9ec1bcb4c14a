/*!
 * Core Module
 * Shared types and centralized errors
 */

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::*;
