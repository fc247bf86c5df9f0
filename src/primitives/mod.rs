//! # Layer 0: Primitives
//!
//! Basic building blocks shared by the record and the composition driver:
//! - `bool.rs`: `If`, a type chosen by a const bool.
//! - `const_utils.rs`: String comparison, hashing and message assembly in const context.

mod bool;
pub mod const_utils;

// Re-export key types at this level
pub use bool::If;
pub use const_utils::{Message, contains_str, fnv1a_64_str, str_eq};
