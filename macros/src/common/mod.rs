// Common utilities shared between the user-facing macros
//
// This module contains:
// - parse_utils: list parsing, duplicate detection, naming helpers

mod parse_utils;

pub use parse_utils::*;
