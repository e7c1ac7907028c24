//! Resource limits for JSON parsing.
//!
//! Responses come from a remote service, so the parser bounds input size,
//! nesting, string length and container sizes before allocating.

/// Parser resource limits.
///
/// Exceeding any of them yields `LinkhubError::LimitExceeded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects
    pub max_nesting_depth: u64,
    /// Maximum decoded string length in bytes
    pub max_string_length: u64,
    /// Maximum number of fields in an object
    pub max_object_fields: u64,
    /// Maximum number of elements in an array
    pub max_array_length: u64,
}

impl Limits {
    /// Limits used for authority responses and CLI input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024,  // 1 MiB
            max_nesting_depth: 64,        // 64 levels
            max_string_length: 64 * 1024, // 64 KiB
            max_object_fields: 1024,      // 1024 fields
            max_array_length: 10_000,     // 10,000 elements
        }
    }

    /// Lenient limits for trusted, locally produced documents.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 16 * 1024 * 1024, // 16 MiB
            max_nesting_depth: 256,           // 256 levels
            max_string_length: 1024 * 1024,   // 1 MiB
            max_object_fields: 100_000,       // 100,000 fields
            max_array_length: 1_000_000,      // 1,000,000 elements
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::strict()
    }
}
