/// Shared kernel - error types, result alias and input validation
pub mod error;
pub mod result;
pub mod security;

#[cfg(test)]
pub(crate) mod test_support;

pub use result::Result;
