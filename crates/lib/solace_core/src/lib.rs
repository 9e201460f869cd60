//! # solace_core
//!
//! Core domain logic for Solace: chat turns, the trailing history window,
//! conversation assembly and the upstream completion client.

pub mod chat;
pub mod completion;
pub mod relay;
pub mod settings;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
