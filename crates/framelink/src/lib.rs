//! Top-level facade crate for framelink.
//!
//! Re-exports the core protocol types and the client library so users can depend on a single crate.

pub mod core {
    pub use framelink_core::*;
}

pub mod client {
    pub use framelink_client::*;
}
