//! Top-level facade crate for mirai.
//!
//! Re-exports the core types and the client library so users can depend on a single crate.

pub mod core {
    pub use mirai_core::*;
}

pub mod client {
    pub use mirai_client::*;
}
