//! Top-level facade crate for netpolicy.
//!
//! Re-exports the core store, the server library, and the clients so users can
//! depend on a single crate.

pub mod core {
    pub use netpolicy_core::*;
}

pub mod server {
    pub use netpolicy_server::*;
}

pub mod client {
    pub use netpolicy_client::*;
}
