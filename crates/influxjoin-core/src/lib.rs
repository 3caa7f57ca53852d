//! Core peer selection and join-directive formatting for influxjoin
//!
//! Everything in this crate is a pure, total function over its inputs: the
//! Kubernetes plumbing hands in a snapshot of candidate pod addresses plus
//! the local node's own address, and gets back the exact string to persist.
//! No I/O, no shared state, no error paths.

mod directive;
mod peers;

pub use directive::join_directive;
pub use peers::select_peers;

/// Inter-node cluster port every peer listens on.
pub const CLUSTER_PORT: u16 = 8091;

/// Maximum number of peer addresses included in a single join directive.
pub const MAX_JOIN_PEERS: usize = 3;
