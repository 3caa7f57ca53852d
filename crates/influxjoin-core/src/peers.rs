//! Peer selection
//!
//! Decides which candidate pod addresses represent *other* cluster nodes
//! and bounds the result to the join fanout.

/// Select the peer addresses to join, given the local node's own address.
///
/// Candidates are kept in their given order; any entry equal to `local`
/// (exact string comparison, no normalization) is dropped, and the
/// survivors are truncated to at most `max_peers`. The candidate order is
/// whatever the registry snapshot returned, so the result is deterministic
/// per snapshot but not across snapshots.
pub fn select_peers(local: &str, candidates: Vec<String>, max_peers: usize) -> Vec<String> {
    let mut peers: Vec<String> = candidates
        .into_iter()
        .filter(|addr| addr != local)
        .collect();
    peers.truncate(max_peers);
    peers
}
