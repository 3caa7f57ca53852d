//! Join directive formatting
//!
//! Renders the `INFLUXD_OPTS` line that influxd's startup script sources
//! to join the cluster.

/// Render the join directive for the selected peers.
///
/// Each peer is rendered as `<address>:<cluster_port>` and the list is
/// comma-joined, in the order given, into `INFLUXD_OPTS="-join …"`. An
/// empty peer list renders the empty string; the caller persists that
/// verbatim, so a node that found no peers ends up with an empty options
/// file.
///
/// `local` is currently unused: InfluxDB releases before 0.10 also took a
/// `-hostname <local>:<port>` clause, and the parameter stays so that
/// variant remains an additive change.
pub fn join_directive(_local: &str, peers: &[String], cluster_port: u16) -> String {
    if peers.is_empty() {
        return String::new();
    }

    let joined = peers
        .iter()
        .map(|peer| format!("{peer}:{cluster_port}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("INFLUXD_OPTS=\"-join {joined}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{select_peers, CLUSTER_PORT, MAX_JOIN_PEERS};

    fn addrs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_peers_render_empty_string() {
        // A node with no peers persists an empty options file rather than
        // skipping the write; influxd reads that as "no extra options".
        assert_eq!(join_directive("10.0.0.1", &[], CLUSTER_PORT), "");
    }

    #[test]
    fn test_two_peers_render_exactly() {
        let directive = join_directive("10.0.0.1", &addrs(&["10.0.0.2", "10.0.0.3"]), 8091);
        assert_eq!(directive, r#"INFLUXD_OPTS="-join 10.0.0.2:8091,10.0.0.3:8091""#);
    }

    #[test]
    fn test_single_peer_has_no_trailing_comma() {
        let directive = join_directive("10.0.0.1", &addrs(&["10.0.0.2"]), CLUSTER_PORT);
        assert_eq!(directive, r#"INFLUXD_OPTS="-join 10.0.0.2:8091""#);
    }

    #[test]
    fn test_peer_order_is_preserved() {
        let directive = join_directive("10.0.0.1", &addrs(&["10.0.0.9", "10.0.0.2"]), 8091);
        assert_eq!(directive, r#"INFLUXD_OPTS="-join 10.0.0.9:8091,10.0.0.2:8091""#);
    }

    #[test]
    fn test_port_is_taken_from_parameter() {
        let directive = join_directive("10.0.0.1", &addrs(&["10.0.0.2"]), 9096);
        assert_eq!(directive, r#"INFLUXD_OPTS="-join 10.0.0.2:9096""#);
    }

    #[test]
    fn test_selection_then_formatting_caps_at_three_peers() {
        let candidates = addrs(&[
            "10.0.0.1",
            "10.0.0.2",
            "10.0.0.3",
            "10.0.0.4",
            "10.0.0.5",
        ]);
        let peers = select_peers("10.0.0.1", candidates, MAX_JOIN_PEERS);
        let directive = join_directive("10.0.0.1", &peers, CLUSTER_PORT);
        assert_eq!(
            directive,
            r#"INFLUXD_OPTS="-join 10.0.0.2:8091,10.0.0.3:8091,10.0.0.4:8091""#
        );
    }

    #[test]
    fn test_same_inputs_render_identically() {
        let peers = addrs(&["10.0.0.2", "10.0.0.3"]);
        assert_eq!(
            join_directive("10.0.0.1", &peers, CLUSTER_PORT),
            join_directive("10.0.0.1", &peers, CLUSTER_PORT)
        );
    }
}
