//! Status filtering over a cached snapshot.
//!
//! Filtering is local-only: the evaluator derives a new envelope from the
//! cached one without touching the network or the cache itself.

use crate::model::{ResponseEnvelope, ServerStatus, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status predicate the operator filters the dashboard by.
///
/// `Display` yields the text used inside result messages (`ALL`,
/// `SERVER_UP`, `SERVER_DOWN`); `FromStr` additionally accepts the short
/// forms used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    All,
    #[serde(rename = "SERVER_UP")]
    Up,
    #[serde(rename = "SERVER_DOWN")]
    Down,
}

impl StatusFilter {
    /// Whether a server with the given status passes this filter.
    pub fn matches(self, status: ServerStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Up => status == ServerStatus::Up,
            StatusFilter::Down => status == ServerStatus::Down,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "ALL"),
            StatusFilter::Up => write!(f, "SERVER_UP"),
            StatusFilter::Down => write!(f, "SERVER_DOWN"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "up" | "server_up" => Ok(StatusFilter::Up),
            "down" | "server_down" => Ok(StatusFilter::Down),
            _ => Err(format!(
                "Invalid status filter: {}. Use: all, up, down",
                s
            )),
        }
    }
}

/// Derive a filtered envelope from a snapshot envelope.
///
/// Never mutates its input and never aliases the input's server list; the
/// caller keeps its own pre-filter reference. Zero matches is not an
/// error: the result is a normal envelope with an empty list and a
/// "No server ... found" message.
pub fn evaluate(status: StatusFilter, envelope: &ResponseEnvelope) -> ResponseEnvelope {
    if status == StatusFilter::All {
        let mut filtered = envelope.clone();
        filtered.message = format!("Servers filtered by {} status", status);
        return filtered;
    }

    // A missing server list stays missing; only a present list is narrowed.
    let matches: Option<Vec<_>> = envelope.data.servers.as_ref().map(|servers| {
        servers
            .iter()
            .filter(|server| status.matches(server.status))
            .cloned()
            .collect()
    });

    let found = matches.as_ref().is_some_and(|list| !list.is_empty());
    let message = if found {
        format!("Servers filtered by {} status", status)
    } else {
        format!("No server of {} found", status)
    };

    ResponseEnvelope {
        message,
        data: Snapshot {
            servers: matches,
            server: None,
        },
        ..envelope.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Server;

    fn make_server(id: u64, status: ServerStatus) -> Server {
        Server {
            id,
            name: format!("server-{id}"),
            address: format!("10.0.0.{id}"),
            server_type: "Web Server".to_string(),
            status,
            memory: "16 GB".to_string(),
            disk: "120 GB".to_string(),
            image_url: format!("http://localhost:8080/server/image/server{id}.png"),
        }
    }

    fn make_envelope(servers: Vec<Server>) -> ResponseEnvelope {
        ResponseEnvelope {
            timestamp: "2025-05-19T10:15:30Z".parse().unwrap(),
            status_code: 200,
            status: "OK".to_string(),
            message: "Servers retrieved".to_string(),
            data: Snapshot {
                servers: Some(servers),
                server: None,
            },
        }
    }

    #[test]
    fn test_all_returns_every_server_unchanged() {
        let envelope = make_envelope(vec![
            make_server(1, ServerStatus::Up),
            make_server(2, ServerStatus::Down),
        ]);

        let filtered = evaluate(StatusFilter::All, &envelope);

        assert_eq!(filtered.message, "Servers filtered by ALL status");
        assert_eq!(filtered.data.servers, envelope.data.servers);
        assert_eq!(filtered.status_code, envelope.status_code);
    }

    #[test]
    fn test_all_preserves_singular_server() {
        let mut envelope = make_envelope(vec![make_server(1, ServerStatus::Up)]);
        envelope.data.server = Some(make_server(9, ServerStatus::Down));

        let filtered = evaluate(StatusFilter::All, &envelope);

        assert_eq!(filtered.data.server, envelope.data.server);
    }

    #[test]
    fn test_up_keeps_only_up_servers() {
        let envelope = make_envelope(vec![
            make_server(1, ServerStatus::Up),
            make_server(2, ServerStatus::Down),
            make_server(3, ServerStatus::Up),
        ]);

        let filtered = evaluate(StatusFilter::Up, &envelope);

        assert_eq!(filtered.message, "Servers filtered by SERVER_UP status");
        let servers = filtered.data.servers.unwrap();
        assert_eq!(servers.len(), 2);
        assert!(servers.iter().all(|s| s.status == ServerStatus::Up));
        assert_eq!(servers[0].id, 1);
        assert_eq!(servers[1].id, 3);
    }

    #[test]
    fn test_down_with_no_matches_reports_none_found() {
        let envelope = make_envelope(vec![
            make_server(1, ServerStatus::Up),
            make_server(2, ServerStatus::Up),
        ]);

        let filtered = evaluate(StatusFilter::Down, &envelope);

        assert_eq!(filtered.message, "No server of SERVER_DOWN found");
        assert_eq!(filtered.data.servers, Some(vec![]));
    }

    #[test]
    fn test_narrowing_drops_singular_server() {
        let mut envelope = make_envelope(vec![make_server(1, ServerStatus::Up)]);
        envelope.data.server = Some(make_server(1, ServerStatus::Up));

        let filtered = evaluate(StatusFilter::Up, &envelope);

        assert!(filtered.data.server.is_none());
    }

    #[test]
    fn test_missing_server_list_stays_missing() {
        let mut envelope = make_envelope(vec![]);
        envelope.data.servers = None;

        let filtered = evaluate(StatusFilter::Up, &envelope);

        assert_eq!(filtered.message, "No server of SERVER_UP found");
        assert!(filtered.data.servers.is_none());
    }

    #[test]
    fn test_input_envelope_is_untouched() {
        let envelope = make_envelope(vec![
            make_server(1, ServerStatus::Up),
            make_server(2, ServerStatus::Down),
        ]);
        let before = envelope.clone();

        let _ = evaluate(StatusFilter::Down, &envelope);

        assert_eq!(envelope, before);
    }

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!(StatusFilter::from_str("all").unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::from_str("UP").unwrap(), StatusFilter::Up);
        assert_eq!(StatusFilter::from_str("server_down").unwrap(), StatusFilter::Down);
        assert_eq!(StatusFilter::from_str("SERVER_UP").unwrap(), StatusFilter::Up);
        assert!(StatusFilter::from_str("degraded").is_err());
    }

    #[test]
    fn test_status_filter_display() {
        assert_eq!(StatusFilter::All.to_string(), "ALL");
        assert_eq!(StatusFilter::Up.to_string(), "SERVER_UP");
        assert_eq!(StatusFilter::Down.to_string(), "SERVER_DOWN");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_status() -> impl Strategy<Value = ServerStatus> {
            prop_oneof![Just(ServerStatus::Up), Just(ServerStatus::Down)]
        }

        proptest! {
            #[test]
            fn prop_up_and_down_partition_the_snapshot(statuses in prop::collection::vec(arb_status(), 0..32)) {
                let servers: Vec<_> = statuses
                    .iter()
                    .enumerate()
                    .map(|(i, status)| make_server(i as u64, *status))
                    .collect();
                let envelope = make_envelope(servers.clone());

                let up = evaluate(StatusFilter::Up, &envelope);
                let down = evaluate(StatusFilter::Down, &envelope);

                let up_len = up.data.servers.as_ref().map_or(0, Vec::len);
                let down_len = down.data.servers.as_ref().map_or(0, Vec::len);
                prop_assert_eq!(up_len + down_len, servers.len());
            }

            #[test]
            fn prop_all_never_changes_the_list(statuses in prop::collection::vec(arb_status(), 0..32)) {
                let servers: Vec<_> = statuses
                    .iter()
                    .enumerate()
                    .map(|(i, status)| make_server(i as u64, *status))
                    .collect();
                let envelope = make_envelope(servers);

                let filtered = evaluate(StatusFilter::All, &envelope);

                prop_assert_eq!(filtered.data.servers, envelope.data.servers);
            }

            #[test]
            fn prop_filtering_is_idempotent(statuses in prop::collection::vec(arb_status(), 0..32)) {
                let servers: Vec<_> = statuses
                    .iter()
                    .enumerate()
                    .map(|(i, status)| make_server(i as u64, *status))
                    .collect();
                let envelope = make_envelope(servers);

                let once = evaluate(StatusFilter::Up, &envelope);
                let twice = evaluate(StatusFilter::Up, &once);

                prop_assert_eq!(once.data.servers, twice.data.servers);
            }
        }
    }
}
