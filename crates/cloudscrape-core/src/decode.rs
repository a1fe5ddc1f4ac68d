// ── Distilled-row decoders ──
//
// Bridges the api crate's distilled table rows into canonical domain
// records. The cell layouts here mirror the dashboard's report markup
// column for column; a layout change upstream surfaces as MalformedRow
// rather than silently shifted fields.
//
// Node decoding is split in two (seed, then checkin completion) so the
// pure row mapping can be tested and reused without any image I/O.

use cloudscrape_api::{CheckinBreakdown, DistilledRow};

use crate::error::CoreError;
use crate::model::{MacAddress, Node, NodeKind, NodeStatus, User};

/// Cells in a status-page node row.
const NODE_CELLS: usize = 13;
/// Minimum cells in a user-statistics row.
const USER_CELLS: usize = 9;

// ── Status codes ────────────────────────────────────────────────────

/// Map a status token to (kind, status).
///
/// The literal codes come from the dashboard's markup and are a closed
/// set: 1=gw down, 2=relay down, 3=gw up, 4=relay up, 5=spare (gw) down,
/// 6=spare down, 7=spare (gw) up, 8=spare up. Anything else means the
/// upstream contract moved and must fail loudly — downstream kind/status
/// logic assumes one of these.
pub fn classify_status(code: &str) -> Result<(NodeKind, NodeStatus), CoreError> {
    match code {
        "1" => Ok((NodeKind::Gateway, NodeStatus::Down)),
        "2" => Ok((NodeKind::Relay, NodeStatus::Down)),
        "3" => Ok((NodeKind::Gateway, NodeStatus::Up)),
        "4" => Ok((NodeKind::Relay, NodeStatus::Up)),
        "5" | "6" => Ok((NodeKind::Spare, NodeStatus::Down)),
        "7" | "8" => Ok((NodeKind::Spare, NodeStatus::Up)),
        _ => Err(CoreError::UnknownStatusCode {
            code: code.to_owned(),
        }),
    }
}

// ── Row access helpers ──────────────────────────────────────────────

fn cell<'a>(
    row: &'a DistilledRow,
    record: &'static str,
    index: usize,
) -> Result<&'a [String], CoreError> {
    row.get(index)
        .map(Vec::as_slice)
        .ok_or_else(|| CoreError::MalformedRow {
            record,
            detail: format!("cell {index} missing"),
        })
}

fn fragment<'a>(
    row: &'a DistilledRow,
    record: &'static str,
    cell_index: usize,
    fragment_index: usize,
) -> Result<&'a str, CoreError> {
    cell(row, record, cell_index)?
        .get(fragment_index)
        .map(String::as_str)
        .ok_or_else(|| CoreError::MalformedRow {
            record,
            detail: format!("cell {cell_index} missing fragment {fragment_index}"),
        })
}

fn last_fragment<'a>(
    row: &'a DistilledRow,
    record: &'static str,
    cell_index: usize,
) -> Result<&'a str, CoreError> {
    cell(row, record, cell_index)?
        .last()
        .map(String::as_str)
        .ok_or_else(|| CoreError::MalformedRow {
            record,
            detail: format!("cell {cell_index} is empty"),
        })
}

/// Strip thousands separators and parse a scraped traffic counter.
fn counter(raw: &str, record: &'static str, field: &str) -> Result<u64, CoreError> {
    raw.replace(',', "")
        .parse()
        .map_err(|_| CoreError::MalformedRow {
            record,
            detail: format!("{field} is not numeric: {raw:?}"),
        })
}

// ── Node decoding ───────────────────────────────────────────────────

/// A node decoded from its status row, minus the checkin percentages.
///
/// The missing piece needs a per-node image fetch; the orchestrator does
/// that I/O and calls [`into_node`](Self::into_node) with the result.
#[derive(Debug, Clone)]
pub struct NodeSeed {
    node: Node,
}

impl NodeSeed {
    /// The hardware address the checkin fetch must be keyed on.
    pub fn mac(&self) -> &MacAddress {
        &self.node.mac
    }

    /// Complete the node with its decoded checkin breakdown.
    pub fn into_node(self, checkin: CheckinBreakdown) -> Node {
        Node {
            pct_time_as_gateway: checkin.pct_time_as_gateway,
            pct_time_as_relay: checkin.pct_time_as_relay,
            pct_time_offline: checkin.pct_time_offline,
            ..self.node
        }
    }
}

/// Decode one 13-cell status-page row into a [`NodeSeed`].
///
/// Cell layout: status code; name+comment; mac+ip; channels; user count;
/// dl+ul; uptime; firmware version+name; load+memfree; checkin delta;
/// gateway name+ip; hops; latency.
pub fn decode_node(row: &DistilledRow) -> Result<NodeSeed, CoreError> {
    const RECORD: &str = "node";

    if row.len() != NODE_CELLS {
        return Err(CoreError::MalformedRow {
            record: RECORD,
            detail: format!("{NODE_CELLS} cells required, found {}", row.len()),
        });
    }

    let (kind, status) = classify_status(fragment(row, RECORD, 0, 0)?)?;

    let node = Node {
        kind,
        status,
        name: fragment(row, RECORD, 1, 0)?.to_owned(),
        comment: last_fragment(row, RECORD, 1)?.to_owned(),
        mac: MacAddress::new(fragment(row, RECORD, 2, 0)?),
        ip: fragment(row, RECORD, 2, 1)?.to_owned(),
        channel_24: fragment(row, RECORD, 3, 0)?.to_owned(),
        channel_58: fragment(row, RECORD, 3, 1)?.to_owned(),
        users_24: fragment(row, RECORD, 4, 0)?.to_owned(),
        download_mb_24: fragment(row, RECORD, 5, 0)?.to_owned(),
        upload_mb_24: fragment(row, RECORD, 5, 1)?.to_owned(),
        uptime: fragment(row, RECORD, 6, 0)?.to_owned(),
        firmware_version: fragment(row, RECORD, 7, 0)?.to_owned(),
        firmware_name: fragment(row, RECORD, 7, 1)?.to_owned(),
        load: fragment(row, RECORD, 8, 0)?.to_owned(),
        free_memory: fragment(row, RECORD, 8, 1)?.to_owned(),
        time_since_checkin: fragment(row, RECORD, 9, 0)?.to_owned(),
        gateway_name: fragment(row, RECORD, 10, 0)?.to_owned(),
        gateway_ip: fragment(row, RECORD, 10, 1)?.to_owned(),
        hop_count: fragment(row, RECORD, 11, 0)?.to_owned(),
        latency_ms: fragment(row, RECORD, 12, 0)?.to_owned(),
        pct_time_as_gateway: 0.0,
        pct_time_as_relay: 0.0,
        pct_time_offline: 0.0,
    };

    Ok(NodeSeed { node })
}

// ── User decoding ───────────────────────────────────────────────────

/// Decode one user-statistics row into a [`User`].
///
/// Cell layout: name+mac; node name+mac; device vendor (unused); rssi;
/// rate+MCS; kb down; kb up; unused; blocked. Thousands separators are
/// stripped from the traffic counters before parsing.
pub fn decode_user(row: &DistilledRow) -> Result<User, CoreError> {
    const RECORD: &str = "user";

    if row.len() < USER_CELLS {
        return Err(CoreError::MalformedRow {
            record: RECORD,
            detail: format!("{USER_CELLS} cells required, found {}", row.len()),
        });
    }

    Ok(User {
        name: fragment(row, RECORD, 0, 0)?.to_owned(),
        mac: MacAddress::new(last_fragment(row, RECORD, 0)?),
        node_name: fragment(row, RECORD, 1, 0)?.to_owned(),
        node_mac: MacAddress::new(fragment(row, RECORD, 1, 1)?),
        rssi: fragment(row, RECORD, 3, 0)?.to_owned(),
        rate: fragment(row, RECORD, 4, 0)?.to_owned(),
        mcs: fragment(row, RECORD, 4, 1)?.to_owned(),
        kb_down: counter(fragment(row, RECORD, 5, 0)?, RECORD, "kb_down")?,
        kb_up: counter(fragment(row, RECORD, 6, 0)?, RECORD, "kb_up")?,
        blocked: fragment(row, RECORD, 8, 0)?.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn node_row(status_code: &str) -> DistilledRow {
        vec![
            vec![status_code.into()],
            vec!["front-gate".into(), "(repeater pole)".into()],
            vec!["AA:BB:CC:DD:EE:01".into(), "10.0.0.1".into()],
            vec!["6".into(), "157".into()],
            vec!["12".into()],
            vec!["1043.2".into(), "87.5".into()],
            vec!["4 days".into()],
            vec!["r1234".into(), "stable".into()],
            vec!["0.12".into(), "14Mb".into()],
            vec!["2 mins".into()],
            vec!["front-gate".into(), "10.0.0.1".into()],
            vec!["2".into()],
            vec!["11".into()],
        ]
    }

    fn user_row() -> DistilledRow {
        vec![
            vec!["alice-laptop".into(), "AA:BB:CC:00:11:22".into()],
            vec!["front-gate".into(), "aa:bb:cc:dd:ee:01".into()],
            vec!["Apple".into()],
            vec!["-67".into()],
            vec!["72M".into(), "MCS 7".into()],
            vec!["1,234,567".into()],
            vec!["87,654".into()],
            vec!["-".into()],
            vec!["No".into()],
        ]
    }

    #[test]
    fn all_eight_status_codes_classify_exactly() {
        let table = [
            ("1", NodeKind::Gateway, NodeStatus::Down),
            ("2", NodeKind::Relay, NodeStatus::Down),
            ("3", NodeKind::Gateway, NodeStatus::Up),
            ("4", NodeKind::Relay, NodeStatus::Up),
            ("5", NodeKind::Spare, NodeStatus::Down),
            ("6", NodeKind::Spare, NodeStatus::Down),
            ("7", NodeKind::Spare, NodeStatus::Up),
            ("8", NodeKind::Spare, NodeStatus::Up),
        ];

        for (code, kind, status) in table {
            let seed = decode_node(&node_row(code)).unwrap();
            let node = seed.into_node(cloudscrape_api::CheckinBreakdown::default());
            assert_eq!((node.kind, node.status), (kind, status), "code {code}");
        }
    }

    #[test]
    fn unknown_status_code_fails_loudly() {
        let err = decode_node(&node_row("9")).unwrap_err();
        assert!(matches!(err, CoreError::UnknownStatusCode { code } if code == "9"));
    }

    #[test]
    fn node_fields_land_in_the_right_places() {
        let seed = decode_node(&node_row("3")).unwrap();
        assert_eq!(seed.mac().as_str(), "aa:bb:cc:dd:ee:01");

        let node = seed.into_node(CheckinBreakdown {
            pct_time_as_gateway: 95.8,
            pct_time_as_relay: 0.0,
            pct_time_offline: 4.2,
        });

        assert_eq!(node.name, "front-gate");
        assert_eq!(node.comment, "(repeater pole)");
        assert_eq!(node.ip, "10.0.0.1");
        assert_eq!(node.channel_58, "157");
        assert_eq!(node.firmware_name, "stable");
        assert_eq!(node.gateway_name, "front-gate");
        assert_eq!(node.latency_ms, "11");
        assert_eq!(node.pct_time_as_gateway, 95.8);
        assert_eq!(node.pct_time_offline, 4.2);
    }

    #[test]
    fn short_node_row_is_malformed() {
        let mut row = node_row("3");
        row.truncate(9);

        let err = decode_node(&row).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRow { record: "node", .. }));
    }

    #[test]
    fn user_counters_drop_thousands_separators() {
        let user = decode_user(&user_row()).unwrap();

        assert_eq!(user.kb_down, 1_234_567);
        assert_eq!(user.kb_up, 87_654);
        assert_eq!(user.mb_down(), 1234.57);
        assert_eq!(user.mb_up(), 87.65);
    }

    #[test]
    fn user_identity_and_association_come_from_fragment_pairs() {
        let user = decode_user(&user_row()).unwrap();

        assert_eq!(user.name, "alice-laptop");
        assert_eq!(user.mac.as_str(), "aa:bb:cc:00:11:22");
        assert_eq!(user.node_name, "front-gate");
        assert_eq!(user.node_mac.as_str(), "aa:bb:cc:dd:ee:01");
        assert_eq!(user.blocked, "No");
    }

    #[test]
    fn short_user_row_is_malformed() {
        let mut row = user_row();
        row.truncate(7);

        let err = decode_user(&row).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRow { record: "user", .. }));
    }

    #[test]
    fn non_numeric_user_counter_is_malformed() {
        let mut row = user_row();
        row[5] = vec!["lots".into()];

        let err = decode_user(&row).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRow { record: "user", .. }));
    }
}
