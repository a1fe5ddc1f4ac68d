// ── Persistent usage log ──
//
// Append-only record store for scraped snapshots. Every add_* call inserts
// new timestamped rows — nothing is ever upserted, so repeated refreshes
// build a usage history. Tables are created lazily on first write.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CoreError;
use crate::model::{Node, User};

const NODES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("nodes");
const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// One archived node snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub taken_at: DateTime<Utc>,
    #[serde(flatten)]
    pub node: Node,
}

/// One archived user snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub taken_at: DateTime<Utc>,
    #[serde(flatten)]
    pub user: User,
}

/// File-backed usage log for node and user snapshots.
pub struct RecordStore {
    db: Database,
    /// Disambiguates snapshots taken within the same millisecond.
    seq: AtomicU64,
}

impl RecordStore {
    /// Open (or create) the usage log at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let db = Database::create(path).map_err(redb::Error::from)?;
        Ok(Self {
            db,
            seq: AtomicU64::new(0),
        })
    }

    /// Append one timestamped record per node.
    pub fn add_records(&self, nodes: &[Node]) -> Result<(), CoreError> {
        let taken_at = Utc::now();
        let snapshot = self.seq.fetch_add(1, Ordering::Relaxed);
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = txn.open_table(NODES_TABLE).map_err(redb::Error::from)?;

            for node in nodes {
                let key = record_key(taken_at, snapshot, node.mac.as_str());
                let payload = serde_json::to_vec(&NodeRecord {
                    taken_at,
                    node: node.clone(),
                })?;
                table
                    .insert(key.as_str(), payload.as_slice())
                    .map_err(redb::Error::from)?;
            }
        }
        txn.commit().map_err(redb::Error::from)?;

        info!(nodes = nodes.len(), "archived node records");
        Ok(())
    }

    /// Append one timestamped record per user.
    pub fn add_user_records(&self, users: &[User]) -> Result<(), CoreError> {
        let taken_at = Utc::now();
        let snapshot = self.seq.fetch_add(1, Ordering::Relaxed);
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = txn.open_table(USERS_TABLE).map_err(redb::Error::from)?;

            for user in users {
                let key = record_key(taken_at, snapshot, user.mac.as_str());
                let payload = serde_json::to_vec(&UserRecord {
                    taken_at,
                    user: user.clone(),
                })?;
                table
                    .insert(key.as_str(), payload.as_slice())
                    .map_err(redb::Error::from)?;
            }
        }
        txn.commit().map_err(redb::Error::from)?;

        info!(users = users.len(), "archived user records");
        Ok(())
    }

    /// All archived node records, oldest first. An absent table reads as
    /// an empty log.
    pub fn node_records(&self) -> Result<Vec<NodeRecord>, CoreError> {
        self.read_all(NODES_TABLE)
    }

    /// All archived user records, oldest first.
    pub fn user_records(&self) -> Result<Vec<UserRecord>, CoreError> {
        self.read_all(USERS_TABLE)
    }

    fn read_all<T: serde::de::DeserializeOwned>(
        &self,
        table: TableDefinition<&str, &[u8]>,
    ) -> Result<Vec<T>, CoreError> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;

        let table = match txn.open_table(table) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(CoreError::Store(e.into())),
        };

        let mut records = Vec::new();
        for entry in table.iter().map_err(redb::Error::from)? {
            let (_, value) = entry.map_err(redb::Error::from)?;
            records.push(serde_json::from_slice(value.value())?);
        }

        Ok(records)
    }
}

/// Sortable per-record key: millisecond timestamp, then a snapshot
/// sequence number (two snapshots can land in the same millisecond), then
/// mac for uniqueness within one snapshot.
fn record_key(taken_at: DateTime<Utc>, snapshot: u64, mac: &str) -> String {
    format!("{:013}/{snapshot:06}/{mac}", taken_at.timestamp_millis())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::model::{MacAddress, NodeKind, NodeStatus};

    use super::*;

    fn node(name: &str, mac: &str) -> Node {
        Node {
            kind: NodeKind::Gateway,
            status: NodeStatus::Up,
            name: name.into(),
            comment: String::new(),
            mac: MacAddress::new(mac),
            ip: "10.0.0.1".into(),
            channel_24: "6".into(),
            channel_58: "157".into(),
            users_24: "3".into(),
            download_mb_24: "100.0".into(),
            upload_mb_24: "20.0".into(),
            uptime: "1 day".into(),
            firmware_version: "r1234".into(),
            firmware_name: "stable".into(),
            load: "0.1".into(),
            free_memory: "14Mb".into(),
            time_since_checkin: "1 min".into(),
            gateway_name: name.into(),
            gateway_ip: "10.0.0.1".into(),
            hop_count: "0".into(),
            latency_ms: "0".into(),
            pct_time_as_gateway: 100.0,
            pct_time_as_relay: 0.0,
            pct_time_offline: 0.0,
        }
    }

    #[test]
    fn records_append_rather_than_replace() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("usage.redb")).unwrap();

        let nodes = vec![node("gw-a", "aa:bb:cc:dd:ee:01")];
        store.add_records(&nodes).unwrap();
        store.add_records(&nodes).unwrap();

        let records = store.node_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].node.name, "gw-a");
    }

    #[test]
    fn empty_store_reads_as_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("usage.redb")).unwrap();

        assert!(store.node_records().unwrap().is_empty());
        assert!(store.user_records().unwrap().is_empty());
    }
}
