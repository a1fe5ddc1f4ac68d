// ── User domain types ──

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// One wifi client as reported by the dashboard's user statistics page.
///
/// Constructed once per refresh and immutable thereafter. Traffic counters
/// are stored as integers (thousands separators stripped at decode time);
/// the megabyte figures the report shows are derived on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    // Identity
    pub name: String,
    pub mac: MacAddress,

    // The node currently serving this user
    pub node_name: String,
    pub node_mac: MacAddress,

    // Radio quality
    pub rssi: String,
    pub rate: String,
    pub mcs: String,

    // 24-hour usage in kilobytes
    pub kb_down: u64,
    pub kb_up: u64,

    /// Blocked flag exactly as scraped ("Yes"/"No" on current dashboards).
    pub blocked: String,
}

impl User {
    /// Megabytes downloaded in the past 24 hours, at 2-decimal precision.
    pub fn mb_down(&self) -> f64 {
        round2(self.kb_down as f64 / 1000.0)
    }

    /// Megabytes uploaded in the past 24 hours, at 2-decimal precision.
    pub fn mb_up(&self) -> f64 {
        round2(self.kb_up as f64 / 1000.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(kb_down: u64, kb_up: u64) -> User {
        User {
            name: "alice".into(),
            mac: MacAddress::new("aa:bb:cc:00:11:22"),
            node_name: "front-gate".into(),
            node_mac: MacAddress::new("aa:bb:cc:dd:ee:ff"),
            rssi: "-67".into(),
            rate: "72M".into(),
            mcs: "7".into(),
            kb_down,
            kb_up,
            blocked: "No".into(),
        }
    }

    #[test]
    fn usage_is_kilobytes_over_1000_to_two_decimals() {
        let u = user(1_234_567, 987);
        assert_eq!(u.mb_down(), 1234.57);
        assert_eq!(u.mb_up(), 0.99);
    }
}
