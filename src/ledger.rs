//! Per-user table of scanned product ids

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::io::Write;

fn serialize_seconds<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// One scanned identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Identifier read from the label
    pub product_id: String,
    /// When it was recorded
    #[serde(serialize_with = "serialize_seconds")]
    pub timestamp: DateTime<Utc>,
}

/// Scanned ids grouped by user.
///
/// Handed to whatever serves requests instead of living in global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanLedger {
    users: HashMap<String, Vec<ScanRecord>>,
}

impl ScanLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id for `user`
    pub fn record(&mut self, user: &str, product_id: impl Into<String>, at: DateTime<Utc>) {
        self.users.entry(user.to_owned()).or_default().push(ScanRecord {
            product_id: product_id.into(),
            timestamp: at,
        });
    }

    /// Records for `user`, newest first. Equal timestamps keep insertion order.
    pub fn records(&self, user: &str) -> Vec<&ScanRecord> {
        let mut records: Vec<&ScanRecord> = self
            .users
            .get(user)
            .map(|r| r.iter().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Number of records held for `user`
    pub fn len(&self, user: &str) -> usize {
        self.users.get(user).map_or(0, Vec::len)
    }

    /// True when `user` has no records
    pub fn is_empty(&self, user: &str) -> bool {
        self.len(user) == 0
    }

    /// Drop every record for `user`
    pub fn reset(&mut self, user: &str) {
        if let Some(records) = self.users.get_mut(user) {
            records.clear();
        }
    }

    /// Write `user`'s records as `product_id,timestamp` CSV with a header row, newest first
    pub fn write_csv<W: Write>(&self, user: &str, writer: W) -> csv::Result<()> {
        let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        out.write_record(["product_id", "timestamp"])?;
        for record in self.records(user) {
            out.serialize(record)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Records for `user` as a JSON array, newest first
    pub fn to_json(&self, user: &str) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_newest_first() {
        let mut ledger = ScanLedger::new();
        ledger.record("a@example.com", "OLD", at(0));
        ledger.record("a@example.com", "NEW", at(60));
        ledger.record("a@example.com", "MID", at(30));

        let ids: Vec<&str> = ledger
            .records("a@example.com")
            .iter()
            .map(|r| r.product_id.as_str())
            .collect();
        assert_eq!(ids, ["NEW", "MID", "OLD"]);
    }

    #[test]
    fn test_users_are_isolated() {
        let mut ledger = ScanLedger::new();
        ledger.record("a", "X", at(0));
        ledger.record("b", "Y", at(0));
        ledger.reset("a");

        assert!(ledger.is_empty("a"));
        assert_eq!(ledger.len("b"), 1);
        assert!(ledger.records("nobody").is_empty());
    }

    #[test]
    fn test_json_uses_second_precision() {
        let mut ledger = ScanLedger::new();
        ledger.record("a", "A1B-C123", at(0));
        let json = ledger.to_json("a").unwrap();
        assert!(json.contains("\"product_id\": \"A1B-C123\""));
        assert!(json.contains("\"timestamp\": \"2023-11-14T22:13:20Z\""));
    }

    #[test]
    fn test_csv_export() {
        let mut ledger = ScanLedger::new();
        ledger.record("a", "OLD", at(0));
        ledger.record("a", "NEW", at(60));
        ledger.record("b", "OTHER", at(30));

        let mut buf = Vec::new();
        ledger.write_csv("a", &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "product_id,timestamp\nNEW,2023-11-14T22:14:20Z\nOLD,2023-11-14T22:13:20Z\n"
        );

        let mut empty = Vec::new();
        ledger.write_csv("nobody", &mut empty).unwrap();
        assert_eq!(String::from_utf8(empty).unwrap(), "product_id,timestamp\n");
    }

    #[test]
    fn test_ledger_round_trips_through_json() {
        let mut ledger = ScanLedger::new();
        ledger.record("a", "X", at(5));
        let text = serde_json::to_string(&ledger).unwrap();
        let back: ScanLedger = serde_json::from_str(&text).unwrap();
        assert_eq!(back.records("a"), ledger.records("a"));
    }
}
