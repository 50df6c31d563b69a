//! Reference table: opaque ids standing in for behaviour that cannot be
//! embedded in the emitted source (rules, parse/transform functions,
//! union and group discriminants).
//!
//! The compiler never calls any of these. It only checks that an id exists
//! with the right kind and threads it through `refs['ref://<n>']` call sites.
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RefsError;

static REF_ID_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ref://([1-9][0-9]*)$").unwrap());

// ————————————————————————————————————————————————————————————————————————————
// IDS
// ————————————————————————————————————————————————————————————————————————————

/// `ref://<n>` with `n >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(u64);

impl RefId {
    pub fn new(n: u64) -> Result<Self, RefsError> {
        if n == 0 {
            return Err(RefsError::InvalidId(format!("ref://{n}")));
        }
        Ok(Self(n))
    }
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref://{}", self.0)
    }
}

impl FromStr for RefId {
    type Err = RefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = REF_ID_RX
            .captures(s)
            .ok_or_else(|| RefsError::InvalidId(s.to_string()))?;
        caps[1]
            .parse::<u64>()
            .map(RefId)
            .map_err(|_| RefsError::InvalidId(s.to_string()))
    }
}

impl Serialize for RefId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RefId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ENTRIES
// ————————————————————————————————————————————————————————————————————————————

/// What an id points at. Implementations are named by symbol; the runtime
/// executing the compiled program resolves the symbol to real code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefEntry {
    Rule {
        validator: String,
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        options: serde_json::Value,
    },
    Parse { function: String },
    Transform { function: String },
    Conditional { function: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Rule,
    Parse,
    Transform,
    Conditional,
}

impl RefEntry {
    pub fn kind(&self) -> RefKind {
        match self {
            RefEntry::Rule { .. } => RefKind::Rule,
            RefEntry::Parse { .. } => RefKind::Parse,
            RefEntry::Transform { .. } => RefKind::Transform,
            RefEntry::Conditional { .. } => RefKind::Conditional,
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefKind::Rule => "validation rule",
            RefKind::Parse => "parse function",
            RefKind::Transform => "transform function",
            RefKind::Conditional => "conditional function",
        };
        f.write_str(s)
    }
}

/// Lookup seam for whoever executes a compiled program.
pub trait RefResolver {
    fn resolve(&self, id: RefId) -> Option<&RefEntry>;
}

// ————————————————————————————————————————————————————————————————————————————
// STORE
// ————————————————————————————————————————————————————————————————————————————

/// Ordered table of references. Ids are strictly increasing in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefsStore {
    entries: IndexMap<RefId, RefEntry>,
}

impl RefsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a caller-assigned id. Must be greater than every id already present.
    pub fn insert(&mut self, id: RefId, entry: RefEntry) -> Result<(), RefsError> {
        if self.entries.contains_key(&id) {
            return Err(RefsError::Duplicate(id));
        }
        if let Some(last) = self.last_id() {
            if id <= last {
                return Err(RefsError::NotIncreasing { id, last });
            }
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Append under the next free id.
    pub fn track(&mut self, entry: RefEntry) -> Result<RefId, RefsError> {
        let next = match self.last_id() {
            Some(last) => last.0.checked_add(1).ok_or(RefsError::Exhausted(last))?,
            None => 1,
        };
        let id = RefId(next);
        self.entries.insert(id, entry);
        Ok(id)
    }

    pub fn track_rule(
        &mut self,
        validator: impl Into<String>,
        options: serde_json::Value,
    ) -> Result<RefId, RefsError> {
        self.track(RefEntry::Rule { validator: validator.into(), options })
    }

    pub fn track_parser(&mut self, function: impl Into<String>) -> Result<RefId, RefsError> {
        self.track(RefEntry::Parse { function: function.into() })
    }

    pub fn track_transformer(&mut self, function: impl Into<String>) -> Result<RefId, RefsError> {
        self.track(RefEntry::Transform { function: function.into() })
    }

    pub fn track_conditional(&mut self, function: impl Into<String>) -> Result<RefId, RefsError> {
        self.track(RefEntry::Conditional { function: function.into() })
    }

    pub fn get(&self, id: RefId) -> Option<&RefEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn last_id(&self) -> Option<RefId> {
        self.entries.last().map(|(id, _)| *id)
    }
}

impl RefResolver for RefsStore {
    fn resolve(&self, id: RefId) -> Option<&RefEntry> {
        self.get(id)
    }
}

impl Serialize for RefsStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RefsStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<RefId, RefEntry>::deserialize(deserializer)?;
        let mut store = RefsStore::new();
        for (id, entry) in raw {
            store.insert(id, entry).map_err(serde::de::Error::custom)?;
        }
        Ok(store)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_and_prints_ref_ids() {
        let id: RefId = "ref://42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "ref://42");
        assert!("ref://0".parse::<RefId>().is_err());
        assert!("ref://01".parse::<RefId>().is_err());
        assert!("refs://1".parse::<RefId>().is_err());
        assert!("ref://".parse::<RefId>().is_err());
    }

    #[test]
    fn tracking_assigns_increasing_ids() {
        let mut refs = RefsStore::new();
        let a = refs.track_rule("minLength", json!({ "min": 3 })).unwrap();
        let b = refs.track_conditional("isEmail").unwrap();
        assert_eq!(a.to_string(), "ref://1");
        assert_eq!(b.to_string(), "ref://2");
        assert_eq!(refs.get(b).map(RefEntry::kind), Some(RefKind::Conditional));
    }

    #[test]
    fn insert_rejects_duplicates_and_decreasing_ids() {
        let mut refs = RefsStore::new();
        refs.insert(RefId::new(5).unwrap(), RefEntry::Parse { function: "trim".into() }).unwrap();
        let dup = refs.insert(RefId::new(5).unwrap(), RefEntry::Parse { function: "trim".into() });
        assert!(matches!(dup, Err(RefsError::Duplicate(_))));
        let lower =
            refs.insert(RefId::new(2).unwrap(), RefEntry::Parse { function: "trim".into() });
        assert!(matches!(lower, Err(RefsError::NotIncreasing { .. })));
        // next tracked id continues after the largest one
        assert_eq!(refs.track_parser("lower").unwrap().get(), 6);
    }

    #[test]
    fn tracking_past_the_largest_id_fails() {
        let mut refs = RefsStore::new();
        let max = RefId::new(u64::MAX).unwrap();
        refs.insert(max, RefEntry::Parse { function: "trim".into() }).unwrap();
        let res = refs.track_conditional("isEmail");
        assert_eq!(res, Err(RefsError::Exhausted(max)));
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn deserializes_table_from_json() {
        let refs: RefsStore = serde_json::from_value(json!({
            "ref://1": { "kind": "rule", "validator": "required" },
            "ref://2": { "kind": "transform", "function": "toUpper" }
        }))
        .unwrap();
        assert_eq!(refs.len(), 2);
        let out = serde_json::to_value(&refs).unwrap();
        assert_eq!(out["ref://1"]["validator"], "required");
        assert!(out["ref://1"].get("options").is_none());
    }

    #[test]
    fn deserialize_rejects_out_of_order_table() {
        let res = serde_json::from_value::<RefsStore>(json!({
            "ref://3": { "kind": "parse", "function": "a" },
            "ref://1": { "kind": "parse", "function": "b" }
        }));
        assert!(res.is_err());
    }
}
