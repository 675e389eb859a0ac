use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt;

pub const POINTS_FIELD: &str = "pontuacaoTotalFinal";
pub const ROLE_FIELD: &str = "cargo";
pub const SCORE_FIELD: &str = "_score";
pub const FLAG_FIELD: &str = "_flag";
pub const DATE_FIELD: &str = "data";
pub const SECTOR_FIELD: &str = "setor";
pub const REVENUE_FIELD: &str = "receitaAnual";
pub const MATURITY_FIELD: &str = "nivelMaturidadeSelecionado";
/// Fields searched by a free-text lead filter.
pub const SEARCH_FIELDS: [&str; 3] = ["nome", "empresa", "email"];

/// One prospective contact as read from the lead source.
///
/// Only `cargo` and `pontuacaoTotalFinal` are interpreted; every other field
/// is carried through untouched and in its original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lead {
    pub fields: Map<String, Value>,
}

impl Lead {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Display label used in logs and reports.
    pub fn label(&self) -> String {
        ["id", "nome", "empresa", "email"]
            .iter()
            .find_map(|key| self.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

impl From<Map<String, Value>> for Lead {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Hot,
    Warm,
    Cold,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Hot => "HOT",
            Flag::Warm => "WARM",
            Flag::Cold => "COLD",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A lead plus its computed `_score` and `_flag`.
///
/// Serializes as the lead's own fields followed by `_score` and `_flag`;
/// input values under those two names are replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLead {
    pub lead: Lead,
    pub score: f64,
    pub flag: Flag,
}

impl Serialize for ScoredLead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let passthrough = self
            .lead
            .fields
            .iter()
            .filter(|(key, _)| key.as_str() != SCORE_FIELD && key.as_str() != FLAG_FIELD);
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in passthrough {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(SCORE_FIELD, &self.score)?;
        map.serialize_entry(FLAG_FIELD, &self.flag)?;
        map.end()
    }
}
