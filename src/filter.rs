use crate::scoring::role::normalize;
use crate::types::lead::{
    Flag, Lead, ScoredLead, MATURITY_FIELD, REVENUE_FIELD, SEARCH_FIELDS, SECTOR_FIELD,
};
use serde_json::Value;
use tracing::debug;

/// Narrows a scored batch the way the lead listing does.
///
/// Every criterion left empty accepts all leads. List criteria accept a lead
/// whose field equals any listed value, compared trimmed and
/// case-insensitively; a lead without the field is rejected. The score range
/// is inclusive at both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    pub flags: Vec<Flag>,
    pub sectors: Vec<String>,
    pub revenues: Vec<String>,
    pub maturity_levels: Vec<String>,
    /// Substring of `nome`, `empresa` or `email`.
    pub search: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

impl LeadFilter {
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
            && self.sectors.is_empty()
            && self.revenues.is_empty()
            && self.maturity_levels.is_empty()
            && self.search().is_none()
            && self.min_score.is_none()
            && self.max_score.is_none()
    }

    pub fn matches(&self, scored: &ScoredLead) -> bool {
        let lead = &scored.lead;
        (self.flags.is_empty() || self.flags.contains(&scored.flag))
            && self.min_score.map_or(true, |min| scored.score >= min)
            && self.max_score.map_or(true, |max| scored.score <= max)
            && one_of(lead, SECTOR_FIELD, &self.sectors)
            && one_of(lead, REVENUE_FIELD, &self.revenues)
            && one_of(lead, MATURITY_FIELD, &self.maturity_levels)
            && self.search().map_or(true, |needle| mentions(lead, &needle))
    }

    /// Keeps matching leads in their existing order.
    pub fn apply(&self, scored: Vec<ScoredLead>) -> Vec<ScoredLead> {
        if self.is_empty() {
            return scored;
        }
        let before = scored.len();
        let kept = scored
            .into_iter()
            .filter(|lead| self.matches(lead))
            .collect::<Vec<_>>();
        debug!(before, after = kept.len(), "filtered scored leads");
        kept
    }

    fn search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(normalize)
            .filter(|needle| !needle.is_empty())
    }
}

fn text<'a>(lead: &'a Lead, field: &str) -> Option<&'a str> {
    lead.get(field).and_then(Value::as_str)
}

fn one_of(lead: &Lead, field: &str, accepted: &[String]) -> bool {
    if accepted.is_empty() {
        return true;
    }
    let Some(value) = text(lead, field).map(normalize) else {
        return false;
    };
    accepted.iter().any(|candidate| normalize(candidate) == value)
}

fn mentions(lead: &Lead, needle: &str) -> bool {
    SEARCH_FIELDS
        .iter()
        .filter_map(|field| text(lead, field))
        .any(|value| normalize(value).contains(needle))
}
