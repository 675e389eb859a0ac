use crate::error::{Result, ScorerError};
use crate::scoring::engine::points_value;
use crate::types::lead::{
    Flag, ScoredLead, DATE_FIELD, MATURITY_FIELD, POINTS_FIELD, REVENUE_FIELD, SECTOR_FIELD,
};
use crate::types::report::{BatchSummary, FlagCounts};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

pub const UNKNOWN_SECTOR: &str = "Não informado";
pub const UNKNOWN_REVENUE: &str = "Não informado";
pub const UNKNOWN_MATURITY: &str = "N/A";

/// Upper bound (inclusive) and label of each raw-score bucket.
const POINT_BUCKETS: [(f64, &str); 4] = [
    (30.0, "0-30"),
    (60.0, "31-60"),
    (80.0, "61-80"),
    (f64::INFINITY, "81-100"),
];

/// Inclusive date window over the `data` field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateWindow {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateWindow {
    /// Records without a parseable date are always kept.
    pub fn contains(&self, lead: &ScoredLead) -> bool {
        let Some(date) = lead
            .lead
            .get(DATE_FIELD)
            .and_then(Value::as_str)
            .and_then(parse_record_date)
        else {
            return true;
        };
        self.since.map_or(true, |since| date >= since)
            && self.until.map_or(true, |until| date <= until)
    }

    pub fn is_open(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }
}

/// Lead dates are stored as `dd/mm/yyyy`.
pub fn parse_record_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").ok()
}

/// Command-line dates accept `dd/mm/yyyy` or ISO `yyyy-mm-dd`.
pub fn parse_cli_date(text: &str) -> Result<NaiveDate> {
    parse_record_date(text)
        .or_else(|| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| ScorerError::InvalidDate(text.to_string()))
}

pub fn summarize(scored: &[ScoredLead], window: DateWindow) -> BatchSummary {
    let selected = scored
        .iter()
        .filter(|lead| window.contains(lead))
        .collect::<Vec<_>>();

    let mut flags = FlagCounts::default();
    let mut buckets = POINT_BUCKETS
        .iter()
        .map(|(_, label)| (label.to_string(), 0usize))
        .collect::<Vec<_>>();
    let mut points_total = 0.0;
    let mut points_count = 0usize;

    for lead in &selected {
        match lead.flag {
            Flag::Hot => flags.hot += 1,
            Flag::Warm => flags.warm += 1,
            Flag::Cold => flags.cold += 1,
        }

        // Unconvertible values were already reported while scoring.
        let points = points_value(&lead.lead).unwrap_or(0.0);
        if let Some(slot) = POINT_BUCKETS
            .iter()
            .position(|(upper, _)| points <= *upper)
        {
            buckets[slot].1 += 1;
        }
        if lead.lead.get(POINTS_FIELD).is_some_and(|value| !value.is_null()) {
            points_total += points;
            points_count += 1;
        }
    }

    let total = selected.len();
    let score_total: f64 = selected.iter().map(|lead| lead.score).sum();

    BatchSummary {
        total,
        excluded_by_date: scored.len() - total,
        flags,
        average_score: mean(score_total, total),
        average_points: mean(points_total, points_count),
        point_distribution: buckets,
        sectors: count_by(&selected, SECTOR_FIELD, UNKNOWN_SECTOR),
        revenues: count_by(&selected, REVENUE_FIELD, UNKNOWN_REVENUE),
        maturity_levels: count_by(&selected, MATURITY_FIELD, UNKNOWN_MATURITY),
    }
}

/// Counts leads per text value of `field`, most frequent first, ties by name.
///
/// Missing, blank and non-text values are counted under `missing`.
fn count_by(selected: &[&ScoredLead], field: &str, missing: &str) -> Vec<(String, usize)> {
    let mut counts = HashMap::<String, usize>::new();
    for lead in selected {
        let value = lead
            .lead
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(missing);
        *counts.entry(value.to_string()).or_default() += 1;
    }
    let mut counts = counts.into_iter().collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        crate::scoring::engine::round_one_decimal(total / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::lead::Lead;
    use serde_json::json;

    fn scored(value: Value, score: f64, flag: Flag) -> ScoredLead {
        match value {
            Value::Object(map) => ScoredLead {
                lead: Lead::new(map),
                score,
                flag,
            },
            other => panic!("expected object, got {other}"),
        }
    }

    fn batch() -> Vec<ScoredLead> {
        vec![
            scored(
                json!({
                    "pontuacaoTotalFinal": 90,
                    "setor": "Varejo",
                    "data": "05/03/2024",
                    "receitaAnual": "R$ 1M - 5M",
                    "nivelMaturidadeSelecionado": "Avançado"
                }),
                84.0,
                Flag::Hot,
            ),
            scored(
                json!({
                    "pontuacaoTotalFinal": 45,
                    "setor": "Varejo",
                    "data": "20/03/2024",
                    "receitaAnual": "R$ 1M - 5M",
                    "nivelMaturidadeSelecionado": ""
                }),
                48.0,
                Flag::Warm,
            ),
            scored(json!({ "pontuacaoTotalFinal": 10, "data": "01/04/2024" }), 4.0, Flag::Cold),
            scored(json!({ "setor": "Indústria" }), 0.0, Flag::Cold),
        ]
    }

    #[test]
    fn counts_flags_and_averages() {
        let summary = summarize(&batch(), DateWindow::default());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.excluded_by_date, 0);
        assert_eq!(summary.flags.hot, 1);
        assert_eq!(summary.flags.warm, 1);
        assert_eq!(summary.flags.cold, 2);
        assert_eq!(summary.average_score, 34.0);
        // the lead without pontuacaoTotalFinal is left out of the raw mean
        assert_eq!(summary.average_points, 48.3);
    }

    #[test]
    fn buckets_raw_points() {
        let summary = summarize(&batch(), DateWindow::default());
        let counts = summary
            .point_distribution
            .iter()
            .map(|(_, count)| *count)
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![2, 1, 0, 1]);
    }

    #[test]
    fn sectors_sorted_by_count_with_unknown_label() {
        let summary = summarize(&batch(), DateWindow::default());
        assert_eq!(summary.sectors[0], ("Varejo".to_string(), 2));
        assert!(summary
            .sectors
            .iter()
            .any(|(name, count)| name == UNKNOWN_SECTOR && *count == 1));
    }

    #[test]
    fn revenue_and_maturity_count_missing_values_under_their_labels() {
        let summary = summarize(&batch(), DateWindow::default());
        assert_eq!(
            summary.revenues,
            vec![
                (UNKNOWN_REVENUE.to_string(), 2),
                ("R$ 1M - 5M".to_string(), 2)
            ]
        );
        assert_eq!(
            summary.maturity_levels,
            vec![
                (UNKNOWN_MATURITY.to_string(), 3),
                ("Avançado".to_string(), 1)
            ]
        );
    }

    #[test]
    fn unconvertible_points_count_as_zero_in_buckets() {
        let batch = vec![scored(
            json!({ "pontuacaoTotalFinal": "alto" }),
            0.0,
            Flag::Cold,
        )];
        let summary = summarize(&batch, DateWindow::default());
        assert_eq!(summary.point_distribution[0].1, 1);
        assert_eq!(summary.average_points, 0.0);
    }

    #[test]
    fn date_window_is_inclusive_and_keeps_undated_records() {
        let window = DateWindow {
            since: parse_record_date("05/03/2024"),
            until: parse_record_date("20/03/2024"),
        };
        let summary = summarize(&batch(), window);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.excluded_by_date, 1);
    }

    #[test]
    fn empty_batch_has_zero_means() {
        let summary = summarize(&[], DateWindow::default());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.average_points, 0.0);
    }

    #[test]
    fn cli_dates_accept_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_cli_date("05/03/2024").ok(), expected);
        assert_eq!(parse_cli_date("2024-03-05").ok(), expected);
        assert!(matches!(
            parse_cli_date("March 5"),
            Err(ScorerError::InvalidDate(_))
        ));
    }
}
