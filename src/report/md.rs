use crate::schema::SchemaReport;
use crate::types::lead::{ScoredLead, POINTS_FIELD, ROLE_FIELD};
use crate::types::report::BatchSummary;
use serde_json::Value;

fn cell(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };
    text.replace('|', "\\|").replace('\n', " ")
}

pub fn scored_to_markdown(scored: &[ScoredLead]) -> String {
    let mut output = String::new();
    output.push_str("# Scored Leads\n\n");
    if scored.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| # | Lead | Cargo | Pontuação | Score | Flag |\n");
    output.push_str("|---|------|-------|-----------|-------|------|\n");
    for (rank, lead) in scored.iter().enumerate() {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {:.1} | {} |\n",
            rank + 1,
            lead.lead.label().replace('|', "\\|"),
            cell(lead.lead.get(ROLE_FIELD)),
            cell(lead.lead.get(POINTS_FIELD)),
            lead.score,
            lead.flag
        ));
    }
    output
}

pub fn summary_to_markdown(summary: &BatchSummary) -> String {
    let mut output = String::new();
    output.push_str("# Lead Summary\n\n");
    output.push_str(&format!("Total leads: {}\n", summary.total));
    if summary.excluded_by_date > 0 {
        output.push_str(&format!(
            "Excluded by date window: {}\n",
            summary.excluded_by_date
        ));
    }
    output.push_str(&format!(
        "Average score: {:.1}\nAverage pontuacaoTotalFinal: {:.1}\n\n",
        summary.average_score, summary.average_points
    ));

    output.push_str("## Flags\n\n");
    output.push_str(&format!(
        "- HOT: {}\n- WARM: {}\n- COLD: {}\n\n",
        summary.flags.hot, summary.flags.warm, summary.flags.cold
    ));

    output.push_str("## Pontuação Distribution\n\n");
    for (label, count) in &summary.point_distribution {
        output.push_str(&format!("- {label}: {count}\n"));
    }
    output.push('\n');

    push_counts(&mut output, "Sectors", &summary.sectors);
    output.push('\n');
    push_counts(&mut output, "Revenue", &summary.revenues);
    output.push('\n');
    push_counts(&mut output, "Maturity Levels", &summary.maturity_levels);
    output
}

fn push_counts(output: &mut String, title: &str, counts: &[(String, usize)]) {
    output.push_str(&format!("## {title}\n\n"));
    if counts.is_empty() {
        output.push_str("- none\n");
        return;
    }
    for (label, count) in counts {
        output.push_str(&format!("- {label}: {count}\n"));
    }
}

pub fn schema_to_markdown(report: &SchemaReport) -> String {
    let mut output = String::new();
    output.push_str("# Schema Inventory\n\n");
    output.push_str(&format!(
        "Introspected at: {}\nDocuments sampled: {}\n\n",
        report.introspected_at, report.documents_sampled
    ));
    if report.fields.is_empty() {
        output.push_str("- no fields\n");
        return output;
    }

    output.push_str("| Field | Type | Nullable | Present In | Sample |\n");
    output.push_str("|-------|------|----------|------------|--------|\n");
    for (name, field) in &report.fields {
        let field_type = serde_json::to_value(field.field_type)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        output.push_str(&format!(
            "| {} | {} | {} | {}/{} | {} |\n",
            name,
            field_type,
            if field.nullable { "yes" } else { "no" },
            field.present_in,
            report.documents_sampled,
            cell(Some(&Value::String(field.sample_value.clone())))
        ));
    }
    output
}
