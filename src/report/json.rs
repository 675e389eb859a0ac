use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::lead::{Flag, Lead, ScoredLead};
    use serde_json::{json, Value};

    #[test]
    fn scored_batch_renders_as_array_with_appended_fields() {
        let Value::Object(fields) = json!({ "nome": "Ana", "pontuacaoTotalFinal": 60 }) else {
            panic!("expected object");
        };
        let scored = vec![ScoredLead {
            lead: Lead::new(fields),
            score: 84.0,
            flag: Flag::Hot,
        }];

        let rendered = to_json(&scored).expect("json should serialize");
        assert!(rendered.starts_with('['));
        assert!(rendered.contains("\"_score\": 84.0"));
        assert!(rendered.contains("\"_flag\": \"HOT\""));
    }
}
