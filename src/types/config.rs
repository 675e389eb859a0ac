use serde::{Deserialize, Serialize};

/// Weights, role fragments and thresholds for one scoring pass.
///
/// Built once by [`crate::config::load_config`] and never mutated afterwards,
/// so a single value can be shared by reference across any number of leads
/// (or threads).
///
/// Keys other than the ones named here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(rename = "cargos_alto_potencial")]
    pub roles: RoleFragments,
    #[serde(rename = "regra_combinada")]
    pub weights: Weights,
    #[serde(rename = "faixas_pontuacao")]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFragments {
    pub hot: Vec<String>,
    pub warm: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(rename = "peso_cargo")]
    pub role: f64,
    #[serde(rename = "peso_pontuacao")]
    pub points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub hot: Band,
    pub warm: Band,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
}

impl Thresholds {
    pub fn new(hot_min: f64, warm_min: f64) -> Self {
        Self {
            hot: Band { min: hot_min },
            warm: Band { min: warm_min },
        }
    }

    /// `hot.min >= warm.min`; classification is only monotonic when this holds.
    pub fn is_ordered(&self) -> bool {
        self.hot.min >= self.warm.min
    }
}

impl ScoringConfig {
    /// Non-fatal consistency problems, reported by `check`.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.thresholds.is_ordered() {
            warnings.push(format!(
                "faixas_pontuacao.hot.min ({}) is below faixas_pontuacao.warm.min ({}); classification is not monotonic",
                self.thresholds.hot.min, self.thresholds.warm.min
            ));
        }
        if self.roles.hot.is_empty() {
            warnings.push("cargos_alto_potencial.hot is empty; no role scores 100".to_string());
        }
        if self.roles.warm.is_empty() {
            warnings.push("cargos_alto_potencial.warm is empty; no role scores 50".to_string());
        }
        for (key, fragments) in [
            ("cargos_alto_potencial.hot", &self.roles.hot),
            ("cargos_alto_potencial.warm", &self.roles.warm),
        ] {
            if fragments.iter().any(|fragment| fragment.trim().is_empty()) {
                warnings.push(format!(
                    "{key} contains a blank fragment, which matches every non-empty role"
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScoringConfig {
        ScoringConfig {
            roles: RoleFragments {
                hot: vec!["diretor".to_string()],
                warm: vec!["gerente".to_string()],
            },
            weights: Weights {
                role: 0.6,
                points: 0.4,
            },
            thresholds: Thresholds::new(80.0, 40.0),
        }
    }

    #[test]
    fn consistent_config_has_no_warnings() {
        assert!(sample().warnings().is_empty());
    }

    #[test]
    fn inverted_thresholds_are_reported() {
        let mut config = sample();
        config.thresholds = Thresholds::new(30.0, 60.0);
        assert!(!config.thresholds.is_ordered());
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not monotonic"));
    }

    #[test]
    fn blank_fragment_is_reported() {
        let mut config = sample();
        config.roles.warm.push("   ".to_string());
        assert!(config
            .warnings()
            .iter()
            .any(|warning| warning.starts_with("cargos_alto_potencial.warm")));
    }

    #[test]
    fn serializes_with_file_key_names() {
        let value = serde_json::to_value(sample()).expect("config should serialize");
        assert_eq!(value["regra_combinada"]["peso_cargo"], 0.6);
        assert_eq!(value["faixas_pontuacao"]["warm"]["min"], 40.0);
        assert_eq!(value["cargos_alto_potencial"]["hot"][0], "diretor");
    }

    #[test]
    fn check_output_reads_back_as_the_same_config() {
        let rendered = serde_json::to_string(&sample()).expect("config should serialize");
        let parsed: ScoringConfig = serde_json::from_str(&rendered).expect("config should parse");
        assert_eq!(parsed, sample());
    }
}
