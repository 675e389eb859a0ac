use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlagCounts {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

/// Aggregate view of one scored batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub excluded_by_date: usize,
    pub flags: FlagCounts,
    pub average_score: f64,
    pub average_points: f64,
    /// `(label, count)` per raw `pontuacaoTotalFinal` bucket, lowest first.
    pub point_distribution: Vec<(String, usize)>,
    /// `(setor, count)`, most frequent first.
    pub sectors: Vec<(String, usize)>,
    /// `(receitaAnual, count)`, most frequent first.
    pub revenues: Vec<(String, usize)>,
    /// `(nivelMaturidadeSelecionado, count)`, most frequent first.
    pub maturity_levels: Vec<(String, usize)>,
}
