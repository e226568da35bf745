use serde::{Deserialize, Serialize};

/// One row of the verification-complexity experiment: how long it took to
/// verify k-stability at a given problem size, averaged over repeated trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub agent_count: u32,
    pub avg_time_ms: f64,
    pub std_dev_ms: f64,
    pub trial_count: u32,
}

/// One row of the existence experiment: runtime and empirical existence rate
/// for a given problem size and k/n ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistenceRecord {
    pub agent_count: u32,
    pub k_ratio: f64,
    pub avg_time_ms: f64,
    pub std_dev_ms: f64,
    pub trial_count: u32,
    pub exists_rate: f64,
}

/// Rows under the model-comparison header. The solver harness does not emit
/// a stable column format for this section yet, so no fields are decoded;
/// the header is only recognized so its output is not misattributed to the
/// neighboring sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparisonRecord {}

/// Everything extracted from one benchmark log, in file order.
///
/// Built fresh per parse call and owned by the caller; nothing here is
/// shared or cached between invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub verification: Vec<VerificationRecord>,
    pub existence: Vec<ExistenceRecord>,
    pub model_comparison: Vec<ModelComparisonRecord>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.verification.is_empty()
            && self.existence.is_empty()
            && self.model_comparison.is_empty()
    }

    /// Total record count across all sections.
    pub fn len(&self) -> usize {
        self.verification.len() + self.existence.len() + self.model_comparison.len()
    }
}
