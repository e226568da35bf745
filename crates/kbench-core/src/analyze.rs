//! Descriptive statistics over a parsed [`ResultSet`].
//!
//! Everything here is a pure reducer: records are read, never mutated, and
//! no I/O happens. The console text shown by the CLI is a rendering of the
//! [`Report`] value, layered on top of this module.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{ExistenceRecord, ResultSet, VerificationRecord};

/// Spread ratio (max rate / min rate) above which adjacent growth rates
/// stop looking polynomial.
pub const DEFAULT_SPREAD_THRESHOLD: f64 = 10.0;

/// Per-section summaries; a section absent from the log yields `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub verification: Option<VerificationSummary>,
    pub existence: Option<ExistenceSummary>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.verification.is_none() && self.existence.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub record_count: usize,
    pub agents_min: u32,
    pub agents_max: u32,
    pub time_min_ms: f64,
    pub time_max_ms: f64,
    /// Absent when fewer than two records exist or every adjacent pair
    /// shares an agent count.
    pub growth: Option<GrowthSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// Pairwise rates in parse order; pairs with equal agent counts are
    /// omitted rather than dividing by zero.
    pub rates: Vec<f64>,
    pub mean_rate: f64,
    pub classification: GrowthClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthClass {
    PolynomialConsistent { spread: f64 },
    Irregular { spread: f64 },
    /// A non-positive rate makes the max/min spread meaningless.
    Inconclusive,
}

impl fmt::Display for GrowthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PolynomialConsistent { spread } => {
                write!(f, "Growth appears polynomial (spread {spread:.2})")
            }
            Self::Irregular { spread } => write!(
                f,
                "WARNING: Growth rate varies significantly (spread {spread:.2}) - may not be polynomial"
            ),
            Self::Inconclusive => {
                write!(f, "Growth classification inconclusive - non-positive rate present")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistenceSummary {
    pub record_count: usize,
    /// Grouped means in ascending `k_ratio` order.
    pub groups: Vec<KRatioGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KRatioGroup {
    pub k_ratio: f64,
    pub sample_count: usize,
    pub mean_exists_rate: f64,
    pub mean_time_ms: f64,
}

/// Summarize with the default spread threshold.
pub fn summarize(results: &ResultSet) -> Report {
    summarize_with_threshold(results, DEFAULT_SPREAD_THRESHOLD)
}

pub fn summarize_with_threshold(results: &ResultSet, spread_threshold: f64) -> Report {
    Report {
        verification: summarize_verification(&results.verification, spread_threshold),
        existence: summarize_existence(&results.existence),
    }
}

fn summarize_verification(
    records: &[VerificationRecord],
    spread_threshold: f64,
) -> Option<VerificationSummary> {
    if records.is_empty() {
        return None;
    }

    let agents_min = records.iter().map(|r| r.agent_count).min()?;
    let agents_max = records.iter().map(|r| r.agent_count).max()?;
    let time_min_ms = records
        .iter()
        .map(|r| r.avg_time_ms)
        .fold(f64::INFINITY, f64::min);
    let time_max_ms = records
        .iter()
        .map(|r| r.avg_time_ms)
        .fold(f64::NEG_INFINITY, f64::max);

    let rates = growth_rates(records);
    let growth = if rates.is_empty() {
        None
    } else {
        let mean_rate = rates.iter().sum::<f64>() / rates.len() as f64;
        let classification = classify(&rates, spread_threshold);
        Some(GrowthSummary {
            rates,
            mean_rate,
            classification,
        })
    };

    Some(VerificationSummary {
        record_count: records.len(),
        agents_min,
        agents_max,
        time_min_ms,
        time_max_ms,
        growth,
    })
}

/// Discrete derivative of average runtime between consecutive records, in
/// parse order. The producer is expected to emit sizes ascending; that is
/// not re-validated here.
fn growth_rates(records: &[VerificationRecord]) -> Vec<f64> {
    records
        .windows(2)
        .filter_map(|pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.agent_count == prev.agent_count {
                // Repeated size, no defined slope.
                return None;
            }
            let dt = next.avg_time_ms - prev.avg_time_ms;
            let dn = f64::from(next.agent_count) - f64::from(prev.agent_count);
            Some(dt / dn)
        })
        .collect()
}

fn classify(rates: &[f64], spread_threshold: f64) -> GrowthClass {
    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
    let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min <= 0.0 {
        return GrowthClass::Inconclusive;
    }
    let spread = max / min;
    if spread > spread_threshold {
        GrowthClass::Irregular { spread }
    } else {
        GrowthClass::PolynomialConsistent { spread }
    }
}

fn summarize_existence(records: &[ExistenceRecord]) -> Option<ExistenceSummary> {
    if records.is_empty() {
        return None;
    }

    let mut ratios: Vec<f64> = records.iter().map(|r| r.k_ratio).collect();
    ratios.sort_by(f64::total_cmp);
    ratios.dedup();

    let groups = ratios
        .into_iter()
        .map(|ratio| {
            let members: Vec<&ExistenceRecord> =
                records.iter().filter(|r| r.k_ratio == ratio).collect();
            let n = members.len() as f64;
            KRatioGroup {
                k_ratio: ratio,
                sample_count: members.len(),
                mean_exists_rate: members.iter().map(|r| r.exists_rate).sum::<f64>() / n,
                mean_time_ms: members.iter().map(|r| r.avg_time_ms).sum::<f64>() / n,
            }
        })
        .collect();

    Some(ExistenceSummary {
        record_count: records.len(),
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ver(agent_count: u32, avg_time_ms: f64) -> VerificationRecord {
        VerificationRecord {
            agent_count,
            avg_time_ms,
            std_dev_ms: 0.1,
            trial_count: 50,
        }
    }

    fn exi(k_ratio: f64, avg_time_ms: f64, exists_rate: f64) -> ExistenceRecord {
        ExistenceRecord {
            agent_count: 50,
            k_ratio,
            avg_time_ms,
            std_dev_ms: 0.1,
            trial_count: 30,
            exists_rate,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_result_set_yields_empty_report() {
        let report = summarize(&ResultSet::default());
        assert!(report.is_empty());
        assert!(report.verification.is_none());
        assert!(report.existence.is_none());
    }

    #[test]
    fn test_growth_rate_arithmetic() {
        let results = ResultSet {
            verification: vec![ver(10, 1.0), ver(20, 4.0), ver(30, 9.0)],
            ..Default::default()
        };
        let summary = summarize(&results).verification.unwrap();
        let growth = summary.growth.unwrap();
        assert_eq!(growth.rates.len(), 2);
        assert!(approx(growth.rates[0], 0.3));
        assert!(approx(growth.rates[1], 0.5));
        assert!(approx(growth.mean_rate, 0.4));
    }

    #[test]
    fn test_ranges_independent_of_order() {
        let results = ResultSet {
            verification: vec![ver(30, 9.0), ver(10, 1.0), ver(20, 4.0)],
            ..Default::default()
        };
        let summary = summarize(&results).verification.unwrap();
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.agents_min, 10);
        assert_eq!(summary.agents_max, 30);
        assert!(approx(summary.time_min_ms, 1.0));
        assert!(approx(summary.time_max_ms, 9.0));
    }

    #[test]
    fn test_repeated_agent_count_pair_omitted() {
        let results = ResultSet {
            verification: vec![ver(10, 1.0), ver(10, 2.0), ver(20, 4.0)],
            ..Default::default()
        };
        let growth = summarize(&results).verification.unwrap().growth.unwrap();
        // The 10 -> 10 pair contributes nothing; only 10 -> 20 remains.
        assert_eq!(growth.rates.len(), 1);
        assert!(approx(growth.rates[0], 0.2));
        assert!(growth.rates.iter().all(|r| r.is_finite()));
    }

    #[test]
    fn test_all_pairs_degenerate_yields_no_growth() {
        let results = ResultSet {
            verification: vec![ver(10, 1.0), ver(10, 2.0), ver(10, 3.0)],
            ..Default::default()
        };
        let summary = summarize(&results).verification.unwrap();
        assert!(summary.growth.is_none());
    }

    #[test]
    fn test_single_record_yields_no_growth() {
        let results = ResultSet {
            verification: vec![ver(10, 1.0)],
            ..Default::default()
        };
        let summary = summarize(&results).verification.unwrap();
        assert_eq!(summary.record_count, 1);
        assert!(summary.growth.is_none());
    }

    #[test]
    fn test_classify_uniform_rates_polynomial() {
        match classify(&[1.0, 1.0, 1.0], DEFAULT_SPREAD_THRESHOLD) {
            GrowthClass::PolynomialConsistent { spread } => assert!(approx(spread, 1.0)),
            other => panic!("expected polynomial, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_wide_spread_irregular() {
        match classify(&[1.0, 50.0], DEFAULT_SPREAD_THRESHOLD) {
            GrowthClass::Irregular { spread } => assert!(approx(spread, 50.0)),
            other => panic!("expected irregular, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_nonpositive_rate_inconclusive() {
        assert_eq!(
            classify(&[-1.0, 2.0], DEFAULT_SPREAD_THRESHOLD),
            GrowthClass::Inconclusive
        );
        assert_eq!(
            classify(&[0.0, 2.0], DEFAULT_SPREAD_THRESHOLD),
            GrowthClass::Inconclusive
        );
    }

    #[test]
    fn test_classify_spread_at_threshold_is_polynomial() {
        // spread == threshold is not "greater than"
        match classify(&[1.0, 10.0], DEFAULT_SPREAD_THRESHOLD) {
            GrowthClass::PolynomialConsistent { spread } => assert!(approx(spread, 10.0)),
            other => panic!("expected polynomial, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_threshold_respected() {
        let results = ResultSet {
            verification: vec![ver(10, 1.0), ver(20, 11.0), ver(30, 41.0)],
            ..Default::default()
        };
        // rates are [1.0, 3.0]; spread 3 flags irregular only below threshold 3
        let strict = summarize_with_threshold(&results, 2.0);
        assert!(matches!(
            strict.verification.unwrap().growth.unwrap().classification,
            GrowthClass::Irregular { .. }
        ));
        let lax = summarize_with_threshold(&results, 5.0);
        assert!(matches!(
            lax.verification.unwrap().growth.unwrap().classification,
            GrowthClass::PolynomialConsistent { .. }
        ));
    }

    #[test]
    fn test_existence_grouping_means() {
        let results = ResultSet {
            existence: vec![
                exi(0.1, 1.0, 1.0),
                exi(0.1, 1.5, 0.0),
                exi(0.5, 3.0, 0.4),
            ],
            ..Default::default()
        };
        let summary = summarize(&results).existence.unwrap();
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.groups.len(), 2);

        let first = &summary.groups[0];
        assert!(approx(first.k_ratio, 0.1));
        assert_eq!(first.sample_count, 2);
        assert!(approx(first.mean_exists_rate, 0.5));
        assert!(approx(first.mean_time_ms, 1.25));

        let second = &summary.groups[1];
        assert!(approx(second.k_ratio, 0.5));
        assert_eq!(second.sample_count, 1);
        assert!(approx(second.mean_exists_rate, 0.4));
        assert!(approx(second.mean_time_ms, 3.0));
    }

    #[test]
    fn test_existence_groups_sorted_ascending() {
        let results = ResultSet {
            existence: vec![
                exi(0.9, 1.0, 1.0),
                exi(0.1, 1.0, 1.0),
                exi(0.5, 1.0, 1.0),
            ],
            ..Default::default()
        };
        let summary = summarize(&results).existence.unwrap();
        let ratios: Vec<f64> = summary.groups.iter().map(|g| g.k_ratio).collect();
        assert_eq!(ratios, vec![0.1, 0.5, 0.9]);
    }

    #[test]
    fn test_report_serializes_for_collaborators() {
        let results = ResultSet {
            verification: vec![ver(10, 1.0), ver(20, 4.0)],
            existence: vec![exi(0.1, 1.0, 1.0)],
            ..Default::default()
        };
        let report = summarize(&results);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("verification").is_some());
        assert!(json.get("existence").is_some());
        assert_eq!(
            json["verification"]["growth"]["classification"]["kind"],
            "polynomial_consistent"
        );
    }
}
