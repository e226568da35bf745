//! Text rendering of the analyzer report and parsed record tables.
//!
//! Rendering builds strings; printing stays in main. The report text mirrors
//! what the solver team is used to reading from the old analysis script.

use kbench_core::{ExistenceRecord, Report, VerificationRecord};

pub fn render_report(report: &Report) -> String {
    let mut out = String::from("=== Complexity Analysis ===\n");

    if let Some(ver) = &report.verification {
        out.push('\n');
        out.push_str("Verification Complexity:\n");
        out.push_str(&format!(
            "  - Tested {} different problem sizes\n",
            ver.record_count
        ));
        out.push_str(&format!(
            "  - Range: {} to {} agents\n",
            ver.agents_min, ver.agents_max
        ));
        out.push_str(&format!(
            "  - Time range: {:.3} to {:.3} ms\n",
            ver.time_min_ms, ver.time_max_ms
        ));
        if let Some(growth) = &ver.growth {
            out.push_str(&format!(
                "  - Average growth rate: {:.3} ms/agent\n",
                growth.mean_rate
            ));
            out.push_str(&format!("  - {}\n", growth.classification));
        }
    }

    if let Some(exi) = &report.existence {
        out.push('\n');
        out.push_str("Existence Complexity:\n");
        out.push_str(&format!(
            "  - Tested {} different configurations\n",
            exi.record_count
        ));
        let ratios: Vec<String> = exi
            .groups
            .iter()
            .map(|g| format!("{:.2}", g.k_ratio))
            .collect();
        out.push_str(&format!(
            "  - k/n ratios tested: [{}]\n",
            ratios.join(", ")
        ));
        out.push_str("  - Average existence rates by k/n ratio:\n");
        for group in &exi.groups {
            out.push_str(&format!(
                "    k/n = {:.2}: {:.3}\n",
                group.k_ratio, group.mean_exists_rate
            ));
        }
        out.push_str("  - Average computation times by k/n ratio:\n");
        for group in &exi.groups {
            out.push_str(&format!(
                "    k/n = {:.2}: {:.3} ms\n",
                group.k_ratio, group.mean_time_ms
            ));
        }
    }

    out
}

pub fn render_verification(records: &[VerificationRecord]) -> String {
    let mut out = format!(
        "{:<8} {:>14} {:>10} {:>8}\n",
        "Agents", "Avg Time (ms)", "Std Dev", "Trials"
    );
    out.push_str(&format!("{}\n", "-".repeat(44)));
    for rec in records {
        out.push_str(&format!(
            "{:<8} {:>14.3} {:>10.3} {:>8}\n",
            rec.agent_count, rec.avg_time_ms, rec.std_dev_ms, rec.trial_count
        ));
    }
    out
}

pub fn render_existence(records: &[ExistenceRecord]) -> String {
    let mut out = format!(
        "{:<8} {:>6} {:>14} {:>10} {:>8} {:>8}\n",
        "Agents", "k/n", "Avg Time (ms)", "Std Dev", "Trials", "Exists"
    );
    out.push_str(&format!("{}\n", "-".repeat(60)));
    for rec in records {
        out.push_str(&format!(
            "{:<8} {:>6.2} {:>14.3} {:>10.3} {:>8} {:>8.2}\n",
            rec.agent_count,
            rec.k_ratio,
            rec.avg_time_ms,
            rec.std_dev_ms,
            rec.trial_count,
            rec.exists_rate
        ));
    }
    out
}
