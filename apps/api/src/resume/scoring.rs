//! Résumé score: a bounded integer derived from validator findings and
//! document completeness signals. Recomputed from scratch on every call.
//!
//! ```text
//! 100 - min(errors * 10, 70) - min(warnings * 3, 24) + bonus
//! bonus = 3·[projects≥2] + 2·[experience≥1] + 2·[summary] + 2·[skills≥6] + 1·[link url]
//! ```

use crate::resume::completeness::CompletenessSignals;
use crate::resume::validation::Findings;

const ERROR_PENALTY: i64 = 10;
const MAX_ERROR_PENALTY: i64 = 70;
const WARNING_PENALTY: i64 = 3;
const MAX_WARNING_PENALTY: i64 = 24;

pub const MIN_SCORE: u32 = 0;
pub const MAX_SCORE: u32 = 100;

pub fn completeness_bonus(signals: &CompletenessSignals) -> i64 {
    let mut bonus = 0;
    if signals.meaningful_projects >= 2 {
        bonus += 3;
    }
    if signals.meaningful_experience >= 1 {
        bonus += 2;
    }
    if signals.has_summary {
        bonus += 2;
    }
    if signals.unique_skills >= 6 {
        bonus += 2;
    }
    if signals.has_link_url {
        bonus += 1;
    }
    bonus
}

/// Rounds half away from zero, then saturates into `[0, 100]`.
pub fn clamp_score(raw: f64) -> u32 {
    let rounded = raw.round();
    if rounded.is_nan() || rounded <= MIN_SCORE as f64 {
        MIN_SCORE
    } else if rounded >= MAX_SCORE as f64 {
        MAX_SCORE
    } else {
        rounded as u32
    }
}

pub fn compute_score(findings: &Findings, signals: &CompletenessSignals) -> u32 {
    let error_count = i64::try_from(findings.errors.len()).unwrap_or(i64::MAX);
    let warning_count = i64::try_from(findings.warnings.len()).unwrap_or(i64::MAX);

    let error_penalty = error_count.saturating_mul(ERROR_PENALTY).min(MAX_ERROR_PENALTY);
    let warning_penalty = warning_count
        .saturating_mul(WARNING_PENALTY)
        .min(MAX_WARNING_PENALTY);

    let raw = 100 - error_penalty - warning_penalty + completeness_bonus(signals);
    clamp_score(raw as f64)
}
