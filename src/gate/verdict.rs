//! Verdict evaluation over a check rollup.
//!
//! Pure functions - no I/O happens here, making the selection and policy
//! rules easy to unit test.

use crate::types::{CheckConclusion, CheckResult};

/// How a check conclusion maps to pass/fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConclusionPolicy {
    /// Only an explicit `FAILURE` rejects; `SKIPPED` and unknown
    /// conclusions pass.
    #[default]
    FailureRejects,
    /// Only an explicit `SUCCESS` passes.
    RequireSuccess,
}

/// Evaluate a rollup: the most recently completed check decides.
///
/// An empty rollup, or one with no completed entries, passes: absent or
/// still-pending checks do not block the merge.
pub fn evaluate_rollup(rollup: &[CheckResult], policy: ConclusionPolicy) -> bool {
    latest_completed(rollup).map_or(true, |check| {
        conclusion_passes(check.conclusion_or_other(), policy)
    })
}

/// The entry that decides the verdict: maximum `completed_at`, with ties
/// broken by lexicographically-first `context` so the result is
/// deterministic.
pub fn latest_completed(rollup: &[CheckResult]) -> Option<&CheckResult> {
    rollup
        .iter()
        .filter_map(|c| c.completed_at.map(|at| (at, c)))
        .max_by(|(at_a, a), (at_b, b)| at_a.cmp(at_b).then_with(|| b.context.cmp(&a.context)))
        .map(|(_, c)| c)
}

const fn conclusion_passes(conclusion: CheckConclusion, policy: ConclusionPolicy) -> bool {
    match policy {
        ConclusionPolicy::FailureRejects => !matches!(conclusion, CheckConclusion::Failure),
        ConclusionPolicy::RequireSuccess => matches!(conclusion, CheckConclusion::Success),
    }
}
