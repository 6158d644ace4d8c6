//! In-memory latency rollups for the hot read paths.
//!
//! Keeps a bounded sample window per operation so p95 diagnostics can be
//! surfaced without persistent storage. Budget overruns are counted and
//! logged by the callers.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::OnceLock;

use parking_lot::Mutex;

const MAX_SAMPLES_PER_OPERATION: usize = 128;

/// p95 budgets for the read paths that feed the UI.
pub const DASHBOARD_BUDGET_MS: u128 = 200;
pub const DIRECTORY_BUDGET_MS: u128 = 100;

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLatency {
    pub operation: String,
    pub sample_count: usize,
    pub p50_ms: u128,
    pub p95_ms: u128,
    pub max_ms: u128,
    pub budget_ms: u128,
    pub budget_violations: u64,
}

#[derive(Default)]
struct Window {
    samples_ms: VecDeque<u128>,
    budget_ms: u128,
    budget_violations: u64,
}

#[derive(Default)]
pub struct LatencyRecorder {
    windows: Mutex<HashMap<String, Window>>,
}

impl LatencyRecorder {
    fn global() -> &'static Self {
        static RECORDER: OnceLock<LatencyRecorder> = OnceLock::new();
        RECORDER.get_or_init(Self::default)
    }

    fn record_sample(&self, operation: &str, elapsed_ms: u128, budget_ms: u128) {
        let mut windows = self.windows.lock();
        let window = windows.entry(operation.to_string()).or_default();
        window.budget_ms = budget_ms;
        if elapsed_ms > budget_ms {
            window.budget_violations += 1;
        }
        if window.samples_ms.len() >= MAX_SAMPLES_PER_OPERATION {
            window.samples_ms.pop_front();
        }
        window.samples_ms.push_back(elapsed_ms);
    }

    fn snapshot(&self) -> Vec<OperationLatency> {
        let windows = self.windows.lock();
        let mut rollups: Vec<OperationLatency> = windows
            .iter()
            .map(|(operation, window)| {
                let mut values: Vec<u128> = window.samples_ms.iter().copied().collect();
                values.sort_unstable();
                OperationLatency {
                    operation: operation.clone(),
                    sample_count: values.len(),
                    p50_ms: percentile(&values, 50.0).unwrap_or(0),
                    p95_ms: percentile(&values, 95.0).unwrap_or(0),
                    max_ms: values.last().copied().unwrap_or(0),
                    budget_ms: window.budget_ms,
                    budget_violations: window.budget_violations,
                }
            })
            .collect();

        rollups.sort_by(|a, b| b.p95_ms.cmp(&a.p95_ms).then(a.operation.cmp(&b.operation)));
        rollups
    }
}

fn percentile(values: &[u128], p: f64) -> Option<u128> {
    if values.is_empty() {
        return None;
    }
    let n = values.len();
    let rank = ((p / 100.0) * n as f64).ceil() as usize;
    let idx = rank.saturating_sub(1).min(n - 1);
    Some(values[idx])
}

/// Record one timed operation against its budget, logging overruns.
pub fn record_latency(operation: &str, elapsed_ms: u128, budget_ms: u128) {
    LatencyRecorder::global().record_sample(operation, elapsed_ms, budget_ms);
    if elapsed_ms > budget_ms {
        log::warn!(
            "{} exceeded latency budget: {}ms > {}ms",
            operation,
            elapsed_ms,
            budget_ms
        );
    } else {
        log::debug!("{} completed in {}ms", operation, elapsed_ms);
    }
}

/// Current rollups, worst p95 first.
pub fn latency_rollups() -> Vec<OperationLatency> {
    LatencyRecorder::global().snapshot()
}
