//! Statistics aggregate: five store queries fanned out concurrently,
//! each failure isolated and defaulted so one broken aggregate never
//! sinks the batch.

use std::sync::Arc;

use tokio::task;
use tracing::warn;

use vigil_core::errors::{RetrievalError, VigilError, VigilResult};
use vigil_core::models::ThreatStatistics;
use vigil_core::traits::ThreatStore;

/// Run one blocking store query on the blocking pool, defaulting the
/// result (and logging) on either query failure or task failure.
pub(crate) async fn run_defaulting<T, F>(label: &'static str, f: F) -> T
where
    T: Default + Send + 'static,
    F: FnOnce() -> VigilResult<T> + Send + 'static,
{
    match task::spawn_blocking(f).await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(query = label, error = %e, "store query failed, defaulting to empty");
            T::default()
        }
        Err(e) => {
            let err = VigilError::from(RetrievalError::TaskFailed {
                reason: e.to_string(),
            });
            warn!(query = label, error = %err, "store query task failed, defaulting to empty");
            T::default()
        }
    }
}

/// Human label for a time window.
pub(crate) fn time_range_label(days: u32, max_days: u32) -> String {
    if days >= max_days {
        "all time".to_string()
    } else {
        format!("{days} days")
    }
}

/// Compose the full statistics aggregate for one window: total counts,
/// severity distribution, vendor ranking, CVE trend, and phishing stats,
/// all fetched concurrently.
pub async fn gather_statistics(
    store: &Arc<dyn ThreatStore>,
    days: u32,
    vendor: Option<String>,
    vendor_limit: usize,
    trend_cap: usize,
    max_days: u32,
) -> ThreatStatistics {
    let total_fut = {
        let store = Arc::clone(store);
        let vendor = vendor.clone();
        run_defaulting("cve_count", move || {
            store.count_cves(days, vendor.as_deref())
        })
    };
    let severity_fut = {
        let store = Arc::clone(store);
        let vendor = vendor.clone();
        run_defaulting("severity_distribution", move || {
            store.severity_distribution(days, vendor.as_deref())
        })
    };
    let ranking_fut = {
        let store = Arc::clone(store);
        run_defaulting("vendor_ranking", move || {
            store.vendor_ranking(days, vendor_limit)
        })
    };
    let trend_fut = {
        let store = Arc::clone(store);
        let vendor = vendor.clone();
        run_defaulting("time_trend", move || {
            store.time_trend(days, vendor.as_deref(), trend_cap)
        })
    };
    let phishing_fut = {
        let store = Arc::clone(store);
        run_defaulting("phishing_stats", move || store.phishing_stats(days, trend_cap))
    };

    let (total_cves, severity_distribution, vendor_ranking, recent_trend, phishing) =
        tokio::join!(total_fut, severity_fut, ranking_fut, trend_fut, phishing_fut);
    let (total_phishing, phishing_trend) = phishing;

    ThreatStatistics {
        total_cves,
        total_phishing,
        severity_distribution,
        vendor_ranking,
        recent_trend,
        phishing_trend,
        time_range: time_range_label(days, max_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_the_sentinel() {
        assert_eq!(time_range_label(36_500, 36_500), "all time");
        assert_eq!(time_range_label(40_000, 36_500), "all time");
        assert_eq!(time_range_label(30, 36_500), "30 days");
    }
}
