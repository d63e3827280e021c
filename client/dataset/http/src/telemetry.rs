//! Telemetry related to dataset administrative requests.
use std::sync::Mutex;
use std::sync::PoisonError;

use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::CounterVec;
use prometheus::HistogramOpts;
use prometheus::HistogramVec;
use prometheus::Opts;
use prometheus::Registry;

/// Number of HTTP status codes returned by executors for each operation.
pub static HTTP_STATUS: Lazy<CounterVec> = Lazy::new(|| {
    CounterVec::new(
        Opts::new(
            "replidataset_client_http_status",
            "Number of HTTP status codes returned by executors for each operation",
        ),
        &["op", "status"],
    )
    .expect("failed to initialise HTTP_STATUS counter")
});

/// Total number of administrative operations issued.
pub static OPS_COUNT: Lazy<CounterVec> = Lazy::new(|| {
    CounterVec::new(
        Opts::new(
            "replidataset_client_ops_count",
            "Total number of administrative operations issued",
        ),
        &["op"],
    )
    .expect("failed to initialise OPS_COUNT counter")
});

/// Duration (in seconds) of administrative operations.
pub static OPS_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "replidataset_client_ops_duration",
            "Duration (in seconds) of administrative operations",
        ),
        &["op"],
    )
    .expect("failed to initialise OPS_DURATION histogram")
});

/// Number of administrative operations that resulted in error.
pub static OPS_ERR: Lazy<CounterVec> = Lazy::new(|| {
    CounterVec::new(
        Opts::new(
            "replidataset_client_ops_error",
            "Number of administrative operations that resulted in error",
        ),
        &["op"],
    )
    .expect("failed to initialise OPS_ERR counter")
});

/// Ensure metrics are registered only once.
static METRICS_REGISTERED: Mutex<bool> = Mutex::new(false);

/// The first successful call to this method registers the dataset client metrics.
///
/// Registration is attempted again by later calls if it fails.
pub fn register_metrics(reg: &Registry) -> Result<()> {
    register_once(&METRICS_REGISTERED, reg)
}

fn register_once(registered: &Mutex<bool>, reg: &Registry) -> Result<()> {
    let mut registered = registered.lock().unwrap_or_else(PoisonError::into_inner);
    if *registered {
        return Ok(());
    }

    let collectors: [Box<dyn prometheus::core::Collector>; 4] = [
        Box::new(HTTP_STATUS.clone()),
        Box::new(OPS_COUNT.clone()),
        Box::new(OPS_DURATION.clone()),
        Box::new(OPS_ERR.clone()),
    ];
    for collector in collectors {
        reg.register(collector)?;
    }
    *registered = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use prometheus::Counter;
    use prometheus::Registry;

    use super::register_once;

    #[test]
    fn failed_registration_is_retried() {
        let registered = Mutex::new(false);
        let clashing = Registry::new();
        let counter =
            Counter::new("replidataset_client_http_status", "clashing collector").unwrap();
        clashing.register(Box::new(counter)).unwrap();

        assert!(register_once(&registered, &clashing).is_err());
        assert!(!*registered.lock().unwrap());

        let registry = Registry::new();
        register_once(&registered, &registry).unwrap();
        assert!(*registered.lock().unwrap());
    }

    #[test]
    fn registration_happens_once() {
        let registered = Mutex::new(false);
        let registry = Registry::new();
        register_once(&registered, &registry).unwrap();
        register_once(&registered, &registry).unwrap();
    }
}
