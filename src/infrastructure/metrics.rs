//! Business and cache counters, exported through the Prometheus recorder
//! installed by the binary. Without a recorder the macros are no-ops.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub const PRODUCTS_CREATED: &str = "products_created_total";
pub const PRODUCTS_UPDATED: &str = "products_updated_total";
pub const PRODUCTS_DELETED: &str = "products_deleted_total";
pub const USERS_REGISTERED: &str = "users_registered_total";
pub const USER_LOGINS: &str = "user_logins_total";
pub const CACHE_HITS: &str = "cache_hits_total";
pub const CACHE_MISSES: &str = "cache_misses_total";
pub const CACHE_EVICTION_FAILURES: &str = "cache_eviction_failures_total";

pub fn record_product_created() {
    ::metrics::counter!(PRODUCTS_CREATED).increment(1);
}

pub fn record_product_updated() {
    ::metrics::counter!(PRODUCTS_UPDATED).increment(1);
}

pub fn record_product_deleted() {
    ::metrics::counter!(PRODUCTS_DELETED).increment(1);
}

pub fn record_user_registered() {
    ::metrics::counter!(USERS_REGISTERED).increment(1);
}

pub fn record_user_login() {
    ::metrics::counter!(USER_LOGINS).increment(1);
}

pub fn record_cache_hit() {
    ::metrics::counter!(CACHE_HITS).increment(1);
}

pub fn record_cache_miss() {
    ::metrics::counter!(CACHE_MISSES).increment(1);
}

pub fn record_cache_eviction_failure() {
    ::metrics::counter!(CACHE_EVICTION_FAILURES).increment(1);
}

/// Installs the Prometheus recorder. Returns `false` if it was already
/// installed or installation failed.
pub fn init_prometheus() -> bool {
    if PROMETHEUS_HANDLE.get().is_some() {
        log::debug!("Prometheus metrics already initialized");
        return false;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROMETHEUS_HANDLE.set(handle).is_err() {
                log::warn!("Failed to store Prometheus handle (already set)");
                return false;
            }
            log::info!("Prometheus metrics initialized");
            true
        }
        Err(e) => {
            log::error!("Failed to install Prometheus recorder: {}", e);
            false
        }
    }
}

/// Prometheus text exposition, or `None` before [`init_prometheus`].
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}
