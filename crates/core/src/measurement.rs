//! Derived predicates over thickness measurement locations (TMLs).

/// Whether a measurement is critical: a measured wall thickness exists and
/// has fallen below the alert threshold. Missing values are never critical.
pub fn is_critical(t_measured: Option<f64>, t_alert: Option<f64>) -> bool {
    match (t_measured, t_alert) {
        (Some(measured), Some(alert)) => measured < alert,
        _ => false,
    }
}
