/*!
 * Trend Analysis
 * EMA slope estimation plus leak and spike detection
 *
 * Runs once per entity per poll cycle, after the measurement has been
 * applied to the record. Pure state transformation: the only output
 * channel is the bounded alert log.
 */

use crate::config::TelemetryConfig;
use crate::core::types::TimestampMs;
use crate::pool::EntityRecord;
use crate::trend::alerts::{AlertKind, AlertLog, AlertRecord};

/// Update the trend estimate and run both detectors for one record.
///
/// When alerts are disabled the detectors are skipped as a unit; the
/// trend bookkeeping still proceeds.
pub fn observe(
    record: &mut EntityRecord,
    cfg: &TelemetryConfig,
    log: &mut AlertLog,
    now: TimestampMs,
) {
    update_trend(record, cfg);
    if !cfg.alerts_enabled {
        // drop any latch so a disable/enable round-trip re-arms the
        // leak detector
        record.alert_active = false;
        return;
    }
    check_leak(record, cfg, log, now);
    check_spike(record, cfg, log, now);
}

/// EMA of the per-second delta with fixed smoothing weight.
///
/// The slope stays at its initial 0.0 until the entity has accumulated
/// the minimum history; the EMA then starts from 0 rather than seeding
/// from the first real delta, so early estimates converge gradually.
fn update_trend(record: &mut EntityRecord, cfg: &TelemetryConfig) {
    if record.history().len() < cfg.min_samples_for_trend {
        return;
    }
    record.trend_slope =
        record.trend_slope * (1.0 - cfg.trend_alpha) + record.last_delta * cfg.trend_alpha;
}

/// Edge-triggered leak detector.
///
/// Emits exactly one alert per continuous interval above the threshold,
/// latched via `alert_active`; dropping to or below the threshold
/// re-arms the detector.
fn check_leak(
    record: &mut EntityRecord,
    cfg: &TelemetryConfig,
    log: &mut AlertLog,
    now: TimestampMs,
) {
    if record.trend_slope > cfg.leak_threshold_kb_s {
        if !record.alert_active {
            record.alert_active = true;
            log.push(AlertRecord {
                timestamp_ms: now,
                entity: record.name().to_string(),
                kind: AlertKind::Leak,
                message: format!(
                    "sustained growth {:+.1} KB/s exceeds {:.1} KB/s",
                    record.trend_slope, cfg.leak_threshold_kb_s
                ),
            });
        }
    } else {
        record.alert_active = false;
    }
}

/// Stateless spike detector, re-evaluated every update.
///
/// Fires only when the single-step jump exceeds both the relative and
/// the absolute threshold; a zero or negative baseline skips the check
/// entirely.
fn check_spike(
    record: &mut EntityRecord,
    cfg: &TelemetryConfig,
    log: &mut AlertLog,
    now: TimestampMs,
) {
    let history = record.history();
    if history.len() < 2 {
        return;
    }
    let current = record.current_kb;
    let previous = match history.get(history.len() - 2) {
        Ok(v) => *v,
        Err(_) => return,
    };
    if previous <= 0.0 {
        return;
    }

    let abs_change = current - previous;
    let pct_change = abs_change / previous * 100.0;
    if pct_change > cfg.spike_threshold_pct && abs_change > cfg.spike_min_absolute_kb {
        log.push(AlertRecord {
            timestamp_ms: now,
            entity: record.name().to_string(),
            kind: AlertKind::Spike,
            message: format!(
                "jumped {:+.0} KB ({:+.0}%) in one sample",
                abs_change, pct_change
            ),
        });
    }
}
