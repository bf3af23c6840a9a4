//! # Canonical payload fixtures
//!
//! A single deterministic POS/IoT log generator shared by tests and the
//! channel-simulation harness, replacing what were two near-identical
//! generators upstream (§9: consolidation, not a semantic change).

/// Render one log entry as pipe-delimited `key=value` pairs, preserving
/// insertion order.
fn format_entry(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Deterministic six-entry POS/IoT-style log payload used by scenario E5 and
/// the channel-simulation harness.
pub fn sample_pos_log() -> Vec<u8> {
    let entries: Vec<Vec<(&str, &str)>> = vec![
        vec![
            ("terminal", "TB-POS-01"),
            ("event", "sale_approved"),
            ("amount", "23.75"),
            ("currency", "USD"),
            ("method", "tap"),
            ("latency_ms", "412"),
        ],
        vec![
            ("terminal", "TB-POS-01"),
            ("event", "inventory_sync"),
            ("status", "ok"),
            ("duration_ms", "128"),
        ],
        vec![
            ("gateway", "strata-edge"),
            ("event", "burst_monitor"),
            ("window", "60s"),
            ("drops_detected", "0"),
        ],
        vec![
            ("terminal", "TB-POS-02"),
            ("event", "sale_declined"),
            ("amount", "109.99"),
            ("currency", "USD"),
            ("method", "chip"),
            ("reason", "issuer_declined"),
        ],
        vec![
            ("gateway", "strata-edge"),
            ("event", "latency_sample"),
            ("p95_ms", "537"),
            ("p99_ms", "804"),
        ],
        vec![
            ("terminal", "TB-POS-03"),
            ("event", "firmware_status"),
            ("version", "2.4.7"),
            ("uptime_hours", "132"),
            ("battery_percent", "88"),
        ],
    ];

    let header = format_entry(&[
        ("log_format", "json_lines"),
        ("source", "fountain_demo"),
        ("total_entries", &entries.len().to_string()),
    ]);

    let mut lines = vec![header];
    lines.extend(entries.iter().map(|e| format_entry(e)));
    lines.join("\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_pos_log_has_six_entries_plus_header() {
        let text = String::from_utf8(sample_pos_log()).unwrap();
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("log_format=json_lines"));
    }

    #[test]
    fn sample_pos_log_is_deterministic() {
        assert_eq!(sample_pos_log(), sample_pos_log());
    }
}
