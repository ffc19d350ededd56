//! Uplink payload interpretation. Two formats are in the field: the current
//! one is a bare decimal with one fractional digit (`18.6`, optionally with a
//! trailing `cm`), the legacy one is `WATER_CM:<v>;STATUS:<s>;MID:<id>`.
//! A payload that parses as neither is recorded with a `parse_error` status;
//! it is application data, not a protocol failure.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPayload {
    /// Water level in centimeters, as received (string form preserved).
    pub water_cm: Option<String>,
    pub status: String,
}

pub fn parse_payload(raw: &str) -> ParsedPayload {
    let s = raw.trim();

    if let Some(rest) = s.strip_prefix("WATER_CM:").or_else(|| {
        s.find("WATER_CM:")
            .map(|i| &s[i + "WATER_CM:".len()..])
    }) {
        // Legacy keyed format.
        let value = rest.split(';').next().unwrap_or("").trim().to_string();
        let status = s
            .find("STATUS:")
            .map(|i| {
                s[i + "STATUS:".len()..]
                    .split(';')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string()
            })
            .unwrap_or_default();
        if value.is_empty() {
            return ParsedPayload {
                water_cm: None,
                status: "parse_error".into(),
            };
        }
        return ParsedPayload {
            water_cm: Some(value),
            status: if status.is_empty() { "-".into() } else { status },
        };
    }

    // Numeric-only path, optional `cm` suffix.
    let s = s.strip_suffix("cm").map(str::trim).unwrap_or(s);
    if is_decimal(s) {
        ParsedPayload {
            water_cm: Some(s.to_string()),
            status: "-".into(),
        }
    } else {
        ParsedPayload {
            water_cm: None,
            status: "parse_error".into(),
        }
    }
}

/// Optional sign, digits, at most one dot.
fn is_decimal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    if body.is_empty() {
        return false;
    }
    let mut dot_seen = false;
    for c in body.chars() {
        match c {
            '.' if !dot_seen => dot_seen = true,
            '0'..='9' => {}
            _ => return false,
        }
    }
    true
}

/// Compact age rendering for logs: `18s`, `3m 2s`, `2h 5m`.
pub fn fmt_age(elapsed: Duration) -> String {
    let s = elapsed.as_secs();
    if s < 60 {
        return format!("{s}s");
    }
    let (m, s) = (s / 60, s % 60);
    if m < 60 {
        return if s > 0 {
            format!("{m}m {s}s")
        } else {
            format!("{m}m")
        };
    }
    let (h, m) = (m / 60, m % 60);
    if m > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{h}h")
    }
}
