//! Human-readable byte counts
//!
//! Binary (1024-based) scaling with two decimal digits, used by the
//! progress meter and anywhere a transfer size faces a human.

/// Render a byte count as `B`, `KB`, `MB`, `GB` or `TB`
pub fn format_bytes(n: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if n < 1024 {
        return format!("{} B", n);
    }

    let mut value = n as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
