const UNIT_PREFIXES: [char; 6] = ['k', 'M', 'G', 'T', 'P', 'E'];

/// Renders a byte count with decimal (base-1000) units, e.g. `1500000` -> `"1.5 MB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1000;
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!(
        "{:.1} {}B",
        bytes as f64 / div as f64,
        UNIT_PREFIXES[exp]
    )
}
