const MIB_PER_MB: f64 = 0.953_674_316_406_25;

/// Converts decimal megabytes to whole mebibytes, rounding down.
pub fn mib_from_mb(mb: u64) -> u64 {
    (mb as f64 * MIB_PER_MB).floor() as u64
}

/// Renders a byte count using decimal units, picking the largest unit whose
/// one-decimal value is not `0.0`.
pub fn bytes_to_human_readable(size: u64) -> String {
    const UNITS: [(&str, f64); 4] = [
        ("TB", 1e12),
        ("GB", 1e9),
        ("MB", 1e6),
        ("KB", 1e3),
    ];

    let bytes = size as f64;
    for (unit, divisor) in UNITS {
        let scaled = format!("{:.1}", bytes / divisor);
        if scaled != "0.0" {
            return format!("{} {}", scaled, unit);
        }
    }

    format!("{} Bytes", size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mib_from_mb() {
        assert_eq!(mib_from_mb(1000), 953);
        assert_eq!(mib_from_mb(10000), 9536);
        assert_eq!(mib_from_mb(100000), 95367);
        assert_eq!(mib_from_mb(0), 0);
    }

    #[test]
    fn test_bytes_to_human_readable() {
        assert_eq!(bytes_to_human_readable(21474836480), "21.5 GB");
        assert_eq!(bytes_to_human_readable(0), "0 Bytes");
        assert_eq!(bytes_to_human_readable(40), "40 Bytes");
        assert_eq!(bytes_to_human_readable(1500), "1.5 KB");
        assert_eq!(bytes_to_human_readable(1_048_576), "1.0 MB");
        assert_eq!(bytes_to_human_readable(2_500_000_000_000), "2.5 TB");
    }
}
