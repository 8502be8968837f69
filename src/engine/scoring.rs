use crate::engine::difficulty::Difficulty;

/// Points for a correct answer that brings the streak to `streak`.
pub fn points_for(streak: u32, difficulty: Difficulty) -> u64 {
    (streak as u64 * 10).min(difficulty.point_cap())
}

/// Short human form of a point total: 999, 1.2K, 3M, 4.5B, 1T.
pub fn format_compact(points: u64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    for (scale, suffix) in UNITS {
        if points >= scale {
            let value = format!("{:.1}", points as f64 / scale as f64);
            let value = value.strip_suffix(".0").unwrap_or(&value);
            return format!("{value}{suffix}");
        }
    }
    points.to_string()
}
