/// Normalize a raw rating to the integer scale: round half away from zero,
/// then clamp into [1, 5].
pub fn normalize_score(raw: f64) -> i64 {
    (raw.round() as i64).clamp(1, 5)
}
