//! Pure numeric transforms used by the scorers.
//!
//! Thresholds live here as small tables so each band can be tested on its own.

/// Keyword match ratio bands: (minimum ratio, score). First match wins.
pub const KEYWORD_MATCH_BANDS: &[(f64, f64)] = &[(0.8, 95.0), (0.6, 85.0), (0.4, 75.0), (0.2, 65.0)];
pub const KEYWORD_MATCH_FLOOR: f64 = 50.0;
/// Used when the job description yields no priority keywords.
pub const KEYWORD_MATCH_DEFAULT: f64 = 70.0;

/// Experience difference bands: (maximum |diff| in years, score).
pub const EXPERIENCE_DIFF_BANDS: &[(f64, f64)] = &[(1.0, 95.0), (2.0, 85.0), (3.0, 75.0)];

/// Word-count bands for resume length: (min, max, points).
pub const LENGTH_BANDS: &[(usize, usize, f64)] =
    &[(350, 800, 15.0), (250, 1000, 12.0), (150, 1300, 10.0)];
pub const LENGTH_FALLBACK_POINTS: f64 = 5.0;

/// Bullet marker bands: (minimum markers, points).
pub const BULLET_BANDS: &[(usize, f64)] = &[(6, 10.0), (3, 8.0), (1, 6.0)];
pub const BULLET_FALLBACK_POINTS: f64 = 2.0;

/// Clamp a percentage-like value to [0, 100].
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Raw points as a percentage of the maximum, capped at 100.
pub fn to_percentage(points: f64, max_points: f64) -> f64 {
    if max_points <= 0.0 {
        return 0.0;
    }
    clamp_percent(points / max_points * 100.0)
}

/// Realistic-distribution curve applied to every axis.
///
/// 0 maps to 15 and nothing exceeds 92.
pub fn apply_curve(score: f64) -> f64 {
    if score >= 85.0 {
        (score * 0.92 + 8.0).min(92.0)
    } else if score >= 60.0 {
        score * 0.95 + 5.0
    } else {
        score * 0.85 + 15.0
    }
}

/// Step function over the fraction of priority keywords found.
pub fn keyword_band(match_ratio: f64) -> f64 {
    KEYWORD_MATCH_BANDS
        .iter()
        .find(|(min_ratio, _)| match_ratio >= *min_ratio)
        .map(|(_, score)| *score)
        .unwrap_or(KEYWORD_MATCH_FLOOR)
}

/// Score for the gap between the resume's years and the job's average.
pub fn experience_diff_band(diff: f64) -> f64 {
    EXPERIENCE_DIFF_BANDS
        .iter()
        .find(|(max_diff, _)| diff <= *max_diff)
        .map(|(_, score)| *score)
        .unwrap_or_else(|| (75.0 - diff * 5.0).max(50.0))
}

pub fn length_points(word_count: usize) -> f64 {
    LENGTH_BANDS
        .iter()
        .find(|(min, max, _)| (*min..=*max).contains(&word_count))
        .map(|(_, _, points)| *points)
        .unwrap_or(LENGTH_FALLBACK_POINTS)
}

pub fn bullet_points(bullet_count: usize) -> f64 {
    BULLET_BANDS
        .iter()
        .find(|(min, _)| bullet_count >= *min)
        .map(|(_, points)| *points)
        .unwrap_or(BULLET_FALLBACK_POINTS)
}

/// Round the exact binary value to one decimal place, ties to even.
///
/// Formatting rounds the exact value, so `78.25` becomes `78.2` and
/// `26.049999999999997` stays below the tie.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Coerce an external numeric field. Empty, malformed, or non-finite input is 0.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Coerce an external count field. Fractions truncate, anything unusable is 0.
pub fn coerce_count(raw: &str) -> u32 {
    let value = coerce_number(raw);
    if value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

/// Numbers rendered the way feedback messages show them: `3.0`, `4.5`.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
