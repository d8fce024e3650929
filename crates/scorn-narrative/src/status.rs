//! Banded vitals and the one-line status header.

/// Vitality band: fading, worn, strained or steady.
pub const fn vitality_band(vitality: i32) -> &'static str {
    match vitality {
        i32::MIN..20 => "fading",
        20..40 => "worn",
        40..65 => "strained",
        _ => "steady",
    }
}

/// Hunger band: quiet, present, sharp or gnawing.
pub const fn hunger_band(hunger: i32) -> &'static str {
    match hunger {
        i32::MIN..35 => "quiet",
        35..55 => "present",
        55..75 => "sharp",
        _ => "gnawing",
    }
}

/// Thirst band: quiet, dry, parched or burning.
pub const fn thirst_band(thirst: i32) -> &'static str {
    match thirst {
        i32::MIN..35 => "quiet",
        35..55 => "dry",
        55..75 => "parched",
        _ => "burning",
    }
}

/// Legitimacy band: shunned, uncertain, known or trusted.
pub const fn legitimacy_band(legitimacy: i32) -> &'static str {
    match legitimacy {
        i32::MIN..25 => "shunned",
        25..45 => "uncertain",
        45..70 => "known",
        _ => "trusted",
    }
}

/// `Condition: .. Hunger: .. Thirst: .. Legitimacy: ..`, fields separated
/// by two spaces.
pub fn status_header(vitality: i32, hunger: i32, thirst: i32, legitimacy: i32) -> String {
    format!(
        "Condition: {}  Hunger: {}  Thirst: {}  Legitimacy: {}",
        vitality_band(vitality),
        hunger_band(hunger),
        thirst_band(thirst),
        legitimacy_band(legitimacy),
    )
}
