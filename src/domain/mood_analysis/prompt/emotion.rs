/// 감정 레이블 → 이모지
pub fn glyph(label: &str) -> Option<&'static str> {
    let glyph = match label {
        "happy" => "😊",
        "excited" => "😄",
        "thrilled" => "😍",
        "love" => "🥰",
        "confident" => "😎",
        "calm" => "😌",
        "numb" => "😐",
        "tired" => "😴",
        "gloomy" => "😔",
        "sad" => "😢",
        "tearful" => "😭",
        "annoyed" => "😤",
        "angry" => "😡",
        "anxious" => "😰",
        "scared" => "😨",
        _ => return None,
    };
    Some(glyph)
}

/// 감정 레이블 → 한국어 이름
pub fn localized_name(label: &str) -> Option<&'static str> {
    let name = match label {
        "happy" => "기쁨",
        "excited" => "신남",
        "thrilled" => "설렘",
        "love" => "사랑",
        "confident" => "자신감",
        "calm" => "평온",
        "numb" => "무감각",
        "tired" => "피곤",
        "gloomy" => "우울",
        "sad" => "슬픔",
        "tearful" => "눈물",
        "annoyed" => "짜증",
        "angry" => "분노",
        "anxious" => "불안",
        "scared" => "두려움",
        _ => return None,
    };
    Some(name)
}

/// 프롬프트에 들어갈 감정 표기 (예: `😰 불안(anxious)`)
///
/// 모르는 레이블은 이모지 없이 원래 레이블 그대로 사용합니다.
pub fn emotion_context(label: &str) -> String {
    match (glyph(label), localized_name(label)) {
        (Some(glyph), Some(name)) => format!("{} {}({})", glyph, name, label),
        (None, Some(name)) => format!("{}({})", name, label),
        (Some(glyph), None) => format!("{} {}", glyph, label),
        (None, None) => label.to_string(),
    }
}
