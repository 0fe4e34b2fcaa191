//! 감정 분석 프롬프트 모듈
//!
//! 감정 강도에 따라 세 가지 톤(긍정/중립/공감) 중 하나를 골라
//! 사용자 프롬프트를 만들고, 모든 톤에 공통인 시스템 프롬프트를 제공합니다.
//!
//! ## 구조
//! - `emotion`: 감정 레이블 → 이모지/한국어 이름 매핑
//! - `tone`: 강도 구간별 톤 선택과 작성 지침
//! - `system`: 공통 시스템 프롬프트

mod emotion;
mod system;
mod tone;

pub use emotion::{emotion_context, glyph, localized_name};
pub use system::SYSTEM_PROMPT;
pub use tone::ToneBand;

use super::signal::MoodSignal;

/// 메모가 없을 때 프롬프트에 들어가는 문구
pub const NO_NOTE: &str = "별도의 메모 없음";

/// 응답 형식 지시 (모든 톤 공통)
const RESPONSE_FORMAT_DIRECTIVE: &str = "각 문단 앞에 어울리는 이모지를 하나씩 붙이세요. \
반드시 {\"analysis_text\": \"내용\"} 형식의 JSON 객체 하나로만 응답하세요. \
JSON 앞뒤의 설명 문장이나 코드 블록(```)은 절대 포함하지 마세요.";

/// 감정 신호로 사용자 프롬프트를 생성합니다.
pub fn build(signal: &MoodSignal) -> String {
    let note = signal
        .note
        .as_deref()
        .filter(|note| !note.trim().is_empty())
        .unwrap_or(NO_NOTE);

    let emotion = emotion_context(&signal.emoji_label);
    let intensity = signal.intensity();
    let band = ToneBand::from_intensity(intensity);
    let [first, second, third] = band.directives(&emotion, intensity, note);

    format!(
        "[사용자 감정 데이터]\n\
         - 감정: {emotion}\n\
         - 감정 강도: {intensity}점 / 10점\n\
         - 감정 메모: {note}\n\n\
         [작성 지침]\n\
         1문단: {first}\n\
         2문단: {second}\n\
         3문단: {third}\n\
         {RESPONSE_FORMAT_DIRECTIVE}"
    )
}
