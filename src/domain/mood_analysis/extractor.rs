//! LLM 응답에서 `analysis_text`를 뽑아내는 추출기
//!
//! 모델이 JSON 계약을 어겨도(토큰 한도로 잘림, 코드 블록, 이중 인코딩 등)
//! 쓸 수 있는 텍스트를 최대한 건져냅니다. 전략은 가장 엄격한 것부터 순서대로 시도하고,
//! 처음 성공한 결과를 사용합니다.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// 저장/응답에 사용하는 분석 텍스트 최대 글자 수
pub const MAX_ANALYSIS_CHARS: usize = 1500;

const FIELD: &str = "analysis_text";

/// 닫는 따옴표까지 있는 정상 값
static QUOTED_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"analysis_text"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});

/// 닫는 따옴표 없이 끝난 값 (출력이 잘린 경우)
static UNTERMINATED_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"analysis_text"\s*:\s*"((?:[^"\\]|\\.)*)"#).expect("valid regex")
});

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```[A-Za-z0-9_-]*\s*").expect("valid regex"));

static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```\s*$").expect("valid regex"));

/// 추출 전략 (선언 순서 = 시도 순서)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `"analysis_text": "..."` 정규식 매칭
    QuotedField,
    /// 닫는 따옴표 없는 값까지 허용
    UnterminatedField,
    /// 코드 블록 제거 후 전체 JSON 파싱
    FencedJson,
    /// 원본 텍스트 그대로 (길이 제한만 적용)
    RawFallback,
}

impl Strategy {
    pub const ORDER: [Strategy; 4] = [
        Strategy::QuotedField,
        Strategy::UnterminatedField,
        Strategy::FencedJson,
        Strategy::RawFallback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::QuotedField => "quoted_field",
            Strategy::UnterminatedField => "unterminated_field",
            Strategy::FencedJson => "fenced_json",
            Strategy::RawFallback => "raw_fallback",
        }
    }

    pub fn apply(self, raw: &str) -> Option<String> {
        match self {
            Strategy::QuotedField => quoted_field(raw),
            Strategy::UnterminatedField => unterminated_field(raw),
            Strategy::FencedJson => fenced_json(raw),
            Strategy::RawFallback => raw_fallback(raw),
        }
    }
}

/// 추출 결과와 성공한 전략
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub strategy: Strategy,
}

/// 원본 응답에서 분석 텍스트를 추출합니다.
///
/// 입력이 비어 있거나 공백뿐일 때만 `None`입니다. 구조화된 추출이 모두 실패하면
/// 원본 텍스트를 길이 제한만 적용해 돌려주므로, 스키마 준수가 필요한 호출자는 다시 검증해야 합니다.
pub fn extract(raw: &str) -> Option<String> {
    extract_with_strategy(raw).map(|extraction| extraction.text)
}

pub fn extract_with_strategy(raw: &str) -> Option<Extraction> {
    if raw.trim().is_empty() {
        return None;
    }

    Strategy::ORDER.into_iter().find_map(|strategy| {
        strategy
            .apply(raw)
            .map(|text| Extraction { text, strategy })
    })
}

pub fn quoted_field(raw: &str) -> Option<String> {
    let captured = QUOTED_FIELD.captures(raw)?.get(1)?.as_str();
    finish(unescape(captured))
}

pub fn unterminated_field(raw: &str) -> Option<String> {
    let captured = UNTERMINATED_FIELD.captures(raw)?.get(1)?.as_str();
    finish(unescape(captured))
}

pub fn fenced_json(raw: &str) -> Option<String> {
    let without_leading = LEADING_FENCE.replace(raw, "");
    let cleaned = TRAILING_FENCE.replace(&without_leading, "");

    let value: Value = serde_json::from_str(cleaned.trim()).ok()?;
    let text = value
        .get(FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    finish(text)
}

pub fn raw_fallback(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(truncate(raw))
}

/// 이중 인코딩 해제 → 길이 제한 → 공백 검사
fn finish(text: String) -> Option<String> {
    let text = truncate(&unwrap_nested(text));
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// 값 자체가 `{"analysis_text": ...}` JSON이면 안쪽 값을 꺼낸다
fn unwrap_nested(text: String) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return text;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(inner) => match inner.get(FIELD).and_then(Value::as_str) {
            Some(inner_text) => inner_text.to_string(),
            None => text,
        },
        Err(_) => text,
    }
}

/// 캡처된 JSON 문자열 본문을 해제한다.
///
/// 온전한 JSON 문자열이면 serde_json으로 디코딩하고, 그렇지 않으면
/// (잘린 이스케이프, 날것의 줄바꿈 등) `\n`, `\"`, `\\`만 직접 해제한다.
fn unescape(captured: &str) -> String {
    if let Ok(decoded) = serde_json::from_str::<String>(&format!("\"{}\"", captured)) {
        return decoded;
    }

    let mut out = String::with_capacity(captured.len());
    let mut chars = captured.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// 글자(char) 단위 길이 제한
fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_ANALYSIS_CHARS) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_extract_well_formed_json() {
        let raw = r#"{"analysis_text": "😊 오늘 정말 멋졌어요."}"#;

        assert_eq!(extract(raw).as_deref(), Some("😊 오늘 정말 멋졌어요."));
    }

    #[test]
    fn should_unescape_newline_quote_and_backslash() {
        let raw = r#"{"analysis_text": "첫 문단\n\n둘째 \"문단\" C:\\temp"}"#;

        let text = extract(raw).unwrap();

        assert_eq!(text, "첫 문단\n\n둘째 \"문단\" C:\\temp");
    }

    #[test]
    fn should_recover_truncated_value_without_closing_quote() {
        let raw = r#"{"analysis_text": "Hello world"#;

        let extraction = extract_with_strategy(raw).unwrap();

        assert_eq!(extraction.text, "Hello world");
        assert_eq!(extraction.strategy, Strategy::UnterminatedField);
    }

    #[test]
    fn should_unescape_truncated_value_with_raw_newlines() {
        let raw = "{\"analysis_text\": \"🌱 첫 문단\\n\n🔍 둘째 \\\"문단";

        let text = unterminated_field(raw).unwrap();

        assert_eq!(text, "🌱 첫 문단\n\n🔍 둘째 \"문단");
    }

    #[test]
    fn should_extract_from_code_fence() {
        let raw = "```json\n{\"analysis_text\": \"ok\"}\n```";

        assert_eq!(extract(raw).as_deref(), Some("ok"));
    }

    #[test]
    fn should_parse_fenced_json_directly() {
        let tagged = "```json\n{\"analysis_text\": \"ok\"}\n```";
        let untagged = "```\n{\"analysis_text\": \"ok\"}\n```  ";

        assert_eq!(fenced_json(tagged).as_deref(), Some("ok"));
        assert_eq!(fenced_json(untagged).as_deref(), Some("ok"));
    }

    #[test]
    fn should_unwrap_double_encoded_json() {
        let raw = r#"{"analysis_text": "{\"analysis_text\": \"inner\"}"}"#;

        assert_eq!(extract(raw).as_deref(), Some("inner"));
        assert_eq!(fenced_json(raw).as_deref(), Some("inner"));
    }

    #[test]
    fn should_keep_outer_value_when_nested_json_is_invalid() {
        let raw = r#"{"analysis_text": "{not really json"}"#;

        assert_eq!(fenced_json(raw).as_deref(), Some("{not really json"));
    }

    #[test]
    fn should_return_none_for_empty_input() {
        assert_eq!(extract(""), None);
        assert_eq!(extract("  \n\t "), None);
    }

    #[test]
    fn should_fall_back_to_raw_text_for_garbage() {
        let extraction = extract_with_strategy("not json at all").unwrap();

        assert_eq!(extraction.text, "not json at all");
        assert_eq!(extraction.strategy, Strategy::RawFallback);
    }

    #[test]
    fn should_prefer_quoted_field_over_trailing_garbage() {
        let raw = r#"{"analysis_text": "quoted value"} 그리고 덧붙인 설명 }}} ```"#;

        let extraction = extract_with_strategy(raw).unwrap();

        assert_eq!(extraction.text, "quoted value");
        assert_eq!(extraction.strategy, Strategy::QuotedField);
    }

    #[test]
    fn should_ignore_surrounding_prose() {
        let raw = "다음은 분석입니다:\n{\"analysis_text\": \"본문\"}\n감사합니다.";

        assert_eq!(extract(raw).as_deref(), Some("본문"));
    }

    #[test]
    fn should_fall_through_blank_field_to_raw_fallback() {
        let raw = r#"{"analysis_text": "   "}"#;

        assert_eq!(quoted_field(raw), None);
        assert_eq!(unterminated_field(raw), None);
        assert_eq!(fenced_json(raw), None);

        let extraction = extract_with_strategy(raw).unwrap();
        assert_eq!(extraction.strategy, Strategy::RawFallback);
        assert_eq!(extraction.text, raw);
    }

    #[test]
    fn should_fail_fenced_json_when_field_missing() {
        assert_eq!(fenced_json(r#"{"other": "value"}"#), None);
        assert_eq!(fenced_json("[1, 2, 3]"), None);
    }

    #[test]
    fn should_cap_extracted_value_at_max_chars() {
        let long = "가".repeat(MAX_ANALYSIS_CHARS + 300);
        let raw = format!(r#"{{"analysis_text": "{}"}}"#, long);

        let text = extract(&raw).unwrap();

        assert_eq!(text.chars().count(), MAX_ANALYSIS_CHARS);
    }

    #[test]
    fn should_cap_raw_fallback_at_max_chars() {
        let raw = "x".repeat(MAX_ANALYSIS_CHARS * 2);

        let text = extract(&raw).unwrap();

        assert_eq!(text.chars().count(), MAX_ANALYSIS_CHARS);
    }

    #[test]
    fn should_be_idempotent() {
        let inputs = [
            r#"{"analysis_text": "a\nb"}"#,
            r#"{"analysis_text": "cut off"#,
            "```json\n{\"analysis_text\": \"ok\"}\n```",
            "plain text",
            "",
        ];

        for raw in inputs {
            assert_eq!(extract(raw), extract(raw));
        }
    }

    #[test]
    fn should_try_strategies_in_declared_order() {
        assert_eq!(
            Strategy::ORDER,
            [
                Strategy::QuotedField,
                Strategy::UnterminatedField,
                Strategy::FencedJson,
                Strategy::RawFallback,
            ]
        );
        assert_eq!(Strategy::FencedJson.name(), "fenced_json");
    }
}
