/// 감정 강도 구간별 톤
///
/// `[0,4]` 공감, `[5,6]` 중립, `[7,10]` 긍정. 세 구간은 0~10을 빈틈없이 나눕니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneBand {
    /// 7 ~ 10: 긍정/칭찬
    Positive,
    /// 5 ~ 6: 중립/메타인지
    Neutral,
    /// 0 ~ 4: 공감/CBT 재프레이밍
    Empathetic,
}

impl ToneBand {
    pub fn from_intensity(intensity: u8) -> Self {
        if intensity >= 7 {
            ToneBand::Positive
        } else if intensity <= 4 {
            ToneBand::Empathetic
        } else {
            ToneBand::Neutral
        }
    }

    /// 공감 → 재해석 → 구체적 행동 한 가지 순서의 문단별 작성 지침
    pub(super) fn directives(self, emotion: &str, intensity: u8, note: &str) -> [String; 3] {
        match self {
            ToneBand::Positive => [
                format!(
                    "'{emotion}' 감정과 {intensity}점이라는 높은 강도를 직접 언급하며, \
                     메모 내용({note})이 구체적으로 반영된 공감 표현으로 시작하세요."
                ),
                "이 긍정 에너지가 오늘 어떤 구체적인 상황에 도움이 될 수 있는지 실질적으로 제안하세요. \
                 막연한 칭찬이 아닌, 행동과 연결된 구체적 예시를 포함하세요."
                    .to_string(),
                "오늘 이 에너지를 유지하기 위해 당장 실천할 수 있는 작은 행동 한 가지를 제안하며 마무리하세요."
                    .to_string(),
            ],
            ToneBand::Neutral => [
                format!(
                    "'{emotion}' 감정과 강도 {intensity}점을 직접 언급하며, \
                     메모({note})에 담긴 감정을 알아차리고 기록했다는 것 자체를 따뜻하게 인정하세요."
                ),
                "지금처럼 중립적인 상태가 오히려 자신을 돌아볼 좋은 기회임을 설명하고, \
                 에너지를 소모하지 않고 회복할 수 있는 구체적인 방법을 제안하세요."
                    .to_string(),
                "오늘 딱 하나, 가장 쉽게 실천할 수 있는 자기 돌봄 행동을 제안하며 마무리하세요."
                    .to_string(),
            ],
            ToneBand::Empathetic => [
                format!(
                    "'{emotion}' 감정과 강도 {intensity}점, 그리고 메모({note})를 직접 인용하며 \
                     이 감정이 자연스럽고 타당하다는 것을 충분히 공감하세요."
                ),
                "CBT 재프레이밍: 이 감정이 개인의 결함이 아니라 특정 상황에서 생긴 반응임을 구체적으로 설명하고, \
                 자기 비판 대신 어떤 시각으로 볼 수 있는지 실용적으로 제안하세요."
                    .to_string(),
                "지금 당장 할 수 있는 작은 행동(예: 5분 산책, 따뜻한 음료, 깊게 숨 쉬기) 한 가지를 \
                 친근하고 따뜻하게 제안하며 마무리하세요."
                    .to_string(),
            ],
        }
    }
}
