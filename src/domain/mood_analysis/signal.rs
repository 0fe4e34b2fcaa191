use crate::domain::mood_record::entity::mood_record;
use crate::utils::error::AppError;

/// 분석 대상 감정 신호
///
/// 저장된 감정 기록에서 프롬프트 생성에 필요한 값만 추린 불변 값입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodSignal {
    pub record_id: i64,
    pub owner_id: Option<String>,
    pub emoji_label: String,
    /// 항상 0 ~ 10
    intensity: u8,
    pub note: Option<String>,
}

impl MoodSignal {
    pub const MAX_INTENSITY: u8 = 10;

    pub fn new(
        record_id: i64,
        owner_id: Option<String>,
        emoji_label: impl Into<String>,
        intensity: u8,
        note: Option<String>,
    ) -> Result<Self, AppError> {
        if intensity > Self::MAX_INTENSITY {
            return Err(AppError::ValidationError(format!(
                "감정 강도는 0 이상 10 이하여야 합니다. 입력값: {}",
                intensity
            )));
        }

        Ok(Self {
            record_id,
            owner_id,
            emoji_label: emoji_label.into(),
            intensity,
            note,
        })
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }
}

impl TryFrom<&mood_record::Model> for MoodSignal {
    type Error = AppError;

    fn try_from(record: &mood_record::Model) -> Result<Self, Self::Error> {
        let intensity = u8::try_from(record.intensity).map_err(|_| {
            AppError::ValidationError(format!(
                "감정 강도는 0 이상 10 이하여야 합니다. 입력값: {}",
                record.intensity
            ))
        })?;

        Self::new(
            record.id,
            record.owner_id().map(str::to_string),
            record.mood_emoji.clone(),
            intensity,
            record.mood_text.clone(),
        )
    }
}
