//! Quiz content: one question, its options and the correct answer.

use serde::{Deserialize, Serialize};

use crate::error::QuizDataError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionData {
    pub text: String,
    pub image_src: String,
    pub audio_src: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    pub question: String,
    pub options: Vec<OptionData>,
    /// Narration of the question itself.
    pub audio_src: String,
    pub correct_answer_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl QuestionData {
    pub const DEFAULT_FILE_NAME: &'static str = "quiz.mp4";

    pub fn validate(&self) -> Result<(), QuizDataError> {
        if self.options.is_empty() {
            return Err(QuizDataError::NoOptions);
        }
        if self.correct_answer_index >= self.options.len() {
            return Err(QuizDataError::CorrectIndexOutOfRange {
                index: self.correct_answer_index,
                len: self.options.len(),
            });
        }
        if let Some(name) = &self.file_name {
            let bare = !name.contains('/') && !name.contains('\\');
            let stem = name.strip_suffix(".mp4").unwrap_or_default();
            if !bare || stem.is_empty() {
                return Err(QuizDataError::BadFileName { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Parse and validate a single quiz.
    pub fn from_json_str(s: &str) -> Result<Self, QuizDataError> {
        let data: QuestionData = serde_json::from_str(s).map_err(|e| QuizDataError::Parse {
            reason: e.to_string(),
        })?;
        data.validate()?;
        Ok(data)
    }

    /// Parse and validate a JSON array of quizzes.
    pub fn list_from_json_str(s: &str) -> Result<Vec<Self>, QuizDataError> {
        let list: Vec<QuestionData> = serde_json::from_str(s).map_err(|e| QuizDataError::Parse {
            reason: e.to_string(),
        })?;
        for data in &list {
            data.validate()?;
        }
        Ok(list)
    }

    pub fn correct_option(&self) -> Option<&OptionData> {
        self.options.get(self.correct_answer_index)
    }

    pub fn output_file_name(&self) -> &str {
        self.file_name
            .as_deref()
            .unwrap_or(Self::DEFAULT_FILE_NAME)
    }
}
