use alloc::{string::String, vec::Vec};
use core::{
    fmt::{self, Display},
    num::NonZeroI64,
    str::FromStr,
};
use serde::{Deserialize, Serialize, Serializer};

/// How hard a question is meant to be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses the exact (case-sensitive) label of a difficulty.
    pub fn parse(text: &str) -> Option<Self> {
        Some(match text {
            "Easy" => Self::Easy,
            "Medium" => Self::Medium,
            "Hard" => Self::Hard,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// The kind of response a question expects. Only [`Kind::OpenEnded`] and [`Kind::MultipleChoice`]
/// are accepted from clients. [`Kind::ShortAnswer`] only ever comes from seed data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    #[default]
    OpenEnded,
    MultipleChoice,
    ShortAnswer,
}

impl Kind {
    pub fn parse(text: &str) -> Option<Self> {
        Some(match text {
            "open-ended" => Self::OpenEnded,
            "multiple-choice" => Self::MultipleChoice,
            "short-answer" => Self::ShortAnswer,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenEnded => "open-ended",
            Self::MultipleChoice => "multiple-choice",
            Self::ShortAnswer => "short-answer",
        }
    }
}

/// Storage-assigned key of a question. Its textual form is the decimal number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(pub NonZeroI64);

impl QuestionId {
    pub const fn get(self) -> i64 {
        self.0.get()
    }
}

impl FromStr for QuestionId {
    type Err = core::num::ParseIntError;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.parse().map(Self)
    }
}

impl Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A question that has passed validation (or was seeded).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Prompt shown to the candidate.
    pub question: String,
    /// The canonical answer.
    pub answer: String,
    /// Free-text label used for filtering.
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(rename = "type", default)]
    pub kind: Kind,
    /// Choices for multiple-choice questions, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// A stored question along with its key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: QuestionId,
    #[serde(flatten)]
    pub question: Question,
}

/// Acceptable schema for new questions. Nothing here is trusted until
/// [`validate`](crate::validate) turns it into a [`Question`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub options: Vec<String>,
}

impl From<Question> for Draft {
    fn from(Question { question, answer, category, difficulty, kind, options }: Question) -> Self {
        Self {
            question,
            answer,
            category,
            difficulty: difficulty.as_str().into(),
            kind: kind.as_str().into(),
            options,
        }
    }
}
