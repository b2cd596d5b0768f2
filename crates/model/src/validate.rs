use crate::question::{Difficulty, Draft, Kind, Question};
use core::fmt::{self, Display};

/// Reasons for refusing a [`Draft`]. Only the first failing rule is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    EmptyQuestionText,
    EmptyCategory,
    EmptyAnswer,
    InvalidType,
    TooFewOptions,
    AnswerNotInOptions,
    InvalidDifficulty,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyQuestionText => "Question field is required.",
            Self::EmptyCategory => "Category field is required.",
            Self::EmptyAnswer => "Answer field is required.",
            Self::InvalidType => "Type must be either 'open-ended' or 'multiple-choice'.",
            Self::TooFewOptions => "Multiple choice questions must have at least 2 options.",
            Self::AnswerNotInOptions => "Answer must be one of the provided options.",
            Self::InvalidDifficulty => "Difficulty must be one of Easy, Medium, or Hard.",
        })
    }
}

/// Checks a candidate question and normalizes it into a [`Question`]. Text fields are kept
/// exactly as submitted; only an empty difficulty is defaulted to [`Difficulty::Easy`].
pub fn validate(draft: Draft) -> Result<Question, Rejection> {
    let Draft { question, answer, category, difficulty, kind, options } = draft;

    if question.trim().is_empty() {
        return Err(Rejection::EmptyQuestionText);
    }

    if category.trim().is_empty() {
        return Err(Rejection::EmptyCategory);
    }

    let expected = answer.trim();
    if expected.is_empty() {
        return Err(Rejection::EmptyAnswer);
    }

    // Seeded `short-answer` questions are data only. Clients may not create them.
    let kind = match kind.as_str() {
        "open-ended" => Kind::OpenEnded,
        "multiple-choice" => Kind::MultipleChoice,
        _ => return Err(Rejection::InvalidType),
    };

    if kind == Kind::MultipleChoice {
        if options.len() < 2 {
            return Err(Rejection::TooFewOptions);
        }
        if !options.iter().any(|option| option.trim() == expected) {
            return Err(Rejection::AnswerNotInOptions);
        }
    }

    let difficulty = if difficulty.is_empty() {
        Difficulty::default()
    } else {
        Difficulty::parse(&difficulty).ok_or(Rejection::InvalidDifficulty)?
    };

    Ok(Question { question, answer, category, difficulty, kind, options })
}
