use crate::question::{Kind, Question};
use alloc::string::String;
use serde::{Deserialize, Serialize};

pub const CORRECT: &str = "Correct!";
pub const INCORRECT: &str = "Incorrect. Please review the correct answer.";

/// An answer submitted for a stored question.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Submission {
    /// Textual [`QuestionId`](crate::QuestionId) of the question being answered.
    pub question_id: String,
    pub answer: String,
    /// Echoed by some clients. Grading always goes by the stored question instead.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Outcome of grading a single [`Submission`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub correct: bool,
    /// The canonical answer, echoed whether or not the submission was correct.
    pub correct_answer: String,
    pub explanation: &'static str,
    pub score: u8,
}

fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars().flat_map(char::to_lowercase).eq(right.chars().flat_map(char::to_lowercase))
}

/// Lenient keyword match: either text containing the other (ignoring case) counts.
fn contains_keywords(submitted: &str, canonical: &str) -> bool {
    let submitted = submitted.trim().to_lowercase();
    let canonical = canonical.to_lowercase();
    submitted.contains(&canonical) || canonical.contains(&submitted)
}

/// Grades `submission` against the canonical answer of `question`.
pub fn grade(question: &Question, submission: &Submission) -> Verdict {
    let correct = match question.kind {
        Kind::MultipleChoice => eq_ignore_case(submission.answer.trim(), question.answer.trim()),
        Kind::OpenEnded | Kind::ShortAnswer => contains_keywords(&submission.answer, &question.answer),
    };

    let (explanation, score) = if correct { (CORRECT, 1) } else { (INCORRECT, 0) };
    Verdict { correct, correct_answer: question.answer.clone(), explanation, score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Difficulty;

    fn question(kind: Kind, answer: &str) -> Question {
        Question {
            question: "Which component runs the controllers?".into(),
            answer: answer.into(),
            category: "Architecture".into(),
            difficulty: Difficulty::Easy,
            kind,
            options: Vec::new(),
        }
    }

    fn submit(answer: &str) -> Submission {
        Submission { question_id: "1".into(), answer: answer.into(), kind: None }
    }

    #[test]
    fn open_ended_accepts_trimmed_case_insensitive_match() {
        let verdict = grade(&question(Kind::OpenEnded, "Pod"), &submit("pod "));
        assert!(verdict.correct);
        assert_eq!(verdict.score, 1);
        assert_eq!(verdict.explanation, CORRECT);
    }

    #[test]
    fn open_ended_accepts_containment_in_either_direction() {
        let canonical = question(Kind::OpenEnded, "Controller Manager");
        assert!(grade(&canonical, &submit("the controller manager")).correct);
        assert!(grade(&canonical, &submit("controller")).correct);
        assert!(!grade(&canonical, &submit("scheduler")).correct);
    }

    #[test]
    fn short_answer_grades_like_open_ended() {
        let canonical = question(Kind::ShortAnswer, "kube-proxy");
        assert!(grade(&canonical, &submit("It is KUBE-PROXY")).correct);
        assert!(!grade(&canonical, &submit("kubelet")).correct);
    }

    #[test]
    fn multiple_choice_requires_whole_answer() {
        let canonical = question(Kind::MultipleChoice, "Pod");
        assert!(grade(&canonical, &submit("pod")).correct);
        assert!(grade(&canonical, &submit("  POD\n")).correct);
        assert!(!grade(&canonical, &submit("Po")).correct);
        assert!(!grade(&canonical, &submit("A Pod")).correct);
    }

    #[test]
    fn incorrect_answers_still_echo_canonical() {
        let verdict = grade(&question(Kind::MultipleChoice, "Pod"), &submit("Container"));
        assert_eq!(
            verdict,
            Verdict { correct: false, correct_answer: "Pod".into(), explanation: INCORRECT, score: 0 }
        );
    }

    #[test]
    fn echoed_type_is_ignored() {
        let canonical = question(Kind::MultipleChoice, "Pod");
        let submission = Submission { kind: Some("open-ended".into()), ..submit("A Pod") };
        assert!(!grade(&canonical, &submission).correct);
    }
}
