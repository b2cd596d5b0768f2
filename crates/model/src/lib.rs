#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod grade;
pub mod question;
pub mod validate;

pub use grade::{grade, Submission, Verdict};
pub use question::{Difficulty, Draft, Entry, Kind, Question, QuestionId};
pub use validate::{validate, Rejection};
