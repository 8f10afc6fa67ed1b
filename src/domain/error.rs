// ============================================================
// Layer 3 — Index Errors
// ============================================================
// Failures the index core reports to its callers.
// Direct lookups fail loudly; filters never do.
// File and JSON problems stay in anyhow (Layer 4 / 6).

use thiserror::Error;

use super::QuestionId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("question id {0} is not in the index")]
    UnknownQuestion(QuestionId),

    #[error("question id {0} appears more than once in the source")]
    DuplicateQuestionId(QuestionId),

    #[error("results is not an array of objects")]
    ResultsNotAList,

    #[error("invalid prediction record: {0}")]
    MalformedPrediction(String),

    #[error(
        "results do not correspond to the current VQA set: \
         {missing} question id(s) without a prediction, \
         {extra} prediction(s) for question ids outside the annotation file"
    )]
    CoverageMismatch { missing: usize, extra: usize },

    #[error("predicted answer '{answer}' for question {question_id} is not one of the multiple choices")]
    AnswerNotAChoice { question_id: QuestionId, answer: String },
}
