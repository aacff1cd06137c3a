//! Attempt scoring, kept separate from the persistence layer so it can be
//! exercised without a database.

use std::collections::HashSet;

/// One question's worth of scoring input: what the user selected and what
/// the correct set is.
pub struct AnswerSheet {
    pub answer_id: i64,
    pub question_id: i64,
    pub question_text: String,
    pub selected: HashSet<i64>,
    pub correct: HashSet<i64>,
}

pub struct QuestionResult {
    pub answer_id: i64,
    pub question_id: i64,
    pub question_text: String,
    pub is_correct: bool,
}

pub struct ScoreSummary {
    pub score: i64,
    pub passed: bool,
    pub correct_count: usize,
    pub total_questions: usize,
    pub breakdown: Vec<QuestionResult>,
}

/// Exact-set-match correctness: an answer is correct only when its selected
/// option set equals the correct option set. Missing one correct option or
/// including one incorrect option both count as wrong; there is no partial
/// credit for multiple-answer questions.
pub fn breakdown(sheets: &[AnswerSheet]) -> Vec<QuestionResult> {
    sheets
        .iter()
        .map(|sheet| QuestionResult {
            answer_id: sheet.answer_id,
            question_id: sheet.question_id,
            question_text: sheet.question_text.clone(),
            is_correct: sheet.selected == sheet.correct,
        })
        .collect()
}

/// Score the whole attempt: `round(100 * correct / total)` against the
/// passing threshold.
pub fn evaluate(sheets: &[AnswerSheet], passing_score: i64) -> ScoreSummary {
    let breakdown = breakdown(sheets);
    let correct_count = breakdown.iter().filter(|r| r.is_correct).count();
    let total_questions = sheets.len();

    let score = if total_questions == 0 {
        0
    } else {
        (correct_count as f64 * 100.0 / total_questions as f64).round() as i64
    };

    ScoreSummary {
        score,
        passed: score >= passing_score,
        correct_count,
        total_questions,
        breakdown,
    }
}
