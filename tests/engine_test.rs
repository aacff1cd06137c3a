mod common;

use std::collections::HashSet;

use common::create_test_db;
use quizcraft::db::{Db, NewOption, NewQuestion, QuestionType, QuizError};

fn single_choice(text: &str, correct: &str, wrong: &[&str]) -> NewQuestion {
    let mut options = vec![NewOption {
        text: correct.to_string(),
        is_correct: true,
    }];
    options.extend(wrong.iter().map(|&w| NewOption {
        text: w.to_string(),
        is_correct: false,
    }));

    NewQuestion {
        text: text.to_string(),
        question_type: QuestionType::Single,
        options,
    }
}

fn multiple_choice(text: &str, options: &[(&str, bool)]) -> NewQuestion {
    NewQuestion {
        text: text.to_string(),
        question_type: QuestionType::Multiple,
        options: options
            .iter()
            .map(|&(t, is_correct)| NewOption {
                text: t.to_string(),
                is_correct,
            })
            .collect(),
    }
}

fn make_questions(n: usize) -> Vec<NewQuestion> {
    (0..n)
        .map(|i| {
            single_choice(
                &format!("Question {}", i + 1),
                &format!("Correct {}", i + 1),
                &[&format!("Wrong {}", i + 1)],
            )
        })
        .collect()
}

async fn seed_user(db: &Db, username: &str) -> i64 {
    db.create_user(username, "correct-horse-battery", "Test User")
        .await
        .unwrap()
}

async fn seed_category(db: &Db, name: &str, questions: Vec<NewQuestion>) -> i64 {
    let category_id = db.create_category(name, "").await.unwrap();
    for question in questions {
        db.create_question(category_id, question).await.unwrap();
    }
    category_id
}

/// Answer every question in the attempt with its full correct option set.
async fn answer_all_correctly(db: &Db, attempt_id: i64) {
    for answer_id in db.answer_ids(attempt_id).await.unwrap() {
        let answer = db.get_answer(answer_id).await.unwrap();
        let correct = db.correct_option_ids(answer.question_id).await.unwrap();
        db.record_selection(answer_id, &correct).await.unwrap();
    }
}

#[tokio::test]
async fn test_db_connection() {
    let db = create_test_db().await;
    assert!(db.migration_applied("V1").await.unwrap());
}

// --- Attempt creation / sampling ---

#[tokio::test]
async fn attempt_samples_at_most_ten_distinct_questions() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "sampler").await;
    let category_id = seed_category(&db, "Big", make_questions(15)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    assert_eq!(attempt.total_questions, 10);
    assert!(attempt.score.is_none());
    assert!(attempt.completed_at.is_none());

    let answer_ids = db.answer_ids(attempt.id).await.unwrap();
    assert_eq!(answer_ids.len(), 10);

    let mut question_ids = HashSet::new();
    for answer_id in answer_ids {
        let answer = db.get_answer(answer_id).await.unwrap();
        assert!(
            question_ids.insert(answer.question_id),
            "duplicate question sampled: {}",
            answer.question_id
        );
    }
}

#[tokio::test]
async fn attempt_uses_whole_pool_when_smaller_than_ten() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "small-pool").await;
    let category_id = seed_category(&db, "Small", make_questions(3)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    assert_eq!(attempt.total_questions, 3);
    assert_eq!(db.answer_ids(attempt.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn placeholder_answers_start_empty_and_unflagged() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "placeholders").await;
    let category_id = seed_category(&db, "Fresh", make_questions(3)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();

    for answer_id in db.answer_ids(attempt.id).await.unwrap() {
        let answer = db.get_answer(answer_id).await.unwrap();
        assert!(!answer.flagged);
        assert!(answer.answered_at.is_none());
        assert!(db.selected_option_ids(answer_id).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn empty_pool_fails_and_creates_nothing() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "empty-pool").await;
    let category_id = seed_category(&db, "Empty", vec![]).await;

    let result = db.create_attempt(user_id, category_id).await;
    assert!(matches!(result, Err(QuizError::EmptyPool)));

    let recent = db.recent_attempts(user_id, 10).await.unwrap();
    assert!(recent.is_empty());
}

#[tokio::test]
async fn category_with_only_deleted_questions_is_an_empty_pool() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "all-deleted").await;
    let category_id = seed_category(&db, "Gone", make_questions(2)).await;

    for question_id in db.active_question_ids(category_id).await.unwrap() {
        db.soft_delete_question(question_id).await.unwrap();
    }

    let result = db.create_attempt(user_id, category_id).await;
    assert!(matches!(result, Err(QuizError::EmptyPool)));
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "no-category").await;

    let result = db.create_attempt(user_id, 9999).await;
    assert!(matches!(result, Err(QuizError::NotFound(_))));
}

// --- Answer recording ---

#[tokio::test]
async fn single_choice_rejects_multiple_selections() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "single").await;
    let category_id =
        seed_category(&db, "Single", vec![single_choice("Q1", "A", &["B", "C"])]).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_id = db.answer_ids(attempt.id).await.unwrap()[0];
    let answer = db.get_answer(answer_id).await.unwrap();
    let options = db.get_options(answer.question_id).await.unwrap();

    // Establish a prior selection.
    db.record_selection(answer_id, &[options[0].id])
        .await
        .unwrap();

    let result = db
        .record_selection(answer_id, &[options[0].id, options[1].id])
        .await;
    assert!(matches!(result, Err(QuizError::Validation(_))));

    // Prior stored state is unchanged.
    assert_eq!(
        db.selected_option_ids(answer_id).await.unwrap(),
        vec![options[0].id]
    );
}

#[tokio::test]
async fn selection_is_replaced_wholesale_not_merged() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "replace").await;
    let category_id =
        seed_category(&db, "Replace", vec![single_choice("Q1", "A", &["B"])]).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_id = db.answer_ids(attempt.id).await.unwrap()[0];
    let answer = db.get_answer(answer_id).await.unwrap();
    let options = db.get_options(answer.question_id).await.unwrap();

    db.record_selection(answer_id, &[options[0].id])
        .await
        .unwrap();
    db.record_selection(answer_id, &[options[1].id])
        .await
        .unwrap();

    assert_eq!(
        db.selected_option_ids(answer_id).await.unwrap(),
        vec![options[1].id]
    );
}

#[tokio::test]
async fn multiple_choice_empty_selection_clears_the_answer() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "clear").await;
    let category_id = seed_category(
        &db,
        "Clear",
        vec![multiple_choice(
            "Q1",
            &[("A", true), ("B", true), ("C", false)],
        )],
    )
    .await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_id = db.answer_ids(attempt.id).await.unwrap()[0];
    let answer = db.get_answer(answer_id).await.unwrap();
    let options = db.get_options(answer.question_id).await.unwrap();

    db.record_selection(answer_id, &[options[0].id, options[1].id])
        .await
        .unwrap();
    assert!(db.review_states(attempt.id).await.unwrap()[0].answered);

    db.record_selection(answer_id, &[]).await.unwrap();
    assert!(db.selected_option_ids(answer_id).await.unwrap().is_empty());
    assert!(!db.review_states(attempt.id).await.unwrap()[0].answered);
}

#[tokio::test]
async fn foreign_option_is_rejected_and_state_kept() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "foreign-option").await;
    let category_id = seed_category(
        &db,
        "Two",
        vec![
            single_choice("Q1", "A", &["B"]),
            single_choice("Q2", "C", &["D"]),
        ],
    )
    .await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_ids = db.answer_ids(attempt.id).await.unwrap();

    let first = db.get_answer(answer_ids[0]).await.unwrap();
    let second = db.get_answer(answer_ids[1]).await.unwrap();
    let first_options = db.get_options(first.question_id).await.unwrap();
    let second_options = db.get_options(second.question_id).await.unwrap();

    db.record_selection(answer_ids[0], &[first_options[0].id])
        .await
        .unwrap();

    // An option that belongs to the other question must be rejected.
    let result = db
        .record_selection(answer_ids[0], &[second_options[0].id])
        .await;
    assert!(matches!(result, Err(QuizError::Validation(_))));

    assert_eq!(
        db.selected_option_ids(answer_ids[0]).await.unwrap(),
        vec![first_options[0].id]
    );
}

#[tokio::test]
async fn unknown_answer_is_not_found() {
    let db = create_test_db().await;

    let result = db.record_selection(4242, &[]).await;
    assert!(matches!(result, Err(QuizError::NotFound(_))));

    let result = db.toggle_flag(4242).await;
    assert!(matches!(result, Err(QuizError::NotFound(_))));
}

// --- Flagging ---

#[tokio::test]
async fn flag_toggles_back_and_forth() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "flagger").await;
    let category_id = seed_category(&db, "Flags", make_questions(1)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_id = db.answer_ids(attempt.id).await.unwrap()[0];

    assert!(db.toggle_flag(answer_id).await.unwrap());
    assert!(db.get_answer(answer_id).await.unwrap().flagged);

    assert!(!db.toggle_flag(answer_id).await.unwrap());
    assert!(!db.get_answer(answer_id).await.unwrap().flagged);
}

#[tokio::test]
async fn flag_does_not_touch_answered_at() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "flag-time").await;
    let category_id = seed_category(&db, "FlagTime", make_questions(1)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_id = db.answer_ids(attempt.id).await.unwrap()[0];

    // Unanswered: stays unanswered after a flag.
    db.toggle_flag(answer_id).await.unwrap();
    assert!(db.get_answer(answer_id).await.unwrap().answered_at.is_none());

    let answer = db.get_answer(answer_id).await.unwrap();
    let correct = db.correct_option_ids(answer.question_id).await.unwrap();
    db.record_selection(answer_id, &correct).await.unwrap();

    let answered_at = db.get_answer(answer_id).await.unwrap().answered_at;
    assert!(answered_at.is_some());

    db.toggle_flag(answer_id).await.unwrap();
    assert_eq!(db.get_answer(answer_id).await.unwrap().answered_at, answered_at);
}

// --- Review state ---

#[tokio::test]
async fn review_reflects_latest_selection_and_flag_state() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "reviewer").await;
    let category_id = seed_category(&db, "Review", make_questions(3)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_ids = db.answer_ids(attempt.id).await.unwrap();

    let first = db.get_answer(answer_ids[0]).await.unwrap();
    let correct = db.correct_option_ids(first.question_id).await.unwrap();
    db.record_selection(answer_ids[0], &correct).await.unwrap();
    db.toggle_flag(answer_ids[1]).await.unwrap();

    let entries = db.review_states(attempt.id).await.unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].answer_id, answer_ids[0]);
    assert!(entries[0].answered);
    assert!(!entries[0].flagged);

    assert!(!entries[1].answered);
    assert!(entries[1].flagged);

    assert!(!entries[2].answered);
    assert!(!entries[2].flagged);
}

// --- Navigation ---

#[tokio::test]
async fn answer_context_resolves_navigation_order() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "navigator").await;
    let category_id = seed_category(&db, "Nav", make_questions(3)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_ids = db.answer_ids(attempt.id).await.unwrap();

    let first = db.answer_context(attempt.id, answer_ids[0]).await.unwrap();
    assert_eq!(first.position, 0);
    assert_eq!(first.total, 3);
    assert_eq!(first.prev_id, None);
    assert_eq!(first.next_id, Some(answer_ids[1]));
    assert!(!first.is_last());

    let last = db.answer_context(attempt.id, answer_ids[2]).await.unwrap();
    assert_eq!(last.position, 2);
    assert_eq!(last.prev_id, Some(answer_ids[1]));
    assert!(last.is_last());
}

#[tokio::test]
async fn answer_context_rejects_answers_from_other_attempts() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "crossed").await;
    let category_id = seed_category(&db, "Crossed", make_questions(2)).await;

    let first = db.create_attempt(user_id, category_id).await.unwrap();
    let second = db.create_attempt(user_id, category_id).await.unwrap();
    let foreign_answer = db.answer_ids(second.id).await.unwrap()[0];

    let result = db.answer_context(first.id, foreign_answer).await;
    assert!(matches!(result, Err(QuizError::NotFound(_))));
}

#[tokio::test]
async fn foreign_users_attempt_behaves_as_missing() {
    let db = create_test_db().await;
    let owner = seed_user(&db, "owner").await;
    let intruder = seed_user(&db, "intruder").await;
    let category_id = seed_category(&db, "Private", make_questions(1)).await;

    let attempt = db.create_attempt(owner, category_id).await.unwrap();

    assert!(db.attempt_for_user(attempt.id, owner).await.is_ok());
    let result = db.attempt_for_user(attempt.id, intruder).await;
    assert!(matches!(result, Err(QuizError::NotFound(_))));
}

// --- Soft delete ---

#[tokio::test]
async fn deleted_question_leaves_sampling_but_stays_readable() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "historian").await;
    let category_id = seed_category(
        &db,
        "History",
        vec![
            single_choice("Old question", "A", &["B"]),
            single_choice("New question", "C", &["D"]),
        ],
    )
    .await;

    let before = db.create_attempt(user_id, category_id).await.unwrap();
    assert_eq!(before.total_questions, 2);

    let question_ids = db.active_question_ids(category_id).await.unwrap();
    db.soft_delete_question(question_ids[0]).await.unwrap();

    let deleted = db.get_question(question_ids[0]).await.unwrap();
    assert!(deleted.is_deleted);

    // New attempts only see the surviving question.
    let after = db.create_attempt(user_id, category_id).await.unwrap();
    assert_eq!(after.total_questions, 1);
    let survivor = db.get_answer(db.answer_ids(after.id).await.unwrap()[0])
        .await
        .unwrap();
    assert_eq!(survivor.question_id, question_ids[1]);

    // The historical attempt still resolves the deleted question.
    for answer_id in db.answer_ids(before.id).await.unwrap() {
        let context = db.answer_context(before.id, answer_id).await.unwrap();
        assert!(!context.question_text.is_empty());
        assert_eq!(context.options.len(), 2);
    }
}

// --- Question invariants ---

#[tokio::test]
async fn question_creation_enforces_correct_option_invariants() {
    let db = create_test_db().await;
    let category_id = db.create_category("Invariants", "").await.unwrap();

    // No correct option at all.
    let result = db
        .create_question(
            category_id,
            multiple_choice("Q", &[("A", false), ("B", false)]),
        )
        .await;
    assert!(matches!(result, Err(QuizError::Validation(_))));

    // Two correct options on a single-answer question.
    let result = db
        .create_question(
            category_id,
            NewQuestion {
                text: "Q".to_string(),
                question_type: QuestionType::Single,
                options: vec![
                    NewOption { text: "A".to_string(), is_correct: true },
                    NewOption { text: "B".to_string(), is_correct: true },
                ],
            },
        )
        .await;
    assert!(matches!(result, Err(QuizError::Validation(_))));

    // Two correct options on a multiple-answer question is fine.
    db.create_question(
        category_id,
        multiple_choice("Q", &[("A", true), ("B", true), ("C", false)]),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn duplicate_category_name_is_rejected() {
    let db = create_test_db().await;
    db.create_category("Dupe", "first").await.unwrap();

    let result = db.create_category("Dupe", "second").await;
    assert!(matches!(result, Err(QuizError::Validation(_))));
}

// --- Scoring and submission ---

#[tokio::test]
async fn exact_set_scoring_on_a_multiple_choice_question() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "exact-set").await;
    let category_id = seed_category(
        &db,
        "ExactSet",
        vec![multiple_choice(
            "Pick 1 and 3",
            &[("one", true), ("two", false), ("three", true)],
        )],
    )
    .await;

    // Helper: one attempt, one answer, a selection, a submit.
    async fn run_attempt(db: &Db, user_id: i64, category_id: i64, pick: &dyn Fn(&[i64], &[i64]) -> Vec<i64>) -> i64 {
        let attempt = db.create_attempt(user_id, category_id).await.unwrap();
        let answer_id = db.answer_ids(attempt.id).await.unwrap()[0];
        let answer = db.get_answer(answer_id).await.unwrap();
        let correct = db.correct_option_ids(answer.question_id).await.unwrap();
        let all: Vec<i64> = db
            .get_options(answer.question_id)
            .await
            .unwrap()
            .iter()
            .map(|o| o.id)
            .collect();

        db.record_selection(answer_id, &pick(&correct, &all))
            .await
            .unwrap();
        db.submit_attempt(attempt.id).await.unwrap().score
    }

    // Exactly the correct set.
    let score = run_attempt(&db, user_id, category_id, &|correct, _| correct.to_vec()).await;
    assert_eq!(score, 100);

    // Superset: all options selected.
    let score = run_attempt(&db, user_id, category_id, &|_, all| all.to_vec()).await;
    assert_eq!(score, 0);

    // Subset: one correct option missing.
    let score = run_attempt(&db, user_id, category_id, &|correct, _| vec![correct[0]]).await;
    assert_eq!(score, 0);
}

#[tokio::test]
async fn perfect_attempt_scores_hundred_and_passes() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "perfect").await;
    let category_id = seed_category(&db, "Perfect", make_questions(3)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    assert_eq!(attempt.total_questions, 3);

    answer_all_correctly(&db, attempt.id).await;

    let summary = db.submit_attempt(attempt.id).await.unwrap();
    assert_eq!(summary.score, 100);
    assert!(summary.passed);
    assert_eq!(summary.correct_count, 3);
    assert_eq!(summary.breakdown.len(), 3);

    let stored = db.get_attempt(attempt.id).await.unwrap();
    assert_eq!(stored.score, Some(100));
    assert!(stored.passed);
    assert!(stored.completed_at.is_some());
}

#[tokio::test]
async fn partial_attempt_scores_rounded_percentage() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "partial").await;
    let category_id = seed_category(&db, "Partial", make_questions(3)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_ids = db.answer_ids(attempt.id).await.unwrap();

    // One right, one wrong, one left unanswered.
    let first = db.get_answer(answer_ids[0]).await.unwrap();
    let correct = db.correct_option_ids(first.question_id).await.unwrap();
    db.record_selection(answer_ids[0], &correct).await.unwrap();

    let second = db.get_answer(answer_ids[1]).await.unwrap();
    let wrong: Vec<i64> = db
        .get_options(second.question_id)
        .await
        .unwrap()
        .iter()
        .filter(|o| !o.is_correct)
        .map(|o| o.id)
        .take(1)
        .collect();
    db.record_selection(answer_ids[1], &wrong).await.unwrap();

    let summary = db.submit_attempt(attempt.id).await.unwrap();
    assert_eq!(summary.score, 33);
    assert!(!summary.passed);

    let flags: Vec<bool> = summary.breakdown.iter().map(|r| r.is_correct).collect();
    assert_eq!(flags, vec![true, false, false]);
}

#[tokio::test]
async fn second_submit_is_rejected_and_changes_nothing() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "resubmitter").await;
    let category_id = seed_category(&db, "Resubmit", make_questions(2)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    answer_all_correctly(&db, attempt.id).await;

    db.submit_attempt(attempt.id).await.unwrap();
    let first = db.get_attempt(attempt.id).await.unwrap();

    let result = db.submit_attempt(attempt.id).await;
    assert!(matches!(result, Err(QuizError::AttemptClosed)));

    let second = db.get_attempt(attempt.id).await.unwrap();
    assert_eq!(second.score, first.score);
    assert_eq!(second.passed, first.passed);
    assert_eq!(second.completed_at, first.completed_at);
}

#[tokio::test]
async fn completed_attempt_rejects_all_mutation() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "closed").await;
    let category_id = seed_category(&db, "Closed", make_questions(1)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    let answer_id = db.answer_ids(attempt.id).await.unwrap()[0];
    let answer = db.get_answer(answer_id).await.unwrap();
    let correct = db.correct_option_ids(answer.question_id).await.unwrap();

    db.record_selection(answer_id, &correct).await.unwrap();
    db.submit_attempt(attempt.id).await.unwrap();

    let result = db.record_selection(answer_id, &[]).await;
    assert!(matches!(result, Err(QuizError::AttemptClosed)));

    let result = db.toggle_flag(answer_id).await;
    assert!(matches!(result, Err(QuizError::AttemptClosed)));

    // Selection survived the rejected clear.
    assert_eq!(db.selected_option_ids(answer_id).await.unwrap(), correct);
}

#[tokio::test]
async fn completed_attempt_shows_up_in_recent_attempts() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "recent").await;
    let category_id = seed_category(&db, "Recent", make_questions(1)).await;

    assert!(db.recent_attempts(user_id, 5).await.unwrap().is_empty());

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    answer_all_correctly(&db, attempt.id).await;
    db.submit_attempt(attempt.id).await.unwrap();

    let recent = db.recent_attempts(user_id, 5).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, attempt.id);
    assert_eq!(recent[0].score, 100);
    assert!(recent[0].passed);
    assert_eq!(recent[0].category_name, "Recent");
}

#[tokio::test]
async fn breakdown_is_stable_after_completion() {
    let db = create_test_db().await;
    let user_id = seed_user(&db, "frozen").await;
    let category_id = seed_category(&db, "Frozen", make_questions(2)).await;

    let attempt = db.create_attempt(user_id, category_id).await.unwrap();
    answer_all_correctly(&db, attempt.id).await;
    let summary = db.submit_attempt(attempt.id).await.unwrap();

    let breakdown = db.attempt_breakdown(attempt.id).await.unwrap();
    assert_eq!(breakdown.len(), summary.breakdown.len());
    for (recomputed, original) in breakdown.iter().zip(summary.breakdown.iter()) {
        assert_eq!(recomputed.answer_id, original.answer_id);
        assert_eq!(recomputed.is_correct, original.is_correct);
    }
}
