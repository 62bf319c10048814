mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use db::models::{Submission, User, UserLessonProgress, UserProblemProgress};
use helpers::app::{make_test_app, post_json, read_json};
use helpers::data::{
    attempt_token, create_demo_user, create_empty_lesson, create_lesson,
    create_user_with_streak, full_correct_answers,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use tower::ServiceExt;

fn submit_uri(lesson_id: i64) -> String {
    format!("/api/lessons/{lesson_id}/submit")
}

/// Test Case: the canonical end-to-end scenario — mcq + input, both correct.
#[tokio::test]
async fn test_submit_full_correct_lesson() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let body = json!({
        "attempt_token": attempt_token(),
        "answers": full_correct_answers(&fixture),
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_body = read_json(response).await;
    assert_eq!(json_body["success"], true);
    assert_eq!(json_body["message"], "Submission processed successfully");
    let data = &json_body["data"];
    assert_eq!(data["correct_count"], 2);
    assert_eq!(data["earned_xp"], 20);
    assert_eq!(data["new_total_xp"], 20);
    assert_eq!(data["streak"]["current"], 1);
    assert_eq!(data["streak"]["best"], 1);
    assert_eq!(data["lesson_progress"], 1.0);

    let record = Submission::find().one(&db).await.unwrap().unwrap();
    assert_eq!(record.correct_count, 2);
    assert_eq!(record.earned_xp, 20);
    assert_eq!(record.total_xp_after, 20);
    assert_eq!(record.lesson_progress_after, 1.0);
}

/// Test Case: the same attempt token twice — conflict, and no state change.
#[tokio::test]
async fn test_duplicate_attempt_token_conflicts() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let body = json!({
        "attempt_token": "fixed-token",
        "answers": full_correct_answers(&fixture),
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Replay with a different answer set: still a conflict, nothing applied.
    let replay = json!({
        "attempt_token": "fixed-token",
        "answers": [{"problem_id": fixture.mcq.id, "option_id": fixture.mcq_wrong.id}],
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &replay))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json_body = read_json(response).await;
    assert_eq!(json_body["success"], false);

    let user = User::find_by_id(1).one(&db).await.unwrap().unwrap();
    assert_eq!(user.total_xp, 20);
    assert_eq!(user.current_streak, 1);
    assert_eq!(Submission::find().count(&db).await.unwrap(), 1);
    assert_eq!(UserProblemProgress::find().count(&db).await.unwrap(), 2);
}

/// Test Case: an answer referencing a problem from another lesson.
#[tokio::test]
async fn test_submit_foreign_problem_returns_422() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Lesson A", 1).await;
    let other = create_lesson(&db, "Lesson B", 2).await;

    let body = json!({
        "attempt_token": attempt_token(),
        "answers": [{"problem_id": other.mcq.id, "option_id": other.mcq_correct.id}],
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The rejected submission persisted nothing.
    assert_eq!(Submission::find().count(&db).await.unwrap(), 0);
    assert_eq!(UserProblemProgress::find().count(&db).await.unwrap(), 0);
}

/// Test Case: answers are validated in submitted order, so the first bad
/// item decides the error kind.
#[tokio::test]
async fn test_answer_order_decides_error_kind() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let foreign_first = json!({
        "attempt_token": attempt_token(),
        "answers": [
            {"problem_id": 9999, "option_id": 1},
            {"problem_id": "not-a-number"},
        ],
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &foreign_first))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let malformed_first = json!({
        "attempt_token": attempt_token(),
        "answers": [
            {"problem_id": "not-a-number"},
            {"problem_id": 9999, "option_id": 1},
        ],
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &malformed_first))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Test Case: malformed payload shapes are all rejected with 400.
#[tokio::test]
async fn test_submit_payload_validation() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let bad_bodies = [
        json!({}),
        json!({"attempt_token": "", "answers": [{"problem_id": fixture.mcq.id}]}),
        json!({"attempt_token": 5, "answers": [{"problem_id": fixture.mcq.id}]}),
        json!({"attempt_token": attempt_token()}),
        json!({"attempt_token": attempt_token(), "answers": []}),
        json!({"attempt_token": attempt_token(), "answers": "nope"}),
        json!({"attempt_token": attempt_token(), "answers": ["nope"]}),
        // mcq answer without an option id
        json!({"attempt_token": attempt_token(), "answers": [{"problem_id": fixture.mcq.id}]}),
        // option id that does not belong to this problem
        json!({"attempt_token": attempt_token(), "answers": [{"problem_id": fixture.mcq.id, "option_id": 999999}]}),
        // input answer without a value
        json!({"attempt_token": attempt_token(), "answers": [{"problem_id": fixture.input.id}]}),
    ];

    for body in bad_bodies {
        let response = app
            .clone()
            .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }

    assert_eq!(Submission::find().count(&db).await.unwrap(), 0);
}

/// Test Case: unknown lesson, missing user, and a lesson without problems.
#[tokio::test]
async fn test_submit_referential_validation() {
    let (app, db) = make_test_app().await;
    let body = json!({
        "attempt_token": attempt_token(),
        "answers": [{"problem_id": 1, "option_id": 1}],
    });

    // No lesson at all.
    let response = app.clone().oneshot(post_json(&submit_uri(999), &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Lesson exists but the demo user does not.
    let fixture = create_lesson(&db, "Test Lesson", 1).await;
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Lesson with no problems.
    create_demo_user(&db).await;
    let empty = create_empty_lesson(&db, 2).await;
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(empty.id), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Test Case: a wrong answer on a previously-correct problem neither earns
/// XP nor lowers lesson progress.
#[tokio::test]
async fn test_wrong_answer_keeps_progress_monotone() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let first = json!({
        "attempt_token": attempt_token(),
        "answers": [{"problem_id": fixture.mcq.id, "option_id": fixture.mcq_correct.id}],
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &first))
        .await
        .unwrap();
    let json_body = read_json(response).await;
    let data = &json_body["data"];
    assert_eq!(data["lesson_progress"], 0.5);
    assert_eq!(data["new_total_xp"], 10);

    let wrong_retry = json!({
        "attempt_token": attempt_token(),
        "answers": [{"problem_id": fixture.mcq.id, "option_id": fixture.mcq_wrong.id}],
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &wrong_retry))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json_body = read_json(response).await;
    let data = &json_body["data"];
    assert_eq!(data["correct_count"], 0);
    assert_eq!(data["earned_xp"], 0);
    assert_eq!(data["new_total_xp"], 10);
    assert_eq!(data["lesson_progress"], 0.5);
}

/// Test Case: replaying a lesson with fresh tokens earns XP again.
#[tokio::test]
async fn test_replay_with_fresh_tokens_re_earns_xp() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    for expected_total in [20, 40] {
        let body = json!({
            "attempt_token": attempt_token(),
            "answers": full_correct_answers(&fixture),
        });
        let response = app
            .clone()
            .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
            .await
            .unwrap();
        let json_body = read_json(response).await;
    let data = &json_body["data"];
        assert_eq!(data["earned_xp"], 20);
        assert_eq!(data["new_total_xp"], expected_total);
        assert_eq!(data["lesson_progress"], 1.0);
    }
}

/// Test Case: a second submission on the same UTC day leaves the streak alone.
#[tokio::test]
async fn test_same_day_submission_does_not_advance_streak() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    for _ in 0..2 {
        let body = json!({
            "attempt_token": attempt_token(),
            "answers": full_correct_answers(&fixture),
        });
        let response = app
            .clone()
            .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
            .await
            .unwrap();
        let json_body = read_json(response).await;
    let data = &json_body["data"];
        assert_eq!(data["streak"]["current"], 1);
        assert_eq!(data["streak"]["best"], 1);
    }
}

/// Test Case: activity yesterday extends the streak and the best streak.
#[tokio::test]
async fn test_consecutive_day_extends_streak() {
    let (app, db) = make_test_app().await;
    let yesterday = Utc::now().date_naive() - Duration::days(1);
    create_user_with_streak(&db, 3, 3, Some(yesterday)).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let body = json!({
        "attempt_token": attempt_token(),
        "answers": full_correct_answers(&fixture),
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
        .await
        .unwrap();
    let json_body = read_json(response).await;
    let data = &json_body["data"];
    assert_eq!(data["streak"]["current"], 4);
    assert_eq!(data["streak"]["best"], 4);
}

/// Test Case: a multi-day gap resets the streak but preserves the best.
#[tokio::test]
async fn test_missed_days_reset_streak_keep_best() {
    let (app, db) = make_test_app().await;
    let four_days_ago = Utc::now().date_naive() - Duration::days(4);
    create_user_with_streak(&db, 5, 7, Some(four_days_ago)).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let body = json!({
        "attempt_token": attempt_token(),
        "answers": full_correct_answers(&fixture),
    });
    let response = app
        .clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
        .await
        .unwrap();
    let json_body = read_json(response).await;
    let data = &json_body["data"];
    assert_eq!(data["streak"]["current"], 1);
    assert_eq!(data["streak"]["best"], 7);
}

/// Test Case: the lesson rollup row mirrors the ledger after each submission.
#[tokio::test]
async fn test_lesson_rollup_row_is_maintained() {
    let (app, db) = make_test_app().await;
    create_demo_user(&db).await;
    let fixture = create_lesson(&db, "Test Lesson", 1).await;

    let body = json!({
        "attempt_token": attempt_token(),
        "answers": [{"problem_id": fixture.input.id, "value": "12"}],
    });
    app.clone()
        .oneshot(post_json(&submit_uri(fixture.lesson.id), &body))
        .await
        .unwrap();

    let rollup = UserLessonProgress::find().one(&db).await.unwrap().unwrap();
    assert_eq!(rollup.user_id, 1);
    assert_eq!(rollup.lesson_id, fixture.lesson.id);
    assert_eq!(rollup.correct_count, 1);
    assert_eq!(rollup.total_problems, 2);
}
