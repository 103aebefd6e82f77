// SPDX-License-Identifier: MIT

//! Workout processing trigger: gamification outcomes and idempotency.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use liftboard::db::WorkoutStore;
use liftboard::models::{LoggedExercise, LoggedSet, SetType};
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn post_process(app: axum::Router, user_id: &str, workout_id: &str) -> (StatusCode, serde_json::Value) {
    let payload = json!({"userId": user_id, "workoutId": workout_id});
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/process-workout")
                .header("content-type", "application/json")
                .header("x-aggregation-secret", common::TEST_SECRET)
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_unknown_workout_returns_404() {
    let (app, _, _) = common::create_test_app();
    let (status, body) = post_process(app, "alice", "nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_workout_owned_by_other_user_returns_404() {
    let (app, _, store) = common::create_test_app();
    store.insert_event(common::make_event("w1", "bob", "2024-03-05T10:00:00Z", 1000.0));

    let (status, _) = post_process(app, "alice", "w1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_first_workout_outcome() {
    let (app, _, store) = common::create_test_app();
    // Logged today so the streak is active
    let today = chrono::Utc::now();
    let mut event = common::make_event("w1", "alice", "2024-03-05T10:00:00Z", 5250.0);
    event.date = today;
    store.insert_event(event);

    let (status, body) = post_process(app, "alice", "w1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newlyProcessed"], true);
    // 100 base + floor(5250/100)
    assert_eq!(body["xpGained"], 152);
    assert_eq!(body["totalXp"], 152);
    assert_eq!(body["level"], 1);
    assert_eq!(body["leveledUp"], false);
    assert_eq!(body["currentStreak"], 1);
    assert_eq!(body["longestStreak"], 1);
    assert_eq!(body["streakExtended"], true);
    assert_eq!(body["lifetimeVolume"], 5250.0);
}

#[tokio::test]
async fn test_redelivery_is_idempotent() {
    let (app, _, store) = common::create_test_app();
    let mut event = common::make_event("w1", "alice", "2024-03-05T10:00:00Z", 5250.0);
    event.date = chrono::Utc::now();
    store.insert_event(event);

    let (status, first) = post_process(app.clone(), "alice", "w1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["newlyProcessed"], true);

    let (status, second) = post_process(app, "alice", "w1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["newlyProcessed"], false);
    assert_eq!(second["xpGained"], 0);
    // Totals unchanged: nothing was applied twice
    assert_eq!(second["totalXp"], 152);
    assert_eq!(second["lifetimeVolume"], 5250.0);

    let profile = store.get_metric_profile("alice").await.unwrap().unwrap();
    assert_eq!(profile.xp, 152);
    assert_eq!(profile.lifetime_volume, 5250.0);
}

#[tokio::test]
async fn test_level_up_is_reported() {
    let (app, _, store) = common::create_test_app();
    let mut profile = liftboard::models::UserMetricProfile::default();
    profile.xp = 950;
    store.insert_profile("alice", profile);

    let mut event = common::make_event("w1", "alice", "2024-03-05T10:00:00Z", 0.0);
    event.date = chrono::Utc::now();
    store.insert_event(event);

    let (_, body) = post_process(app, "alice", "w1").await;

    assert_eq!(body["totalXp"], 1050);
    assert_eq!(body["level"], 2);
    assert_eq!(body["leveledUp"], true);
}

#[tokio::test]
async fn test_volume_derived_from_sets_when_absent() {
    let (app, _, store) = common::create_test_app();
    let mut event = common::make_event("w1", "alice", "2024-03-05T10:00:00Z", 0.0);
    event.date = chrono::Utc::now();
    event.volume = None;
    event.exercises = vec![LoggedExercise {
        exercise_id: "bench".to_string(),
        exercise_name: Some("Bench Press".to_string()),
        sets: vec![
            LoggedSet {
                weight: Some(95.0),
                reps: Some(10),
                set_type: Some(SetType::Warmup),
            },
            LoggedSet {
                weight: Some(135.0),
                reps: Some(10),
                set_type: Some(SetType::Normal),
            },
        ],
    }];
    store.insert_event(event);

    let (_, body) = post_process(app, "alice", "w1").await;

    // Warmup excluded: 135 * 10
    assert_eq!(body["lifetimeVolume"], 1350.0);
    assert_eq!(body["xpGained"], 113);
}

#[tokio::test]
async fn test_personal_records_in_outcome() {
    let (app, _, store) = common::create_test_app();

    // History: bench 135x10 (1RM 180)
    let mut old = common::make_event("w0", "alice", "2024-03-01T10:00:00Z", 1350.0);
    old.exercises = vec![LoggedExercise {
        exercise_id: "bench".to_string(),
        exercise_name: None,
        sets: vec![LoggedSet {
            weight: Some(135.0),
            reps: Some(10),
            set_type: None,
        }],
    }];
    store.insert_event(old);

    // New: bench 185x1 beats both maxima
    let mut event = common::make_event("w1", "alice", "2024-03-05T10:00:00Z", 185.0);
    event.date = chrono::Utc::now();
    event.exercises = vec![LoggedExercise {
        exercise_id: "bench".to_string(),
        exercise_name: None,
        sets: vec![LoggedSet {
            weight: Some(185.0),
            reps: Some(1),
            set_type: None,
        }],
    }];
    store.insert_event(event);

    let (_, body) = post_process(app, "alice", "w1").await;

    let records = body["personalRecords"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    let kinds: Vec<&str> = records.iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert!(kinds.contains(&"max_weight"));
    assert!(kinds.contains(&"best_1rm"));
}
