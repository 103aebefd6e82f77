// SPDX-License-Identifier: MIT

//! Security tests for the trigger endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_aggregate_without_secret_unauthorized() {
    let (app, _, store) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/aggregate-leaderboards")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // Zero aggregation work was performed
    assert_eq!(store.snapshot_count(), 0);
}

#[tokio::test]
async fn test_aggregate_with_wrong_secret_unauthorized() {
    let (app, _, store) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/aggregate-leaderboards")
                .header("x-aggregation-secret", "wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.snapshot_count(), 0);
}

#[tokio::test]
async fn test_aggregate_with_secret_runs_sweep() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, "alice", "2024-03-05T10:00:00Z", 5000.0);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/aggregate-leaderboards")
                .header("x-aggregation-secret", common::TEST_SECRET)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.snapshot_count(), 15);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["snapshotsWritten"], 15);
    assert_eq!(json["totalBuilds"], 15);
    assert_eq!(json["failures"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_aggregate_store_down_returns_500() {
    let (app, _, store) = common::create_test_app();
    store.set_fail_all_reads(true);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/aggregate-leaderboards")
                .header("x-aggregation-secret", common::TEST_SECRET)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_process_workout_without_secret_unauthorized() {
    let (app, _, store) = common::create_test_app();
    store.insert_event(common::make_event("w1", "alice", "2024-03-05T10:00:00Z", 1000.0));

    let payload = json!({"userId": "alice", "workoutId": "w1"});
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/process-workout")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // Profile was never written
    use liftboard::db::WorkoutStore;
    assert!(store.get_metric_profile("alice").await.unwrap().is_none());
}
