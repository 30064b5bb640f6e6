use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use mockall::mock;
use serde_json::json;

use scheduling_service::api::{self, AppState};
use scheduling_service::infrastructure::config::{HardRequestStoreSettings, ServerSettings, Settings};
use scheduling_service::infrastructure::hard_request_store::{
    HardRequestRecord, HardRequestStore, HardRequestStoreError,
};

mock! {
    pub Store {}

    #[async_trait]
    impl HardRequestStore for Store {
        async fn fetch_hard_requests(
            &self,
            nurse_ids: &[String],
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<HardRequestRecord>, HardRequestStoreError>;
    }
}

fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        hard_request_store: HardRequestStoreSettings {
            url: "http://unused.invalid".to_string(),
        },
        scheduling_defaults: Default::default(),
    }
}

fn server_with_store(store: MockStore) -> TestServer {
    let state = AppState::new(Arc::new(store), Arc::new(test_settings()));
    let app = api::create_router(state);
    TestServer::new(app).unwrap()
}

fn empty_store() -> MockStore {
    let mut store = MockStore::new();
    store
        .expect_fetch_hard_requests()
        .returning(|_, _, _| Ok(Vec::new()));
    store
}

fn non_government_nurse(id: &str) -> serde_json::Value {
    json!({ "id": id, "isGovernmentOfficial": false })
}

#[tokio::test]
async fn minimal_feasible_window_covers_every_day() {
    let server = server_with_store(empty_store());

    let nurses: Vec<serde_json::Value> = (1..=7)
        .map(|i| non_government_nurse(&format!("n{i}")))
        .collect();

    let body = json!({
        "nurses": nurses,
        "schedule": { "startDate": "2024-06-01", "endDate": "2024-06-07" },
        "requiredNursesMorning": 2,
        "requiredNursesAfternoon": 3,
        "requiredNursesNight": 2,
    });

    let response = server.post("/generate-schedule").json(&body).await;
    response.assert_status_ok();

    let payload: serde_json::Value = response.json();
    assert!(matches!(
        payload["solverStatus"].as_str(),
        Some("OPTIMAL") | Some("FEASIBLE")
    ));
    assert_eq!(payload["days"].as_array().unwrap().len(), 7);

    let flags = payload["nextCarryOverFlags"].as_object().unwrap();
    assert!(flags.values().all(|v| v == &json!(false)));
}

#[tokio::test]
async fn government_nurse_rests_on_weekend() {
    let mut nurses = vec![json!({ "id": "gov", "isGovernmentOfficial": true })];
    for i in 1..=6 {
        nurses.push(non_government_nurse(&format!("n{i}")));
    }

    let body = json!({
        "nurses": nurses,
        "schedule": { "startDate": "2024-06-01", "endDate": "2024-06-02" },
        "requiredNursesMorning": 1,
        "requiredNursesAfternoon": 0,
        "requiredNursesNight": 0,
    });

    let server = server_with_store(empty_store());
    let response = server.post("/generate-schedule").json(&body).await;
    response.assert_status_ok();

    let payload: serde_json::Value = response.json();
    let gov_schedule = &payload["nurseSchedules"]["gov"];
    for day in ["2024-06-01", "2024-06-02"] {
        assert_eq!(gov_schedule[day].as_array().unwrap().len(), 0);
    }
}

#[tokio::test]
async fn hard_day_off_and_hard_permanent_constraint_both_honored() {
    let mut store = MockStore::new();
    store.expect_fetch_hard_requests().returning(|_, _, _| {
        Ok(vec![HardRequestRecord {
            nurse_id: "nurseA".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        }])
    });

    let mut nurses = vec![json!({
        "id": "nurseA",
        "isGovernmentOfficial": false,
        "permanentConstraints": [
            { "type": "no_tuesdays", "strength": "hard" }
        ]
    })];
    for i in 1..=5 {
        nurses.push(non_government_nurse(&format!("n{i}")));
    }

    let body = json!({
        "nurses": nurses,
        "schedule": { "startDate": "2024-06-01", "endDate": "2024-06-07" },
        "requiredNursesMorning": 1,
        "requiredNursesAfternoon": 1,
        "requiredNursesNight": 1,
    });

    let server = server_with_store(store);
    let response = server.post("/generate-schedule").json(&body).await;
    response.assert_status_ok();

    let payload: serde_json::Value = response.json();
    let schedule = &payload["nurseSchedules"]["nurseA"];
    assert_eq!(schedule["2024-06-03"].as_array().unwrap().len(), 0);
    assert_eq!(schedule["2024-06-04"].as_array().unwrap().len(), 0); // the Tuesday
}

#[tokio::test]
async fn malformed_json_never_reaches_model_construction() {
    let server = server_with_store(empty_store());
    let response = server
        .post("/generate-schedule")
        .text("{not valid json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_window_is_rejected_before_solving() {
    let body = json!({
        "nurses": [non_government_nurse("n1")],
        "schedule": { "startDate": "2024-06-07", "endDate": "2024-06-01" },
    });

    let server = server_with_store(empty_store());
    let response = server.post("/generate-schedule").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hard_request_store_failure_degrades_instead_of_erroring() {
    let mut store = MockStore::new();
    store
        .expect_fetch_hard_requests()
        .returning(|_, _, _| Err(HardRequestStoreError::Status(503)));

    let nurses: Vec<serde_json::Value> = (1..=7)
        .map(|i| non_government_nurse(&format!("n{i}")))
        .collect();
    let body = json!({
        "nurses": nurses,
        "schedule": { "startDate": "2024-06-01", "endDate": "2024-06-07" },
        "requiredNursesMorning": 2,
        "requiredNursesAfternoon": 3,
        "requiredNursesNight": 2,
    });

    let server = server_with_store(store);
    let response = server.post("/generate-schedule").json(&body).await;
    response.assert_status_ok();
}

#[tokio::test]
async fn healthz_reports_healthy() {
    let server = server_with_store(empty_store());
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    let payload: serde_json::Value = response.json();
    assert_eq!(payload["status"], "healthy");
}
