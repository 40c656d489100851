use anyhow::Result;
use clinic_locator::core::advice::UnavailableAdvice;
use clinic_locator::core::export::export_summary;
use clinic_locator::core::session::AdviceState;
use clinic_locator::core::{Coordinate, SummaryCategory};
use clinic_locator::{
    FixedLocationProvider, GeminiAdviceClient, LocalStorage, LocatorError, LocatorSession,
    BRANCHES,
};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

const PETALING_JAYA: Coordinate = Coordinate::new(3.1167, 101.6219);

fn client_for(server: &MockServer) -> GeminiAdviceClient {
    GeminiAdviceClient::new(
        &server.url("/v1beta"),
        "gemini-2.5-flash",
        "test-key",
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_device_location_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let reply = "- T.low Dental Clinic (Petaling Jaya)\n\
                 - Distance: 0 m, you are at the clinic\n\
                 - LRT Taman Bahagia, then RapidKL bus T790\n\
                 - 165-A, Jalan SS 2/24";

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent")
            .body_contains("Straight-line distance to nearest branch: 0 m");
        then.status(200).json_body(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": reply}]}}]
        }));
    });

    let mut session = LocatorSession::new(
        client_for(&server),
        FixedLocationProvider::new(Some(PETALING_JAYA)),
        BRANCHES,
    );
    session.locate_and_advise().await?;
    api_mock.assert();

    let ranked = session.ranked_branches();
    let ids: Vec<&str> = ranked.iter().map(|r| r.branch.id).collect();
    assert_eq!(ids, vec!["td-pj", "is-bj", "is-sentul", "is-setapak", "is-pg"]);
    assert_eq!(ranked[0].distance_km, Some(0.0));
    assert!(ranked[0].is_nearest);

    let advice = session.current_advice().unwrap();
    assert_eq!(advice.message, reply);
    assert_eq!(
        advice.recommendation.as_deref(),
        Some("T.low Dental Clinic (Petaling Jaya)")
    );

    let categories: Vec<SummaryCategory> =
        session.summary_lines().iter().map(|l| l.category).collect();
    assert_eq!(
        categories,
        vec![
            SummaryCategory::General,
            SummaryCategory::Distance,
            SummaryCategory::Transit,
            SummaryCategory::Address,
        ]
    );

    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let storage = LocalStorage::new(output_path.clone());
    let filename = export_summary(&storage, session.current_advice(), "summary.txt").await?;

    let saved = std::fs::read_to_string(std::path::Path::new(&output_path).join(filename))?;
    assert!(saved.contains(reply));
    assert!(saved.contains("Recommended branch: T.low Dental Clinic (Petaling Jaya)"));

    Ok(())
}

#[tokio::test]
async fn test_advice_failure_leaves_registry_usable() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST);
        then.status(500).body("internal error");
    });

    let mut session =
        LocatorSession::new(client_for(&server), FixedLocationProvider::denied(), BRANCHES);

    let err = session.submit_query("Kepong").await.unwrap_err();
    assert!(matches!(err, LocatorError::AdviceServiceError { status: 500, .. }));
    assert_eq!(session.advice_state(), &AdviceState::Failed);
    assert!(session.current_advice().is_none());

    let ranked = session.ranked_branches();
    assert_eq!(ranked.len(), BRANCHES.len());
    assert_eq!(ranked[0].branch.id, BRANCHES[0].id);
    assert!(ranked.iter().all(|r| !r.is_nearest && r.distance_km.is_none()));

    Ok(())
}

#[tokio::test]
async fn test_denied_location_sends_no_request() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(serde_json::json!({"candidates": []}));
    });

    let mut session =
        LocatorSession::new(client_for(&server), FixedLocationProvider::denied(), BRANCHES);

    let err = session.locate_and_advise().await.unwrap_err();
    assert!(matches!(err, LocatorError::LocationDenied { .. }));
    assert!(session.user_location().is_none());
    assert!(!session.is_locating());
    api_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_unconfigured_advice_keeps_query_guard_and_registry() -> Result<()> {
    let missing_key = LocatorError::MissingConfigError {
        field: "advice.api_key".to_string(),
    };
    let mut session = LocatorSession::new(
        UnavailableAdvice::from_error(&missing_key),
        FixedLocationProvider::new(Some(PETALING_JAYA)),
        BRANCHES,
    );

    let err = session.submit_query("  ").await.unwrap_err();
    assert!(matches!(err, LocatorError::EmptyQuery));
    assert_eq!(session.advice_state(), &AdviceState::Idle);

    let err = session.locate_and_advise().await.unwrap_err();
    assert!(err.is_advice_failure());
    assert!(session.current_advice().is_none());

    let ranked = session.ranked_branches();
    assert_eq!(ranked.len(), BRANCHES.len());
    assert_eq!(ranked[0].branch.id, "td-pj");
    assert!(ranked[0].is_nearest);

    Ok(())
}
