//! Integration tests for the Fitrack HTTP client

mod common;

use common::harness;
use fitrack_core::{
    ExerciseUpdate, NewExercise, NewProgram, NewTrainingSession, ProgramType, ProgramUpdate,
    UserId,
};
use fitrack_http::{ClientConfig, ClientError, FitrackClient, NewUser};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = FitrackClient::builder()
        .base_url("http://localhost:8000/api")
        .timeout(Duration::from_secs(5))
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000/api");
}

#[tokio::test]
async fn test_client_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/programs"))
        .and(header("user-agent", "fitrack-test/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        api_url: format!("{}/api/", server.uri()),
        timeout_secs: Some(5),
        user_agent: "fitrack-test/1".to_string(),
    };
    let client = FitrackClient::builder().config(&config).build().unwrap();

    client.list_programs().await.unwrap();
}

#[tokio::test]
async fn test_list_programs_accepts_envelope_and_bare() {
    let program = json!({
        "id": 1,
        "name": "Fuerza 5x5",
        "description": "Base de fuerza",
        "duration_weeks": 12,
        "type": "strength"
    });

    for body in [json!({"data": [program.clone()]}), json!([program.clone()])] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/programs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let programs = FitrackClient::new(server.uri())
            .unwrap()
            .list_programs()
            .await
            .unwrap();

        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].program_type, ProgramType::Strength);
        assert_eq!(programs[0].duration_weeks, Some(12));
    }
}

#[tokio::test]
async fn test_create_program_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/programs"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "Cardio",
            "duration_weeks": 8,
            "type": "cardio"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": 7, "name": "Cardio", "duration_weeks": 8, "type": "cardio"}
        })))
        .mount(&server)
        .await;

    let client = FitrackClient::new(server.uri()).unwrap();
    let created = client
        .create_program(&NewProgram {
            name: "Cardio".to_string(),
            description: None,
            duration_weeks: Some(8),
            program_type: ProgramType::Cardio,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn test_update_program_sends_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/programs/7"))
        .and(body_json(json!({"name": "Cardio II"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Cardio II", "type": "cardio"
        })))
        .mount(&server)
        .await;

    let client = FitrackClient::new(server.uri()).unwrap();
    let updated = client
        .update_program(
            7,
            &ProgramUpdate {
                name: Some("Cardio II".to_string()),
                ..ProgramUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Cardio II");
}

#[tokio::test]
async fn test_delete_program_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/programs/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = FitrackClient::new(server.uri()).unwrap();
    client.delete_program(7).await.unwrap();
}

#[tokio::test]
async fn test_list_sessions_scoped_to_program() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programs/3/training-sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "program_id": 3, "name": "Pierna"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/training-sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = FitrackClient::new(server.uri()).unwrap();

    let scoped = client.list_sessions(Some(3)).await.unwrap();
    assert_eq!(scoped[0].program_id, Some(3));
    assert!(scoped[0].exercises.is_empty());

    let all = client.list_sessions(None).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_get_session_with_exercises() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/training-sessions/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 4,
                "name": "Empuje",
                "exercises": [
                    {"id": 1, "name": "Press banca", "sets": 5, "reps": 5, "weight": 80.0},
                    {"id": 2, "name": "Fondos", "sets": 3, "reps": 12, "weight": 0}
                ]
            }
        })))
        .mount(&server)
        .await;

    let session = FitrackClient::new(server.uri())
        .unwrap()
        .get_session(4)
        .await
        .unwrap();

    assert_eq!(session.exercises.len(), 2);
    let sets: u32 = session.exercises.iter().map(|e| e.sets).sum();
    assert_eq!(sets, 8);
}

#[tokio::test]
async fn test_create_session_posts_program() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/training-sessions"))
        .and(body_json(json!({"program_id": 3, "name": "Tirón", "duration_minutes": 60})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "program_id": 3, "name": "Tirón", "duration_minutes": 60
        })))
        .mount(&server)
        .await;

    let session = FitrackClient::new(server.uri())
        .unwrap()
        .create_session(&NewTrainingSession {
            program_id: 3,
            name: "Tirón".to_string(),
            description: None,
            duration_minutes: Some(60),
        })
        .await
        .unwrap();

    assert_eq!(session.id, 9);
}

#[tokio::test]
async fn test_exercise_routes_are_nested_under_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/training-sessions/4/exercises"))
        .and(body_json(json!({"name": "Remo", "sets": 4, "reps": 10, "weight": 60.0})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": 11, "session_id": 4, "name": "Remo", "sets": 4, "reps": 10, "weight": 60.0}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/training-sessions/4/exercises/11"))
        .and(body_json(json!({"reps": 8})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "name": "Remo", "sets": 4, "reps": 8, "weight": 60.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/training-sessions/4/exercises/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = FitrackClient::new(server.uri()).unwrap();

    let added = client
        .add_exercise(
            4,
            &NewExercise {
                name: "Remo".to_string(),
                sets: 4,
                reps: 10,
                weight: 60.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(added.session_id, Some(4));

    let updated = client
        .update_exercise(
            4,
            11,
            &ExerciseUpdate {
                reps: Some(8),
                ..ExerciseUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.reps, 8);

    client.delete_exercise(4, 11).await.unwrap();
}

#[tokio::test]
async fn test_users_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc", "name": "Coach", "role": "coach"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": 5, "name": "Ana", "email": "ana@example.com"}
        })))
        .mount(&server)
        .await;

    let client = FitrackClient::new(server.uri()).unwrap();

    let coach = client.get_user(&UserId::from("abc")).await.unwrap();
    assert!(coach.has_role("coach"));

    let created = client
        .create_user(&NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "s3cret".to_string(),
            role: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, Some(UserId::Number(5)));
}

#[tokio::test]
async fn test_error_status_mapping() {
    let server = MockServer::start().await;
    for (status, id) in [(403, 1), (404, 2), (400, 3), (422, 4)] {
        Mock::given(method("GET"))
            .and(path(format!("/programs/{id}")))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .mount(&server)
            .await;
    }

    let h = harness(&server.uri());
    h.client.credentials().save("T1", None).unwrap();

    assert!(matches!(h.client.get_program(1).await, Err(ClientError::Forbidden(_))));
    assert!(matches!(h.client.get_program(2).await, Err(ClientError::NotFound(_))));
    assert!(matches!(h.client.get_program(3).await, Err(ClientError::BadRequest(_))));
    assert!(matches!(h.client.get_program(4).await, Err(ClientError::Validation(_))));

    // only 401 ends the session
    assert!(h.client.credentials().has_token());
    assert_eq!(h.expiries.count(), 0);
}

#[tokio::test]
async fn test_unreachable_backend_is_request_error() {
    let client = FitrackClient::new("http://127.0.0.1:1").unwrap();
    let err = client.list_programs().await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
    assert_eq!(err.status(), None);
}
