//! HTTP-level tests for the API client and the streaming pipeline,
//! against a wiremock backend.

use creddypens_core::models::{OutputFormat, TaskStatus};
use creddypens_core::{
    ApiClient, ChatSession, CreddyError, OrgContext, StreamEvent, WorkflowDraft,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_org(server.uri(), OrgContext::Authenticated("org_test".to_string()))
}

fn signed_out_client(server: &MockServer) -> ApiClient {
    ApiClient::with_org(server.uri(), OrgContext::Unauthenticated)
}

#[tokio::test]
async fn lists_agents_from_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "agent_id": "a1",
                "code": "AUTHOR-01",
                "role": "Copywriter",
                "department": "Marketing",
                "price_cents": 4900
            }
        ])))
        .mount(&server)
        .await;

    let agents = client_for(&server).list_agents(None).await.unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].code, "AUTHOR-01");
    assert_eq!(agents[0].price_monthly(), 49);
}

#[tokio::test]
async fn execute_sends_org_header_and_decodes_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/execute"))
        .and(header("X-Org-Id", "org_test"))
        .and(body_partial_json(serde_json::json!({
            "message": "Write a tagline"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "agent_code": "AUTHOR-01",
            "response": "Ship faster.",
            "model_used": "gpt-4o-mini",
            "latency_ms": 320,
            "tokens_used": 12,
            "trace_id": "t1",
            "session_id": "chat-abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ChatSession::new("AUTHOR-01");
    let request = session.begin_send("Write a tagline").unwrap();

    let response = client_for(&server)
        .execute_agent("AUTHOR-01", &request)
        .await
        .unwrap();
    session.finish_response(response);

    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].content, "Ship faster.");
    assert_eq!(
        session.messages()[1].metadata.as_ref().unwrap().latency_ms,
        320
    );
    assert!(!session.is_streaming());
}

#[tokio::test]
async fn non_2xx_extracts_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/agents/GHOST-99/execute"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "detail": "Agent not hired for organization"
        })))
        .mount(&server)
        .await;

    let mut session = ChatSession::new("GHOST-99");
    let request = session.begin_send("hello").unwrap();
    let err = client_for(&server)
        .execute_agent("GHOST-99", &request)
        .await
        .unwrap_err();

    match err {
        CreddyError::ApiStatus { status, detail } => {
            assert_eq!(status, 403);
            assert_eq!(detail, "Agent not hired for organization");
        }
        other => panic!("expected ApiStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn org_scoped_calls_issue_no_requests_when_signed_out() {
    let server = MockServer::start().await;
    // Any request reaching the server fails the test.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = signed_out_client(&server);

    assert!(matches!(
        client.list_hired_agents().await.unwrap_err(),
        CreddyError::SignInRequired
    ));
    assert!(matches!(
        client.dashboard_stats().await.unwrap_err(),
        CreddyError::SignInRequired
    ));
    assert!(matches!(
        client.list_memories().await.unwrap_err(),
        CreddyError::SignInRequired
    ));
    assert!(matches!(
        client.academy_status().await.unwrap_err(),
        CreddyError::SignInRequired
    ));
}

#[tokio::test]
async fn streaming_tokens_then_done_reaches_terminal_text() {
    let server = MockServer::start().await;
    let body = "event: token\ndata: {\"partial\":\"Hello\"}\n\n\
                event: token\ndata: {\"partial\":\"Hello there\"}\n\n\
                event: done\ndata: {\"response\":\"Hello there!\",\"latency_ms\":120,\"model_used\":\"gpt-4o-mini\"}\n\n";
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/execute/stream"))
        .and(header("X-Org-Id", "org_test"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let mut session = ChatSession::new("AUTHOR-01");
    let request = session.begin_send("Write a tagline").unwrap();
    let mut stream = client_for(&server)
        .execute_agent_stream("AUTHOR-01", &request)
        .unwrap();

    let mut displayed = Vec::new();
    while let Some(event) = stream.next_event().await {
        match event {
            StreamEvent::Token { partial } => {
                session.apply_token(partial);
                displayed.push(session.partial().to_string());
            }
            StreamEvent::Done(done) => session.finish_stream(done),
            StreamEvent::Error { message } => session.fail(&message),
        }
    }

    assert_eq!(displayed, vec!["Hello", "Hello there"]);
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].content, "Hello there!");
    assert_eq!(
        session.messages()[1].metadata.as_ref().unwrap().latency_ms,
        120
    );
    assert!(!session.is_streaming());
}

#[tokio::test]
async fn streaming_error_event_fails_the_session() {
    let server = MockServer::start().await;
    let body = "event: token\ndata: {\"partial\":\"Hel\"}\n\n\
                event: error\ndata: {\"error\":\"model overloaded\"}\n\n";
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/execute/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let mut session = ChatSession::new("AUTHOR-01");
    let request = session.begin_send("hi").unwrap();
    let mut stream = client_for(&server)
        .execute_agent_stream("AUTHOR-01", &request)
        .unwrap();

    let mut saw_error = false;
    while let Some(event) = stream.next_event().await {
        match event {
            StreamEvent::Token { partial } => session.apply_token(partial),
            StreamEvent::Done(done) => session.finish_stream(done),
            StreamEvent::Error { message } => {
                saw_error = true;
                session.fail(&message);
            }
        }
    }

    assert!(saw_error);
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].content, creddypens_core::ERROR_MESSAGE);
}

#[tokio::test]
async fn streaming_http_failure_surfaces_as_error_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/execute/stream"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "detail": "backend saturated"
        })))
        .mount(&server)
        .await;

    let request = ChatSession::new("AUTHOR-01").begin_send("hi").unwrap();
    let mut stream = client_for(&server)
        .execute_agent_stream("AUTHOR-01", &request)
        .unwrap();

    match stream.next_event().await {
        Some(StreamEvent::Error { message }) => assert!(message.contains("backend saturated")),
        other => panic!("expected error event, got {:?}", other),
    }
    assert!(stream.next_event().await.is_none());
}

#[tokio::test]
async fn streaming_body_without_terminal_event_yields_stream_closed() {
    let server = MockServer::start().await;
    let body = "event: token\ndata: {\"partial\":\"Hel\"}\n\n";
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/execute/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let request = ChatSession::new("AUTHOR-01").begin_send("hi").unwrap();
    let mut stream = client_for(&server)
        .execute_agent_stream("AUTHOR-01", &request)
        .unwrap();

    assert!(matches!(
        stream.next_event().await,
        Some(StreamEvent::Token { .. })
    ));
    match stream.next_event().await {
        Some(StreamEvent::Error { message }) => {
            assert!(message.contains("Stream closed before completion"))
        }
        other => panic!("expected synthetic error, got {:?}", other),
    }
}

#[tokio::test]
async fn aborted_stream_yields_no_terminal_events() {
    let server = MockServer::start().await;
    let body = "event: done\ndata: {\"response\":\"too late\"}\n\n";
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/execute/stream"))
        // Delay so the abort lands before the body is read.
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "text/event-stream")
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let request = ChatSession::new("AUTHOR-01").begin_send("hi").unwrap();
    let mut stream = client_for(&server)
        .execute_agent_stream("AUTHOR-01", &request)
        .unwrap();

    stream.abort();
    assert!(stream.next_event().await.is_none());
    assert!(stream.try_next_event().is_none());
}

#[tokio::test]
async fn workflow_executes_atomically_and_renders_trace_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/execute"))
        .and(header("X-Org-Id", "org_test"))
        .and(body_partial_json(serde_json::json!({
            "initial_message": "Draft a plan",
            "steps": [
                {"agent_code": "A"},
                {"agent_code": "B", "use_previous_response": true}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "workflow_id": "wf_1",
            "session_id": "wf-abc",
            "final_response": "Plan complete.",
            "steps": [
                {"step_index": 0, "agent_code": "A", "response": "outline",
                 "latency_ms": 100, "model_used": "m", "trace_id": "t0"},
                {"step_index": 1, "agent_code": "B", "response": "Plan complete.",
                 "latency_ms": 150, "model_used": "m", "trace_id": "t1"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut draft = WorkflowDraft::new("A");
    draft.initial_message = "Draft a plan".to_string();
    draft.add_step("B");

    let request = draft.to_request().unwrap();
    let result = client_for(&server).execute_workflow(&request).await.unwrap();

    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.steps[0].step_index, 0);
    assert_eq!(result.steps[1].step_index, 1);
    assert_eq!(result.final_response, "Plan complete.");
}

#[tokio::test]
async fn invalid_workflow_draft_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut draft = WorkflowDraft::new("A");
    // No initial message.
    assert!(draft.to_request().is_err());

    // Blank agent code on a later step.
    draft.initial_message = "Draft a plan".to_string();
    draft.add_step("  ");
    assert!(draft.to_request().is_err());
}

#[tokio::test]
async fn workflow_templates_and_schedules_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/templates"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "template_id": "tpl_1",
            "name": "Weekly digest",
            "steps": [{"agent_code": "A", "use_previous_response": true}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/templates/tpl_1/schedules"))
        .and(body_partial_json(serde_json::json!({
            "cron_expression": "0 9 * * 1",
            "timezone": "UTC"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "schedule_id": "sch_1",
            "template_id": "tpl_1",
            "template_name": "Weekly digest",
            "name": "Monday morning",
            "cron_expression": "0 9 * * 1",
            "next_run_at": "2026-08-10T09:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/schedules/sch_1/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "workflow": {
                "workflow_id": "wf_9",
                "session_id": "wf-now",
                "final_response": "Digest sent.",
                "steps": []
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let mut draft = WorkflowDraft::new("A");
    draft.initial_message = "Summarize the week".to_string();
    let template = client
        .save_workflow_template(&creddypens_core::models::WorkflowTemplateCreate {
            name: "Weekly digest".to_string(),
            description: String::new(),
            context: draft.to_request().unwrap().context,
            steps: draft.steps.clone(),
            is_active: true,
        })
        .await
        .unwrap();
    assert_eq!(template.template_id, "tpl_1");

    let schedule = client
        .create_workflow_schedule(
            &template.template_id,
            &creddypens_core::models::WorkflowScheduleCreate {
                name: "Monday morning".to_string(),
                cron_expression: "0 9 * * 1".to_string(),
                timezone: "UTC".to_string(),
                initial_message: "Summarize the week".to_string(),
                is_active: true,
            },
        )
        .await
        .unwrap();
    // next_run_at is displayed verbatim; the client does no cron math.
    assert_eq!(schedule.next_run_at.as_deref(), Some("2026-08-10T09:00:00Z"));

    let run = client
        .run_workflow_schedule(&schedule.schedule_id)
        .await
        .unwrap();
    assert_eq!(run.workflow.final_response, "Digest sent.");
}

#[tokio::test]
async fn checkout_distinguishes_mock_and_hosted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "mode": "mock"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/agents/LEDGER-02/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "mode": "stripe",
            "checkout_url": "https://checkout.example/cs_9"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let mock = client.checkout_agent("AUTHOR-01").await.unwrap();
    assert!(!mock.needs_redirect());

    let hosted = client.checkout_agent("LEDGER-02").await.unwrap();
    assert!(hosted.needs_redirect());
    assert_eq!(
        hosted.checkout_url.as_deref(),
        Some("https://checkout.example/cs_9")
    );
}

#[tokio::test]
async fn analytics_wrappers_pass_days_and_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/organizations/org_test/analytics/overview"))
        .and(query_param("days", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "days": 30,
            "total_interactions": 128,
            "avg_latency_ms": 812.5
        })))
        .mount(&server)
        .await;

    let overview = client_for(&server).analytics_overview(30).await.unwrap();
    assert_eq!(overview.total_interactions, 128);
    // Absent fields default rather than fail.
    assert_eq!(overview.avg_quality_score, 0.0);
}

#[tokio::test]
async fn inbox_task_status_update() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/inbox/tasks/t1/status"))
        .and(body_partial_json(serde_json::json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "t1",
            "org_id": "org_test",
            "task_title": "Review launch email",
            "status": "completed"
        })))
        .mount(&server)
        .await;

    let task = client_for(&server)
        .set_inbox_task_status("t1", TaskStatus::Completed)
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
}

#[tokio::test]
async fn chat_output_format_round_trips_through_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/agents/AUTHOR-01/execute"))
        .and(body_partial_json(serde_json::json!({
            "context": {"output_format": "markdown", "web_search": true}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "agent_code": "AUTHOR-01",
            "response": "# done",
            "model_used": "m",
            "latency_ms": 10,
            "trace_id": "t",
            "session_id": "chat-x"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ChatSession::new("AUTHOR-01");
    session.output_format = OutputFormat::Markdown;
    session.web_search = true;
    let request = session.begin_send("format this").unwrap();

    client_for(&server)
        .execute_agent("AUTHOR-01", &request)
        .await
        .unwrap();
}
