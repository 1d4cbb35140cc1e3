//! Tests for the webhook router ([`dbot_telegram::build_router`]) and the update worker.
//!
//! External interactions: none; the router is driven with `tower::ServiceExt::oneshot`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use dbot_core::{Handler, HandlerResponse, Result, Update};
use dbot_telegram::{build_router, run_worker, update_queue, UpdateQueue, UpdateReceiver};
use handler_chain::HandlerChain;
use tower::ServiceExt;

const TOKEN: &str = "123456:test-token";

const MESSAGE_UPDATE: &str = r#"{"update_id":1,"message":{"message_id":7,"date":1700000000,
    "chat":{"id":42,"type":"private","first_name":"Ann"},
    "from":{"id":42,"is_bot":false,"first_name":"Ann"},
    "text":"http://example.com/a"}}"#;

const CALLBACK_UPDATE: &str = r#"{"update_id":2,"callback_query":{"id":"cb-1",
    "from":{"id":42,"is_bot":false,"first_name":"Ann"},
    "chat_instance":"ci","data":"length:short"}}"#;

fn router() -> (Router, UpdateReceiver) {
    let (queue, rx) = update_queue();
    (build_router(TOKEN, teloxide::Bot::new(TOKEN), queue), rx)
}

async fn call(router: Router, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// **Test: Health check answers OK.**
#[tokio::test]
async fn health_check_returns_ok() {
    let (router, _rx) = router();
    let (status, body) = call(router, "GET", "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

/// **Test: A valid update is acknowledged with `ok` and queued as a core message.**
#[tokio::test]
async fn valid_update_is_queued() {
    let (router, mut rx) = router();
    let (status, body) = call(router, "POST", &format!("/{TOKEN}"), MESSAGE_UPDATE).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    match rx.try_recv().unwrap() {
        Update::Message(m) => {
            assert_eq!(m.user.id, 42);
            assert_eq!(m.chat.id, 42);
            assert_eq!(m.content, "http://example.com/a");
        }
        other => panic!("unexpected update {:?}", other),
    }
}

/// **Test: A button press is queued as a core callback while its acknowledgement runs in the background.**
#[tokio::test]
async fn callback_update_is_queued() {
    let (queue, mut rx) = update_queue();
    // Nothing listens here, so the acknowledgement fails and is only logged.
    let bot = teloxide::Bot::new(TOKEN)
        .set_api_url(reqwest::Url::parse("http://127.0.0.1:9/").unwrap());
    let router = build_router(TOKEN, bot, queue);

    let (status, body) = call(router, "POST", &format!("/{TOKEN}"), CALLBACK_UPDATE).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    match rx.try_recv().unwrap() {
        Update::Callback(c) => {
            assert_eq!(c.user.id, 42);
            assert_eq!(c.chat.id, 42);
            assert_eq!(c.data, "length:short");
        }
        other => panic!("unexpected update {:?}", other),
    }
}

/// **Test: Posting to any other path than the token is not found and queues nothing.**
#[tokio::test]
async fn wrong_token_is_not_found() {
    let (router, mut rx) = router();
    let (status, _) = call(router, "POST", "/not-the-token", MESSAGE_UPDATE).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(rx.try_recv().is_err());
}

/// **Test: A malformed payload is logged and answered with a failure status, without crashing.**
#[tokio::test]
async fn malformed_payload_is_error() {
    let (router, mut rx) = router();
    let (status, body) = call(router, "POST", &format!("/{TOKEN}"), "{not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "error");
    assert!(rx.try_recv().is_err());
}

struct RecordingHandler {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Handler for RecordingHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        self.seen.lock().unwrap().push(update.content().to_string());
        Ok(HandlerResponse::Stop)
    }
}

fn message(content: &str) -> Update {
    Update::Message(dbot_core::Message {
        id: "1".to_string(),
        user: dbot_core::User::with_id(42),
        chat: dbot_core::Chat {
            id: 42,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: chrono::Utc::now(),
    })
}

/// **Test: The worker handles queued updates in arrival order and stops when the queue closes.**
#[tokio::test]
async fn worker_processes_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new().add_handler(Arc::new(RecordingHandler { seen: seen.clone() }));
    let (queue, rx): (UpdateQueue, UpdateReceiver) = update_queue();

    for text in ["first", "second", "third"] {
        assert!(queue.push(message(text)));
    }
    drop(queue);
    run_worker(rx, chain).await;

    assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
}
