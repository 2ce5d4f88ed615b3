//! Local stand-in for the webhook automations, bound to an ephemeral port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

struct Shared {
    replies: Vec<(StatusCode, Value)>,
    hits: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
}

pub struct StubWebhook {
    base: String,
    shared: Arc<Shared>,
}

impl StubWebhook {
    /// Answers every path with `replies` in order, repeating the last one.
    pub async fn start(replies: Vec<(StatusCode, Value)>) -> Self {
        assert!(!replies.is_empty());
        let shared = Arc::new(Shared {
            replies,
            hits: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(reply).with_state(shared.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            shared,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.shared.bodies.lock().unwrap().last().cloned()
    }
}

async fn reply(
    State(shared): State<Arc<Shared>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let n = shared.hits.fetch_add(1, Ordering::SeqCst);
    shared.bodies.lock().unwrap().push(body);
    let (status, value) = shared.replies[n.min(shared.replies.len() - 1)].clone();
    (status, Json(value))
}
