//! Local upload endpoint for tests: records the multipart parts it receives
//! and answers with a fixed status and body.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<ReceivedPart>>>,
}

pub struct TestServer {
    pub url: String,
    received: Arc<Mutex<Vec<ReceivedPart>>>,
}

impl TestServer {
    pub fn start(status: u16, body: &str) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        let received = Arc::new(Mutex::new(Vec::new()));
        let reply = Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            received: received.clone(),
        };

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let app = Router::new().route("/", post(receive)).with_state(reply);
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self {
            url: format!("http://{}/", addr),
            received,
        }
    }

    pub fn received(&self) -> Vec<ReceivedPart> {
        self.received.lock().unwrap().clone()
    }
}

async fn receive(State(reply): State<Reply>, mut multipart: Multipart) -> (StatusCode, String) {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        reply.received.lock().unwrap().push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    (reply.status, reply.body.clone())
}

/// Address nobody listens on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
