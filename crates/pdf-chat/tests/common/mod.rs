//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, Stream,
};
use tower::ServiceExt;

use pdf_chat::{
    config::AppConfig,
    providers::{EmbeddingProvider, LlmProvider},
    server::{state::AppState, PdfChatServer},
    Error, Result,
};

const BOUNDARY: &str = "pdf-chat-test-boundary";

/// Letter-histogram embedder. `fail_documents` makes document embedding
/// fail with `failure` while queries keep working.
pub struct TestEmbedder {
    failure: &'static str,
    fail_documents: AtomicBool,
    document_calls: AtomicUsize,
}

impl TestEmbedder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            failure: "",
            fail_documents: AtomicBool::new(false),
            document_calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(failure: &'static str) -> Arc<Self> {
        Arc::new(Self {
            failure,
            fail_documents: AtomicBool::new(true),
            document_calls: AtomicUsize::new(0),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_documents.store(failing, Ordering::SeqCst);
    }

    pub fn document_calls(&self) -> usize {
        self.document_calls.load(Ordering::SeqCst)
    }

    fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; 27];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            v[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }
        v[26] = 0.01;
        v
    }
}

#[async_trait]
impl EmbeddingProvider for TestEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.document_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_documents.load(Ordering::SeqCst) {
            return Err(Error::embedding(self.failure));
        }
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector(text))
    }

    fn name(&self) -> &str {
        "test"
    }
}

/// Chat model with a canned answer, or a canned failure
pub struct TestLlm {
    failure: Option<&'static str>,
    calls: AtomicUsize,
}

impl TestLlm {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            failure: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(failure: &'static str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(failure),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for TestLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(failure) => Err(Error::llm(failure)),
            None => Ok(format!("Based on the document ({} prompt chars).", prompt.len())),
        }
    }

    fn name(&self) -> &str {
        "test"
    }

    fn model(&self) -> &str {
        "test-model"
    }
}

/// Config with instant retries and uploads staged in `temp_dir`
pub fn test_config(temp_dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.retry.initial_delay_secs = 0;
    config.ingestion.temp_dir = Some(temp_dir.to_path_buf());
    config
}

pub fn router(
    config: AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
) -> Router {
    let state = AppState::with_providers(config, embedder, llm);
    PdfChatServer::with_state(state)
        .router()
        .expect("valid router")
}

/// One-font PDF with a page per entry of `pages`
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

pub fn upload_request(filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

pub fn chat_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn dir_is_empty(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}
