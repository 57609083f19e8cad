//! Mock drivers and fixtures for studio tests.

#![allow(dead_code)]

use async_trait::async_trait;
use fabula_core::{ChatMessage, GeneratedImage, ImageSize};
use fabula_engine::{EngineCatalog, ProviderId};
use fabula_error::{FabulaResult, HttpError, ModelsError, ModelsErrorKind, ModelsResult};
use fabula_interface::{
    DocumentExtractor, DriverSet, ImageDriver, PageRasterizer, TextDriver, UrlFetcher,
};
use fabula_storage::{MemoryObjectStore, MemoryRecordStore, PlainTextExtractor};
use fabula_studio::Studio;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Text driver that pops scripted replies and records every request.
pub struct MockTextDriver {
    replies: Mutex<Vec<String>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    fail: bool,
}

impl MockTextDriver {
    /// Replies are served in order; once exhausted, a fixed default is used.
    pub fn with_replies(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().map(String::from).collect()),
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The message sequence of call `index`.
    pub fn call(&self, index: usize) -> Vec<ChatMessage> {
        self.calls.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    async fn send_chat(&self, _model: &str, messages: &[ChatMessage]) -> ModelsResult<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if self.fail {
            return Err(ModelsError::new(ModelsErrorKind::ProviderRejected {
                status: 503,
                detail: "mock outage".to_string(),
            }));
        }
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| "mock reply".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Image driver returning a fixed payload, or failing on demand.
pub struct MockImageDriver {
    calls: AtomicUsize,
    fail: bool,
}

impl MockImageDriver {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn generate_image(
        &self,
        _model: &str,
        _prompt: &str,
        _size: ImageSize,
    ) -> ModelsResult<GeneratedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ModelsError::new(ModelsErrorKind::NoImageData));
        }
        Ok(GeneratedImage::new(
            b"mock-png".to_vec(),
            "image/png".to_string(),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Driver set serving the same mocks for every provider tag.
pub struct MockDriverSet {
    pub text: Arc<MockTextDriver>,
    pub image: Arc<MockImageDriver>,
}

impl DriverSet for MockDriverSet {
    fn text_driver(&self, _provider: ProviderId) -> &dyn TextDriver {
        self.text.as_ref()
    }

    fn image_driver(&self, _provider: ProviderId) -> &dyn ImageDriver {
        self.image.as_ref()
    }
}

/// Rasterizer stub with a scripted outcome and a call counter.
pub struct StubRasterizer {
    result: Option<String>,
    calls: AtomicUsize,
}

impl StubRasterizer {
    pub fn succeeding(url: &str) -> Self {
        Self {
            result: Some(url.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRasterizer for StubRasterizer {
    async fn rasterize(&self, _pdf_url: &str, _pages: &str) -> FabulaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Some(url) => Ok(url.clone()),
            None => Err(HttpError::new("stub rasterizer outage").into()),
        }
    }
}

/// Fetcher stub returning fixed bytes.
pub struct StubFetcher;

#[async_trait]
impl UrlFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> FabulaResult<Vec<u8>> {
        Ok(b"rasterized-page".to_vec())
    }
}

/// A canon reply with one character and one location, list/byId consistent.
pub fn sample_canon_json() -> String {
    r#"{
        "plot": {
            "title": "Tide Road",
            "logline": "A ferry pilot smuggles memories between drowned cities.",
            "synopsis": "Setup, conflict, resolution."
        },
        "characters": {
            "list": [
                {"id": "ash", "name": "Ash Calder", "occupation": "Ferry pilot", "role": "Protagonist", "bio": "Runs the tide road."}
            ],
            "byId": {
                "ash": {
                    "id": "ash",
                    "name": "Ash Calder",
                    "occupation": "Ferry pilot",
                    "role": "Protagonist",
                    "shortBio": "Runs the tide road.",
                    "longBio": "Haunted by a flooded childhood.",
                    "visualNotes": "Salt-bleached coat, storm lantern.",
                    "goals": "Buy back the family mooring.",
                    "flaws": "Cannot refuse a memory job.",
                    "relationships": [{"name": "Mirren", "relation": "rival"}],
                    "keyScenes": ["The lantern handoff"]
                }
            }
        },
        "locations": {
            "list": [
                {"id": "harbor", "name": "Lowlight Harbor", "world": "The Drowned Coast", "region": "South Reach", "placeType": "Port", "note": "Half-sunk market town."}
            ],
            "byId": {
                "harbor": {
                    "id": "harbor",
                    "name": "Lowlight Harbor",
                    "world": "The Drowned Coast",
                    "region": "South Reach",
                    "placeType": "Port",
                    "moodLine": "Lanterns on black water.",
                    "description": "Stilt walks over flooded streets.",
                    "functionInStory": "Home port and refuge.",
                    "recurringTimeOrWeather": "Night fog.",
                    "keyScenes": ["The auction raid"]
                }
            }
        },
        "artStyle": {
            "aesthetic": "Painterly, lantern-lit realism.",
            "palette": "Deep teals #0a1018 against amber #ffd16f."
        },
        "worldRules": {
            "physicsMagic": "Memories can be bottled and traded.",
            "technology": "Diesel and rope, nothing airborne.",
            "society": "Mooring rights decide everything."
        }
    }"#
    .to_string()
}

/// Studio over in-memory backends and the given mocks.
pub struct TestHarness {
    pub studio: Studio,
    pub text: Arc<MockTextDriver>,
    pub image: Arc<MockImageDriver>,
    pub records: Arc<MemoryRecordStore>,
    pub objects: Arc<MemoryObjectStore>,
}

pub struct TestHarnessBuilder {
    text: MockTextDriver,
    image: MockImageDriver,
    rasterizer: Option<StubRasterizer>,
}

impl TestHarnessBuilder {
    pub fn new() -> Self {
        Self {
            text: MockTextDriver::with_replies(vec![]),
            image: MockImageDriver::succeeding(),
            rasterizer: None,
        }
    }

    pub fn text(mut self, text: MockTextDriver) -> Self {
        self.text = text;
        self
    }

    pub fn image(mut self, image: MockImageDriver) -> Self {
        self.image = image;
        self
    }

    pub fn rasterizer(mut self, rasterizer: StubRasterizer) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn build(self) -> (TestHarness, Option<Arc<StubRasterizer>>) {
        let text = Arc::new(self.text);
        let image = Arc::new(self.image);
        let records = Arc::new(MemoryRecordStore::new());
        let objects = Arc::new(MemoryObjectStore::new("memory://cdn"));

        let drivers = Arc::new(MockDriverSet {
            text: Arc::clone(&text),
            image: Arc::clone(&image),
        });

        let mut studio = Studio::new(
            EngineCatalog::standard(),
            drivers,
            Arc::clone(&records) as Arc<dyn fabula_interface::RecordStore>,
            Arc::clone(&objects) as Arc<dyn fabula_interface::ObjectStore>,
            Arc::new(PlainTextExtractor::new()) as Arc<dyn DocumentExtractor>,
        );

        let rasterizer = self.rasterizer.map(Arc::new);
        if let Some(r) = &rasterizer {
            studio = studio.with_rasterizer(
                Arc::clone(r) as Arc<dyn PageRasterizer>,
                Arc::new(StubFetcher) as Arc<dyn UrlFetcher>,
            );
        }

        (
            TestHarness {
                studio,
                text,
                image,
                records,
                objects,
            },
            rasterizer,
        )
    }
}

/// A whitespace-separated script with exactly `words` words.
pub fn script_of_words(words: usize) -> Vec<u8> {
    (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
        .into_bytes()
}
