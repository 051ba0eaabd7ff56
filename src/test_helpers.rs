//! Scripted transport for unit tests.

use crate::endpoints::{EndpointLabel, ItemEndpoints, RequestTarget};
use crate::error::{Error, Result};
use crate::transport::{Transport, TransportResponse};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
enum Reply {
    Respond(TransportResponse),
    Fail,
}

#[derive(Clone)]
struct Script {
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Default)]
struct InFlight {
    current: usize,
    max: usize,
}

/// In-memory [`Transport`] answering from a per-URL script.
///
/// Unscripted URLs get the fallback response (404 unless changed). Every request
/// is logged, and concurrent requests are counted per endpoint label.
pub(crate) struct ScriptedTransport {
    scripts: HashMap<String, Script>,
    fallback: Script,
    log: Mutex<Vec<RequestTarget>>,
    in_flight: Mutex<HashMap<EndpointLabel, InFlight>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: Script {
                reply: Reply::Respond(TransportResponse::new(404, Vec::new())),
                delay: None,
            },
            log: Mutex::new(Vec::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn respond(self, url: &Url, status: u16, body: serde_json::Value) -> Self {
        let body = serde_json::to_vec(&body).unwrap_or_default();
        self.respond_raw(url, status, body)
    }

    pub(crate) fn respond_raw(mut self, url: &Url, status: u16, body: Vec<u8>) -> Self {
        let delay = self.scripts.get(url.as_str()).and_then(|s| s.delay);
        self.scripts.insert(
            url.to_string(),
            Script {
                reply: Reply::Respond(TransportResponse::new(status, body)),
                delay,
            },
        );
        self
    }

    pub(crate) fn fail(mut self, url: &Url) -> Self {
        self.scripts.insert(
            url.to_string(),
            Script {
                reply: Reply::Fail,
                delay: None,
            },
        );
        self
    }

    /// Delay the scripted reply for `url`; must follow its `respond`/`fail` call
    pub(crate) fn delay(mut self, url: &Url, delay: Duration) -> Self {
        if let Some(script) = self.scripts.get_mut(url.as_str()) {
            script.delay = Some(delay);
        }
        self
    }

    pub(crate) fn fallback(
        mut self,
        status: u16,
        body: serde_json::Value,
        delay: Option<Duration>,
    ) -> Self {
        let body = serde_json::to_vec(&body).unwrap_or_default();
        self.fallback = Script {
            reply: Reply::Respond(TransportResponse::new(status, body)),
            delay,
        };
        self
    }

    /// Script 200 responses for every sub-resource of a product. Each body is
    /// `{"label": <label>, "id": <id>}`.
    pub(crate) fn item_ok(self, endpoints: &ItemEndpoints) -> Self {
        let id = endpoints.id.get();
        [
            &endpoints.main,
            &endpoints.detail,
            &endpoints.price_history,
            &endpoints.sold_count,
            &endpoints.seller,
        ]
        .into_iter()
        .fold(self, |transport, target| {
            transport.respond(
                &target.url,
                200,
                serde_json::json!({"label": target.label.as_str(), "id": id}),
            )
        })
    }

    pub(crate) fn requests(&self) -> Vec<RequestTarget> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests().len()
    }

    pub(crate) fn requests_for(&self, label: EndpointLabel) -> Vec<Url> {
        self.requests()
            .into_iter()
            .filter(|t| t.label == label)
            .map(|t| t.url)
            .collect()
    }

    /// Highest number of simultaneously pending requests seen for `label`
    pub(crate) fn max_in_flight(&self, label: EndpointLabel) -> usize {
        self.in_flight
            .lock()
            .ok()
            .and_then(|m| m.get(&label).map(|f| f.max))
            .unwrap_or(0)
    }

    fn enter(&self, label: EndpointLabel) {
        if let Ok(mut map) = self.in_flight.lock() {
            let entry = map.entry(label).or_default();
            entry.current += 1;
            entry.max = entry.max.max(entry.current);
        }
    }

    fn leave(&self, label: EndpointLabel) {
        if let Ok(mut map) = self.in_flight.lock()
            && let Some(entry) = map.get_mut(&label)
        {
            entry.current -= 1;
        }
    }
}

struct InFlightGuard<'a> {
    transport: &'a ScriptedTransport,
    label: EndpointLabel,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.transport.leave(self.label);
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, target: &RequestTarget) -> Result<TransportResponse> {
        if let Ok(mut log) = self.log.lock() {
            log.push(target.clone());
        }
        self.enter(target.label);
        let _guard = InFlightGuard {
            transport: self,
            label: target.label,
        };

        let script = self
            .scripts
            .get(target.url.as_str())
            .unwrap_or(&self.fallback)
            .clone();

        if let Some(delay) = script.delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        match script.reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail => Err(Error::Other(format!("connection reset: {}", target.url))),
        }
    }
}
