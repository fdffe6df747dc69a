// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for scripting Kubernetes API server responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

pub const NAMESPACE: &str = "default";
pub const PODS_PATH: &str = "/api/v1/namespaces/default/pods";

/// A request as seen by the mock API server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: serde_json::Value,
}

enum Reply {
    Respond { status: u16, body: String },
    Hang,
}

struct Exchange {
    method: String,
    path: String,
    reply: Reply,
}

/// A mock HTTP service that answers requests in the exact order they were scripted.
/// Requests that don't match the next scripted exchange get a 500 Status response.
#[derive(Clone, Default)]
pub struct MockService {
    script: Arc<Mutex<VecDeque<Exchange>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next response for a request with the given method and path
    pub fn expect(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.push(
            method,
            path,
            Reply::Respond {
                status,
                body: body.to_string(),
            },
        )
    }

    /// Script a request that never gets a response
    pub fn expect_hang(self, method: &str, path: &str) -> Self {
        self.push(method, path, Reply::Hang)
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.expect("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.expect("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.expect("PUT", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.expect("PATCH", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.expect("DELETE", path, status, body)
    }

    /// Script a watch response streaming the given newline-delimited events
    pub fn on_watch(self, path: &str, events: &[String]) -> Self {
        self.expect("GET", path, 200, &events.join(""))
    }

    /// Build a kube Client from this mock service. The service stays inspectable through `self`.
    pub fn client(&self) -> Client {
        Client::new(self.clone(), NAMESPACE)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of scripted exchanges that were never requested
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }

    fn push(self, method: &str, path: &str, reply: Reply) -> Self {
        self.script.lock().unwrap().push_back(Exchange {
            method: method.to_string(),
            path: path.to_string(),
            reply,
        });
        self
    }

    fn next_reply(&self, method: &str, path: &str) -> Reply {
        let mut script = self.script.lock().unwrap();
        match script.front() {
            Some(next) if next.method == method && next.path == path => {
                script.pop_front().map(|e| e.reply).unwrap()
            }
            Some(next) => Reply::Respond {
                status: 500,
                body: status_json(
                    500,
                    "InternalError",
                    &format!(
                        "unexpected {} {}, expected {} {}",
                        method, path, next.method, next.path
                    ),
                ),
            },
            None => Reply::Respond {
                status: 500,
                body: status_json(
                    500,
                    "InternalError",
                    &format!("unexpected {} {}, script exhausted", method, path),
                ),
            },
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or_default().to_string();

        let reply = self.next_reply(&method, &path);
        let requests = self.requests.clone();
        let recorded = RecordedRequest {
            method,
            path,
            query,
            body: serde_json::Value::Null,
        };

        Box::pin(respond(req, recorded, reply, requests))
    }
}

async fn respond(
    req: Request<Body>,
    mut recorded: RecordedRequest,
    reply: Reply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) -> Result<Response<Body>, tower::BoxError> {
    let bytes = req.into_body().collect().await?.to_bytes();
    recorded.body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    requests.lock().unwrap().push(recorded);

    match reply {
        Reply::Respond { status, body } => Ok(Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(Body::from(body.into_bytes()))?),
        Reply::Hang => std::future::pending().await,
    }
}

pub fn pod_path(name: &str) -> String {
    format!("{}/{}", PODS_PATH, name)
}

/// Create a mock pod JSON object
pub fn pod_value(
    name: &str,
    resource_version: &str,
    ready: Option<bool>,
    annotations: &[(&str, &str)],
) -> serde_json::Value {
    let mut pod = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": NAMESPACE,
            "uid": "test-uid",
            "resourceVersion": resource_version,
        },
        "spec": {
            "containers": [{ "name": name, "image": "openshift/hello-openshift" }],
            "terminationGracePeriodSeconds": 0
        }
    });
    if !annotations.is_empty() {
        let map: serde_json::Map<String, serde_json::Value> = annotations
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
            .collect();
        pod["metadata"]["annotations"] = serde_json::Value::Object(map);
    }
    if let Some(ready) = ready {
        pod["status"] = serde_json::json!({
            "phase": if ready { "Running" } else { "Pending" },
            "conditions": [{
                "type": "Ready",
                "status": if ready { "True" } else { "False" }
            }]
        });
    }
    pod
}

pub fn pod_json(
    name: &str,
    resource_version: &str,
    ready: Option<bool>,
    annotations: &[(&str, &str)],
) -> String {
    pod_value(name, resource_version, ready, annotations).to_string()
}

/// A single line of a watch response
pub fn watch_event(event_type: &str, object: serde_json::Value) -> String {
    format!(
        "{}\n",
        serde_json::json!({ "type": event_type, "object": object })
    )
}

/// Create a Status failure body as returned by the API server
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(name: &str) -> String {
    status_json(404, "NotFound", &format!("pods \"{}\" not found", name))
}

/// Create a 409 conflict response for a stale resourceVersion
pub fn conflict_json(name: &str) -> String {
    status_json(
        409,
        "Conflict",
        &format!(
            "Operation cannot be fulfilled on pods \"{}\": the object has been modified; please apply your changes to the latest version and try again",
            name
        ),
    )
}
