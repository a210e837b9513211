//! Dispatches requests and classifies their outcome.
//!
//! # Design
//! `classify` is a pure function from a transport outcome to
//! `Result<P, NetworkError>`, so every status branch is testable without a
//! network. `Executor::fetch` runs the whole pipeline on the caller's thread;
//! `Executor::execute` runs it on a worker thread and hands the result to the
//! `CompletionQueue`, which invokes the callback exactly once.
//!
//! A closed connectivity gate ends the call before a request is built, so the
//! transport is never touched and only one completion is delivered.

use std::sync::{Arc, Mutex};
use std::thread;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::builder::RequestBuilder;
use crate::completion::CompletionQueue;
use crate::connectivity::ConnectivityGate;
use crate::error::{ErrorResponse, NetworkError};
use crate::http::{HttpRequest, HttpResponse};
use crate::request::RequestDescriptor;
use crate::transport::{Transport, TransportError};

#[derive(Clone)]
pub struct Executor {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    gate: Arc<dyn ConnectivityGate>,
    completions: CompletionQueue,
}

impl Executor {
    pub fn new(
        builder: RequestBuilder,
        transport: Arc<dyn Transport>,
        gate: Arc<dyn ConnectivityGate>,
        completions: CompletionQueue,
    ) -> Self {
        Self {
            builder,
            transport,
            gate,
            completions,
        }
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Run one call to completion on the current thread.
    pub fn fetch<P: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> Result<P, NetworkError> {
        if !self.gate.is_connected() {
            warn!(path = descriptor.path(), "not connected, request not sent");
            return Err(NetworkError::connectivity());
        }
        let request = self.builder.build(descriptor);
        dispatch(self.transport.as_ref(), &request)
    }

    /// Start one call and return immediately. `on_complete` runs exactly once,
    /// on the completion queue.
    pub fn execute<P, F>(&self, descriptor: RequestDescriptor, on_complete: F)
    where
        P: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<P, NetworkError>) + Send + 'static,
    {
        if !self.gate.is_connected() {
            warn!(path = descriptor.path(), "not connected, request not sent");
            self.completions
                .submit(move || on_complete(Err(NetworkError::connectivity())));
            return;
        }

        let request = self.builder.build(&descriptor);
        let transport = Arc::clone(&self.transport);
        let completions = self.completions.clone();
        let pending = Arc::new(Mutex::new(Some(on_complete)));
        let worker_pending = Arc::clone(&pending);
        let spawned = thread::Builder::new()
            .name("gallery-request".to_string())
            .spawn(move || {
                let result = dispatch::<P>(transport.as_ref(), &request);
                complete(&completions, &worker_pending, result);
            });
        if let Err(e) = spawned {
            warn!(error = %e, "could not start request thread");
            complete(&self.completions, &pending, Err(NetworkError::transport()));
        }
    }
}

/// Hand `result` to the pending callback, if it has not been taken yet.
fn complete<P, F>(completions: &CompletionQueue, pending: &Mutex<Option<F>>, result: Result<P, NetworkError>)
where
    P: Send + 'static,
    F: FnOnce(Result<P, NetworkError>) + Send + 'static,
{
    let callback = match pending.lock() {
        Ok(mut slot) => slot.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    if let Some(callback) = callback {
        completions.submit(move || callback(result));
    }
}

fn dispatch<P: DeserializeOwned>(
    transport: &dyn Transport,
    request: &HttpRequest,
) -> Result<P, NetworkError> {
    debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
    classify(transport.send(request))
}

/// Map a transport outcome onto the decoded payload or a `NetworkError`.
pub fn classify<P: DeserializeOwned>(
    outcome: Result<HttpResponse, TransportError>,
) -> Result<P, NetworkError> {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "transport failed");
            return Err(NetworkError::transport());
        }
    };
    let Some(body) = response.body else {
        warn!(status = response.status, "response carried no body");
        return Err(NetworkError::transport());
    };

    debug!(
        status = response.status,
        content_type = response.headers.get("content-type").unwrap_or("-"),
        bytes = body.len(),
        "classifying response"
    );
    match response.status {
        200 => serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "response body does not match expected payload");
            NetworkError::decode()
        }),
        401 => Err(NetworkError::unauthorized()),
        status => match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(error_body) => Err(NetworkError::server_reported(status, error_body)),
            Err(_) => Err(NetworkError::unknown(status)),
        },
    }
}
