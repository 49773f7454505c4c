//! # Mock Framework & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations instead of a running actor. It makes client wrappers such as
//! `ProductClient` testable against a fake record store, including faults that a real actor
//! never produces.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | Canned answers | Real state management |
//! | **Use Case** | Logic *around* the client | The actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Fluent API
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Product>::new();
//! mock.expect_action(ProductId(1))
//!     .return_err(FrameworkError::ActorClosed);
//!
//! let client = ProductClient::new(mock.client());
//! let err = client.decrease_stock(ProductId(1), None).await.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Internal);
//! mock.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! (wrong operation or wrong ID) gets no answer, so the caller sees
//! [`FrameworkError::ActorDropped`], and the mismatch is reported by [`MockClient::verify`].
//!
//! `List` expectations apply the request's filter to the canned records, so filtered listings
//! behave like the real actor.
//!
//! ## Channel Helpers
//!
//! [`create_mock_client`] returns a client plus the raw receiver. Use [`expect_get`],
//! [`expect_create`] and [`expect_action`] to pull requests off it and answer them by hand,
//! which is handy when a test needs to inspect the payload.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Canned answer, one variant per request kind.
enum Reply<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    CreateMany(Result<Vec<T::Id>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Reply<T> {
    fn operation(&self) -> &'static str {
        match self {
            Reply::Get(_) => "get",
            Reply::Create(_) => "create",
            Reply::CreateMany(_) => "create_many",
            Reply::List(_) => "list",
            Reply::Update(_) => "update",
            Reply::Delete(_) => "delete",
            Reply::Action(_) => "action",
        }
    }
}

struct Expectation<T: ActorEntity> {
    id: Option<T::Id>,
    reply: Reply<T>,
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<X>(m: &Mutex<X>) -> MutexGuard<'_, X> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn operation<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::CreateMany { .. } => "create_many",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
    }
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let errors = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&queue).pop_front();
                let Some(expectation) = next else {
                    lock(&errors).push(format!("unexpected {} request", operation(&request)));
                    continue;
                };

                let expected_id = expectation.id;
                let id_matches = |got: &T::Id| -> bool {
                    match &expected_id {
                        Some(want) if want != got => {
                            lock(&errors).push(format!("expected id {want}, got {got}"));
                            false
                        }
                        _ => true,
                    }
                };

                match (request, expectation.reply) {
                    (ResourceRequest::Get { id, respond_to }, Reply::Get(response)) => {
                        if id_matches(&id) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (ResourceRequest::Create { respond_to, .. }, Reply::Create(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::CreateMany { respond_to, .. },
                        Reply::CreateMany(response),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { filter, respond_to }, Reply::List(response)) => {
                        let response = response.map(|items| {
                            items
                                .into_iter()
                                .filter(|item| filter.as_ref().map_or(true, |f| f.matches(item)))
                                .collect()
                        });
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Reply::Update(response)) => {
                        if id_matches(&id) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (ResourceRequest::Delete { id, respond_to }, Reply::Delete(response)) => {
                        if id_matches(&id) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Reply::Action(response)) => {
                        if id_matches(&id) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (request, reply) => {
                        lock(&errors).push(format!(
                            "expected {} request, got {}",
                            reply.operation(),
                            operation(&request)
                        ));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn expect<R>(
        &mut self,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Reply<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.expect(Some(id), Reply::Get)
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.expect(None, Reply::Create)
    }

    /// Expects a `create_many` operation.
    pub fn expect_create_many(&mut self) -> ExpectationBuilder<T, Vec<T::Id>> {
        self.expect(None, Reply::CreateMany)
    }

    /// Expects a `list` or `list_where` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.expect(None, Reply::List)
    }

    /// Expects an `update` operation for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.expect(Some(id), Reply::Update)
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.expect(Some(id), Reply::Delete)
    }

    /// Expects an `action` operation for `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.expect(Some(id), Reply::Action)
    }

    /// Verifies that all expectations were met and no request was unexpected.
    ///
    /// # Panics
    /// If an expectation is left over or a request did not match.
    pub fn verify(&self) {
        let mismatches = lock(&self.mismatches);
        if !mismatches.is_empty() {
            panic!("Mock received unexpected requests: {}", mismatches.join("; "));
        }
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Reply<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = Expectation {
            id: self.id,
            reply: (self.wrap)(response),
        };
        lock(&self.expectations).push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Nothing answers the requests until the test does so through one of the `expect_*`
/// helpers below.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
