//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the record table for one
//! entity type. It processes messages sequentially, so every request observes and leaves a
//! consistent table: a read-compare-write inside one handler cannot interleave with another
//! request.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::{Filter, ResourceRequest};
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "server" half of the actor. It owns the state (`store` and
/// `unique_index`) and the receiving end of the channel. Because a single task drains the
/// channel, the state needs no `Mutex` or `RwLock`.
///
/// # Usage Pattern
///
/// 1.  **Create**: call `ResourceActor::new()` to get the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: allocate the next ID, build the entity, run `on_create`, check the unique key,
///   then insert.
/// * **CreateMany**: stage every entity as above, reject the whole batch if any entity fails or
///   two keys collide (with each other or with stored entities), otherwise insert all of them.
/// * **Get / List**: clone from the store. `List` returns entities in ID order.
/// * **Update / Action**: run the hook on a copy, check the unique key, then write the copy
///   back. Nothing is written when the hook or the key check fails.
/// * **Delete**: confirm the entity exists, run `on_delete`, then remove it.
///
/// IDs come from a counter starting at 1 and are never handed out twice, including IDs
/// consumed by rejected creates.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    unique_index: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When the channel is full, client
    /// calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            unique_index: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Product" instead of "inventory_api::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::CreateMany { params, respond_to } => {
                    debug!(entity_type, count = params.len(), "CreateMany");
                    let result = self.create_many(params, &context).await;
                    match &result {
                        Ok(ids) => info!(
                            entity_type,
                            count = ids.len(),
                            size = self.store.len(),
                            "Created batch"
                        ),
                        Err(e) => warn!(entity_type, error = %e, "Batch create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self.list(filter.as_ref());
                    debug!(
                        entity_type,
                        filtered = filter.is_some(),
                        count = items.len(),
                        "List"
                    );
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(id.clone(), update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(id.clone(), action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let (id, item) = self.stage(params, context).await?;
        self.check_unique(&item, None)?;
        self.commit(id.clone(), item);
        Ok(id)
    }

    async fn create_many(
        &mut self,
        params: Vec<T::Create>,
        context: &T::Context,
    ) -> Result<Vec<T::Id>, FrameworkError> {
        let mut staged = Vec::with_capacity(params.len());
        for p in params {
            staged.push(self.stage(p, context).await?);
        }

        let mut batch_keys = HashSet::new();
        for (_, item) in &staged {
            self.check_unique(item, None)?;
            if let Some(key) = item.unique_key() {
                if !batch_keys.insert(key) {
                    return Err(FrameworkError::Conflict(key.to_string()));
                }
            }
        }

        let ids = staged.iter().map(|(id, _)| id.clone()).collect();
        for (id, item) in staged {
            self.commit(id, item);
        }
        Ok(ids)
    }

    fn list(&self, filter: Option<&Filter<T>>) -> Vec<T> {
        self.store
            .values()
            .filter(|item| filter.map_or(true, |f| f.matches(item)))
            .cloned()
            .collect()
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut draft = self.draft(&id)?;
        draft
            .on_update(update, context)
            .await
            .map_err(FrameworkError::entity)?;
        self.check_unique(&draft, Some(&id))?;
        self.commit(id, draft.clone());
        Ok(draft)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(context)
            .await
            .map_err(FrameworkError::entity)?;
        self.remove(id);
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut draft = self.draft(&id)?;
        let result = draft
            .handle_action(action, context)
            .await
            .map_err(FrameworkError::entity)?;
        self.check_unique(&draft, Some(&id))?;
        self.commit(id, draft);
        Ok(result)
    }

    // --- Store helpers ---

    fn allocate_id(&mut self) -> Result<T::Id, FrameworkError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(FrameworkError::IdsExhausted)?;
        Ok(T::Id::from(id))
    }

    /// Builds an entity under a fresh ID and runs `on_create`, without storing it.
    async fn stage(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<(T::Id, T), FrameworkError> {
        let id = self.allocate_id()?;
        let mut item =
            T::from_create_params(id.clone(), params).map_err(FrameworkError::entity)?;
        item.on_create(context)
            .await
            .map_err(FrameworkError::entity)?;
        Ok((id, item))
    }

    /// Clone of a stored entity for staged mutation.
    fn draft(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    fn check_unique(&self, candidate: &T, own_id: Option<&T::Id>) -> Result<(), FrameworkError> {
        let Some(key) = candidate.unique_key() else {
            return Ok(());
        };
        match self.unique_index.get(key) {
            Some(holder) if Some(holder) != own_id => Err(FrameworkError::Conflict(key.to_string())),
            _ => Ok(()),
        }
    }

    fn commit(&mut self, id: T::Id, item: T) {
        if let Some(previous) = self.store.get(&id) {
            if let Some(key) = previous.unique_key() {
                self.unique_index.remove(key);
            }
        }
        if let Some(key) = item.unique_key() {
            self.unique_index.insert(key.to_string(), id.clone());
        }
        self.store.insert(id, item);
    }

    fn remove(&mut self, id: &T::Id) -> Option<T> {
        let item = self.store.remove(id)?;
        if let Some(key) = item.unique_key() {
            self.unique_index.remove(key);
        }
        Some(item)
    }
}
