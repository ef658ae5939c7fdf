use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with lifecycle hooks and actions)
// =============================================================================

/// Plumbing failures shared by every resource actor. Domain error enums fold
/// these in via their `From<FrameworkError>` impls so clients get a single
/// error type per resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("conflict on unique key: {0}")]
    Conflict(String),
    #[error("actor channel closed")]
    ActorClosed,
    #[error("actor dropped the response")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    // --- Custom Actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Domain error for this resource. Must absorb framework failures.
    type Error: From<FrameworkError> + Send + Sync + Debug + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the ID and creation parameters.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Key that must be unique across the whole store (e.g. a user's email or
    /// a category's name). Entities returning `None` skip the conflict scan.
    fn conflict_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks ---

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            if let Some(key) = item.conflict_key() {
                                let taken = self
                                    .store
                                    .values()
                                    .any(|existing| existing.conflict_key().as_deref() == Some(&key));
                                if taken {
                                    let _ =
                                        respond_to.send(Err(FrameworkError::Conflict(key).into()));
                                    continue;
                                }
                            }
                            self.store.insert(id.clone(), item);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    // Patch a copy so a rejected update leaves the stored
                    // item untouched.
                    if let Some(item) = self.store.get(&id) {
                        let mut updated = item.clone();
                        if let Err(e) = updated.on_update(patch) {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        if let Some(key) = updated.conflict_key() {
                            let taken = self.store.values().any(|existing| {
                                existing.id() != &id
                                    && existing.conflict_key().as_deref() == Some(&key)
                            });
                            if taken {
                                let _ =
                                    respond_to.send(Err(FrameworkError::Conflict(key).into()));
                                continue;
                            }
                        }
                        self.store.insert(id, updated.clone());
                        let _ = respond_to.send(Ok(updated));
                    } else {
                        let _ =
                            respond_to.send(Err(FrameworkError::NotFound(id.to_string()).into()));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete() {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        self.store.remove(&id);
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ =
                            respond_to.send(Err(FrameworkError::NotFound(id.to_string()).into()));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item.handle_action(action);
                        let _ = respond_to.send(result);
                    } else {
                        let _ =
                            respond_to.send(Err(FrameworkError::NotFound(id.to_string()).into()));
                    }
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    #[cfg(test)]
    pub fn from_sender(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }

    pub async fn list(&self) -> Result<Vec<T>, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                patch,
                respond_to,
            })
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ActorDropped))?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
