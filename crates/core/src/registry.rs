//! Two-phase service registry.
//!
//! The registry is the dependency graph of the application: a set of
//! capability (type) to implementation bindings. It lives in two phases:
//!
//! 1. [`ServiceRegistry`] — the mutable builder used during startup.
//!    Bindings can be added or replaced freely.
//! 2. [`ServiceProvider`] — the immutable, thread-safe resolver produced
//!    by [`ServiceRegistry::finalize`]. Once finalized, the builder refuses
//!    further registrations with [`RegistryError::ReadOnly`].
//!
//! Scoped bindings are constructed at most once per [`RequestScope`]; the
//! scope is created at request entry and dropped at request exit, so
//! nothing scoped leaks between requests.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors surfaced by the registry and by scope resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The capability was never bound before the graph was finalized.
    #[error("capability not resolvable: {capability}")]
    NotResolvable { capability: &'static str },
    /// A registration was attempted after finalization.
    #[error("service registry is read-only after finalization")]
    ReadOnly,
}

type AnyService = Arc<dyn Any + Send + Sync>;
type ScopedFactory = Arc<dyn Fn(&RequestScope) -> Result<AnyService, RegistryError> + Send + Sync>;

#[derive(Clone)]
enum Binding {
    /// One shared instance for the life of the process.
    Singleton(AnyService),
    /// Built lazily, at most once per request scope.
    Scoped(ScopedFactory),
}

/// Mutable builder phase of the dependency graph.
#[derive(Default)]
pub struct ServiceRegistry {
    bindings: HashMap<TypeId, Binding>,
    finalized: bool,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a capability to a single shared instance.
    ///
    /// Re-registering a capability before finalization replaces the
    /// previous binding.
    pub fn register_singleton<T>(&mut self, instance: Arc<T>) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
    {
        if self.finalized {
            return Err(RegistryError::ReadOnly);
        }
        self.bindings
            .insert(TypeId::of::<T>(), Binding::Singleton(instance));
        Ok(())
    }

    /// Bind a capability to a factory invoked once per request scope.
    ///
    /// The factory receives the scope it is resolving in, so it can pull
    /// in other capabilities; a dependency that was never registered
    /// surfaces as [`RegistryError::NotResolvable`] at first use.
    pub fn register_scoped<T, F>(&mut self, factory: F) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
        F: Fn(&RequestScope) -> Result<Arc<T>, RegistryError> + Send + Sync + 'static,
    {
        if self.finalized {
            return Err(RegistryError::ReadOnly);
        }
        let factory: ScopedFactory = Arc::new(move |scope| {
            let instance = factory(scope)?;
            Ok(instance as AnyService)
        });
        self.bindings
            .insert(TypeId::of::<T>(), Binding::Scoped(factory));
        Ok(())
    }

    /// Finalize the graph into an immutable provider.
    ///
    /// After this call every `register_*` on the builder fails with
    /// [`RegistryError::ReadOnly`] for the rest of the process lifetime.
    pub fn finalize(&mut self) -> ServiceProvider {
        self.finalized = true;
        ServiceProvider {
            bindings: Arc::new(self.bindings.clone()),
        }
    }
}

/// Immutable resolver phase of the dependency graph.
///
/// Cheap to clone and safe to share across the accept loop; all request
/// handlers resolve through scopes created from this provider.
#[derive(Clone)]
pub struct ServiceProvider {
    bindings: Arc<HashMap<TypeId, Binding>>,
}

impl ServiceProvider {
    /// Open a new resolution scope, one per HTTP request.
    pub fn create_scope(&self) -> RequestScope {
        RequestScope {
            bindings: self.bindings.clone(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// One request's resolution scope.
///
/// Scoped bindings resolved through the same scope share one instance;
/// distinct scopes get distinct instances. Dropping the scope drops every
/// instance it constructed.
#[derive(Clone)]
pub struct RequestScope {
    bindings: Arc<HashMap<TypeId, Binding>>,
    cache: Arc<Mutex<HashMap<TypeId, AnyService>>>,
}

impl RequestScope {
    /// Resolve a capability within this scope.
    pub fn resolve<T>(&self) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
    {
        let key = TypeId::of::<T>();
        let binding = self
            .bindings
            .get(&key)
            .ok_or(RegistryError::NotResolvable {
                capability: type_name::<T>(),
            })?;

        match binding {
            Binding::Singleton(instance) => downcast::<T>(instance.clone()),
            Binding::Scoped(factory) => {
                let cached = {
                    let cache = self.cache.lock().expect("scope cache lock poisoned");
                    cache.get(&key).cloned()
                };
                if let Some(instance) = cached {
                    return downcast::<T>(instance);
                }

                // The factory may resolve other capabilities from this
                // scope, so the cache lock must not be held while it runs.
                let built = factory(self)?;
                let mut cache = self.cache.lock().expect("scope cache lock poisoned");
                let stored = cache.entry(key).or_insert(built).clone();
                downcast::<T>(stored)
            }
        }
    }
}

fn downcast<T: Any + Send + Sync>(instance: AnyService) -> Result<Arc<T>, RegistryError> {
    // Bindings are keyed by TypeId, so a mismatch here means the binding
    // table is corrupt; surface it as an unresolvable capability rather
    // than panicking in the request path.
    instance
        .downcast::<T>()
        .map_err(|_| RegistryError::NotResolvable {
            capability: type_name::<T>(),
        })
}
