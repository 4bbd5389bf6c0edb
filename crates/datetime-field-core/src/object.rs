//! Object model.
//!
//! Provides the base object system with:
//! - Unique object identifiers via arena-based storage
//! - Object naming and lookup
//! - Runtime type information for registered objects
//!
//! Every widget owns an [`ObjectBase`] which registers it in the global
//! registry on construction and deregisters it on drop. The registry gives
//! each live component a stable identity, which the pointer-event dispatch
//! layer and tests use to refer to components without holding references.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all objects implement
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectId`] - Unique stable identifier for each object
//! - [`ObjectRegistry`] - Central registry managing all objects
//! - [`SharedObjectRegistry`] - Thread-safe wrapper around [`ObjectRegistry`]

use std::any::TypeId;
use std::fmt;

use parking_lot::{Mutex, RwLock};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles that remain valid for the lifetime of
    /// the object. They become invalid when the object is destroyed.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    ///
    /// This is useful for interop with external systems that need a numeric ID.
    /// The raw value can be converted back using [`ObjectId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// Note: This does not check if the ObjectId exists in the registry.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        let key_data = slotmap::KeyData::from_ffi(raw);
        Self::from(key_data)
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// The object registry is not initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::RegistryNotInitialized => write!(f, "Object registry not initialized"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Internal data stored in the registry for each object.
struct ObjectData {
    /// Human-readable name for debugging and lookup.
    name: String,
    /// The type ID of the concrete Object implementation.
    type_id: TypeId,
    /// The type name for debugging.
    type_name: &'static str,
}

/// Central registry managing all live objects.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object of type `T`, returning its ID.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        self.objects.insert(ObjectData {
            name: String::new(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        })
    }

    /// Destroy an object, removing it from the registry.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        self.objects
            .remove(id)
            .map(|_| ())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Check whether an object ID refers to a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Get an object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|data| data.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set an object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name;
        Ok(())
    }

    /// Get the TypeId of an object's concrete type.
    pub fn type_id(&self, id: ObjectId) -> ObjectResult<TypeId> {
        self.objects
            .get(id)
            .map(|data| data.type_id)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the type name of an object's concrete type.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|data| data.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Find a live object by name.
    ///
    /// Returns the first object whose name matches, if any. Names are not
    /// required to be unique.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, data)| data.name == name)
            .map(|(id, _)| id)
    }

    /// Get the total number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// Register a new object of type `T`, returning its ID.
    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Destroy an object, removing it from the registry.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    /// Check whether an object ID refers to a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Get an object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(String::from)
    }

    /// Set an object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get the TypeId of an object's concrete type.
    pub fn type_id(&self, id: ObjectId) -> ObjectResult<TypeId> {
        self.inner.read().type_id(id)
    }

    /// Get the type name of an object's concrete type.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Find a live object by name.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.inner.read().find_by_name(name)
    }

    /// Get the total number of live objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global object registry (lazy initialized).
static GLOBAL_REGISTRY: Mutex<Option<SharedObjectRegistry>> = Mutex::new(None);

/// Initialize the global object registry.
///
/// Idempotent. Must be called before constructing any widget.
pub fn init_global_registry() {
    let mut guard = GLOBAL_REGISTRY.lock();
    if guard.is_none() {
        *guard = Some(SharedObjectRegistry::new());
    }
}

/// Get a reference to the global object registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    let guard = GLOBAL_REGISTRY.lock();
    match guard.as_ref() {
        // SAFETY: Once initialized, the registry is never moved, replaced,
        // or set back to None, so the reference is valid for 'static.
        Some(registry) => Ok(unsafe { &*(registry as *const SharedObjectRegistry) }),
        None => Err(ObjectError::RegistryNotInitialized),
    }
}

/// The base trait that all objects must implement.
///
/// Types implementing this trait participate in the object registry and
/// typically expose signals through the [`Signal`](crate::Signal) system.
///
/// # Example
///
/// ```
/// use datetime_field_core::{Object, ObjectId, ObjectBase, init_global_registry};
///
/// // Initialize the registry before creating objects
/// init_global_registry();
///
/// struct MyWidget {
///     base: ObjectBase,
///     title: String,
/// }
///
/// impl MyWidget {
///     fn new(title: &str) -> Self {
///         Self {
///             base: ObjectBase::new::<Self>(),
///             title: title.to_string(),
///         }
///     }
/// }
///
/// impl Object for MyWidget {
///     fn object_id(&self) -> ObjectId {
///         self.base.id()
///     }
/// }
///
/// let widget = MyWidget::new("Hello");
/// assert_eq!(widget.title, "Hello");
/// ```
pub trait Object: Send + Sync {
    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId;
}

/// Helper for implementing the [`Object`] trait.
///
/// Include this as a field in your object types to handle registration and
/// provide the object ID. On construction, it automatically registers the
/// object with the [`global_registry`]; on drop, it deregisters it.
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Create a new ObjectBase, registering the object in the global registry.
    ///
    /// # Panics
    ///
    /// Panics if the global registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        let registry = global_registry().expect("Object registry not initialized");
        let id = registry.register::<T>();
        Self { id }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's name from the registry.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .unwrap_or_default()
    }

    /// Set the object's name in the registry.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name.into());
        }
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        if let Ok(registry) = global_registry() {
            let _ = registry.destroy(self.id);
        }
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}
