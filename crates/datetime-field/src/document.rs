//! Document-level pointer event dispatch.
//!
//! Outside-click dismissal needs a single process-wide listener that sees
//! every pointer-down, wherever it lands. [`DocumentEvents`] is that
//! dispatch point: the host shell forwards each pointer-down with a
//! [`PointerTarget`] describing what was hit, and interested components
//! subscribe through [`DocumentEvents::on_pointer_down`].
//!
//! Subscriptions are scoped. The returned [`PointerGuard`] disconnects on
//! drop, so a listener's lifetime exactly brackets its owner's lifetime and
//! an unmounted component can never receive a stale dispatch.

use std::sync::{Arc, OnceLock};

use datetime_field_core::{ConnectionId, ObjectId, Signal};

/// Description of the element a pointer-down event landed on.
///
/// Carries the element's identifier (if it has one) and the set of widget
/// containers it lies within, so listeners can answer "was this inside me"
/// without holding references into the scene.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerTarget {
    id: Option<String>,
    containers: Vec<ObjectId>,
}

impl PointerTarget {
    /// A target with a known element identifier.
    pub fn element(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            containers: Vec::new(),
        }
    }

    /// A target with no identifier (plain background, unnamed element).
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Mark this target as lying within the given widget container.
    pub fn inside(mut self, container: ObjectId) -> Self {
        self.containers.push(container);
        self
    }

    /// The target element's identifier, if it has one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the target lies within the given widget container.
    pub fn is_within(&self, container: ObjectId) -> bool {
        self.containers.contains(&container)
    }
}

/// Process-wide pointer event dispatcher.
///
/// Tests construct their own instance for isolation; application code uses
/// the shared one from [`document_events`].
pub struct DocumentEvents {
    /// Emitted for every pointer-down the host shell forwards.
    pointer_down: Signal<PointerTarget>,
}

impl DocumentEvents {
    /// Create a new, unshared dispatcher.
    pub fn new() -> Self {
        Self {
            pointer_down: Signal::new(),
        }
    }

    /// Forward a pointer-down event to all subscribers.
    pub fn dispatch_pointer_down(&self, target: PointerTarget) {
        tracing::trace!(
            target: "datetime_field::document",
            element = ?target.id(),
            "dispatching pointer-down"
        );
        self.pointer_down.emit(target);
    }

    /// Subscribe to pointer-down events for the lifetime of the guard.
    pub fn on_pointer_down<F>(self: &Arc<Self>, slot: F) -> PointerGuard
    where
        F: Fn(&PointerTarget) + Send + Sync + 'static,
    {
        PointerGuard {
            events: Arc::clone(self),
            id: self.pointer_down.connect(slot),
        }
    }

    /// Number of live pointer-down subscriptions.
    pub fn listener_count(&self) -> usize {
        self.pointer_down.connection_count()
    }
}

impl Default for DocumentEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared dispatcher used by application code.
pub fn document_events() -> Arc<DocumentEvents> {
    static SHARED: OnceLock<Arc<DocumentEvents>> = OnceLock::new();
    Arc::clone(SHARED.get_or_init(|| Arc::new(DocumentEvents::new())))
}

/// RAII handle for a pointer-down subscription.
///
/// Dropping the guard disconnects the listener.
pub struct PointerGuard {
    events: Arc<DocumentEvents>,
    id: ConnectionId,
}

impl Drop for PointerGuard {
    fn drop(&mut self) {
        self.events.pointer_down.disconnect(self.id);
    }
}
