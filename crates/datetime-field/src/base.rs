//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the common implementation details for
//! all components in this crate. It handles visibility, enabled state, focus,
//! the re-render flag, and coordinates with the object system.

use datetime_field_core::{Object, ObjectBase, ObjectId, Signal};

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it. Construction registers the widget in the global object
/// registry; drop deregisters it.
pub struct WidgetBase {
    /// The underlying object base for Object trait implementation.
    object_base: ObjectBase,

    /// Whether the widget is visible.
    visible: bool,

    /// Whether the widget is enabled (can receive input).
    enabled: bool,

    /// Whether the widget currently has logical focus.
    focused: bool,

    /// Whether the widget needs to be re-rendered.
    needs_render: bool,

    /// Signal emitted when visibility changes.
    pub visible_changed: Signal<bool>,

    /// Signal emitted when enabled state changes.
    pub enabled_changed: Signal<bool>,
}

impl WidgetBase {
    /// Create a new widget base.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            object_base: ObjectBase::new::<T>(),
            visible: true,
            enabled: true,
            focused: false,
            needs_render: true,
            visible_changed: Signal::new(),
            enabled_changed: Signal::new(),
        }
    }

    /// Get the widget's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// Get the widget's name.
    pub fn name(&self) -> String {
        self.object_base.name()
    }

    /// Set the widget's name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    /// Check if the widget is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the widget's visibility.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.needs_render = true;
            self.visible_changed.emit(visible);
        }
    }

    /// Check if the widget is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set whether the widget is enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.needs_render = true;
            self.enabled_changed.emit(enabled);
        }
    }

    /// Check if the widget has logical focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Set the widget's logical focus flag.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.needs_render = true;
        }
    }

    /// Check if the widget needs to be re-rendered.
    #[inline]
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Request a re-render of the widget.
    pub fn update(&mut self) {
        self.needs_render = true;
    }

    /// Clear the re-render flag (called after rendering).
    pub fn clear_render_flag(&mut self) {
        self.needs_render = false;
    }
}

impl Object for WidgetBase {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

/// Trait implemented by all widgets in this crate.
///
/// Provides shared access to the widget's [`WidgetBase`] plus convenience
/// delegations for the common state every widget carries.
pub trait Widget: Object {
    /// Access the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Mutably access the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Check if the widget is visible.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Check if the widget is enabled.
    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    /// Check if the widget needs to be re-rendered.
    fn needs_render(&self) -> bool {
        self.widget_base().needs_render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datetime_field_core::{global_registry, init_global_registry};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Probe {
        base: WidgetBase,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                base: WidgetBase::new::<Self>(),
            }
        }
    }

    impl Object for Probe {
        fn object_id(&self) -> ObjectId {
            self.base.object_id()
        }
    }

    impl Widget for Probe {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }

        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_defaults() {
        setup();

        let probe = Probe::new();
        assert!(probe.is_visible());
        assert!(probe.is_enabled());
        assert!(!probe.base.has_focus());
        assert!(probe.needs_render());
    }

    #[test]
    fn test_visibility_emits_once() {
        setup();

        let mut probe = Probe::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        probe.base.visible_changed.connect(move |&visible| {
            seen_clone.lock().push(visible);
        });

        probe.base.set_visible(false);
        probe.base.set_visible(false); // No change, no emission

        assert_eq!(*seen.lock(), vec![false]);
    }

    #[test]
    fn test_render_flag() {
        setup();

        let mut probe = Probe::new();
        probe.base.clear_render_flag();
        assert!(!probe.needs_render());

        probe.base.set_focused(true);
        assert!(probe.needs_render());
    }

    #[test]
    fn test_registered_in_registry() {
        setup();

        let id = {
            let probe = Probe::new();
            probe.base.set_name("probe");
            assert_eq!(probe.base.name(), "probe");
            probe.object_id()
        };

        assert!(!global_registry().unwrap().contains(id));
    }
}
