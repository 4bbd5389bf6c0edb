//! Host form integration.
//!
//! [`FieldBinding`] models the contract between the field widget and the
//! host form framework that owns the authoritative value. The host injects
//! the current value and validation state; the widget reports committed
//! values, focus, and blur through the binding's signals.
//!
//! The binding is deliberately separate from the widget's own configuration
//! (see [`crate::field::FieldConfig`]) so the two prop sets stay
//! independently validated instead of merging into one bag.

use datetime_field_core::Signal;

/// Connection to one field of the host form.
pub struct FieldBinding {
    /// The field's registration name in the host form.
    name: String,
    /// The authoritative canonical value, absent when unset.
    value: Option<String>,
    /// Whether the host considers the field touched.
    touched: bool,
    /// Validation error supplied by the host.
    error: Option<String>,
    /// Validation warning supplied by the host.
    warning: Option<String>,

    /// Emitted with the new canonical value on every committed change.
    pub changed: Signal<Option<String>>,
    /// Emitted with the field name when the text input gains native focus.
    pub focused: Signal<String>,
    /// Emitted with the current canonical value when the input loses focus.
    pub blurred: Signal<Option<String>>,
}

impl FieldBinding {
    /// Create a binding for the named field with no value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            touched: false,
            error: None,
            warning: None,
            changed: Signal::new(),
            focused: Signal::new(),
            blurred: Signal::new(),
        }
    }

    /// Set the initial value (builder pattern).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the touched flag (builder pattern).
    pub fn with_touched(mut self, touched: bool) -> Self {
        self.touched = touched;
        self
    }

    /// Set the validation error (builder pattern).
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the validation warning (builder pattern).
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// The field's registration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current canonical value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the host considers the field touched.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// The host-supplied validation error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The host-supplied validation warning, if any.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Accept an authoritative value pushed inbound by the host.
    ///
    /// Does not emit `changed`; host-initiated updates must not echo.
    pub fn accept_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Update the host-supplied validation state.
    pub fn set_validation(&mut self, touched: bool, error: Option<String>, warning: Option<String>) {
        self.touched = touched;
        self.error = error;
        self.warning = warning;
    }

    /// Commit a new canonical value outward.
    ///
    /// Stores the value and emits `changed` exactly once.
    pub fn commit(&mut self, value: Option<String>) {
        self.value = value.clone();
        self.changed.emit(value);
    }

    /// Report that the text input gained native focus.
    pub fn notify_focus(&self) {
        self.focused.emit(self.name.clone());
    }

    /// Report that the text input lost native focus.
    pub fn notify_blur(&self) {
        self.blurred.emit(self.value.clone());
    }
}
