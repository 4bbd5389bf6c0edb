//! Overlay visibility and focus control.
//!
//! [`OverlayController`] tracks whether the calendar-and-sliders panel is
//! open and whether the calendar holds logical focus, and owns the
//! outside-click dismissal rule.
//!
//! The two flags track independently. Focus initializes to `true` before
//! the overlay ever opens because the calendar collaborator expects a focus
//! flag even while hidden, and nothing in this design ever requests focus
//! back off; focus-out is handled by the outside-click path instead.
//!
//! Dismissal inspects each document pointer-down: the overlay closes when
//! the target is neither inside the overlay container nor the field's
//! visible text input. Excluding the input element avoids an immediate
//! close-then-reopen race when the user clicks the input to open the
//! overlay.

use std::sync::Arc;

use datetime_field_core::{Object, ObjectBase, ObjectId, Signal};
use parking_lot::Mutex;

use crate::document::{DocumentEvents, PointerGuard};

#[derive(Debug)]
struct OverlayState {
    visible: bool,
    focused: bool,
}

/// Controls the overlay's visibility and focus state.
///
/// # Signals
///
/// - `visibility_changed(bool)`: Emitted on every open/close transition
/// - `dismissed(())`: Emitted when an outside click forces the overlay closed
pub struct OverlayController {
    /// Object identity; doubles as the overlay container for hit-testing.
    base: ObjectBase,

    /// Shared with the pointer-down listener.
    state: Arc<Mutex<OverlayState>>,

    /// Signal emitted on every visibility transition.
    pub visibility_changed: Arc<Signal<bool>>,

    /// Signal emitted when an outside click closes the overlay.
    pub dismissed: Arc<Signal<()>>,

    /// Keeps the document listener installed for this controller's lifetime.
    _pointer_guard: PointerGuard,
}

impl OverlayController {
    /// Create a closed overlay and install its outside-click listener.
    ///
    /// `input_element_id` is the identifier of the field's visible text
    /// input; pointer-downs on it never dismiss through this path.
    pub fn new(events: &Arc<DocumentEvents>, input_element_id: impl Into<String>) -> Self {
        let base = ObjectBase::new::<Self>();
        let container = base.id();
        let input_element_id = input_element_id.into();

        let state = Arc::new(Mutex::new(OverlayState {
            visible: false,
            focused: true,
        }));
        let visibility_changed = Arc::new(Signal::new());
        let dismissed = Arc::new(Signal::new());

        let listener_state = Arc::clone(&state);
        let listener_visibility = Arc::clone(&visibility_changed);
        let listener_dismissed = Arc::clone(&dismissed);
        let pointer_guard = events.on_pointer_down(move |target| {
            let outside =
                !target.is_within(container) && target.id() != Some(input_element_id.as_str());
            if !outside {
                return;
            }

            let closed = {
                let mut state = listener_state.lock();
                if state.visible {
                    state.visible = false;
                    true
                } else {
                    false
                }
            };
            if closed {
                tracing::debug!(
                    target: "datetime_field::overlay",
                    "outside pointer-down, dismissing overlay"
                );
                listener_visibility.emit(false);
                listener_dismissed.emit(());
            }
        });

        Self {
            base,
            state,
            visibility_changed,
            dismissed,
            _pointer_guard: pointer_guard,
        }
    }

    /// The overlay container's identity for pointer hit-testing.
    pub fn container_id(&self) -> ObjectId {
        self.base.id()
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.state.lock().visible
    }

    /// Whether the calendar holds logical focus.
    pub fn is_focused(&self) -> bool {
        self.state.lock().focused
    }

    /// Flip the overlay between open and closed. Focus is unaffected.
    pub fn toggle(&self) {
        let visible = {
            let mut state = self.state.lock();
            state.visible = !state.visible;
            state.visible
        };
        self.visibility_changed.emit(visible);
    }

    /// Open the overlay if it is closed.
    pub fn open(&self) {
        let opened = {
            let mut state = self.state.lock();
            if state.visible {
                false
            } else {
                state.visible = true;
                true
            }
        };
        if opened {
            self.visibility_changed.emit(true);
        }
    }

    /// Close the overlay if it is open.
    pub fn force_close(&self) {
        let closed = {
            let mut state = self.state.lock();
            if state.visible {
                state.visible = false;
                true
            } else {
                false
            }
        };
        if closed {
            self.visibility_changed.emit(false);
        }
    }

    /// Set the calendar's logical focus flag.
    pub fn set_focused(&self, focused: bool) {
        self.state.lock().focused = focused;
    }
}

impl Object for OverlayController {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PointerTarget;
    use datetime_field_core::init_global_registry;

    fn setup() -> Arc<DocumentEvents> {
        init_global_registry();
        Arc::new(DocumentEvents::new())
    }

    #[test]
    fn test_starts_closed_but_focused() {
        let events = setup();
        let overlay = OverlayController::new(&events, "deadline-formatted");

        assert!(!overlay.is_open());
        assert!(overlay.is_focused());
    }

    #[test]
    fn test_toggle_leaves_focus_alone() {
        let events = setup();
        let overlay = OverlayController::new(&events, "deadline-formatted");

        overlay.toggle();
        assert!(overlay.is_open());
        assert!(overlay.is_focused());

        overlay.toggle();
        assert!(!overlay.is_open());
        assert!(overlay.is_focused());
    }

    #[test]
    fn test_outside_click_closes() {
        let events = setup();
        let overlay = OverlayController::new(&events, "deadline-formatted");
        overlay.open();

        events.dispatch_pointer_down(PointerTarget::anonymous());

        assert!(!overlay.is_open());
    }

    #[test]
    fn test_click_inside_container_does_not_close() {
        let events = setup();
        let overlay = OverlayController::new(&events, "deadline-formatted");
        overlay.open();

        events.dispatch_pointer_down(PointerTarget::anonymous().inside(overlay.container_id()));

        assert!(overlay.is_open());
    }

    #[test]
    fn test_click_on_input_element_does_not_close() {
        let events = setup();
        let overlay = OverlayController::new(&events, "deadline-formatted");
        overlay.open();

        events.dispatch_pointer_down(PointerTarget::element("deadline-formatted"));

        assert!(overlay.is_open());
    }

    #[test]
    fn test_outside_click_while_closed_is_silent() {
        let events = setup();
        let overlay = OverlayController::new(&events, "deadline-formatted");

        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        overlay.dismissed.connect(move |_| {
            *count_clone.lock() += 1;
        });

        events.dispatch_pointer_down(PointerTarget::anonymous());

        assert_eq!(*count.lock(), 0);
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_dismissal_emits_both_signals() {
        let events = setup();
        let overlay = OverlayController::new(&events, "deadline-formatted");
        overlay.open();

        let dismissals = Arc::new(Mutex::new(0));
        let visibility = Arc::new(Mutex::new(Vec::new()));

        let dismissals_clone = dismissals.clone();
        overlay.dismissed.connect(move |_| {
            *dismissals_clone.lock() += 1;
        });
        let visibility_clone = visibility.clone();
        overlay.visibility_changed.connect(move |&visible| {
            visibility_clone.lock().push(visible);
        });

        events.dispatch_pointer_down(PointerTarget::anonymous());

        assert_eq!(*dismissals.lock(), 1);
        assert_eq!(*visibility.lock(), vec![false]);
    }

    #[test]
    fn test_drop_removes_listener() {
        let events = setup();
        {
            let _overlay = OverlayController::new(&events, "deadline-formatted");
            assert_eq!(events.listener_count(), 1);
        }
        assert_eq!(events.listener_count(), 0);
    }
}
