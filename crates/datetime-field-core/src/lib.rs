//! Core systems for the datetime-field widget.
//!
//! This crate provides the foundational pieces the widget crate builds on:
//!
//! - **Object Model**: stable object identities, registration, naming
//! - **Signal/Slot System**: type-safe notification between components
//!
//! # Signal/Slot Example
//!
//! ```
//! use datetime_field_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod object;
pub mod signal;

pub use object::{
    global_registry, init_global_registry, Object, ObjectBase, ObjectError, ObjectId,
    ObjectRegistry, ObjectResult, SharedObjectRegistry,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
