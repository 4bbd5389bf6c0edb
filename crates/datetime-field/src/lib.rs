//! A composite date-time input widget.
//!
//! One authoritative value, three ways to edit it: a free-text input with
//! two-tier parsing, a month calendar that changes only the date part, and
//! hour/minute sliders that change only the time part. Every committed
//! change is pushed to the host form as a machine-format canonical string.
//!
//! # Example
//!
//! ```
//! use datetime_field::{DateTimeField, FieldBinding, FieldConfig};
//! use datetime_field::document::DocumentEvents;
//! use datetime_field_core::init_global_registry;
//! use std::sync::Arc;
//!
//! init_global_registry();
//! let events = Arc::new(DocumentEvents::new());
//!
//! let mut field = DateTimeField::new(
//!     FieldConfig::new().with_label("Deadline").clearable(),
//!     FieldBinding::new("deadline"),
//!     &events,
//! );
//!
//! field.binding().changed.connect(|value| {
//!     println!("committed: {:?}", value);
//! });
//!
//! field.handle_input_change("March 3, 2024 at 5:00 pm");
//! assert_eq!(field.display_text(), "March 3, 2024 at 5:00 pm");
//! ```

pub mod base;
pub mod calendar;
pub mod document;
pub mod error;
pub mod field;
pub mod form;
pub mod format;
pub mod overlay;
pub mod slider;
pub mod sync;

pub use base::{Widget, WidgetBase};
pub use calendar::{CalendarDay, CalendarGrid, MonthHeader};
pub use document::{document_events, DocumentEvents, PointerGuard, PointerTarget};
pub use error::ParseError;
pub use field::{DateTimeField, FieldConfig, FieldSurface, OverlaySurface, TimeReadout};
pub use form::FieldBinding;
pub use format::DateTimeFormat;
pub use overlay::OverlayController;
pub use slider::TimeSlider;
pub use sync::{SyncCore, SyncOutcome};
