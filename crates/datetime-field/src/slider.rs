//! Time slider widget implementation.
//!
//! This module provides [`TimeSlider`], a headless slider for picking the
//! hour or minute component of the field's value by dragging a thumb along
//! a track.
//!
//! # Example
//!
//! ```
//! use datetime_field::slider::TimeSlider;
//! use datetime_field_core::init_global_registry;
//!
//! init_global_registry();
//!
//! let mut slider = TimeSlider::hours().with_value(14);
//!
//! slider.value_changed.connect(|&value| {
//!     println!("Hour: {}", value);
//! });
//!
//! slider.drag_to(15);
//! ```

use datetime_field_core::{Object, ObjectId, Signal};

use crate::base::{Widget, WidgetBase};

/// A slider for selecting one time component from a fixed range.
///
/// The stored value is always clamped to `[minimum, maximum]`. Drags report
/// the raw reading through `slider_moved` before clamping, because a thumb
/// pushed to the end stop can overshoot the range by one step (the minute
/// track reads 60 at the far end).
///
/// # Signals
///
/// - `value_changed(u32)`: Emitted when the clamped value changes
/// - `slider_moved(u32)`: Emitted with the raw reading while dragging
/// - `range_changed((u32, u32))`: Emitted when the range changes
pub struct TimeSlider {
    /// Widget base.
    base: WidgetBase,

    /// Minimum value.
    minimum: u32,

    /// Maximum value.
    maximum: u32,

    /// Current value.
    value: u32,

    /// Single step size (drag granularity).
    single_step: u32,

    /// Signal emitted when the clamped value changes.
    pub value_changed: Signal<u32>,

    /// Signal emitted with the raw reading while dragging.
    pub slider_moved: Signal<u32>,

    /// Signal emitted when the range changes.
    pub range_changed: Signal<(u32, u32)>,
}

impl TimeSlider {
    /// Create a new slider with the given range.
    pub fn new(minimum: u32, maximum: u32) -> Self {
        let (minimum, maximum) = if minimum <= maximum {
            (minimum, maximum)
        } else {
            (maximum, minimum)
        };
        Self {
            base: WidgetBase::new::<Self>(),
            minimum,
            maximum,
            value: minimum,
            single_step: 1,
            value_changed: Signal::new(),
            slider_moved: Signal::new(),
            range_changed: Signal::new(),
        }
    }

    /// Create an hour slider: range 0-23, step 1.
    pub fn hours() -> Self {
        Self::new(0, 23)
    }

    /// Create a minute slider: range 0-59, step 5.
    ///
    /// The step is a drag affordance only. Stored values keep full minute
    /// resolution when synced from a typed or host-supplied value.
    pub fn minutes() -> Self {
        Self::new(0, 59).with_single_step(5)
    }

    /// Get the minimum value.
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Get the maximum value.
    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Get the current value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Set the current value.
    ///
    /// The value is clamped to the valid range [minimum, maximum].
    pub fn set_value(&mut self, value: u32) {
        let clamped = value.clamp(self.minimum, self.maximum);
        if self.value != clamped {
            self.value = clamped;
            self.base.update();
            self.value_changed.emit(clamped);
        }
    }

    /// Set value using builder pattern.
    pub fn with_value(mut self, value: u32) -> Self {
        self.set_value(value);
        self
    }

    /// Set the value range.
    pub fn set_range(&mut self, minimum: u32, maximum: u32) {
        let (min, max) = if minimum <= maximum {
            (minimum, maximum)
        } else {
            (maximum, minimum)
        };

        if self.minimum != min || self.maximum != max {
            self.minimum = min;
            self.maximum = max;
            let new_value = self.value.clamp(min, max);
            let value_changed = self.value != new_value;
            self.value = new_value;
            self.base.update();
            self.range_changed.emit((min, max));
            if value_changed {
                self.value_changed.emit(new_value);
            }
        }
    }

    /// Set range using builder pattern.
    pub fn with_range(mut self, minimum: u32, maximum: u32) -> Self {
        self.set_range(minimum, maximum);
        self
    }

    /// Get the single step size.
    pub fn single_step(&self) -> u32 {
        self.single_step
    }

    /// Set the single step size.
    pub fn set_single_step(&mut self, step: u32) {
        self.single_step = step.max(1);
    }

    /// Set single step using builder pattern.
    pub fn with_single_step(mut self, step: u32) -> Self {
        self.set_single_step(step);
        self
    }

    /// Apply a drag to the given raw track reading.
    ///
    /// Emits `slider_moved` with the unclamped reading, then stores the
    /// clamped value. Does nothing while the slider is disabled.
    pub fn drag_to(&mut self, raw: u32) {
        if !self.base.is_enabled() {
            return;
        }
        self.slider_moved.emit(raw);
        self.set_value(raw);
    }

    /// Step the value up by one single step.
    pub fn step_up(&mut self) {
        self.set_value(self.value.saturating_add(self.single_step));
    }

    /// Step the value down by one single step.
    pub fn step_down(&mut self) {
        self.set_value(self.value.saturating_sub(self.single_step));
    }
}

impl Object for TimeSlider {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for TimeSlider {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}
