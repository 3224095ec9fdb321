//! The masked time field itself.

use std::sync::Arc;

use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    handle::{FormBindingChannel, TextFieldHandle},
    key::{Key, KeyResponse, Modifiers},
    segment::{EntryPhase, Segment, SegmentCursor},
    value::TimeValue,
};

/// Shared handler invoked with every committed value.
#[derive(Clone)]
pub struct ChangeListener(Arc<dyn Fn(&TimeValue) + Send + Sync>);

impl ChangeListener {
    /// Wraps a closure as a change listener.
    pub fn new(f: impl Fn(&TimeValue) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    fn call(&self, value: &TimeValue) {
        (self.0)(value);
    }
}

/// Configuration for a [`TimeMaskField`].
#[derive(Clone, Default, Setters)]
pub struct TimeMaskFieldArgs {
    /// Initial value written into the field on attach. When `None`, the
    /// field's existing text is left alone.
    #[setters(strip_option)]
    pub initial: Option<TimeValue>,
    /// Called with every committed value.
    #[setters(skip)]
    pub on_change: Option<ChangeListener>,
}

impl TimeMaskFieldArgs {
    /// Sets the change handler.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&TimeValue) + Send + Sync + 'static,
    {
        self.on_change = Some(ChangeListener::new(f));
        self
    }
}

/// A masked `HH:MM` time input bound to a host text field.
///
/// The mask intercepts keyboard and pointer events delivered by the host,
/// maintains the five-character `"HH:MM"` invariant, keeps one whole
/// segment selected at all times, and echoes every committed value into the
/// form binding and any registered change listeners.
///
/// All handlers are synchronous and infallible: out-of-range input is
/// clamped, unreadable field text is recovered, and no error crosses the
/// component boundary.
pub struct TimeMaskField<H, B> {
    handle: H,
    binding: B,
    cursor: SegmentCursor,
    listeners: SmallVec<[ChangeListener; 2]>,
}

impl<H, B> TimeMaskField<H, B>
where
    H: TextFieldHandle,
    B: FormBindingChannel,
{
    /// Attaches the mask to `handle` and `binding` with default arguments.
    pub fn new(handle: H, binding: B) -> Self {
        Self::with_args(handle, binding, TimeMaskFieldArgs::default())
    }

    /// Attaches the mask to `handle` and `binding`.
    ///
    /// When [`TimeMaskFieldArgs::initial`] is set, its `"HH:MM"` rendering
    /// is written into the field immediately, without firing change
    /// notifications.
    pub fn with_args(mut handle: H, binding: B, args: TimeMaskFieldArgs) -> Self {
        if let Some(initial) = args.initial {
            handle.set_value(&initial.to_string());
        }
        let mut listeners = SmallVec::new();
        if let Some(listener) = args.on_change {
            listeners.push(listener);
        }
        Self {
            handle,
            binding,
            cursor: SegmentCursor::default(),
            listeners,
        }
    }

    /// Registers an additional change listener.
    pub fn on_change<F>(&mut self, f: F)
    where
        F: Fn(&TimeValue) + Send + Sync + 'static,
    {
        self.listeners.push(ChangeListener::new(f));
    }

    /// Returns the current value, recovering from malformed field text.
    pub fn value(&self) -> TimeValue {
        TimeValue::recover(&self.handle.value())
    }

    /// Returns the active segment and entry phase.
    pub fn cursor(&self) -> SegmentCursor {
        self.cursor
    }

    /// Returns the underlying text field handle.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Returns the underlying text field handle mutably.
    ///
    /// Host adapters forward events to the mask and occasionally need
    /// direct access to the element they wrapped, e.g. to reposition the
    /// caret before calling [`TimeMaskField::handle_click`].
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    /// Returns the form binding channel.
    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// Handles a key press.
    ///
    /// Returns [`KeyResponse::Consumed`] when the host must suppress the
    /// element's default editing behavior. Every key except Tab is
    /// consumed, whether or not it mutates the value; Tab is consumed only
    /// while it jumps between segments, so a Tab that would leave the field
    /// keeps its usual focus-traversal meaning.
    pub fn handle_key_down(&mut self, key: Key, modifiers: Modifiers) -> KeyResponse {
        trace!(?key, ?modifiers, cursor = ?self.cursor, "key down");
        match key {
            Key::ArrowLeft => {
                self.jump_to(Segment::Hours);
                KeyResponse::Consumed
            }
            Key::ArrowRight => {
                self.jump_to(Segment::Minutes);
                KeyResponse::Consumed
            }
            Key::Tab => self.handle_tab(modifiers),
            // Digit removal is disabled: the field always shows a full time.
            Key::Backspace | Key::Delete => KeyResponse::Consumed,
            Key::ArrowUp => {
                self.step(1);
                KeyResponse::Consumed
            }
            Key::ArrowDown => {
                self.step(-1);
                KeyResponse::Consumed
            }
            Key::Digit(digit) => {
                self.enter_digit(digit.min(9));
                KeyResponse::Consumed
            }
            // Default editing is suppressed for every non-Tab key.
            Key::Other => KeyResponse::Consumed,
        }
    }

    /// Handles a pointer click on the field.
    ///
    /// Selects the hours segment when the click landed left of the colon's
    /// right edge, the minutes segment otherwise, and marks it fresh.
    pub fn handle_click(&mut self) {
        self.select_segment_at_caret();
    }

    /// Handles the field gaining keyboard focus. Same segment selection
    /// rule as [`TimeMaskField::handle_click`].
    pub fn handle_focus(&mut self) {
        self.select_segment_at_caret();
    }

    /// Handles the field losing focus: runs the validation pass.
    pub fn handle_blur(&mut self) {
        self.validate();
    }

    fn select_segment_at_caret(&mut self) {
        let caret = self.handle.selection().start;
        let segment = Segment::from_caret(caret);
        self.cursor.jump_to(segment);
        self.handle.set_selection(segment.span());
        trace!(caret, ?segment, "segment selected");
    }

    // Arrow-left/right: always lands on the named segment, fresh, and runs
    // the validation pass.
    fn jump_to(&mut self, segment: Segment) {
        self.cursor.jump_to(segment);
        self.handle.set_selection(segment.span());
        debug!(?segment, "segment jump");
        self.validate();
    }

    fn handle_tab(&mut self, modifiers: Modifiers) -> KeyResponse {
        let caret = self.handle.selection().start;
        let response = if caret < 2 && !modifiers.shift {
            self.cursor.jump_to(Segment::Minutes);
            self.handle.set_selection(Segment::Minutes.span());
            KeyResponse::Consumed
        } else if caret > 2 && modifiers.shift {
            self.cursor.jump_to(Segment::Hours);
            self.handle.set_selection(Segment::Hours.span());
            KeyResponse::Consumed
        } else {
            // Focus traversal out of the field stays with the host; the
            // segment state still resets for the next visit.
            self.cursor.refresh();
            KeyResponse::Ignored
        };
        self.validate();
        response
    }

    // Arrow-up/down: steps the active segment in place. The entry phase
    // drops to mid-entry, so a digit typed right after stepping shifts into
    // the segment instead of replacing it.
    fn step(&mut self, delta: i8) {
        let mut value = self.value();
        let segment = self.cursor.segment();
        match segment {
            Segment::Hours => value.step_hour(delta),
            Segment::Minutes => value.step_minute(delta),
        }
        self.commit(value, segment);
        self.cursor.begin_entry();
    }

    fn enter_digit(&mut self, digit: u8) {
        match self.cursor.segment() {
            Segment::Hours => self.enter_hours_digit(digit),
            Segment::Minutes => self.enter_minutes_digit(digit),
        }
    }

    fn enter_hours_digit(&mut self, digit: u8) {
        let mut value = self.value();
        match self.cursor.phase() {
            EntryPhase::Fresh => {
                value.set_hour(digit);
                if digit > 1 {
                    // No valid two-digit hour starts with 2-9.
                    self.cursor.jump_to(Segment::Minutes);
                } else {
                    self.cursor.begin_entry();
                }
            }
            EntryPhase::MidEntry => {
                let second = value.hour() % 10;
                // Joining two zeroes would commit an hour of 00.
                let joined = if digit == 0 && second == 0 { 1 } else { digit };
                let mut hour = second * 10 + joined;
                if hour > 12 {
                    hour = 12;
                }
                if hour == 0 {
                    hour = 1;
                }
                value.set_hour(hour);
                self.cursor.jump_to(Segment::Minutes);
            }
        }
        self.commit(value, self.cursor.segment());
    }

    fn enter_minutes_digit(&mut self, digit: u8) {
        let mut value = self.value();
        match self.cursor.phase() {
            EntryPhase::Fresh => {
                value.set_minute(digit);
                self.cursor.begin_entry();
            }
            // A full segment re-enters first-digit entry instead of
            // shifting.
            EntryPhase::MidEntry if value.minute() == 59 => {
                value.set_minute(digit);
            }
            EntryPhase::MidEntry => {
                let second = value.minute() % 10;
                value.set_minute((second * 10 + digit).min(59));
                // Minutes never advances to another segment; it re-selects
                // itself for the next visit.
                self.cursor.refresh();
            }
        }
        self.commit(value, Segment::Minutes);
    }

    // Validation pass, run on blur and on every segment jump: a transient
    // 00 hour becomes 01. Notifies only when the text actually changed.
    fn validate(&mut self) {
        let mut value = self.value();
        if value.normalize_hour() {
            self.handle.set_value(&value.to_string());
            self.notify(&value);
        }
    }

    // Writes the value back, notifies, and re-selects the target segment.
    fn commit(&mut self, value: TimeValue, segment: Segment) {
        self.handle.set_value(&value.to_string());
        self.notify(&value);
        self.handle.set_selection(segment.span());
    }

    fn notify(&mut self, value: &TimeValue) {
        debug!(value = %value, "value committed");
        self.binding.push(&value.to_string());
        for listener in &self.listeners {
            listener.call(value);
        }
    }
}
