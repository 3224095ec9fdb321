//! In-memory fakes for driving the mask without a UI toolkit.
//!
//! [`FakeTextField`] stands in for the host's text element and
//! [`RecordingBinding`] for its form binding, so the widget's full
//! behavior — caret movement, selection, value rewrites, change
//! notifications — can be exercised from plain unit tests and doc
//! examples.

use crate::{
    handle::{FormBindingChannel, TextFieldHandle},
    segment::Span,
};

/// An in-memory stand-in for a host text element.
///
/// Stores the displayed text and selection span verbatim; unlike a real
/// element it never clamps or resets the selection when the text changes.
#[derive(Debug, Clone)]
pub struct FakeTextField {
    value: String,
    selection: Span,
    focus_requests: usize,
}

impl FakeTextField {
    /// Creates a fake field displaying `text` with a collapsed selection
    /// at position 0.
    pub fn new(text: &str) -> Self {
        Self {
            value: text.to_owned(),
            selection: Span::caret(0),
            focus_requests: 0,
        }
    }

    /// Returns the displayed text.
    pub fn text(&self) -> &str {
        &self.value
    }

    /// Collapses the selection to a bare caret at `position`, as a pointer
    /// press would.
    pub fn place_caret(&mut self, position: usize) {
        self.selection = Span::caret(position);
    }

    /// Number of times focus was requested through the handle.
    pub fn focus_requests(&self) -> usize {
        self.focus_requests
    }
}

impl TextFieldHandle for FakeTextField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_owned();
    }

    fn selection(&self) -> Span {
        self.selection
    }

    fn set_selection(&mut self, span: Span) {
        self.selection = span;
    }

    fn focus(&mut self) {
        self.focus_requests += 1;
    }
}

/// Records every value pushed into the form binding.
#[derive(Debug, Clone, Default)]
pub struct RecordingBinding {
    pushed: Vec<String>,
}

impl RecordingBinding {
    /// Creates an empty recording binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values pushed so far, oldest first.
    pub fn pushed(&self) -> &[String] {
        &self.pushed
    }

    /// The most recently pushed value, if any.
    pub fn last(&self) -> Option<&str> {
        self.pushed.last().map(String::as_str)
    }
}

impl FormBindingChannel for RecordingBinding {
    fn push(&mut self, value: &str) {
        self.pushed.push(value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_field_round_trip() {
        let mut field = FakeTextField::new("05:30");
        assert_eq!(field.value(), "05:30");

        field.set_value("06:30");
        assert_eq!(field.text(), "06:30");

        field.set_selection(Span::new(3, 6));
        assert_eq!(field.selection(), Span::new(3, 6));

        field.place_caret(1);
        assert_eq!(field.selection(), Span::caret(1));

        field.focus();
        assert_eq!(field.focus_requests(), 1);
    }

    #[test]
    fn test_recording_binding_keeps_order() {
        let mut binding = RecordingBinding::new();
        binding.push("05:30");
        binding.push("05:31");
        assert_eq!(binding.pushed(), ["05:30", "05:31"]);
        assert_eq!(binding.last(), Some("05:31"));
    }
}
