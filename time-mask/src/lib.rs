//! A segment-aware `HH:MM` masked input for form-bound text fields.
//!
//! [`TimeMaskField`] attaches to a host text element and constrains it to a
//! 12-hour `"HH:MM"` time. The hour and minute segments are edited as
//! whole units: the active segment is always fully selected, digits roll
//! into it with range clamping, arrow keys step it with wraparound, and
//! Tab/arrow-left/right jump between segments. A transient `00` hour is
//! rewritten to `01` when focus leaves the field or jumps segments.
//!
//! The widget is toolkit-agnostic: it drives the host through the
//! [`TextFieldHandle`] and [`FormBindingChannel`] capabilities and never
//! touches a concrete UI framework. The [`testing`] module provides
//! in-memory implementations of both.
//!
//! # Usage
//!
//! ```
//! use time_mask::{
//!     Key, Modifiers, TimeMaskField, TimeMaskFieldArgs, TimeValue,
//!     testing::{FakeTextField, RecordingBinding},
//! };
//!
//! let initial: TimeValue = "05:30".parse().expect("well-formed");
//! let args = TimeMaskFieldArgs::default().initial(initial);
//! let mut field = TimeMaskField::with_args(FakeTextField::new(""), RecordingBinding::new(), args);
//!
//! field.handle_focus();
//! field.handle_key_down(Key::Digit(1), Modifiers::NONE);
//! field.handle_key_down(Key::Digit(2), Modifiers::NONE);
//!
//! assert_eq!(field.handle().text(), "12:30");
//! assert_eq!(field.binding().last(), Some("12:30"));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod field;
mod handle;
mod key;
mod segment;
mod value;

pub mod testing;

pub use field::{ChangeListener, TimeMaskField, TimeMaskFieldArgs};
pub use handle::{FormBindingChannel, TextFieldHandle};
pub use key::{Key, KeyResponse, Modifiers};
pub use segment::{EntryPhase, Segment, SegmentCursor, Span};
pub use value::{TimeParseError, TimeValue};
