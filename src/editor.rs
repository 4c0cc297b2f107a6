//! editor
//!
//! Viewing/editing state machine for the changelog document.
//!
//! # States
//!
//! ```text
//!            begin_edit
//!   Viewing ───────────▶ Editing ──┐ set_buffer / push_str
//!      ▲                   │  ▲    │
//!      │   save / cancel   │  └────┘
//!      └───────────────────┘
//! ```
//!
//! `save` makes the buffer the document verbatim. `cancel` drops the
//! buffer. No validation or size limit is applied to the buffer.
//!
//! # Example
//!
//! ```
//! use devchangelog::core::types::Document;
//! use devchangelog::editor::{DocumentEditor, Mode};
//!
//! let mut editor = DocumentEditor::new(Document::new("# Changelog\n"));
//! editor.begin_edit().unwrap();
//! editor.set_buffer("anything at all").unwrap();
//! editor.save().unwrap();
//!
//! assert_eq!(editor.mode(), Mode::Viewing);
//! assert_eq!(editor.document().as_str(), "anything at all");
//! ```

use thiserror::Error;

use crate::core::types::Document;
use crate::ui::notify::Notification;

/// Errors from invalid editor transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("already editing")]
    AlreadyEditing,

    #[error("not editing")]
    NotEditing,
}

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Viewing,
    Editing { buffer: String },
}

/// Holds the document and, while editing, the edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEditor {
    /// Last saved (or generated) document.
    document: Document,
    /// Document as originally generated.
    generated: Document,
    state: State,
}

impl DocumentEditor {
    /// Start in Viewing mode on a freshly generated document.
    pub fn new(document: Document) -> Self {
        Self {
            generated: document.clone(),
            document,
            state: State::Viewing,
        }
    }

    pub fn mode(&self) -> Mode {
        match self.state {
            State::Viewing => Mode::Viewing,
            State::Editing { .. } => Mode::Editing,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode() == Mode::Editing
    }

    /// The saved document. Unaffected by unsaved buffer changes.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The edit buffer, if editing.
    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            State::Editing { buffer } => Some(buffer),
            State::Viewing => None,
        }
    }

    /// Viewing → Editing, copying the document into the buffer.
    pub fn begin_edit(&mut self) -> Result<(), EditorError> {
        if self.is_editing() {
            return Err(EditorError::AlreadyEditing);
        }
        self.state = State::Editing {
            buffer: self.document.as_str().to_string(),
        };
        Ok(())
    }

    /// Mutable access to the buffer.
    pub fn buffer_mut(&mut self) -> Result<&mut String, EditorError> {
        match &mut self.state {
            State::Editing { buffer } => Ok(buffer),
            State::Viewing => Err(EditorError::NotEditing),
        }
    }

    /// Replace the whole buffer.
    pub fn set_buffer(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        *self.buffer_mut()? = text.into();
        Ok(())
    }

    /// Append to the buffer.
    pub fn push_str(&mut self, text: &str) -> Result<(), EditorError> {
        self.buffer_mut()?.push_str(text);
        Ok(())
    }

    /// Editing → Viewing, keeping the buffer as the new document.
    ///
    /// Returns the notification to present.
    pub fn save(&mut self) -> Result<Notification, EditorError> {
        match std::mem::replace(&mut self.state, State::Viewing) {
            State::Editing { buffer } => {
                self.document = Document::new(buffer);
                Ok(Notification::normal(
                    "Changes saved",
                    "Your changelog edits have been saved.",
                ))
            }
            State::Viewing => Err(EditorError::NotEditing),
        }
    }

    /// Editing → Viewing, discarding the buffer.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        match self.state {
            State::Editing { .. } => {
                self.state = State::Viewing;
                Ok(())
            }
            State::Viewing => Err(EditorError::NotEditing),
        }
    }

    /// Whether the buffer holds changes not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.buffer()
            .is_some_and(|buffer| buffer != self.document.as_str())
    }

    /// Whether a save changed the document away from the generated text.
    pub fn was_edited(&self) -> bool {
        self.document != self.generated
    }
}
