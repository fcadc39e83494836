//! One edit of one key, start to finish.
//!
//! 1. ask the store for the key's type (absent keys are scalars)
//! 2. pick the accessor
//! 3. fetch and encode the value
//! 4. write header + text to a scratch file
//! 5. run the editor and wait for it
//! 6. read the file back
//! 7. stop if nothing but comment lines changed
//! 8. strip comments and validate (scalars in raw mode skip this)
//! 9. write
//!
//! The store is only mutated in step 9. The scratch file is removed on every
//! path. There is no check that the key was left alone by other clients
//! while the editor was open: the last write wins.

use crate::accessors::{Accessor, Fetched, StagedValue};
use crate::core::annotation::{self, WRAP_WIDTH};
use crate::core::editor::Editor;
use crate::core::error::EditError;
use crate::core::kind::ValueKind;
use crate::core::scratch::ScratchFile;
use crate::core::store::Store;
use crate::registry::AccessorRegistry;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit left the value as it was; nothing was written.
    Unchanged { key: String, kind: ValueKind },
    /// The edited value was written; `bytes` is the size of the payload.
    Written {
        key: String,
        kind: ValueKind,
        bytes: usize,
    },
}

/// Everything known about an edit once the editor has exited.
#[derive(Debug, Clone)]
pub struct Draft {
    pub accessor: Accessor,
    pub fetched: Fetched,
    /// Scratch file contents handed to the editor, header included.
    pub original: Vec<u8>,
    /// Scratch file contents after the editor exited.
    pub edited: Vec<u8>,
}

impl Draft {
    pub fn changed(&self) -> bool {
        self.original != self.edited
    }

    /// Text to validate and write, or `None` if the value is unchanged.
    ///
    /// Kinds with a header are compared after stripping comment lines, so
    /// touching only the header is not an edit.
    pub fn payload(&self) -> Option<Vec<u8>> {
        if !self.changed() {
            return None;
        }
        let payload = match self.accessor.description() {
            Some(_) => annotation::strip(&self.edited),
            None => self.edited.clone(),
        };
        (payload != self.fetched.text).then_some(payload)
    }
}

pub struct EditSession<'a> {
    store: &'a mut dyn Store,
    editor: &'a dyn Editor,
    registry: AccessorRegistry,
    raw: bool,
}

impl<'a> EditSession<'a> {
    pub fn new(store: &'a mut dyn Store, editor: &'a dyn Editor) -> Self {
        Self {
            store,
            editor,
            registry: AccessorRegistry::new(),
            raw: false,
        }
    }

    /// Skip JSON validation of scalar edits.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn run(&mut self, key: &str) -> Result<EditOutcome, EditError> {
        let draft = self.edit(key)?;
        let kind = draft.accessor.kind();

        let Some(payload) = draft.payload() else {
            debug!(key, changed = draft.changed(), "no change to write");
            return Ok(EditOutcome::Unchanged {
                key: key.to_string(),
                kind,
            });
        };

        let bytes = payload.len();
        let value = if self.raw && !kind.is_composite() {
            debug!(key, "raw mode, skipping validation");
            StagedValue::Scalar(payload)
        } else {
            draft.accessor.validate(&draft.fetched, &payload)?
        };

        draft.accessor.write(&mut *self.store, key, value)?;
        debug!(key, %kind, bytes, "written");
        Ok(EditOutcome::Written {
            key: key.to_string(),
            kind,
            bytes,
        })
    }

    /// Steps 1 to 6: fetch the value and let the operator edit it.
    pub fn edit(&mut self, key: &str) -> Result<Draft, EditError> {
        let reported = self
            .store
            .kind_of(key)
            .map_err(EditError::StoreReadError)?;
        let accessor = self.registry.resolve(reported.as_deref())?;
        debug!(key, reported = ?reported, kind = %accessor.kind(), "resolved accessor");

        let fetched = accessor.fetch(&mut *self.store, key)?;

        let mut original = accessor
            .description()
            .map(|d| annotation::render_header(d, WRAP_WIDTH).into_bytes())
            .unwrap_or_default();
        original.extend_from_slice(&fetched.text);

        let scratch = ScratchFile::create(&original)?;
        self.editor.edit(scratch.path())?;
        let edited = scratch.read_back()?;
        if let Err(e) = scratch.close() {
            warn!(error = %e, "failed to remove scratch file");
        }

        Ok(Draft {
            accessor,
            fetched,
            original,
            edited,
        })
    }
}
