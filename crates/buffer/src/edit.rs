// Chunk: docs/chunks/edit_scripts - Serializable edit scripts

//! Edits as values.
//!
//! A rewriting driver can discover edits in parallel, collect them as
//! [`Edit`]s, and apply them to one buffer sequentially with
//! [`SpliceBuffer::apply_all`]. With the `serde` feature an edit script can
//! also be stored as JSON; content is written as a string when it is valid
//! UTF-8 and as an array of bytes otherwise.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ApplyError, Result};
use crate::splice_buffer::SpliceBuffer;

/// One recorded operation against a [`SpliceBuffer`].
///
/// Offsets are in original source coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Edit {
    InsertLeft {
        offset: usize,
        #[cfg_attr(feature = "serde", serde(with = "payload"))]
        content: Vec<u8>,
        #[cfg_attr(feature = "serde", serde(default))]
        essential: bool,
    },
    InsertRight {
        offset: usize,
        #[cfg_attr(feature = "serde", serde(with = "payload"))]
        content: Vec<u8>,
        #[cfg_attr(feature = "serde", serde(default))]
        essential: bool,
    },
    Remove {
        offset: usize,
        length: usize,
    },
    Replace {
        offset: usize,
        length: usize,
        #[cfg_attr(feature = "serde", serde(with = "payload"))]
        content: Vec<u8>,
    },
}

#[cfg(feature = "serde")]
mod payload {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        Text(String),
        Bytes(Vec<u8>),
    }

    pub fn serialize<S: Serializer>(content: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        match std::str::from_utf8(content) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => content.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Ok(match Payload::deserialize(deserializer)? {
            Payload::Text(text) => text.into_bytes(),
            Payload::Bytes(bytes) => bytes,
        })
    }
}

impl Edit {
    pub fn insert_left(offset: usize, content: impl Into<Vec<u8>>) -> Self {
        Edit::InsertLeft {
            offset,
            content: content.into(),
            essential: false,
        }
    }

    pub fn insert_right(offset: usize, content: impl Into<Vec<u8>>) -> Self {
        Edit::InsertRight {
            offset,
            content: content.into(),
            essential: false,
        }
    }

    pub fn remove(offset: usize, length: usize) -> Self {
        Edit::Remove { offset, length }
    }

    pub fn replace(offset: usize, length: usize, content: impl Into<Vec<u8>>) -> Self {
        Edit::Replace {
            offset,
            length,
            content: content.into(),
        }
    }

    /// Marks an insertion as essential. Other edits are returned unchanged.
    #[must_use]
    pub fn essential(mut self) -> Self {
        if let Edit::InsertLeft { essential, .. } | Edit::InsertRight { essential, .. } = &mut self
        {
            *essential = true;
        }
        self
    }

    /// The source offset this edit starts at.
    pub fn offset(&self) -> usize {
        match self {
            Edit::InsertLeft { offset, .. }
            | Edit::InsertRight { offset, .. }
            | Edit::Remove { offset, .. }
            | Edit::Replace { offset, .. } => *offset,
        }
    }
}

impl SpliceBuffer {
    /// Applies a single edit.
    ///
    /// # Errors
    ///
    /// Whatever the matching operation returns; a rejected edit changes
    /// nothing.
    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        match edit {
            Edit::InsertLeft {
                offset,
                content,
                essential,
            } => self.insert_left(*offset, content.clone(), *essential),
            Edit::InsertRight {
                offset,
                content,
                essential,
            } => self.insert_right(*offset, content.clone(), *essential),
            Edit::Remove { offset, length } => self.remove(*offset, *length),
            Edit::Replace {
                offset,
                length,
                content,
            } => self.replace(*offset, *length, content.clone()),
        }
    }

    /// Applies `edits` in order, stopping at the first rejected one.
    ///
    /// # Errors
    ///
    /// [`ApplyError`] naming the index of the rejected edit. Edits before it
    /// stay applied.
    pub fn apply_all<'a, I>(&mut self, edits: I) -> std::result::Result<(), ApplyError>
    where
        I: IntoIterator<Item = &'a Edit>,
    {
        for (index, edit) in edits.into_iter().enumerate() {
            self.apply(edit)
                .map_err(|source| ApplyError { index, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpliceError;

    #[test]
    fn essential_only_touches_insertions() {
        assert_eq!(
            Edit::insert_left(3, "x").essential(),
            Edit::InsertLeft {
                offset: 3,
                content: b"x".to_vec(),
                essential: true
            }
        );
        assert_eq!(Edit::remove(1, 2).essential(), Edit::remove(1, 2));
    }

    #[test]
    fn offset_of_each_variant() {
        assert_eq!(Edit::insert_left(1, "").offset(), 1);
        assert_eq!(Edit::insert_right(2, "").offset(), 2);
        assert_eq!(Edit::remove(3, 1).offset(), 3);
        assert_eq!(Edit::replace(4, 1, "").offset(), 4);
    }

    #[test]
    fn apply_dispatches() {
        let mut buf = SpliceBuffer::from("Hello World");
        buf.apply(&Edit::insert_right(6, "Beautiful ")).unwrap();
        buf.apply(&Edit::insert_left(6, "Great ")).unwrap();
        buf.apply(&Edit::replace(0, 5, "Goodbye")).unwrap();
        assert_eq!(buf.generate(), b"Goodbye Great Beautiful World");
    }

    #[test]
    fn apply_all_reports_failing_index() {
        let mut buf = SpliceBuffer::from("abc");
        let edits = [
            Edit::insert_left(1, "-"),
            Edit::remove(2, 5),
            Edit::insert_left(3, "!"),
        ];
        let err = buf.apply_all(&edits).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(
            err.source,
            SpliceError::InvalidRange {
                offset: 2,
                length: 5,
                len: 3
            }
        );
        assert_eq!(buf.generate(), b"a-bc");
    }
}
