//! Descriptor types for addressing locations inside the storage hierarchy.
//!
//! A debug-shell address names up to five levels of the tree, in order:
//! container, object, distribution key (dkey), attribute key (akey), and
//! record extent. Each level is addressed either by a literal value or by a
//! positional index ("the Nth child, enumerated by the engine at lookup
//! time"), and the two modes are mutually exclusive per level by
//! construction: [`Level`] is a tagged union, not a pair of optional fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Per-level addressing
// ---------------------------------------------------------------------------

/// How a single hierarchy level is addressed.
///
/// There is no reserved "unset" sentinel value: an unaddressed level is the
/// `Unset` variant, and an index ordinal is carried inside `Index` where it
/// cannot be confused with a legitimately large index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level<T> {
    /// The level is not addressed.
    Unset,
    /// The level is addressed by a literal value.
    Value(T),
    /// The level is addressed by a positional index into the parent's
    /// children, resolved by the storage engine at lookup time.
    Index(u32),
}

impl<T> Level<T> {
    /// Whether this level is addressed at all (by value or by index).
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The literal value, if this level is addressed by value.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The positional index, if this level is addressed by index.
    pub const fn index(&self) -> Option<u32> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }
}

impl<T> Default for Level<T> {
    fn default() -> Self {
        Self::Unset
    }
}

// ---------------------------------------------------------------------------
// Literal value types
// ---------------------------------------------------------------------------

/// A container identifier: a 128-bit UUID.
pub type ContainerId = Uuid;

/// An object identifier: a pair of 64-bit halves.
///
/// Rendered as `hi.lo`, matching the address syntax the path parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    pub hi: u64,
    pub lo: u64,
}

impl ObjectId {
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.hi, self.lo)
    }
}

/// An owned key byte string (dkey or akey).
///
/// Keys are opaque bytes to the engine; the parser always copies the segment
/// content out of the input so the descriptor stays valid after the input
/// line is discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBuf(Vec<u8>);

impl KeyBuf {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for KeyBuf {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl fmt::Display for KeyBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// A record extent: a half-open range of record indices.
///
/// The address syntax `{start-end}` has an exclusive end, so `{1-6}` is
/// `offset = 1, length = 5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordExtent {
    pub offset: u64,
    pub length: u64,
}

impl RecordExtent {
    pub const fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// Exclusive end of the extent.
    pub const fn end(&self) -> u64 {
        self.offset + self.length
    }
}

impl fmt::Display for RecordExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}-{}}}", self.offset, self.end())
    }
}

// ---------------------------------------------------------------------------
// TreePath
// ---------------------------------------------------------------------------

/// A fully parsed address through the storage hierarchy.
///
/// Levels are populated strictly in hierarchy order by the path parser; a
/// level below an unaddressed level is never populated. The all-`Unset`
/// path is the root and is a valid address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePath {
    pub cont: Level<ContainerId>,
    pub oid: Level<ObjectId>,
    pub dkey: Level<KeyBuf>,
    pub akey: Level<KeyBuf>,
    pub recx: Level<RecordExtent>,
}

impl TreePath {
    /// The root path: nothing addressed.
    pub fn root() -> Self {
        Self::default()
    }

    pub const fn has_cont(&self) -> bool {
        self.cont.is_set()
    }

    pub const fn has_obj(&self) -> bool {
        self.oid.is_set()
    }

    pub const fn has_dkey(&self) -> bool {
        self.dkey.is_set()
    }

    pub const fn has_akey(&self) -> bool {
        self.akey.is_set()
    }

    pub const fn has_recx(&self) -> bool {
        self.recx.is_set()
    }

    pub const fn is_root(&self) -> bool {
        !self.has_cont()
            && !self.has_obj()
            && !self.has_dkey()
            && !self.has_akey()
            && !self.has_recx()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn seg<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            level: &Level<T>,
        ) -> Result<bool, fmt::Error> {
            match level {
                Level::Unset => Ok(false),
                Level::Value(v) => {
                    write!(f, "/{v}")?;
                    Ok(true)
                }
                Level::Index(i) => {
                    write!(f, "/[{i}]")?;
                    Ok(true)
                }
            }
        }

        if self.is_root() {
            return write!(f, "/");
        }
        // Render stops at the first unaddressed level; lower levels are
        // guaranteed unaddressed too.
        if !seg(f, &self.cont)? {
            return Ok(());
        }
        if !seg(f, &self.oid)? {
            return Ok(());
        }
        if !seg(f, &self.dkey)? {
            return Ok(());
        }
        if !seg(f, &self.akey)? {
            return Ok(());
        }
        seg(f, &self.recx)?;
        Ok(())
    }
}
