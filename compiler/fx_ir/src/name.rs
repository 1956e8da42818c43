//! Names and namespace paths.
//!
//! `DName` is a single identifier segment; `DPath` is a root-first chain of
//! segments naming a namespace (`A.B.C`). The empty path is the root.

use std::fmt;

use smallvec::SmallVec;

/// A single identifier name.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DName(Box<str>);

impl DName {
    /// Reserved name contributed by a `Parent` keyword segment.
    pub const PARENT_KEYWORD: &'static str = "Parent";
    /// Reserved name contributed by a `Self` keyword segment.
    pub const SELF_KEYWORD: &'static str = "Self";

    #[inline]
    pub fn new(value: impl Into<Box<str>>) -> Self {
        DName(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The name a `Parent` segment contributes to a path.
    pub fn parent_keyword() -> Self {
        DName::new(Self::PARENT_KEYWORD)
    }

    /// The name a `Self` segment contributes to a path.
    pub fn self_keyword() -> Self {
        DName::new(Self::SELF_KEYWORD)
    }
}

impl From<&str> for DName {
    fn from(value: &str) -> Self {
        DName::new(value)
    }
}

impl fmt::Debug for DName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DName({:?})", &*self.0)
    }
}

impl fmt::Display for DName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A namespace path, stored root-first.
///
/// Most paths in formulas are one or two segments deep, so segments are
/// kept inline up to four before spilling to the heap.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DPath {
    segments: SmallVec<[DName; 4]>,
}

impl DPath {
    /// The root path (no segments).
    #[inline]
    pub fn root() -> Self {
        DPath {
            segments: SmallVec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments below the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return a new path with `name` appended as the innermost segment.
    #[must_use]
    pub fn append(&self, name: DName) -> DPath {
        let mut segments = self.segments.clone();
        segments.push(name);
        DPath { segments }
    }

    /// Append `name` in place.
    pub fn push(&mut self, name: DName) {
        self.segments.push(name);
    }

    /// Innermost segment, or `None` for the root.
    pub fn name(&self) -> Option<&DName> {
        self.segments.last()
    }

    /// The enclosing path, or `None` for the root.
    pub fn parent(&self) -> Option<DPath> {
        let (_, rest) = self.segments.split_last()?;
        Some(DPath {
            segments: rest.iter().cloned().collect(),
        })
    }

    /// Segments in root-to-leaf order.
    #[inline]
    pub fn segments(&self) -> &[DName] {
        &self.segments
    }

    /// Render as formula syntax: `A.B.C`.
    pub fn to_dotted(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(segment.as_str());
        }
        out
    }
}

impl FromIterator<DName> for DPath {
    fn from_iter<I: IntoIterator<Item = DName>>(iter: I) -> Self {
        DPath {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for DPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Root")?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}
