//! Member sets: compact sets of region handles
//!
//! A grouping enumerates its members through a [`MemberSet`]. Every
//! representation answers `contains` without materializing the full element
//! list.
//!
//! ## Wire encoding
//!
//! | Kind | Code | Values |
//! |------|------|--------|
//! | Enumerated | 0 | every element, in order |
//! | Range | 1 | `first, count` |
//! | Runs | 2 | `first0, count0, first1, count1, ...` |
//! | Strided | 3 | `first, stride, count` |

use crate::error::{Error, Result};
use crate::types::{handle_from_wire, handle_to_wire, Handle};

/// Representation tag of a member set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberSetKind {
    /// Explicit list of handles
    Enumerated,
    /// Contiguous range
    Range,
    /// Sorted, non-overlapping runs
    Runs,
    /// Arithmetic progression
    Strided,
}

impl MemberSetKind {
    /// Stable wire code
    pub const fn code(&self) -> i32 {
        match self {
            MemberSetKind::Enumerated => 0,
            MemberSetKind::Range => 1,
            MemberSetKind::Runs => 2,
            MemberSetKind::Strided => 3,
        }
    }

    /// Parse a wire code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MemberSetKind::Enumerated),
            1 => Some(MemberSetKind::Range),
            2 => Some(MemberSetKind::Runs),
            3 => Some(MemberSetKind::Strided),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Enumerated {
        elements: Vec<Handle>,
        /// Sorted copy, only kept when `elements` is not already sorted
        sorted: Option<Vec<Handle>>,
    },
    Range {
        first: Handle,
        count: usize,
    },
    Runs(Vec<(Handle, usize)>),
    Strided {
        first: Handle,
        stride: usize,
        count: usize,
    },
}

/// A set of region handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSet {
    repr: Repr,
}

impl MemberSet {
    /// Explicit list of handles; enumeration preserves the given order
    pub fn enumerated(elements: Vec<Handle>) -> Self {
        let sorted = if elements.windows(2).all(|w| w[0] <= w[1]) {
            None
        } else {
            let mut copy = elements.clone();
            copy.sort_unstable();
            Some(copy)
        };
        MemberSet {
            repr: Repr::Enumerated { elements, sorted },
        }
    }

    /// Contiguous handles `first..first + count`
    pub fn range(first: Handle, count: usize) -> Self {
        MemberSet {
            repr: Repr::Range { first, count },
        }
    }

    /// Run-length encoded handles
    ///
    /// Runs must be non-empty, sorted by start, non-overlapping and end
    /// inside the handle space.
    pub fn runs(runs: Vec<(Handle, usize)>) -> Result<Self> {
        for &(first, count) in &runs {
            if count == 0 {
                return Err(Error::InvalidOperation(format!(
                    "member run starting at {} is empty",
                    first
                )));
            }
            if first.checked_add(count).is_none() {
                return Err(Error::InvalidOperation(format!(
                    "member run starting at {} with {} elements overflows the handle space",
                    first, count
                )));
            }
        }
        for pair in runs.windows(2) {
            let (first, count) = pair[0];
            if first + count > pair[1].0 {
                return Err(Error::InvalidOperation(format!(
                    "member runs at {} and {} overlap or are unsorted",
                    first, pair[1].0
                )));
            }
        }
        Ok(MemberSet {
            repr: Repr::Runs(runs),
        })
    }

    /// Handles `first, first + stride, ...` (`count` of them)
    pub fn strided(first: Handle, stride: usize, count: usize) -> Result<Self> {
        if stride == 0 {
            return Err(Error::InvalidOperation(
                "member stride must be at least 1".to_string(),
            ));
        }
        Ok(MemberSet {
            repr: Repr::Strided {
                first,
                stride,
                count,
            },
        })
    }

    /// Representation tag
    pub fn kind(&self) -> MemberSetKind {
        match &self.repr {
            Repr::Enumerated { .. } => MemberSetKind::Enumerated,
            Repr::Range { .. } => MemberSetKind::Range,
            Repr::Runs(_) => MemberSetKind::Runs,
            Repr::Strided { .. } => MemberSetKind::Strided,
        }
    }

    /// Number of elements (an enumerated list counts duplicates)
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Enumerated { elements, .. } => elements.len(),
            Repr::Range { count, .. } | Repr::Strided { count, .. } => *count,
            Repr::Runs(runs) => runs.iter().map(|(_, count)| count).sum(),
        }
    }

    /// Whether the set has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test, O(log n) or better for every representation
    pub fn contains(&self, handle: Handle) -> bool {
        match &self.repr {
            Repr::Enumerated { elements, sorted } => sorted
                .as_deref()
                .unwrap_or(elements)
                .binary_search(&handle)
                .is_ok(),
            Repr::Range { first, count } => handle >= *first && handle - first < *count,
            Repr::Runs(runs) => {
                let idx = runs.partition_point(|(first, _)| *first <= handle);
                idx > 0 && {
                    let (first, count) = runs[idx - 1];
                    handle - first < count
                }
            }
            Repr::Strided {
                first,
                stride,
                count,
            } => {
                handle >= *first && {
                    let delta = handle - first;
                    delta % stride == 0 && delta / stride < *count
                }
            }
        }
    }

    /// Largest element, if any
    ///
    /// Saturates at `usize::MAX` when a range or progression runs past the
    /// handle space, so such a set never validates against a catalog.
    pub fn max_element(&self) -> Option<Handle> {
        match &self.repr {
            Repr::Enumerated { elements, sorted } => match sorted {
                Some(sorted) => sorted.last().copied(),
                None => elements.last().copied(),
            },
            Repr::Range { first, count } => {
                count.checked_sub(1).map(|last| first.saturating_add(last))
            }
            Repr::Runs(runs) => runs.last().map(|(first, count)| first + count - 1),
            Repr::Strided {
                first,
                stride,
                count,
            } => count
                .checked_sub(1)
                .map(|last| first.saturating_add(last.saturating_mul(*stride))),
        }
    }

    /// Iterate the elements in enumeration order
    pub fn iter(&self) -> Members<'_> {
        match &self.repr {
            Repr::Enumerated { elements, .. } => Members::Slice(elements.iter()),
            Repr::Range { first, count } => Members::Range(*first..first.saturating_add(*count)),
            Repr::Runs(runs) => Members::Runs {
                runs: runs.iter(),
                current: 0..0,
            },
            Repr::Strided {
                first,
                stride,
                count,
            } => Members::Strided {
                next: *first,
                stride: *stride,
                remaining: *count,
            },
        }
    }

    /// Materialize every element
    pub fn all_elements(&self) -> Vec<Handle> {
        self.iter().collect()
    }

    /// Encode as `(kind code, values)`
    pub fn to_wire(&self) -> Result<(i32, Vec<i32>)> {
        let values = match &self.repr {
            Repr::Enumerated { elements, .. } => elements
                .iter()
                .map(|&h| handle_to_wire(h))
                .collect::<Result<Vec<_>>>()?,
            Repr::Range { first, count } => vec![handle_to_wire(*first)?, handle_to_wire(*count)?],
            Repr::Runs(runs) => {
                let mut values = Vec::with_capacity(runs.len() * 2);
                for &(first, count) in runs {
                    values.push(handle_to_wire(first)?);
                    values.push(handle_to_wire(count)?);
                }
                values
            }
            Repr::Strided {
                first,
                stride,
                count,
            } => vec![
                handle_to_wire(*first)?,
                handle_to_wire(*stride)?,
                handle_to_wire(*count)?,
            ],
        };
        Ok((self.kind().code(), values))
    }

    /// Decode from `(kind code, values)`
    pub fn from_wire(code: i32, values: &[i32]) -> Result<Self> {
        let kind = MemberSetKind::from_code(code)
            .ok_or_else(|| Error::Serialization(format!("unknown member set kind {}", code)))?;
        let decode = |v: i32| handle_from_wire(v, 0);
        match (kind, values) {
            (MemberSetKind::Enumerated, values) => Ok(MemberSet::enumerated(
                values.iter().map(|&v| decode(v)).collect::<Result<_>>()?,
            )),
            (MemberSetKind::Range, &[first, count]) => {
                Ok(MemberSet::range(decode(first)?, decode(count)?))
            }
            (MemberSetKind::Runs, values) if values.len() % 2 == 0 => {
                let runs = values
                    .chunks_exact(2)
                    .map(|pair| Ok((decode(pair[0])?, decode(pair[1])?)))
                    .collect::<Result<Vec<_>>>()?;
                MemberSet::runs(runs)
            }
            (MemberSetKind::Strided, &[first, stride, count]) => {
                MemberSet::strided(decode(first)?, decode(stride)?, decode(count)?)
            }
            (kind, values) => Err(Error::Serialization(format!(
                "{:?} member set cannot be built from {} values",
                kind,
                values.len()
            ))),
        }
    }
}

/// Iterator over the elements of a [`MemberSet`]
#[derive(Debug, Clone)]
pub enum Members<'a> {
    #[doc(hidden)]
    Slice(std::slice::Iter<'a, Handle>),
    #[doc(hidden)]
    Range(std::ops::Range<Handle>),
    #[doc(hidden)]
    Runs {
        runs: std::slice::Iter<'a, (Handle, usize)>,
        current: std::ops::Range<Handle>,
    },
    #[doc(hidden)]
    Strided {
        next: Handle,
        stride: usize,
        remaining: usize,
    },
}

impl Iterator for Members<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        match self {
            Members::Slice(iter) => iter.next().copied(),
            Members::Range(range) => range.next(),
            Members::Runs { runs, current } => loop {
                if let Some(h) = current.next() {
                    return Some(h);
                }
                let &(first, count) = runs.next()?;
                *current = first..first + count;
            },
            Members::Strided {
                next,
                stride,
                remaining,
            } => {
                if *remaining == 0 {
                    return None;
                }
                let h = *next;
                *remaining -= 1;
                *next = next.saturating_add(*stride);
                Some(h)
            }
        }
    }
}

impl<'a> IntoIterator for &'a MemberSet {
    type Item = Handle;
    type IntoIter = Members<'a>;

    fn into_iter(self) -> Members<'a> {
        self.iter()
    }
}
