//! Outcome of an operation that may or may not change state.
//!
//! [`DisjointSet::union`](crate::union_find::DisjointSet::union) answers with a [`Did`]
//! so callers can tell a merge apart from a refused or redundant one.

use std::ops::{BitOr, BitOrAssign};

/// Descriptive replacement for a `bool` "changed" flag.
///
/// ```
/// # use mazeworks::did::Did;
/// # use mazeworks::union_find::DisjointSet;
/// let mut sets = DisjointSet::with_size(3);
/// let merged = sets.union(0, 1).unwrap() | sets.union(1, 0).unwrap();
/// assert!(merged.did_something());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Did {
    /// State was modified
    Something,
    /// State is unchanged
    Nothing,
}

impl Did {
    pub fn did_something(&self) -> bool {
        matches!(self, Did::Something)
    }

    pub fn did_nothing(&self) -> bool {
        !self.did_something()
    }
}

impl From<bool> for Did {
    fn from(changed: bool) -> Self {
        if changed { Did::Something } else { Did::Nothing }
    }
}

impl BitOr for Did {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl BitOrAssign for Did {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = (self.did_something() || rhs.did_something()).into();
    }
}

#[cfg(test)]
mod tests {
    use super::Did;

    #[test]
    fn combining() {
        assert_eq!(Did::Nothing | Did::Nothing, Did::Nothing);
        assert_eq!(Did::Nothing | Did::Something, Did::Something);
        assert!(Did::from(false).did_nothing());
        assert!(!Did::Something.did_nothing());

        let mut acc = Did::Nothing;
        acc |= Did::Something;
        acc |= Did::Nothing;
        assert!(acc.did_something());
    }
}
