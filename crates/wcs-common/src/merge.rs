//! Typed structural merge of partial parse results.
//!
//! Every parsed-document type is a tree of `Option` fields. A `None` field
//! means "this partial result did not contribute the field". Merging `other`
//! into `self` walks the tree:
//!
//! - nested structures present on both sides merge recursively
//! - any other field present in `other` replaces the value in `self`
//! - fields absent from `other` are left untouched
//!
//! Lists count as leaves, so a later contributor replaces a list outright.

/// Recursive merge with last-write-wins at the leaves.
pub trait Merge {
    fn merge(&mut self, other: Self);
}

/// Replace `target` with `other` when `other` is present.
pub fn merge_leaf<T>(target: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *target = other;
    }
}

/// Merge `other` into `target`, recursing when both sides are present.
pub fn merge_nested<T: Merge>(target: &mut Option<T>, other: Option<T>) {
    if let Some(other) = other {
        match target {
            Some(existing) => existing.merge(other),
            None => *target = Some(other),
        }
    }
}

/// Implement [`Merge`] for a struct of `Option` fields.
///
/// `leaves` are replaced outright, `nested` fields merge recursively.
macro_rules! merge_fields {
    ($ty:ty, leaves: [$($leaf:ident),* $(,)?], nested: [$($nested:ident),* $(,)?]) => {
        impl $crate::merge::Merge for $ty {
            fn merge(&mut self, other: Self) {
                $( $crate::merge::merge_leaf(&mut self.$leaf, other.$leaf); )*
                $( $crate::merge::merge_nested(&mut self.$nested, other.$nested); )*
            }
        }
    };
}

pub(crate) use merge_fields;
