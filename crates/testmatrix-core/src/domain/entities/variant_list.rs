//! Ordered collection of expanded variants.
//!
//! Insertion order is the order test cases run in, so nothing here ever
//! reorders. [`VariantList::skip`] filters into a new list and leaves the
//! receiver untouched.

use std::fmt;
use std::slice;

use serde::Serialize;

use crate::domain::entities::variant::Variant;

/// The output of a matrix expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariantList {
    variants: Vec<Variant>,
}

impl VariantList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant at the end.
    pub fn add(&mut self, variant: Variant) {
        self.variants.push(variant);
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Variant> {
        self.variants.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Variant> {
        self.variants.iter()
    }

    pub fn as_slice(&self) -> &[Variant] {
        &self.variants
    }

    /// One single-parameter test case per variant, in order.
    ///
    /// Each call starts a fresh walk over the same in-memory list; the
    /// matrix is never re-expanded.
    pub fn cases(&self) -> Cases<'_> {
        Cases {
            inner: self.variants.iter(),
        }
    }

    /// A new list without the variants for which `check` returns `true`.
    pub fn skip<F>(&self, check: F) -> Self
    where
        F: Fn(&Variant) -> bool,
    {
        self.variants.iter().filter(|v| !check(v)).cloned().collect()
    }
}

impl From<Vec<Variant>> for VariantList {
    fn from(variants: Vec<Variant>) -> Self {
        Self { variants }
    }
}

impl FromIterator<Variant> for VariantList {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        Self {
            variants: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for VariantList {
    type Item = Variant;
    type IntoIter = std::vec::IntoIter<Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariantList {
    type Item = &'a Variant;
    type IntoIter = slice::Iter<'a, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}

// ── Test-case view ────────────────────────────────────────────────────────────

/// A parameter tuple holding exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase<'a>(pub &'a Variant);

impl<'a> TestCase<'a> {
    pub fn variant(&self) -> &'a Variant {
        self.0
    }
}

impl fmt::Display for TestCase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Iterator returned by [`VariantList::cases`].
#[derive(Debug, Clone)]
pub struct Cases<'a> {
    inner: slice::Iter<'a, Variant>,
}

impl<'a> Iterator for Cases<'a> {
    type Item = TestCase<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(TestCase)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Cases<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{
        AppDeploymentType, Architecture, FrameworkMoniker, ServerKind,
    };

    fn variant(framework: FrameworkMoniker, architecture: Architecture) -> Variant {
        Variant::new(
            ServerKind::PrimaryManagedServer,
            framework,
            AppDeploymentType::Portable,
            architecture,
        )
    }

    fn sample() -> VariantList {
        let mut list = VariantList::new();
        list.add(variant(FrameworkMoniker::NetCoreApp20, Architecture::X64));
        list.add(variant(FrameworkMoniker::NetCoreApp21, Architecture::X86));
        list.add(variant(FrameworkMoniker::NetCoreApp22, Architecture::X64));
        list
    }

    #[test]
    fn add_preserves_insertion_order() {
        let list = sample();
        let frameworks: Vec<_> = list.iter().map(Variant::framework).collect();
        assert_eq!(
            frameworks,
            [
                FrameworkMoniker::NetCoreApp20,
                FrameworkMoniker::NetCoreApp21,
                FrameworkMoniker::NetCoreApp22
            ]
        );
    }

    #[test]
    fn skip_returns_new_list_and_leaves_original() {
        let list = sample();
        let before = list.clone();

        let filtered = list.skip(|v| v.architecture() == Architecture::X86);

        assert_eq!(list, before);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|v| v.architecture() != Architecture::X86));
    }

    #[test]
    fn skip_is_chainable() {
        let filtered = sample()
            .skip(|v| v.architecture() == Architecture::X86)
            .skip(|v| v.framework() == FrameworkMoniker::NetCoreApp20);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get(0).unwrap().framework(), FrameworkMoniker::NetCoreApp22);
    }

    #[test]
    fn cases_wrap_one_variant_each_and_restart() {
        let list = sample();

        let first: Vec<_> = list.cases().map(|c| c.variant().clone()).collect();
        let second: Vec<_> = list.cases().map(|c| c.variant().clone()).collect();

        assert_eq!(first, list.as_slice());
        assert_eq!(first, second);
        assert_eq!(list.cases().len(), 3);
    }

    #[test]
    fn case_display_matches_variant() {
        let list = sample();
        let case = list.cases().next().unwrap();
        assert_eq!(case.to_string(), list.get(0).unwrap().to_string());
    }

    #[test]
    fn empty_list() {
        let list = VariantList::new();
        assert!(list.is_empty());
        assert_eq!(list.cases().count(), 0);
        assert!(list.skip(|_| false).is_empty());
    }
}
