//! Ordered locale collections with an explicit "unrestricted" state.
//!
//! A [`LocaleSet`] distinguishes three states by identity rather than by
//! contents: unset (unrestricted, contains everything), present but empty
//! (contains nothing), and populated (contains the hierarchical closure of
//! its members). The distinction survives every copy operation; collapsing
//! "unset" into "empty" would silently turn "match anything" into "match
//! nothing".

use crate::Locale;


/// Ordered collection of [`Locale`] values with tri-state semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleSet {
    members: Option<Vec<Locale>>,
}

impl LocaleSet {
    /// The unset state: matches every locale.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self { members: None }
    }

    /// The present-but-empty state: matches no locale.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            members: Some(Vec::new()),
        }
    }

    /// A populated set containing exactly the closure of `members`.
    #[must_use]
    pub fn from_members(members: Vec<Locale>) -> Self {
        Self {
            members: Some(members),
        }
    }

    /// True only for the unset state.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.members.is_none()
    }

    /// True only for the present-but-empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.as_ref().is_some_and(Vec::is_empty)
    }

    /// Number of enumerated members (zero for both unset and empty states).
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.as_ref().map_or(0, Vec::len)
    }

    /// Iterates the enumerated members in their stored order.
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.members.iter().flat_map(|members| members.iter())
    }

    /// Returns a copy ordered by [`Locale::compare`] ascending, tie-broken
    /// on the raw tag for determinism.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let members = self.members.clone().map(|mut members| {
            members.sort_by(|a, b| a.compare(b).then_with(|| a.as_str().cmp(b.as_str())));
            members
        });
        Self { members }
    }

    /// Hierarchical membership.
    ///
    /// The unrestricted set matches everything and the empty set nothing.
    /// Otherwise a locale is a member when any enumerated entry relates to it
    /// via [`Locale::contains`] in either direction. The loose, symmetric
    /// check is intentional: a request for a broad tag can be served by a
    /// narrower registered source and vice versa.
    #[must_use]
    pub fn contains(&self, locale: &Locale) -> bool {
        match &self.members {
            None => true,
            Some(members) => members
                .iter()
                .any(|member| member.contains(locale) || locale.contains(member)),
        }
    }

    /// Returns an independent copy of the enumerated members.
    ///
    /// Mutating the result never affects the set. Both the unset and empty
    /// states yield an empty vector; use [`LocaleSet::is_unlimited`] to tell
    /// them apart.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Locale> {
        self.members.clone().unwrap_or_default()
    }
}

impl From<Vec<Locale>> for LocaleSet {
    fn from(members: Vec<Locale>) -> Self {
        Self::from_members(members)
    }
}

impl FromIterator<Locale> for LocaleSet {
    fn from_iter<I: IntoIterator<Item = Locale>>(iter: I) -> Self {
        Self::from_members(iter.into_iter().collect())
    }
}
