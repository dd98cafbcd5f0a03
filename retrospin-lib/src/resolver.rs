//! Serial to title resolution.
//!
//! A stored key matches a probed serial when the two are equal or when the
//! probed serial is a prefix of the stored key; both sides are compared by
//! [`match_key`], so `SLUS_00515` and `SLUS-00515` meet. Discs often expose
//! a shorter serial than the catalog row (disc-set suffixes, revision
//! letters), hence the prefix rule.
//!
//! A short serial can prefix-match unrelated titles. Those all end up as
//! candidates and go through the disambiguator like any other ambiguity.

use retrospin_core::{System, lookup_variants, match_key};

use crate::index::{TitleEntry, TitleIndex};

/// Title the store uses for rows nobody has named. Never a real match.
pub const NO_TITLE: &str = "Unknown Game";

/// Candidate set for one serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    NoMatch,
    Single(TitleEntry),
    Multiple(Vec<TitleEntry>),
}

impl ResolveResult {
    fn from_candidates(mut candidates: Vec<TitleEntry>) -> Self {
        match candidates.len() {
            0 => Self::NoMatch,
            1 => Self::Single(candidates.remove(0)),
            _ => Self::Multiple(candidates),
        }
    }

    pub fn candidates(&self) -> &[TitleEntry] {
        match self {
            Self::NoMatch => &[],
            Self::Single(entry) => std::slice::from_ref(entry),
            Self::Multiple(entries) => entries,
        }
    }
}

/// Chooses one title when several match.
pub trait Disambiguator {
    /// Return the chosen title, or `None` for no selection.
    ///
    /// Implementations must not block forever when nobody can answer; a
    /// headless caller should get the first candidate.
    fn choose(&mut self, candidates: &[TitleEntry], system: System, serial: &str)
    -> Option<String>;
}

/// Headless disambiguator: always the first candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl Disambiguator for FirstCandidate {
    fn choose(
        &mut self,
        candidates: &[TitleEntry],
        _system: System,
        _serial: &str,
    ) -> Option<String> {
        candidates.first().map(|entry| entry.title.clone())
    }
}

/// Why resolution produced no usable title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// Nothing in the index matched, or the only match was a placeholder
    NoTitle,
    /// Several titles matched and none was chosen
    NoSelection,
}

/// Looks serials up in a [`TitleIndex`].
pub struct TitleResolver<'a> {
    index: &'a TitleIndex,
}

impl<'a> TitleResolver<'a> {
    pub fn new(index: &'a TitleIndex) -> Self {
        Self { index }
    }

    /// Collect every candidate title for `serial`.
    ///
    /// Keys are visited in serial order and each contributes all its
    /// titles, so multi-disc sets keep one candidate per disc.
    pub fn resolve(&self, serial: &str, system: System) -> ResolveResult {
        let variants = lookup_variants(system, serial);
        let Some(primary) = variants.first().map(|v| match_key(v)) else {
            return ResolveResult::NoMatch;
        };
        if primary.is_empty() {
            return ResolveResult::NoMatch;
        }
        let alternates: Vec<String> = variants[1..].iter().map(|v| match_key(v)).collect();

        let mut candidates = Vec::new();
        for (stored, titles) in self.index.keys_for(system.code()) {
            let stored = match_key(stored);
            let matched = stored == primary
                || stored.starts_with(&primary)
                || alternates.iter().any(|alt| *alt == stored);
            if matched {
                candidates.extend_from_slice(titles);
            }
        }
        log::debug!(
            "{} serial {} matched {} candidate(s)",
            system.short_label(),
            serial,
            candidates.len()
        );
        ResolveResult::from_candidates(candidates)
    }

    /// Resolve `serial` down to one usable title.
    ///
    /// The disambiguator is consulted only when more than one candidate
    /// matched. The [`NO_TITLE`] placeholder is never returned as a title.
    pub fn select(
        &self,
        serial: &str,
        system: System,
        disambiguator: &mut dyn Disambiguator,
    ) -> Result<String, Unresolved> {
        let title = match self.resolve(serial, system) {
            ResolveResult::NoMatch => return Err(Unresolved::NoTitle),
            ResolveResult::Single(entry) => entry.title,
            ResolveResult::Multiple(candidates) => {
                log::info!(
                    "{} titles match {} serial {}",
                    candidates.len(),
                    system.short_label(),
                    serial
                );
                disambiguator
                    .choose(&candidates, system, serial)
                    .ok_or(Unresolved::NoSelection)?
            }
        };
        if is_usable_title(&title) {
            Ok(title)
        } else {
            log::warn!(
                "Index names {} serial {} as {:?}; treating as unmatched",
                system.short_label(),
                serial,
                title
            );
            Err(Unresolved::NoTitle)
        }
    }
}

fn is_usable_title(title: &str) -> bool {
    let title = title.trim();
    !title.is_empty() && title != NO_TITLE
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
