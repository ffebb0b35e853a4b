//! One-way merge of a shipped default document into a user document.
//!
//! When a patch update ships new settings, existing users still have their old
//! settings file.  [`reconcile`] brings that file up to date by copying in
//! every key the defaults know about but the user file lacks, without touching
//! anything the user already has.
//!
//! # Merge rules
//!
//! - Sections of the default are visited in stored order, and keys within each
//!   section in stored order, so new keys land in the user file in the same
//!   order they appear in the default.
//! - A key that already exists in the target is never overwritten or moved,
//!   even if its value differs from the default.  Presence alone decides.
//! - A section missing from the target is created by the first key copied
//!   into it, after the target's existing sections.
//!
//! Running the merge twice is a no-op the second time.

use tracing::debug;

use super::document::Document;

/// Copies every `(section, key)` present in `defaults` but absent from
/// `target` into `target`, using the default's value.
///
/// Returns `true` if at least one key was added.
pub fn reconcile(defaults: &Document, target: &mut Document) -> bool {
    let mut added = 0usize;

    for section in defaults.sections() {
        for (key, value) in section.entries() {
            if !target.has_key(section.name(), key) {
                debug!("adding missing setting [{}] {}={}", section.name(), key, value);
                target.put_string(section.name(), key, value);
                added += 1;
            }
        }
    }

    if added > 0 {
        debug!("reconcile added {added} missing setting(s)");
    }
    added > 0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
