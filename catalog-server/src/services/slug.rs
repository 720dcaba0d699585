//! Slug allocation
//!
//! `slugify` turns a display name into a URL-safe identifier; the allocator
//! probes the store and appends `-1`, `-2`, ... until the candidate is free.
//! The unique index on `restaurant.slug` is the backstop: the caller treats
//! a duplicate-key failure on write as a lost race and re-allocates.

use surrealdb::RecordId;

use crate::db::repository::RestaurantRepository;
use crate::utils::{AppError, AppResult};

/// How many allocate-then-write rounds a caller should attempt before
/// surfacing a conflict.
pub const MAX_ALLOC_ATTEMPTS: usize = 3;

/// Lowercase, drop quotes, collapse runs of non-alphanumerics to a single
/// hyphen, trim edge hyphens. May come out empty for all-symbol input.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.trim().chars() {
        if c == '\'' || c == '"' {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

#[derive(Clone)]
pub struct SlugAllocator {
    repo: RestaurantRepository,
}

impl SlugAllocator {
    pub fn new(repo: RestaurantRepository) -> Self {
        Self { repo }
    }

    /// Find a free slug for `hint` (a raw name or slug hint).
    ///
    /// Archived restaurants keep their slugs reserved, so the probe runs
    /// over the whole table. `exclude` is the record being renamed; it may
    /// keep the slug it already holds.
    pub async fn allocate(&self, hint: &str, exclude: Option<&RecordId>) -> AppResult<String> {
        let base = slugify(hint);
        if base.is_empty() {
            return Err(AppError::validation(format!(
                "Cannot derive a slug from '{hint}'"
            )));
        }

        if !self.repo.slug_taken(&base, exclude).await? {
            return Ok(base);
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.repo.slug_taken(&candidate, exclude).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Tasty Bites!"), "tasty-bites");
        assert_eq!(slugify("  Spice   Route  "), "spice-route");
    }

    #[test]
    fn strips_quotes_instead_of_hyphenating() {
        assert_eq!(slugify("Mama's \"Secret\" Kitchen"), "mamas-secret-kitchen");
    }

    #[test]
    fn collapses_symbol_runs_and_trims_edges() {
        assert_eq!(slugify("--Best... Pizza??"), "best-pizza");
        assert_eq!(slugify("a//b__c"), "a-b-c");
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(slugify("Café Olé"), "caf-ol");
    }

    #[test]
    fn all_symbol_input_comes_out_empty() {
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify(""), "");
    }
}
