//! Tenant id derivation.
//!
//! A business id is its name lowercased with every whitespace run
//! replaced by a single hyphen. Two names that normalize the same way
//! map to the same id and the later write replaces the earlier one;
//! there is no disambiguation step.

use crate::error::{MartError, MartResult};

/// Derive the tenant id for a business name.
pub fn derive(name: &str) -> MartResult<String> {
    if name.trim().is_empty() {
        return Err(MartError::validation("business name must not be blank"));
    }

    let mut id = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
                in_whitespace = true;
            }
        } else {
            id.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(derive("Acme Corp").unwrap(), "acme-corp");
    }

    #[test]
    fn whitespace_runs_collapse_to_one_hyphen() {
        assert_eq!(derive("Acme   Corp").unwrap(), "acme-corp");
        assert_eq!(derive("Acme\t\nCorp").unwrap(), "acme-corp");
    }

    #[test]
    fn colliding_names_share_an_id() {
        assert_eq!(derive("ACME corp").unwrap(), derive("acme  CORP").unwrap());
    }

    #[test]
    fn edge_whitespace_is_kept_as_hyphens() {
        assert_eq!(derive(" Acme ").unwrap(), "-acme-");
    }

    #[test]
    fn punctuation_is_untouched() {
        assert_eq!(derive("Bob's Café").unwrap(), "bob's-café");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(derive(""), Err(MartError::Validation { .. })));
        assert!(matches!(derive("   "), Err(MartError::Validation { .. })));
    }
}
