//! Term resolution: one lookup key, three possible meanings.
//!
//! A term is classified before any store access, in fixed priority order:
//! numeric literal, then store identifier, then display name. A term that is
//! both numeric and id-shaped (an id made only of digits) is numeric.
//!
//! Terms are used exactly as given: surrounding whitespace is not trimmed, and
//! numbers follow Rust float syntax, so `" 25"` and `"0x19"` are names.

use pokedex_core::is_valid_id;
use pokedex_sql::Value;

use crate::model::Pokemon;

use super::{LookupKind, PokemonError, PokemonService};

/// A classified lookup term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term<'a> {
    /// The whole term parses as a finite number. Holds the integer code it
    /// denotes, or `None` when the number is not an integer any code could equal.
    Numeric(Option<i64>),
    /// The term has the shape of a store identifier.
    StoreId(&'a str),
    /// Anything else, matched against the stored name as-is.
    Name(&'a str),
}

impl<'a> Term<'a> {
    pub fn classify(term: &'a str) -> Self {
        match term.parse::<f64>() {
            Ok(n) if n.is_finite() => Term::Numeric(integral_code(term, n)),
            _ if is_valid_id(term) => Term::StoreId(term),
            _ => Term::Name(term),
        }
    }
}

/// Exact integer parse first so long digit strings keep full precision.
fn integral_code(term: &str, n: f64) -> Option<i64> {
    if let Ok(code) = term.parse::<i64>() {
        return Some(code);
    }
    // 2^63 is exactly representable; anything at or beyond it cannot be an i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if n.fract() == 0.0 && n >= -LIMIT && n < LIMIT {
        Some(n as i64)
    } else {
        None
    }
}

impl PokemonService {
    /// Resolve a term to exactly one record.
    ///
    /// The branch that classified the term is the only one consulted; a miss
    /// reports that branch's [`LookupKind`] and never falls through.
    pub fn find_one(&self, term: &str) -> Result<Pokemon, PokemonError> {
        match Term::classify(term) {
            Term::Numeric(code) => {
                let found = match code {
                    Some(code) => self.find_by("code", Value::Integer(code))?,
                    None => None,
                };
                found.ok_or_else(|| PokemonError::not_found(LookupKind::Code, term))
            }
            Term::StoreId(id) => self
                .find_by("id", Value::Text(id.to_string()))?
                .ok_or_else(|| PokemonError::not_found(LookupKind::Id, term)),
            Term::Name(name) => self
                .find_by("name", Value::Text(name.to_string()))?
                .ok_or_else(|| PokemonError::not_found(LookupKind::Name, term)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CreatePokemon;
    use crate::service::tests::{broken_service, test_service};

    #[test]
    fn classify_numeric() {
        assert_eq!(Term::classify("25"), Term::Numeric(Some(25)));
        assert_eq!(Term::classify("007"), Term::Numeric(Some(7)));
        assert_eq!(Term::classify("-3"), Term::Numeric(Some(-3)));
        assert_eq!(Term::classify("1e2"), Term::Numeric(Some(100)));
        assert_eq!(Term::classify("2.0"), Term::Numeric(Some(2)));
        assert_eq!(Term::classify("2.5"), Term::Numeric(None));
        assert_eq!(Term::classify("1e300"), Term::Numeric(None));
    }

    #[test]
    fn classify_non_finite_is_not_numeric() {
        assert_eq!(Term::classify("inf"), Term::Name("inf"));
        assert_eq!(Term::classify("NaN"), Term::Name("NaN"));
        assert_eq!(Term::classify(" 25"), Term::Name(" 25"));
        assert_eq!(Term::classify("0x19"), Term::Name("0x19"));
    }

    #[test]
    fn classify_store_id_and_name() {
        let id = "0123456789abcdef0123456789abcdef";
        assert_eq!(Term::classify(id), Term::StoreId(id));
        assert_eq!(Term::classify("pikachu"), Term::Name("pikachu"));
        assert_eq!(Term::classify(""), Term::Name(""));
    }

    #[test]
    fn classify_digit_only_id_is_numeric() {
        let id = "00000000000000000000000000000025";
        assert!(is_valid_id(id));
        assert_eq!(Term::classify(id), Term::Numeric(Some(25)));
    }

    #[test]
    fn resolves_by_code_id_and_name() {
        let svc = test_service();
        let created = svc.create(CreatePokemon::new(25, "Pikachu")).unwrap();

        assert_eq!(svc.find_one("25").unwrap(), created);
        assert_eq!(svc.find_one("0025").unwrap(), created);
        assert_eq!(svc.find_one(&created.id).unwrap(), created);
        assert_eq!(svc.find_one("pikachu").unwrap(), created);
    }

    #[test]
    fn name_lookup_is_case_sensitive() {
        let svc = test_service();
        svc.create(CreatePokemon::new(25, "Pikachu")).unwrap();

        assert_eq!(
            svc.find_one("PIKACHU").unwrap_err(),
            PokemonError::not_found(LookupKind::Name, "PIKACHU")
        );
    }

    #[test]
    fn numeric_miss_does_not_fall_through() {
        let svc = test_service();
        // A record whose name is a numeric string.
        let odd = svc.insert_many(vec![CreatePokemon::new(1, "151")]).unwrap();
        assert_eq!(odd, 1);

        assert_eq!(
            svc.find_one("151").unwrap_err(),
            PokemonError::not_found(LookupKind::Code, "151")
        );
        assert_eq!(
            svc.find_one("2.5").unwrap_err(),
            PokemonError::not_found(LookupKind::Code, "2.5")
        );
    }

    #[test]
    fn digit_only_id_resolves_as_code() {
        let svc = test_service();
        let pikachu = svc.create(CreatePokemon::new(25, "pikachu")).unwrap();

        let term = "00000000000000000000000000000025";
        assert_eq!(svc.find_one(term).unwrap(), pikachu);

        let term = "00000000000000000000000000000026";
        assert_eq!(
            svc.find_one(term).unwrap_err(),
            PokemonError::not_found(LookupKind::Code, term)
        );
    }

    #[test]
    fn misses_report_their_branch() {
        let svc = test_service();
        let id = "0123456789abcdef0123456789abcdef";

        assert_eq!(svc.find_one("999").unwrap_err(), PokemonError::not_found(LookupKind::Code, "999"));
        assert_eq!(svc.find_one(id).unwrap_err(), PokemonError::not_found(LookupKind::Id, id));
        assert_eq!(svc.find_one("mew").unwrap_err(), PokemonError::not_found(LookupKind::Name, "mew"));
        assert_eq!(svc.find_one("").unwrap_err(), PokemonError::not_found(LookupKind::Name, ""));
    }

    #[test]
    fn storage_fault_is_internal_lookup() {
        let svc = broken_service();
        assert_eq!(svc.find_one("25").unwrap_err(), PokemonError::InternalLookup);
        assert_eq!(
            svc.find_one("0123456789abcdef0123456789abcdef").unwrap_err(),
            PokemonError::InternalLookup
        );
        assert_eq!(svc.find_one("pikachu").unwrap_err(), PokemonError::InternalLookup);
    }
}
