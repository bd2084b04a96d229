use std::fmt;
use std::str::FromStr;

/// Proof systems a task can target.
///
/// The discriminant is the numeric id the task service uses for the proof system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum VerifierId {
    LambdaworksCairo = 0,
    GnarkPlonkBls12_381 = 1,
    Kimchi = 2,
    Sp1BabyBearBlake3 = 3,
}

/// Where a proof system keeps the public inputs needed to check a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicInputPolicy {
    /// Public inputs travel inside the proof bytes.
    Embedded,
    /// Public inputs must be supplied as a separate artifact.
    External,
}

/// One row of the verifier registry.
#[derive(Debug)]
pub struct VerifierEntry {
    pub id: VerifierId,
    pub token: &'static str,
    pub public_input: PublicInputPolicy,
}

/// Registry of supported verifiers, ordered by wire id.
///
/// Adding a proof system means adding a row here and a variant to [`VerifierId`];
/// the orchestration reads the policy from this table only.
static VERIFIERS: &[VerifierEntry] = &[
    VerifierEntry {
        id: VerifierId::LambdaworksCairo,
        token: "cairo",
        public_input: PublicInputPolicy::Embedded,
    },
    VerifierEntry {
        id: VerifierId::GnarkPlonkBls12_381,
        token: "plonk",
        public_input: PublicInputPolicy::External,
    },
    VerifierEntry {
        id: VerifierId::Kimchi,
        token: "kimchi",
        public_input: PublicInputPolicy::External,
    },
    VerifierEntry {
        id: VerifierId::Sp1BabyBearBlake3,
        token: "sp1",
        public_input: PublicInputPolicy::Embedded,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse verifier ID {token:?} (expected one of: {expected})")]
pub struct UnknownVerifierError {
    pub token: String,
    expected: String,
}

impl UnknownVerifierError {
    fn new(token: &str) -> Self {
        let expected = VerifierId::ALL
            .iter()
            .map(|id| id.token())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            token: token.to_string(),
            expected,
        }
    }
}

impl VerifierId {
    pub const ALL: [VerifierId; 4] = [
        VerifierId::LambdaworksCairo,
        VerifierId::GnarkPlonkBls12_381,
        VerifierId::Kimchi,
        VerifierId::Sp1BabyBearBlake3,
    ];

    /// Registry row for this verifier.
    pub fn entry(self) -> &'static VerifierEntry {
        &VERIFIERS[self.wire_id() as usize]
    }

    pub fn token(self) -> &'static str {
        self.entry().token
    }

    pub fn public_input_policy(self) -> PublicInputPolicy {
        self.entry().public_input
    }

    pub fn requires_public_input(self) -> bool {
        self.public_input_policy() == PublicInputPolicy::External
    }

    /// Numeric id the task service uses for this proof system.
    pub fn wire_id(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for VerifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for VerifierId {
    type Err = UnknownVerifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_verifier_id(s)
    }
}

/// Resolve a user supplied verifier token.
///
/// Surrounding whitespace is ignored; the token itself is matched exactly.
pub fn parse_verifier_id(input: &str) -> Result<VerifierId, UnknownVerifierError> {
    let token = input.trim();
    VERIFIERS
        .iter()
        .find(|entry| entry.token == token)
        .map(|entry| entry.id)
        .ok_or_else(|| UnknownVerifierError::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!(parse_verifier_id("cairo"), Ok(VerifierId::LambdaworksCairo));
        assert_eq!(parse_verifier_id("plonk"), Ok(VerifierId::GnarkPlonkBls12_381));
        assert_eq!(parse_verifier_id("kimchi"), Ok(VerifierId::Kimchi));
        assert_eq!(parse_verifier_id("sp1"), Ok(VerifierId::Sp1BabyBearBlake3));
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(parse_verifier_id(" plonk "), parse_verifier_id("plonk"));
        assert_eq!(parse_verifier_id("\tsp1\n"), Ok(VerifierId::Sp1BabyBearBlake3));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        for input in ["", "   ", "Cairo", "PLONK", "sp 1", "kim chi", "groth16", "unknown-token"] {
            let err = parse_verifier_id(input).unwrap_err();
            assert_eq!(err.token, input.trim());
        }
    }

    #[test]
    fn test_unknown_verifier_error_lists_tokens() {
        let err = parse_verifier_id("groth16").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("groth16"));
        assert!(msg.contains("cairo, plonk, kimchi, sp1"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(parse_verifier_id("kimchi"), Ok(VerifierId::Kimchi));
            assert!(parse_verifier_id("nope").is_err());
        }
    }

    #[test]
    fn test_public_input_policy_table() {
        assert!(!VerifierId::LambdaworksCairo.requires_public_input());
        assert!(VerifierId::GnarkPlonkBls12_381.requires_public_input());
        assert!(VerifierId::Kimchi.requires_public_input());
        assert!(!VerifierId::Sp1BabyBearBlake3.requires_public_input());
    }

    #[test]
    fn test_registry_covers_every_variant() {
        assert_eq!(VERIFIERS.len(), VerifierId::ALL.len());
        for id in VerifierId::ALL {
            let rows = VERIFIERS.iter().filter(|entry| entry.id == id).count();
            assert_eq!(rows, 1, "{id:?} must have exactly one registry row");
            assert_eq!(id.entry().id, id, "registry must be ordered by wire id");
        }
    }

    #[test]
    fn test_token_round_trips_through_from_str() {
        for id in VerifierId::ALL {
            assert_eq!(id.to_string().parse::<VerifierId>(), Ok(id));
        }
    }

    #[test]
    fn test_wire_ids_are_distinct() {
        let ids: Vec<u16> = VerifierId::ALL.iter().map(|id| id.wire_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
