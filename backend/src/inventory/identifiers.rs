//! Human-readable identifiers: `<PREFIX>-<NNN>`.

use uuid::Uuid;

pub const KEY_PREFIX: &str = "CHV";
pub const MAINTENANCE_PREFIX: &str = "MAINT";
pub const FUEL_LOG_PREFIX: &str = "FUEL";
pub const CONTRACT_PREFIX: &str = "CONT";

/// Next identifier after the highest numbered one among `existing`.
///
/// Gaps are never reused: `IT-001` and `IT-003` yield `IT-004`. Identifiers
/// that do not follow the scheme are ignored.
pub fn next_identifier<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let highest = existing
        .into_iter()
        .filter_map(|id| sequence_number(prefix, id))
        .max()
        .unwrap_or(0);
    format!("{}-{:03}", prefix, u128::from(highest) + 1)
}

/// Sequence numbers wider than `u64` do not follow the scheme.
fn sequence_number(prefix: &str, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Identifier for entries nested inside an asset (maintenance, fuel, contracts).
pub fn child_identifier(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, raw[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        assert_eq!(next_identifier("FUR", std::iter::empty()), "FUR-001");
    }

    #[test]
    fn uses_max_plus_one_without_filling_gaps() {
        assert_eq!(next_identifier("IT", ["IT-001", "IT-003"]), "IT-004");
    }

    #[test]
    fn ignores_foreign_and_malformed_identifiers() {
        let existing = ["VEH-007", "IT-002", "ASSET-1720000000-abcde", "IT-x9", "IT-"];
        assert_eq!(next_identifier("IT", existing), "IT-003");
        assert_eq!(next_identifier("CHV", ["CHV-009"]), "CHV-010");
    }

    #[test]
    fn keeps_counting_past_three_digits() {
        assert_eq!(next_identifier("VEH", ["VEH-999"]), "VEH-1000");
        assert_eq!(next_identifier("IT", ["IT-4294967295"]), "IT-4294967296");
        assert_eq!(
            next_identifier("IT", ["IT-18446744073709551615"]),
            "IT-18446744073709551616"
        );
    }

    #[test]
    fn child_identifiers_carry_prefix() {
        let id = child_identifier(CONTRACT_PREFIX);
        assert!(id.starts_with("CONT-"));
        assert_eq!(id.len(), "CONT-".len() + 8);
    }
}
