use crate::{BonusKind, EngineError, ResultEngine};

mod search;
mod write;

pub use search::TransactionSearchFilter;

fn validate_amount(amount_minor: i64) -> ResultEngine<()> {
    if amount_minor <= 0 {
        return Err(EngineError::InvalidAmount(
            "amount_minor must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// The bonus value and its kind are only meaningful together: an empty kind
/// pairs with a zero value, a non-empty kind with a non-zero one. The value
/// may be negative; the kind still drives the sign of the applied delta.
fn validate_bonus_pairing(bonus_minor: i64, bonus_kind: BonusKind) -> ResultEngine<()> {
    match bonus_kind {
        BonusKind::Empty => {
            if bonus_minor != 0 {
                return Err(EngineError::InvalidBonus(
                    "bonus_minor must be 0 when bonus kind is empty".to_string(),
                ));
            }
        }
        BonusKind::Income | BonusKind::Expense => {
            if bonus_minor == 0 {
                return Err(EngineError::InvalidBonus(
                    "bonus_minor must be non-zero when bonus kind is set".to_string(),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bonus_kind_requires_zero_value() {
        assert!(validate_bonus_pairing(0, BonusKind::Empty).is_ok());
        assert!(matches!(
            validate_bonus_pairing(10, BonusKind::Empty),
            Err(EngineError::InvalidBonus(_))
        ));
    }

    #[test]
    fn set_bonus_kind_requires_nonzero_value() {
        assert!(validate_bonus_pairing(10, BonusKind::Income).is_ok());
        assert!(validate_bonus_pairing(-10, BonusKind::Income).is_ok());
        assert!(validate_bonus_pairing(-10, BonusKind::Expense).is_ok());
        assert!(matches!(
            validate_bonus_pairing(0, BonusKind::Income),
            Err(EngineError::InvalidBonus(_))
        ));
        assert!(matches!(
            validate_bonus_pairing(0, BonusKind::Expense),
            Err(EngineError::InvalidBonus(_))
        ));
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(validate_amount(1).is_ok());
        for amount in [0, -100] {
            assert!(matches!(
                validate_amount(amount),
                Err(EngineError::InvalidAmount(_))
            ));
        }
    }
}
