use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Stable identifier for each calculator, used as the key into the
/// settings store and on usage events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorId {
    LoanRepayment,
    BorrowingPower,
    Refinance,
    InterestOnly,
    CompoundSavings,
    SuperGuarantee,
}

impl CalculatorId {
    pub const ALL: [CalculatorId; 6] = [
        CalculatorId::LoanRepayment,
        CalculatorId::BorrowingPower,
        CalculatorId::Refinance,
        CalculatorId::InterestOnly,
        CalculatorId::CompoundSavings,
        CalculatorId::SuperGuarantee,
    ];

    pub fn as_key(self) -> &'static str {
        match self {
            CalculatorId::LoanRepayment => "loan_repayment",
            CalculatorId::BorrowingPower => "borrowing_power",
            CalculatorId::Refinance => "refinance",
            CalculatorId::InterestOnly => "interest_only",
            CalculatorId::CompoundSavings => "compound_savings",
            CalculatorId::SuperGuarantee => "super_guarantee",
        }
    }
}

/// Per-calculator default parameters, as stored in the settings table.
/// `interest_rate` is percent-valued to match the form fields it seeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

/// Source of stored calculator defaults. Implementations must be
/// infallible from the caller's perspective: a store that cannot answer
/// returns None and the caller falls back to `builtin_defaults`.
pub trait SettingsStore {
    fn defaults(&self, id: CalculatorId) -> Option<DefaultParams>;
}

/// A store with nothing in it. Every lookup falls through to the builtins.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStore;

impl SettingsStore for EmptyStore {
    fn defaults(&self, _id: CalculatorId) -> Option<DefaultParams> {
        None
    }
}

/// Hard-coded fallback defaults, matching the published calculator forms.
/// These apply whenever the settings store has no row for the calculator.
pub fn builtin_defaults(id: CalculatorId) -> DefaultParams {
    let interest_rate = match id {
        CalculatorId::LoanRepayment => dec!(6.5),
        CalculatorId::BorrowingPower => dec!(6.5),
        // Refinance seeds the *new* loan rate; the current rate is always
        // user-supplied.
        CalculatorId::Refinance => dec!(6.5),
        CalculatorId::InterestOnly => dec!(6.5),
        CalculatorId::CompoundSavings => dec!(5.5),
        CalculatorId::SuperGuarantee => dec!(12),
    };
    DefaultParams {
        interest_rate: Some(interest_rate),
        disclaimer: None,
    }
}

/// Resolve the seed rate for a calculator: stored value if the store has
/// one, builtin otherwise.
pub fn resolve_default_rate(store: &dyn SettingsStore, id: CalculatorId) -> Decimal {
    store
        .defaults(id)
        .and_then(|p| p.interest_rate)
        .or(builtin_defaults(id).interest_rate)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedStore(DefaultParams);

    impl SettingsStore for FixedStore {
        fn defaults(&self, _id: CalculatorId) -> Option<DefaultParams> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_keys_are_stable() {
        let keys: Vec<&str> = CalculatorId::ALL.iter().map(|id| id.as_key()).collect();
        assert_eq!(
            keys,
            vec![
                "loan_repayment",
                "borrowing_power",
                "refinance",
                "interest_only",
                "compound_savings",
                "super_guarantee"
            ]
        );
    }

    #[test]
    fn test_empty_store_falls_back_to_builtin() {
        let rate = resolve_default_rate(&EmptyStore, CalculatorId::LoanRepayment);
        assert_eq!(rate, dec!(6.5));
    }

    #[test]
    fn test_stored_rate_wins_over_builtin() {
        let store = FixedStore(DefaultParams {
            interest_rate: Some(dec!(5.89)),
            disclaimer: None,
        });
        assert_eq!(
            resolve_default_rate(&store, CalculatorId::LoanRepayment),
            dec!(5.89)
        );
    }

    #[test]
    fn test_stored_row_without_rate_still_falls_back() {
        let store = FixedStore(DefaultParams {
            interest_rate: None,
            disclaimer: Some("General advice only.".into()),
        });
        assert_eq!(
            resolve_default_rate(&store, CalculatorId::SuperGuarantee),
            dec!(12)
        );
    }
}
