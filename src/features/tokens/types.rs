//! Wire types for the token-metering endpoints.

use serde::Deserialize;

/// Balance detail from `GET /api/user/tokens`. `current_tokens` is the
/// authoritative figure the session balance reconciles against.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenBalance {
    pub current_tokens: u64,
    #[serde(default)]
    pub purchased_tokens: u64,
    #[serde(default)]
    pub max_tokens: u64,
    #[serde(default)]
    pub days_until_reset: i64,
    #[serde(default)]
    pub billing_period_start: Option<String>,
    #[serde(default)]
    pub billing_period_end: Option<String>,
}

impl TokenBalance {
    /// Fraction of the allowance still available, for the balance meter.
    pub fn remaining_ratio(&self) -> f64 {
        if self.max_tokens == 0 {
            return 0.0;
        }
        (self.current_tokens as f64 / self.max_tokens as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::TokenBalance;

    #[test]
    fn balance_decodes_with_partial_fields() {
        let balance: TokenBalance =
            serde_json::from_str(r#"{"current_tokens":120}"#).expect("decode");
        assert_eq!(balance.current_tokens, 120);
        assert_eq!(balance.max_tokens, 0);
        assert!(balance.billing_period_end.is_none());
    }

    #[test]
    fn remaining_ratio_is_bounded() {
        let balance = TokenBalance {
            current_tokens: 50,
            max_tokens: 200,
            ..TokenBalance::default()
        };
        assert!((balance.remaining_ratio() - 0.25).abs() < f64::EPSILON);

        let empty = TokenBalance::default();
        assert!((empty.remaining_ratio() - 0.0).abs() < f64::EPSILON);

        let overfull = TokenBalance {
            current_tokens: 300,
            max_tokens: 200,
            ..TokenBalance::default()
        };
        assert!((overfull.remaining_ratio() - 1.0).abs() < f64::EPSILON);
    }
}
