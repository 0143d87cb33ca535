//! Plan catalog and checkout types.

use serde::{Deserialize, Serialize};

use crate::features::auth::types::PlanTier;

/// One pricing-page card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanOffer {
    pub tier: PlanTier,
    pub display_price: &'static str,
    pub token_allowance: u64,
    pub features: &'static [&'static str],
}

impl PlanOffer {
    pub fn is_paid(&self) -> bool {
        self.tier != PlanTier::Free
    }
}

/// The closed tier set rendered on the pricing page, cheapest first.
pub fn plan_catalog() -> [PlanOffer; 3] {
    [
        PlanOffer {
            tier: PlanTier::Free,
            display_price: "$0",
            token_allowance: 10,
            features: &[
                "10 generation tokens per month",
                "Single-sheet workbooks",
                "Community support",
            ],
        },
        PlanOffer {
            tier: PlanTier::Pro,
            display_price: "$12",
            token_allowance: 200,
            features: &[
                "200 generation tokens per month",
                "Multi-sheet workbooks with formulas",
                "Reference file uploads",
                "Email support",
            ],
        },
        PlanOffer {
            tier: PlanTier::Business,
            display_price: "$49",
            token_allowance: 1_000,
            features: &[
                "1,000 generation tokens per month",
                "Everything in Pro",
                "Priority generation queue",
                "Team billing",
            ],
        },
    ]
}

/// Checkout-session creation. `email`/`password` carry the register-then-pay
/// flow; signed-in upgrades send neither and rely on the bearer.
#[derive(Clone, Debug, Serialize)]
pub struct CheckoutRequest {
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

/// Checkout result for inline rendering. Deliberately not a `Result`: the
/// pricing page always renders failures as banners, never propagates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Redirect { url: String },
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use super::{CheckoutRequest, plan_catalog};
    use crate::features::auth::types::PlanTier;

    #[test]
    fn catalog_covers_every_tier_in_ascending_order() {
        let catalog = plan_catalog();
        assert_eq!(catalog[0].tier, PlanTier::Free);
        assert_eq!(catalog[1].tier, PlanTier::Pro);
        assert_eq!(catalog[2].tier, PlanTier::Business);
        assert!(catalog.windows(2).all(|pair| {
            pair[0].token_allowance < pair[1].token_allowance
        }));
        assert!(!catalog[0].is_paid());
        assert!(catalog[1].is_paid());
    }

    #[test]
    fn signed_in_checkout_omits_credentials() {
        let request = CheckoutRequest {
            plan: "pro".to_string(),
            email: None,
            password: None,
            success_url: "https://app.test/dashboard".to_string(),
            cancel_url: "https://app.test/pricing".to_string(),
        };
        let json = serde_json::to_string(&request).expect("encode");
        assert!(!json.contains("email"));
        assert!(!json.contains("password"));
        assert!(json.contains("success_url"));
    }
}
