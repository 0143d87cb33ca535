//! Client wrapper for checkout-session creation.

use crate::app_lib::{RequestOptions, api, post_json};

use super::types::{CheckoutOutcome, CheckoutRequest, CheckoutSessionResponse};

/// Creates a Stripe checkout session. Never returns an error: failures come
/// back as [`CheckoutOutcome::Failed`] with a user-facing message, because
/// the pricing page renders them inline.
pub async fn create_checkout_session(
    request: &CheckoutRequest,
    bearer: Option<&str>,
) -> CheckoutOutcome {
    let mut options = RequestOptions::new().timeout(api::CHECKOUT_TIMEOUT_MS);
    if let Some(token) = bearer {
        options = options.bearer(token);
    }

    match post_json::<_, CheckoutSessionResponse>("create-checkout-session", request, &options)
        .await
    {
        Ok(response) if !response.url.is_empty() => CheckoutOutcome::Redirect { url: response.url },
        Ok(_) => CheckoutOutcome::Failed {
            message: "The payment provider did not return a checkout link.".to_string(),
        },
        Err(err) => {
            log::warn!("checkout session creation failed: {err}");
            CheckoutOutcome::Failed {
                message: err.user_message(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::create_checkout_session;
    use crate::features::billing::types::{CheckoutOutcome, CheckoutRequest};

    #[test]
    fn failures_surface_as_outcomes_not_errors() {
        // No transport on the host target, so this exercises the failure arm.
        let request = CheckoutRequest {
            plan: "pro".to_string(),
            email: Some("a@b.test".to_string()),
            password: Some("hunter2".to_string()),
            success_url: "https://app.test/dashboard".to_string(),
            cancel_url: "https://app.test/pricing".to_string(),
        };
        let outcome = block_on(create_checkout_session(&request, None));
        assert!(matches!(outcome, CheckoutOutcome::Failed { .. }));
    }
}
