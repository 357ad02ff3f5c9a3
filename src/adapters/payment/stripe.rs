use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::entitlement::PaymentProviderPort,
};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Thin client for the three Stripe endpoints the entitlement flow needs.
/// Every call is a single request/response; failures surface as
/// `PaymentProvider` with the provider's message and are never retried.
#[derive(Clone)]
pub struct StripePaymentProvider {
    client: Client,
    secret_key: SecretString,
}

impl StripePaymentProvider {
    pub fn new(secret_key: SecretString) -> Self {
        Self { client: Client::new(), secret_key }
    }

    fn auth_header(&self) -> String {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:", self.secret_key.expose_secret()));
        format!("Basic {encoded}")
    }

    async fn post_form<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .client
            .post(format!("{STRIPE_API_BASE}{path}"))
            .header("Authorization", self.auth_header())
            .form(params)
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Stripe request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Stripe API error");
            if let Ok(error) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(AppError::PaymentProvider(
                    error.error.message.unwrap_or(error.error.error_type),
                ));
            }
            return Err(AppError::PaymentProvider(format!("Stripe API error: {status}")));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(body = %body, error = %e, "Failed to parse Stripe response");
            AppError::PaymentProvider(format!("Failed to parse Stripe response: {e}"))
        })
    }
}

#[async_trait]
impl PaymentProviderPort for StripePaymentProvider {
    async fn create_customer(&self, email: &str) -> AppResult<String> {
        let customer: StripeCustomer =
            self.post_form("/customers", &[("email", email)]).await?;
        Ok(customer.id)
    }

    async fn create_checkout_session(
        &self,
        customer_id: &str,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> AppResult<String> {
        let session: StripeCheckoutSession = self
            .post_form(
                "/checkout/sessions",
                &[
                    ("customer", customer_id),
                    ("mode", "subscription"),
                    ("line_items[0][price]", price_id),
                    ("line_items[0][quantity]", "1"),
                    ("success_url", success_url),
                    ("cancel_url", cancel_url),
                ],
            )
            .await?;
        session.url.ok_or_else(|| {
            AppError::PaymentProvider("Stripe returned a session without a URL".into())
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> AppResult<String> {
        let session: StripePortalSession = self
            .post_form(
                "/billing_portal/sessions",
                &[("customer", customer_id), ("return_url", return_url)],
            )
            .await?;
        Ok(session.url)
    }
}

#[derive(Debug, Deserialize)]
struct StripeCustomer {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripePortalSession {
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(rename = "type")]
    error_type: String,
    message: Option<String>,
}
