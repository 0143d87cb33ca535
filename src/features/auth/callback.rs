//! Pure parsing of identity-provider callbacks. Azure B2C returns the ID
//! token in the URL fragment (implicit flow); Google returns an
//! authorization code in the query string. Both can return `error=` instead,
//! which must win over any credential that is also present.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Google,
    AzureB2c,
}

impl Provider {
    /// Provider tag the exchange endpoint expects.
    pub fn wire_name(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::AzureB2c => "azure",
        }
    }

    pub fn exchange_path(self) -> &'static str {
        match self {
            Provider::Google => "auth/google/callback",
            Provider::AzureB2c => "auth/azure-callback",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::AzureB2c => "Microsoft",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Outcome of scanning the callback URL. At most one credential survives;
/// provider errors short-circuit so no exchange is ever attempted for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedCallback {
    ProviderError {
        code: String,
        description: Option<String>,
    },
    IdToken {
        raw: String,
    },
    AuthCode {
        code: String,
    },
    Missing,
}

impl ParsedCallback {
    /// Which provider the credential came from. Fragment tokens are the
    /// Azure B2C implicit flow; query codes are Google.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            ParsedCallback::IdToken { .. } => Some(Provider::AzureB2c),
            ParsedCallback::AuthCode { .. } => Some(Provider::Google),
            _ => None,
        }
    }
}

/// Scans fragment first, then query. Within each, `error=` is checked before
/// any credential parameter.
pub fn parse_callback(fragment: &str, query: &str) -> ParsedCallback {
    let fragment = fragment.trim_start_matches('#');
    let query = query.trim_start_matches('?');

    if let Some(code) = param(fragment, "error") {
        return ParsedCallback::ProviderError {
            code,
            description: param(fragment, "error_description"),
        };
    }
    if let Some(raw) = param(fragment, "id_token") {
        return ParsedCallback::IdToken { raw };
    }

    if let Some(code) = param(query, "error") {
        return ParsedCallback::ProviderError {
            code,
            description: param(query, "error_description"),
        };
    }
    if let Some(code) = param(query, "code") {
        return ParsedCallback::AuthCode { code };
    }

    ParsedCallback::Missing
}

/// User-facing message for a provider rejection.
pub fn provider_error_message(code: &str, description: Option<&str>) -> String {
    match description {
        Some(description) if !description.is_empty() => {
            format!("{description} ({code})")
        }
        _ => format!("The sign-in provider returned an error: {code}"),
    }
}

fn param(pairs: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(pairs.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ParsedCallback, Provider, parse_callback, provider_error_message};

    #[test]
    fn provider_errors_win_and_carry_the_description() {
        let parsed = parse_callback(
            "error=access_denied&error_description=User%20cancelled&id_token=should.not.win",
            "",
        );
        let ParsedCallback::ProviderError { code, description } = &parsed else {
            panic!("expected a provider error, got {parsed:?}");
        };
        assert_eq!(code, "access_denied");
        assert_eq!(description.as_deref(), Some("User cancelled"));
        assert_eq!(parsed.provider(), None);

        let message = provider_error_message(code, description.as_deref());
        assert!(message.contains("User cancelled"));
    }

    #[test]
    fn fragment_tokens_map_to_azure() {
        let parsed = parse_callback("#id_token=aaa.bbb.ccc&state=xyz", "");
        assert_eq!(
            parsed,
            ParsedCallback::IdToken {
                raw: "aaa.bbb.ccc".to_string()
            }
        );
        assert_eq!(parsed.provider(), Some(Provider::AzureB2c));
    }

    #[test]
    fn query_codes_map_to_google_when_no_fragment() {
        let parsed = parse_callback("", "?code=4%2F0Axyz&scope=email");
        assert_eq!(
            parsed,
            ParsedCallback::AuthCode {
                code: "4/0Axyz".to_string()
            }
        );
        assert_eq!(parsed.provider(), Some(Provider::Google));
    }

    #[test]
    fn query_errors_are_also_detected() {
        let parsed = parse_callback("", "error=consent_required");
        assert!(matches!(parsed, ParsedCallback::ProviderError { .. }));
    }

    #[test]
    fn empty_urls_yield_missing() {
        assert_eq!(parse_callback("", ""), ParsedCallback::Missing);
        assert_eq!(parse_callback("#", "?"), ParsedCallback::Missing);
        assert_eq!(parse_callback("state=only", "utm_source=mail"), ParsedCallback::Missing);
    }

    #[test]
    fn empty_parameter_values_do_not_count() {
        assert_eq!(parse_callback("id_token=", "code="), ParsedCallback::Missing);
    }

    #[test]
    fn error_message_falls_back_to_the_code() {
        let message = provider_error_message("server_error", None);
        assert!(message.contains("server_error"));
    }

    #[test]
    fn provider_wire_names_match_the_exchange_api() {
        assert_eq!(Provider::Google.wire_name(), "google");
        assert_eq!(Provider::AzureB2c.wire_name(), "azure");
        assert_eq!(Provider::Google.exchange_path(), "auth/google/callback");
        assert_eq!(Provider::AzureB2c.exchange_path(), "auth/azure-callback");
    }
}
