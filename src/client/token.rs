use serde::{Deserialize, Serialize};

use crate::client::ClientResult;

/// Relative path of the authorization server's token endpoint.
pub const TOKEN_PATH: &str = "/connect/token";

/// Credentials for one of the two supported grant flows. The flows are
/// mutually exclusive but produce the same token shape.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Service-to-service flow, no end-user identity.
    ClientCredentials {
        client_id: String,
        client_secret: String,
        scope: String,
    },
    /// End-user flow, resource-owner password grant.
    Password {
        client_id: String,
        username: String,
        password: String,
        scope: String,
    },
}

impl Credentials {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Credentials::ClientCredentials { .. } => "client_credentials",
            Credentials::Password { .. } => "password",
        }
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        match self {
            Credentials::ClientCredentials {
                client_id,
                client_secret,
                scope,
            } => vec![
                ("scope", scope.as_str()),
                ("client_secret", client_secret.as_str()),
                ("grant_type", self.grant_type()),
                ("client_id", client_id.as_str()),
            ],
            Credentials::Password {
                client_id,
                username,
                password,
                scope,
            } => vec![
                ("scope", scope.as_str()),
                ("username", username.as_str()),
                ("password", password.as_str()),
                ("grant_type", self.grant_type()),
                ("client_id", client_id.as_str()),
            ],
        }
    }
}

/// Token response shape. Emitted camelCase like the rest of the wire; the
/// standard OAuth2 snake_case keys are accepted on input so the client also
/// understands stock authorization servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(alias = "access_token")]
    pub access_token: String,
    #[serde(default, alias = "expires_in")]
    pub expires_in: i64,
    #[serde(default, alias = "token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

/// Client of the authorization server's token endpoint.
pub struct TokenClient {
    http: reqwest::Client,
    base_address: String,
}

impl TokenClient {
    pub fn new(http: reqwest::Client, base_address: impl Into<String>) -> Self {
        let base_address = base_address.into().trim_end_matches('/').to_string();
        Self { http, base_address }
    }

    /// Exchanges credentials for a bearer token. A non-success response (or a
    /// transport failure) yields a failed envelope — the caller finds out the
    /// token is unusable here rather than on the first rejected CRUD call.
    pub async fn request_token(&self, credentials: &Credentials) -> ClientResult<Token> {
        let url = format!("{}{}", self.base_address, TOKEN_PATH);
        match self.http.post(&url).form(&credentials.form()).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Token>().await {
                    Ok(token) => ClientResult::success(token),
                    Err(e) => {
                        log::warn!("{url}: undecodable token response: {e}");
                        ClientResult::failure()
                    }
                }
            }
            Ok(response) => {
                log::warn!(
                    "{url}: token request rejected with status {}",
                    response.status()
                );
                ClientResult::failure()
            }
            Err(e) => {
                log::warn!("{url}: transport failure: {e}");
                ClientResult::failure()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_credentials() -> Credentials {
        Credentials::ClientCredentials {
            client_id: "orders-service".to_string(),
            client_secret: "secret".to_string(),
            scope: "shop.api".to_string(),
        }
    }

    fn password_credentials() -> Credentials {
        Credentials::Password {
            client_id: "console-app".to_string(),
            username: "nikita".to_string(),
            password: "Pass_123".to_string(),
            scope: "shop.api".to_string(),
        }
    }

    #[test]
    fn grant_type_literals_match_the_flows() {
        assert_eq!(client_credentials().grant_type(), "client_credentials");
        assert_eq!(password_credentials().grant_type(), "password");
    }

    #[test]
    fn client_credentials_form_has_secret_and_no_username() {
        let credentials = client_credentials();
        let form = credentials.form();
        assert!(form.contains(&("client_secret", "secret")));
        assert!(form.contains(&("grant_type", "client_credentials")));
        assert!(!form.iter().any(|(key, _)| *key == "username"));
    }

    #[test]
    fn password_form_has_user_fields_and_no_secret() {
        let credentials = password_credentials();
        let form = credentials.form();
        assert!(form.contains(&("username", "nikita")));
        assert!(form.contains(&("password", "Pass_123")));
        assert!(!form.iter().any(|(key, _)| *key == "client_secret"));
    }

    #[test]
    fn token_accepts_both_key_conventions() {
        let camel: Token =
            serde_json::from_str(r#"{"accessToken":"abc","expiresIn":3600,"scope":"shop.api"}"#)
                .expect("camelCase parses");
        let snake: Token =
            serde_json::from_str(r#"{"access_token":"abc","expires_in":3600,"scope":"shop.api"}"#)
                .expect("snake_case parses");
        assert_eq!(camel, snake);
        assert_eq!(camel.access_token, "abc");
    }

    #[tokio::test]
    async fn unreachable_server_yields_failed_envelope() {
        let client = TokenClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
        let result = client.request_token(&client_credentials()).await;
        assert!(!result.is_successful);
        assert!(result.payload.is_none());
    }
}
