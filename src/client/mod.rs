//! Consumer-side counterparts of the CRUD services: a generic HTTP repo
//! client, the token client for the authorization server, and the result
//! envelope every remote verb resolves to.

pub mod repo_client;
pub mod token;

pub use repo_client::{
    RepoClient, ARTICLES_ENDPOINT, ORDERED_ARTICLES_ENDPOINT, ORDERS_ENDPOINT,
    PRICE_LISTS_ENDPOINT,
};
pub use token::{Credentials, Token, TokenClient, TOKEN_PATH};

/// Uniform outcome wrapper for every remote verb.
///
/// `is_successful` derives solely from the transport-level success indicator
/// (a 2xx status); authentication failures, transport failures and undecodable
/// bodies all collapse into a failed envelope with no payload. Callers branch
/// on `is_successful` before touching `payload` — no verb ever raises.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientResult<P> {
    pub is_successful: bool,
    pub payload: Option<P>,
}

impl<P> ClientResult<P> {
    pub fn success(payload: P) -> Self {
        Self {
            is_successful: true,
            payload: Some(payload),
        }
    }

    /// A successful verb with no payload to carry (`Remove`, `RemoveRange`).
    pub fn empty_success() -> Self {
        Self {
            is_successful: true,
            payload: None,
        }
    }

    pub fn failure() -> Self {
        Self {
            is_successful: false,
            payload: None,
        }
    }

    /// The payload if the call succeeded with one, `None` otherwise.
    pub fn into_payload(self) -> Option<P> {
        if self.is_successful {
            self.payload
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_payload() {
        let result = ClientResult::success(42);
        assert!(result.is_successful);
        assert_eq!(result.into_payload(), Some(42));
    }

    #[test]
    fn failure_has_no_payload() {
        let result: ClientResult<u32> = ClientResult::failure();
        assert!(!result.is_successful);
        assert_eq!(result.into_payload(), None);
    }

    #[test]
    fn empty_success_is_successful_without_payload() {
        let result: ClientResult<()> = ClientResult::empty_success();
        assert!(result.is_successful);
        assert!(result.payload.is_none());
    }
}
