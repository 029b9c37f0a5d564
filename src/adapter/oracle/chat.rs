//! Chat completion client abstraction.

use async_trait::async_trait;

use crate::error::OracleError;

/// Minimal chat completion client.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the response text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, OracleError>;
}

/// Mock chat client for testing.
#[cfg(test)]
pub mod tests {
    use super::*;

    pub struct MockChat {
        response: String,
    }

    impl MockChat {
        pub fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for MockChat {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, OracleError> {
            Ok(self.response.clone())
        }
    }
}
