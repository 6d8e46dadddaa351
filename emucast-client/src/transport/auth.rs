/// Supplies request credentials and is told when the endpoint rejects them.
pub trait Authenticator: Send + Sync {
    /// Header pairs attached to every call.
    fn auth_header(&self) -> Vec<(String, String)>;

    /// Invoked when a call fails with `Unauthenticated`.
    fn unauthorized(&self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NopAuthenticator;

impl Authenticator for NopAuthenticator {
    fn auth_header(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

pub struct BearerToken {
    token: String,
    on_unauthorized: Option<Box<dyn Fn() + Send + Sync>>,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            on_unauthorized: None,
        }
    }

    pub fn on_unauthorized<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_unauthorized = Some(Box::new(f));
        self
    }
}

impl Authenticator for BearerToken {
    fn auth_header(&self) -> Vec<(String, String)> {
        vec![("authorization".to_owned(), format!("Bearer {}", self.token))]
    }

    fn unauthorized(&self) {
        tracing::warn!("Emulator endpoint rejected the bearer token");
        if let Some(f) = &self.on_unauthorized {
            f();
        }
    }
}
