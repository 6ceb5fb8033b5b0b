use std::sync::Arc;

use thiserror::Error;

use super::integrand::Integrand;


#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("integrand '{0}' not found")]
    NameNotFound(String),
    #[error("integrand key '{0}' already registered")]
    DuplicateKey(String)
}

// ─────────────────────────────────────────────────────────────────────────────
// RegisteredIntegrand
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct RegisteredIntegrand {
    key: String,
    label: String,
    integrand: Arc<dyn Integrand>
}

impl RegisteredIntegrand {
    pub fn new(key: String, label: String, integrand: Arc<dyn Integrand>) -> RegisteredIntegrand {
        RegisteredIntegrand { key, label, integrand }
    }

    pub fn key(&self) -> &String {
        &self.key
    }

    pub fn label(&self) -> &String {
        &self.label
    }

    pub fn integrand(&self) -> Arc<dyn Integrand> {
        self.integrand.clone()
    }

    fn matches(&self, selector: &str) -> bool {
        self.key == selector || self.label == selector
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IntegrandRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Selectable integrands, kept in registration order so menus list them
/// the same way every run.
pub struct IntegrandRegistry {
    entries: Vec<RegisteredIntegrand>
}

impl IntegrandRegistry {
    pub fn new() -> IntegrandRegistry {
        IntegrandRegistry { entries: Vec::new() }
    }

    /// The four sample functions shipped with the tool.
    pub fn with_builtins() -> IntegrandRegistry {
        let mut registry = IntegrandRegistry::new();
        registry.push_builtin("1", "x^2", Arc::new(|x: f64| x * x));
        registry.push_builtin("2", "x * exp(-x)", Arc::new(|x: f64| x * (-x).exp()));
        registry.push_builtin("3", "sin(x)", Arc::new(f64::sin));
        registry.push_builtin("4", "exp(-x) * (x^3 + 2)", Arc::new(|x: f64| (-x).exp() * (x.powi(3) + 2.0)));
        registry
    }

    fn push_builtin(&mut self, key: &str, label: &str, integrand: Arc<dyn Integrand>) {
        self.entries.push(RegisteredIntegrand::new(key.to_owned(), label.to_owned(), integrand));
    }

    pub fn insert(&mut self,
                  key: String,
                  label: String,
                  integrand: Arc<dyn Integrand>) -> Result<(), RegistryError> {
        if self.entries.iter().any(|entry| entry.key == key) {
            return Err(RegistryError::DuplicateKey(key));
        }
        self.entries.push(RegisteredIntegrand::new(key, label, integrand));
        Ok(())
    }

    /// Looks an entry up by key first, then by label.
    pub fn entry(&self, selector: &str) -> Result<&RegisteredIntegrand, RegistryError> {
        let selector = selector.trim();
        self.entries
            .iter()
            .find(|entry| entry.key == selector)
            .or_else(|| self.entries.iter().find(|entry| entry.matches(selector)))
            .ok_or_else(|| RegistryError::NameNotFound(selector.to_owned()))
    }

    pub fn get(&self, selector: &str) -> Result<Arc<dyn Integrand>, RegistryError> {
        self.entry(selector).map(|entry| entry.integrand())
    }

    pub fn entries(&self) -> &[RegisteredIntegrand] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IntegrandRegistry {
    fn default() -> Self {
        IntegrandRegistry::with_builtins()
    }
}
