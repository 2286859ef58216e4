//! bcrypt password hashes.

use std::sync::OnceLock;

pub use bcrypt::BcryptError;

/// Hashes and verifies staff passwords at a fixed bcrypt cost.
#[derive(Debug)]
pub struct PasswordHasher {
    cost: u32,
    decoy: OnceLock<String>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            decoy: OnceLock::new(),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, BcryptError> {
        bcrypt::hash(password, self.cost)
    }

    /// Malformed stored hashes never verify.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        bcrypt::verify(password, stored).unwrap_or(false)
    }

    /// Runs one verification at the configured cost for a login that matched no account,
    /// so unknown and known e-mails take the same time to reject.
    pub fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy
            .get_or_init(|| bcrypt::hash("decoy-password", self.cost).unwrap_or_default());
        let _ = self.verify(password, decoy);
    }

    #[cfg(test)]
    pub(crate) fn decoy_ready(&self) -> bool {
        self.decoy.get().is_some()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
