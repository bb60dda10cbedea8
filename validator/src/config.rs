//! Configuration for validation

/// Configuration for a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorConfig {
    /// Report one-way friendship edges as informational findings
    pub require_mutual_friendship: bool,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mutual_friendship(mut self, required: bool) -> Self {
        self.require_mutual_friendship = required;
        self
    }

    /// Every optional check enabled.
    pub fn strict() -> Self {
        Self {
            require_mutual_friendship: true,
        }
    }
}
