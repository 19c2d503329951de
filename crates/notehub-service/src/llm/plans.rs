//! Subscription plans and the limits they grant.

use serde::Serialize;

/// Rate and budget limits applied to a user's proxy key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanLimits {
    /// Plan name as stored in key metadata.
    #[serde(skip)]
    pub name: &'static str,
    /// Lifetime spend limit in USD.
    pub max_budget: f64,
    /// Tokens per minute.
    pub tpm_limit: u64,
    /// Requests per minute.
    pub rpm_limit: u64,
    /// Models the key may call.
    pub models: &'static [&'static str],
}

/// Plan assigned when none, or an unknown one, is requested.
pub const FREE: PlanLimits = PlanLimits {
    name: "free",
    max_budget: 0.5,
    tpm_limit: 5_000,
    rpm_limit: 5,
    models: &["*"],
};

/// Paid plan.
pub const PRO: PlanLimits = PlanLimits {
    name: "pro",
    max_budget: 20.0,
    tpm_limit: 200_000,
    rpm_limit: 100,
    models: &["*"],
};

/// Look up a plan by name.
pub fn plan(name: &str) -> Option<PlanLimits> {
    match name {
        "free" => Some(FREE),
        "pro" => Some(PRO),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_lookup() {
        assert_eq!(plan("pro").map(|p| p.rpm_limit), Some(100));
        assert_eq!(plan("free").map(|p| p.max_budget), Some(0.5));
        assert!(plan("enterprise").is_none());
    }
}
