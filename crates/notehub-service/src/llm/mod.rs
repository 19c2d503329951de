//! Admin client for the LLM proxy that meters per-user model access.

pub mod client;
pub mod plans;

pub use client::{KeyUsage, LlmProxyClient};
pub use plans::PlanLimits;
