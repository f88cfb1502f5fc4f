//! Usage counters
//!
//! In-memory tally of generation outcomes, shared by all handlers.
//! Counters start at zero with the process and are never persisted.

use crate::utils::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free request outcome counters
#[derive(Debug, Default)]
pub struct UsageCounters {
    ai_generated: AtomicU64,
    fallback_not_configured: AtomicU64,
    fallback_upstream: AtomicU64,
    fallback_parse: AtomicU64,
    rejected: AtomicU64,
    total_tokens: AtomicU64,
}

/// Fallback invocations by cause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackBreakdown {
    pub not_configured: u64,
    pub upstream_error: u64,
    pub parse_error: u64,
}

impl FallbackBreakdown {
    pub fn total(&self) -> u64 {
        self.not_configured + self.upstream_error + self.parse_error
    }
}

/// Point-in-time copy of the counters
///
/// `total_requests` is always `ai_generated + fallbacks`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub total_requests: u64,
    pub ai_generated: u64,
    pub fallbacks: u64,
    pub fallback_breakdown: FallbackBreakdown,
    pub rejected_requests: u64,
    pub total_tokens: u64,
}

impl UsageCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quiz served from the upstream
    pub fn record_ai_success(&self, tokens: Option<u32>) {
        self.ai_generated.fetch_add(1, Ordering::Relaxed);
        if let Some(tokens) = tokens {
            self.total_tokens.fetch_add(u64::from(tokens), Ordering::Relaxed);
        }
    }

    /// Record a quiz served from the fallback set
    pub fn record_fallback(&self, cause: &GenerationError) {
        let counter = match cause {
            GenerationError::NotConfigured => &self.fallback_not_configured,
            GenerationError::Upstream(_) => &self.fallback_upstream,
            GenerationError::Parse(_) => &self.fallback_parse,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request rejected by validation or body decoding
    pub fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        let ai_generated = self.ai_generated.load(Ordering::Relaxed);
        let fallback_breakdown = FallbackBreakdown {
            not_configured: self.fallback_not_configured.load(Ordering::Relaxed),
            upstream_error: self.fallback_upstream.load(Ordering::Relaxed),
            parse_error: self.fallback_parse.load(Ordering::Relaxed),
        };
        let fallbacks = fallback_breakdown.total();

        UsageSnapshot {
            total_requests: ai_generated + fallbacks,
            ai_generated,
            fallbacks,
            fallback_breakdown,
            rejected_requests: self.rejected.load(Ordering::Relaxed),
            total_tokens: self.total_tokens.load(Ordering::Relaxed),
        }
    }
}
