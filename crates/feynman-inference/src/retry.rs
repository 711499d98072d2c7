//! Bounded retry policies shared by the resolver and the verifier.

use std::time::Duration;

use feynman_core::config::RetryConfig;
use feynman_core::errors::{ErrorClass, InferenceResult};

/// Extra attempts and the pause before each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        backoff: Duration::ZERO,
    };

    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Sleep for the configured backoff.
    pub fn pause(&self) {
        if !self.backoff.is_zero() {
            std::thread::sleep(self.backoff);
        }
    }
}

/// Retries left for one turn.
///
/// Every call made while handling a turn draws from the same budget, so a
/// re-ask or a re-resolution never earns a fresh set of transient retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    pub transient: u32,
    pub parse: u32,
    pub re_resolve: u32,
}

impl RetryBudget {
    /// Take one retry of `class`. False once that class is used up, and
    /// always false for classes that are never retried.
    pub fn spend(&mut self, class: ErrorClass) -> bool {
        let left = match class {
            ErrorClass::Transient => &mut self.transient,
            ErrorClass::Parse => &mut self.parse,
            ErrorClass::NotFound => &mut self.re_resolve,
            _ => return false,
        };
        if *left == 0 {
            return false;
        }
        *left -= 1;
        true
    }
}

/// One policy per retryable error class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicies {
    pub transient: RetryPolicy,
    pub parse: RetryPolicy,
    /// Re-resolution passes after a cached model reports not-found.
    pub re_resolve: RetryPolicy,
}

impl RetryPolicies {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            transient: RetryPolicy::new(
                config.transient_max_retries,
                Duration::from_millis(config.transient_backoff_ms),
            ),
            parse: RetryPolicy::new(
                config.parse_max_reasks,
                Duration::from_millis(config.parse_backoff_ms),
            ),
            re_resolve: RetryPolicy::new(config.re_resolve_max, Duration::ZERO),
        }
    }

    /// Same attempt bounds as the defaults, with no sleeping.
    pub fn immediate() -> Self {
        let mut policies = Self::default();
        policies.transient.backoff = Duration::ZERO;
        policies.parse.backoff = Duration::ZERO;
        policies
    }

    pub fn for_class(&self, class: ErrorClass) -> RetryPolicy {
        match class {
            ErrorClass::Transient => self.transient,
            ErrorClass::Parse => self.parse,
            ErrorClass::NotFound => self.re_resolve,
            _ => RetryPolicy::NONE,
        }
    }

    /// Fresh budget for one turn.
    pub fn budget(&self) -> RetryBudget {
        RetryBudget {
            transient: self.transient.max_retries,
            parse: self.parse.max_retries,
            re_resolve: self.re_resolve.max_retries,
        }
    }

    /// Run `op`, retrying while it fails with `class` and `budget` still
    /// has retries of that class. Any other error is returned immediately.
    pub fn run<T, F>(
        &self,
        class: ErrorClass,
        budget: &mut RetryBudget,
        mut op: F,
    ) -> InferenceResult<T>
    where
        F: FnMut() -> InferenceResult<T>,
    {
        let policy = self.for_class(class);
        loop {
            match op() {
                Err(e) if e.class() == class && budget.spend(class) => {
                    tracing::debug!("retrying after {:?}: {e}", policy.backoff);
                    policy.pause();
                }
                other => return other,
            }
        }
    }
}

impl Default for RetryPolicies {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use feynman_core::errors::InferenceError;

    use super::*;

    fn transient() -> InferenceError {
        InferenceError::Transient {
            reason: "503".into(),
        }
    }

    fn policies(transient: u32) -> RetryPolicies {
        let mut policies = RetryPolicies::immediate();
        policies.transient = RetryPolicy::new(transient, Duration::ZERO);
        policies
    }

    #[test]
    fn retries_matching_class_up_to_bound() {
        let calls = Cell::new(0);
        let policies = policies(1);
        let mut budget = policies.budget();
        let result: InferenceResult<()> =
            policies.run(ErrorClass::Transient, &mut budget, || {
                calls.set(calls.get() + 1);
                Err(transient())
            });
        assert!(result.is_err());
        assert_eq!(calls.get(), 2);
        assert_eq!(budget.transient, 0);
    }

    #[test]
    fn does_not_retry_other_classes() {
        let calls = Cell::new(0);
        let policies = policies(3);
        let mut budget = policies.budget();
        let result: InferenceResult<()> =
            policies.run(ErrorClass::Transient, &mut budget, || {
                calls.set(calls.get() + 1);
                Err(InferenceError::Auth {
                    reason: "denied".into(),
                })
            });
        assert!(matches!(result, Err(InferenceError::Auth { .. })));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn stops_on_first_success() {
        let calls = Cell::new(0);
        let policies = policies(5);
        let mut budget = policies.budget();
        let result = policies.run(ErrorClass::Transient, &mut budget, || {
            calls.set(calls.get() + 1);
            if calls.get() < 2 {
                Err(transient())
            } else {
                Ok(calls.get())
            }
        });
        assert_eq!(result.unwrap(), 2);
        assert_eq!(budget.transient, 4);
    }

    #[test]
    fn spent_budget_is_not_refilled_between_runs() {
        let calls = Cell::new(0);
        let policies = policies(1);
        let mut budget = policies.budget();
        for _ in 0..2 {
            let _: InferenceResult<()> =
                policies.run(ErrorClass::Transient, &mut budget, || {
                    calls.set(calls.get() + 1);
                    Err(transient())
                });
        }
        // First run: attempt + retry. Second run: attempt only.
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn budget_never_covers_auth() {
        let mut budget = RetryPolicies::immediate().budget();
        assert!(!budget.spend(ErrorClass::Auth));
        assert!(budget.spend(ErrorClass::Parse));
        assert!(!budget.spend(ErrorClass::Parse));
    }

    #[test]
    fn policy_lookup_by_class() {
        let policies = RetryPolicies::immediate();
        assert_eq!(policies.for_class(ErrorClass::Transient).max_retries, 1);
        assert_eq!(policies.for_class(ErrorClass::Auth), RetryPolicy::NONE);
        assert!(policies.for_class(ErrorClass::Parse).backoff.is_zero());
    }
}
