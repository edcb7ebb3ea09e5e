//! Rate-limit escalation policy.
//!
//! A model is never abandoned on its first 429: it always gets one wait
//! first. Once `exhaustion_factor × model_count` switches have happened every
//! model has been seen both fresh and after its wait, and the credential
//! itself is rotated.

/// What to do about a 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// First 429 on this model: wait and retry it
    WaitSameModel,
    /// Second consecutive 429: move to the next model
    SwitchModel,
    /// Every model exhausted: obtain a new credential
    RotateCredential,
}

/// Number of switches after which all models count as exhausted.
pub fn exhaustion_threshold(model_count: usize, exhaustion_factor: u32) -> u32 {
    (model_count as u32).saturating_mul(exhaustion_factor)
}

pub fn decide_rate_limit(
    is_same_model_retry: bool,
    switch_count: u32,
    model_count: usize,
    exhaustion_factor: u32,
) -> RateLimitDecision {
    if !is_same_model_retry {
        RateLimitDecision::WaitSameModel
    } else if switch_count >= exhaustion_threshold(model_count, exhaustion_factor) {
        RateLimitDecision::RotateCredential
    } else {
        RateLimitDecision::SwitchModel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_hit_always_waits() {
        for switches in [0, 5, 12, 100] {
            assert_eq!(decide_rate_limit(false, switches, 6, 2), RateLimitDecision::WaitSameModel);
        }
    }

    #[test]
    fn test_second_hit_switches_until_threshold() {
        assert_eq!(decide_rate_limit(true, 0, 6, 2), RateLimitDecision::SwitchModel);
        assert_eq!(decide_rate_limit(true, 11, 6, 2), RateLimitDecision::SwitchModel);
        assert_eq!(decide_rate_limit(true, 12, 6, 2), RateLimitDecision::RotateCredential);
    }

    #[test]
    fn test_single_model_roster() {
        assert_eq!(exhaustion_threshold(1, 2), 2);
        assert_eq!(decide_rate_limit(true, 1, 1, 2), RateLimitDecision::SwitchModel);
        assert_eq!(decide_rate_limit(true, 2, 1, 2), RateLimitDecision::RotateCredential);
    }
}
