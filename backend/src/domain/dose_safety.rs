//! Overdose-risk classification.
//!
//! Classifies how close today's dose count is to a medication's configured
//! daily maximum. Pure and stateless; the surrounding API layer is
//! responsible for acting on the result (a `dangerous` result blocks
//! recording a new dose, `warning` requires explicit confirmation, `safe`
//! proceeds silently).

use shared::RiskLevel;

/// A non-positive daily maximum reached the evaluator. Medication
/// definitions are validated at creation, so this indicates an upstream
/// data-integrity bug rather than user error; callers surface it as an
/// internal error, not a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid medication configuration: max_doses_per_day must be positive")]
pub struct InvalidConfiguration;

/// Classify the overdose risk for `doses_given_today` against
/// `max_doses_per_day`.
///
/// At or above the maximum is `dangerous`; at or above 75% of it is
/// `warning`; anything below is `safe`.
pub fn evaluate_risk(
    doses_given_today: u32,
    max_doses_per_day: u32,
) -> Result<RiskLevel, InvalidConfiguration> {
    if max_doses_per_day == 0 {
        return Err(InvalidConfiguration);
    }

    let percentage = doses_given_today as f64 / max_doses_per_day as f64 * 100.0;
    let risk = if percentage >= 100.0 {
        RiskLevel::Dangerous
    } else if percentage >= 75.0 {
        RiskLevel::Warning
    } else {
        RiskLevel::Safe
    };
    Ok(risk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaching_the_maximum_is_dangerous() {
        assert_eq!(evaluate_risk(4, 4), Ok(RiskLevel::Dangerous));
        assert_eq!(evaluate_risk(5, 4), Ok(RiskLevel::Dangerous));
    }

    #[test]
    fn test_three_quarters_is_a_warning() {
        assert_eq!(evaluate_risk(3, 4), Ok(RiskLevel::Warning));
        assert_eq!(evaluate_risk(9, 10), Ok(RiskLevel::Warning));
    }

    #[test]
    fn test_below_the_warning_band_is_safe() {
        assert_eq!(evaluate_risk(0, 4), Ok(RiskLevel::Safe));
        assert_eq!(evaluate_risk(2, 4), Ok(RiskLevel::Safe));
        assert_eq!(evaluate_risk(7, 10), Ok(RiskLevel::Safe));
    }

    #[test]
    fn test_single_dose_regimen_jumps_straight_to_dangerous() {
        assert_eq!(evaluate_risk(0, 1), Ok(RiskLevel::Safe));
        assert_eq!(evaluate_risk(1, 1), Ok(RiskLevel::Dangerous));
    }

    #[test]
    fn test_zero_maximum_is_an_invalid_configuration() {
        assert_eq!(evaluate_risk(0, 0), Err(InvalidConfiguration));
        assert_eq!(evaluate_risk(3, 0), Err(InvalidConfiguration));
    }
}
