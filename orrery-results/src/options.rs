use serde::{Deserialize, Serialize};

use crate::error::OrreryResultsError;

/// Minimum number of options an interactive component may declare.
pub const MIN_OPTION_COUNT: usize = 2;

/// Maximum number of options an interactive component may declare.
pub const MAX_OPTION_COUNT: usize = 4;

/// One configured outcome of an interactive component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResultOption {
    pub text: String,
    pub image: Option<String>,
    pub results_category: Option<String>,
    pub results_threshold: Option<f32>,
    #[serde(default)]
    pub correct: bool,
}

impl ResultOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
            results_category: None,
            results_threshold: None,
            correct: false,
        }
    }
}

/// How aggregated results are resolved into a final outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultsStrategy {
    /// Tally poll selections and resolve to the most selected category.
    Category,
    /// Score quiz answers and resolve to a threshold bracket.
    Percentage,
}

/// Decides the results strategy from the configured options.
///
/// Percentage scoring requires a threshold on every option; any option
/// without one falls the whole component back to category tallying.
pub fn decide_strategy(options: &[ResultOption]) -> ResultsStrategy {
    if !options.is_empty()
        && options
            .iter()
            .all(|option| option.results_threshold.is_some())
    {
        ResultsStrategy::Percentage
    } else {
        ResultsStrategy::Category
    }
}

/// Validates the declared option count against the allowed bounds.
pub fn validate_option_count(options: &[ResultOption]) -> Result<(), OrreryResultsError> {
    if options.len() < MIN_OPTION_COUNT || options.len() > MAX_OPTION_COUNT {
        return Err(OrreryResultsError::ImproperOptionCount(options.len()));
    }
    Ok(())
}
