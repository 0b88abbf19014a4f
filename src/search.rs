//! Search request types and user-input validation.

use std::str::FromStr;

use thiserror::Error;

/// Seniority band filter understood by the guest search endpoint.
///
/// The server expects a numeric code in the `f_E` query parameter;
/// absence of the parameter means "all levels".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceLevel {
    Internship,
    EntryLevel,
    Associate,
    MidSenior,
    Director,
    Executive,
}

impl ExperienceLevel {
    /// All levels in server-code order, for building selection menus.
    pub const ALL: [Self; 6] = [
        Self::Internship,
        Self::EntryLevel,
        Self::Associate,
        Self::MidSenior,
        Self::Director,
        Self::Executive,
    ];

    /// Server-side filter code for the `f_E` query parameter.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Internship => "1",
            Self::EntryLevel => "2",
            Self::Associate => "3",
            Self::MidSenior => "4",
            Self::Director => "5",
            Self::Executive => "6",
        }
    }

    /// Human-readable label for prompts and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Internship => "Internship",
            Self::EntryLevel => "Entry level",
            Self::Associate => "Associate",
            Self::MidSenior => "Mid-Senior level",
            Self::Director => "Director",
            Self::Executive => "Executive",
        }
    }
}

/// The given string does not name a known experience level.
#[derive(Debug, Error)]
#[error(
    "unknown experience level '{0}'; expected internship, entry, associate, mid-senior, director, or executive"
)]
pub struct InvalidExperience(String);

impl FromStr for ExperienceLevel {
    type Err = InvalidExperience;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "internship" => Ok(Self::Internship),
            "entry" | "entry-level" => Ok(Self::EntryLevel),
            "associate" => Ok(Self::Associate),
            "mid-senior" | "midsenior" => Ok(Self::MidSenior),
            "director" => Ok(Self::Director),
            "executive" => Ok(Self::Executive),
            other => Err(InvalidExperience(other.to_string())),
        }
    }
}

/// One search, constructed once from user input and read-only thereafter.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Job title or search keywords.
    pub keyword: String,

    /// City, state, or country to search in.
    pub location: String,

    /// Target number of jobs to collect (1..=`max_jobs_limit`).
    pub desired_count: usize,

    /// Optional seniority filter; `None` means all levels.
    pub experience: Option<ExperienceLevel>,
}

/// A job-count input that could not be accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidJobCount {
    /// The input was not an integer.
    #[error("'{input}' is not a number; enter a positive integer (e.g. 50, 100)")]
    NotANumber {
        /// The rejected input.
        input: String,
    },

    /// The input parsed but was zero or negative.
    #[error("{value} is not positive; enter a number greater than 0")]
    NotPositive {
        /// The rejected value.
        value: i64,
    },

    /// The input exceeds the configured limit.
    #[error("{value} exceeds the maximum limit of {max}; enter a number between 1 and {max}")]
    OverLimit {
        /// The rejected value.
        value: usize,
        /// The configured `max_jobs_limit`.
        max: usize,
    },
}

/// Validates a job-count input string.
///
/// Empty input takes `default`; otherwise the value must be a positive
/// integer no greater than `max`.
///
/// # Errors
///
/// Returns [`InvalidJobCount`] describing why the input was rejected.
pub fn validate_job_count(
    input: &str,
    default: usize,
    max: usize,
) -> Result<usize, InvalidJobCount> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    let value: i64 = trimmed.parse().map_err(|_| InvalidJobCount::NotANumber {
        input: trimmed.to_string(),
    })?;

    if value <= 0 {
        return Err(InvalidJobCount::NotPositive { value });
    }

    let value = usize::try_from(value).unwrap_or(usize::MAX);
    if value > max {
        return Err(InvalidJobCount::OverLimit { value, max });
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_codes_match_server_mapping() {
        assert_eq!(ExperienceLevel::Internship.code(), "1");
        assert_eq!(ExperienceLevel::EntryLevel.code(), "2");
        assert_eq!(ExperienceLevel::Associate.code(), "3");
        assert_eq!(ExperienceLevel::MidSenior.code(), "4");
        assert_eq!(ExperienceLevel::Director.code(), "5");
        assert_eq!(ExperienceLevel::Executive.code(), "6");
    }

    #[test]
    fn test_experience_from_str_accepts_known_names() {
        assert_eq!(
            "internship".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::Internship
        );
        assert_eq!(
            "Entry".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::EntryLevel
        );
        assert_eq!(
            "mid-senior".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::MidSenior
        );
        assert_eq!(
            " executive ".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::Executive
        );
    }

    #[test]
    fn test_experience_from_str_rejects_unknown_names() {
        let err = "wizard".parse::<ExperienceLevel>().unwrap_err();
        assert!(err.to_string().contains("wizard"));
    }

    #[test]
    fn test_validate_job_count_empty_input_takes_default() {
        assert_eq!(validate_job_count("", 50, 500), Ok(50));
        assert_eq!(validate_job_count("   ", 25, 500), Ok(25));
    }

    #[test]
    fn test_validate_job_count_accepts_valid_values() {
        assert_eq!(validate_job_count("1", 50, 500), Ok(1));
        assert_eq!(validate_job_count("100", 50, 500), Ok(100));
        assert_eq!(validate_job_count("500", 50, 500), Ok(500));
    }

    #[test]
    fn test_validate_job_count_rejects_non_numbers() {
        assert_eq!(
            validate_job_count("fifty", 50, 500),
            Err(InvalidJobCount::NotANumber {
                input: "fifty".to_string()
            })
        );
    }

    #[test]
    fn test_validate_job_count_rejects_zero_and_negative() {
        assert_eq!(
            validate_job_count("0", 50, 500),
            Err(InvalidJobCount::NotPositive { value: 0 })
        );
        assert_eq!(
            validate_job_count("-5", 50, 500),
            Err(InvalidJobCount::NotPositive { value: -5 })
        );
    }

    #[test]
    fn test_validate_job_count_rejects_over_limit() {
        assert_eq!(
            validate_job_count("501", 50, 500),
            Err(InvalidJobCount::OverLimit {
                value: 501,
                max: 500
            })
        );
    }
}
