use crate::WorkoutError;
use crate::model::Timestamp;

/// Checks applied by the builders on top of the mandatory-field rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Reject sets, distance records and workouts whose end precedes their start.
    pub enforce_time_order: bool,
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self {
            enforce_time_order: true,
        }
    }

    pub fn check_window(
        &self,
        what: &str,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<(), WorkoutError> {
        if self.enforce_time_order && end < start {
            return Err(WorkoutError::InvariantViolation(format!(
                "{what} endTime must not be before startTime"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub validation: ValidationPolicy,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::default(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, WorkoutError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, WorkoutError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let enforce_time_order = match get("DATASTREAM_ENFORCE_TIME_ORDER") {
            None => false,
            Some(v) => parse_bool(&v).ok_or_else(|| {
                WorkoutError::Config(format!("DATASTREAM_ENFORCE_TIME_ORDER invalid: {v}"))
            })?,
        };
        let default_page_size = parse_size(
            get("DATASTREAM_DEFAULT_PAGE_SIZE"),
            "DATASTREAM_DEFAULT_PAGE_SIZE",
            defaults.default_page_size,
        )?;
        let max_page_size = parse_size(
            get("DATASTREAM_MAX_PAGE_SIZE"),
            "DATASTREAM_MAX_PAGE_SIZE",
            defaults.max_page_size,
        )?;
        if default_page_size > max_page_size {
            return Err(WorkoutError::Config(format!(
                "default page size {default_page_size} exceeds max page size {max_page_size}"
            )));
        }
        Ok(Self {
            validation: ValidationPolicy { enforce_time_order },
            default_page_size,
            max_page_size,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_size(raw: Option<String>, key: &str, default: usize) -> Result<usize, WorkoutError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(WorkoutError::Config(format!("{key} invalid: {raw}"))),
        Ok(n) => Ok(n),
    }
}
