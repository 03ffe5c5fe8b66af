//! Competition timeline configuration
//!
//! Epoch-second anchors of the observation window and the detection game.
//! The defaults are the dates of the 2014/2015 competition run.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Dec 8, 2014 at midnight UTC
pub const DEFAULT_COMPETITION_START: i64 = 1_417_996_800;
/// Jan 8, 2015 at midnight UTC
pub const DEFAULT_COMPETITION_END: i64 = 1_420_675_200;
/// Jan 26, 2015 at midnight UTC
pub const DEFAULT_BETA_START: i64 = 1_422_230_400;
/// Feb 17, 2015 at midnight EST
pub const DEFAULT_DETECTION_START: i64 = 1_424_149_200;
/// March 17, 2015 at midnight EST
pub const DEFAULT_DETECTION_END: i64 = 1_426_564_800;

/// Page size used when a request names none
pub const DEFAULT_PAGE_SIZE: u32 = 500;
/// Upper bound applied to every requested page size
pub const GENEROUS_PAGE_SIZE_BOUND: u32 = 15_000;

/// Competition configuration
///
/// # Example
///
/// ```toml
/// [competition]
/// competition_start = 1417996800
/// beta_start = 1422230400
/// detection_start = 1424149200
/// detection_end = 1426564800
/// default_page_size = 500
/// max_page_size = 15000
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompetitionConfig {
    /// Start of the archived observation window (virtual time origin)
    pub competition_start: i64,
    /// End of the archived observation window
    pub competition_end: i64,
    /// Wall-clock start of the beta phase
    pub beta_start: i64,
    /// Wall-clock start of the detection phase (beta ends here)
    pub detection_start: i64,
    /// Wall-clock deadline of the detection phase
    pub detection_end: i64,
    /// Page size when the client sends none
    pub default_page_size: u32,
    /// Cap on any client-supplied page size
    pub max_page_size: u32,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            competition_start: DEFAULT_COMPETITION_START,
            competition_end: DEFAULT_COMPETITION_END,
            beta_start: DEFAULT_BETA_START,
            detection_start: DEFAULT_DETECTION_START,
            detection_end: DEFAULT_DETECTION_END,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: GENEROUS_PAGE_SIZE_BOUND,
        }
    }
}

impl CompetitionConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.competition_start > self.beta_start {
            return Err(ConfigError::invalid(
                "competition",
                "beta_start",
                "must not precede competition_start",
            ));
        }
        if self.beta_start > self.detection_start {
            return Err(ConfigError::invalid(
                "competition",
                "detection_start",
                "must not precede beta_start",
            ));
        }
        if self.detection_start >= self.detection_end {
            return Err(ConfigError::invalid(
                "competition",
                "detection_end",
                "must be after detection_start",
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::invalid(
                "competition",
                "default_page_size",
                format!("must be between 1 and max_page_size ({})", self.max_page_size),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_ordered() {
        let config = CompetitionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_page_size, 15_000);
        assert_eq!(config.default_page_size, 500);
    }

    #[test]
    fn test_detection_end_must_follow_start() {
        let config: CompetitionConfig = toml::from_str(
            r#"
detection_start = 1424149200
detection_end = 1424149200
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_page_size_bounded() {
        let config: CompetitionConfig =
            toml::from_str("default_page_size = 20000\nmax_page_size = 100").unwrap();
        assert!(config.validate().is_err());
    }
}
