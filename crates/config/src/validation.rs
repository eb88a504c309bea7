//! Configuration validation utilities
//!
//! The resolver accepts anything. Callers that need a usable URL before
//! issuing requests run the resolved value through [`ConfigValidator`].

use crate::schema::GlobalApiConfig;
use types::ConfigError;
use url::Url;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a resolved configuration
    pub fn validate(config: &GlobalApiConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_base_url(config, &mut report);
        Self::validate_api_prefix(config, &mut report);

        report
    }

    fn validate_base_url(config: &GlobalApiConfig, report: &mut ValidationReport) {
        let base_url = config.base_url();

        if base_url.is_empty() {
            report.add_error("base_url", "Base URL is empty (override contained only slashes)");
            return;
        }

        let url = match Url::parse(base_url) {
            Ok(url) => url,
            Err(e) => {
                report.add_error("base_url", &format!("Base URL '{}' is not a valid URL: {}", base_url, e));
                return;
            }
        };

        if !matches!(url.scheme(), "http" | "https") {
            report.add_warning(
                "base_url",
                &format!("Base URL '{}' does not use the http or https scheme", base_url),
            );
            return;
        }

        if url.path() != "/" {
            report.add_warning(
                "base_url",
                "Base URL contains a path; routes belong in the API prefix",
            );
        }
    }

    fn validate_api_prefix(config: &GlobalApiConfig, report: &mut ValidationReport) {
        let prefix = config.api_prefix();

        if prefix.is_empty() {
            report.add_error("api_prefix", "API prefix is empty (override contained only slashes)");
            return;
        }

        if prefix.chars().any(char::is_whitespace) {
            report.add_warning("api_prefix", "API prefix contains whitespace");
        }

        if prefix.contains("//") {
            report.add_warning("api_prefix", "API prefix contains an empty path segment");
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }

    /// Turn the first error, if any, into a [`ConfigError`]
    pub fn into_result(self) -> Result<(), ConfigError> {
        match self.errors.into_iter().next() {
            Some(issue) => Err(ConfigError::ValidationError {
                field: issue.field,
                message: issue.message,
            }),
            None => Ok(()),
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
