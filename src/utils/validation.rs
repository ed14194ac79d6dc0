use crate::domain::model::{CreatePersonRequest, PersonFilter, UpdatePersonRequest};
use crate::utils::error::{AppError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AppError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 請求欄位檢查，錯誤會以 400 回給呼叫端
pub fn require_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError {
            message: format!("{} is required", field_name),
        });
    }
    Ok(())
}

impl Validate for CreatePersonRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("surname", &self.surname)
    }
}

impl Validate for UpdatePersonRequest {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(surname) = &self.surname {
            require_non_empty("surname", surname)?;
        }
        Ok(())
    }
}

impl Validate for PersonFilter {
    fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(AppError::ValidationError {
                message: "limit must be at least 1".to_string(),
            });
        }
        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            if min > max {
                return Err(AppError::ValidationError {
                    message: format!("min_age ({}) is greater than max_age ({})", min, max),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("agify_url", "https://api.agify.io").is_ok());
        assert!(validate_url("agify_url", "http://localhost:9000").is_ok());
        assert!(validate_url("agify_url", "").is_err());
        assert!(validate_url("agify_url", "invalid-url").is_err());
        assert!(validate_url("agify_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("server_port", 8080, 1).is_ok());
        assert!(validate_positive_number("server_port", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let host = Some("localhost".to_string());
        assert_eq!(validate_required_field("DB_HOST", &host).unwrap(), "localhost");

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("DB_HOST", &missing),
            Err(AppError::MissingConfigError { field }) if field == "DB_HOST"
        ));
    }

    #[test]
    fn test_create_request_requires_name_and_surname() {
        let mut request = CreatePersonRequest {
            name: "Ivan".to_string(),
            surname: "Petrov".to_string(),
            patronymic: None,
        };
        assert!(request.validate().is_ok());

        request.surname = String::new();
        assert!(matches!(
            request.validate(),
            Err(AppError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_update_request_rejects_blank_names() {
        let update = UpdatePersonRequest {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(UpdatePersonRequest::default().validate().is_ok());
    }

    #[test]
    fn test_filter_rejects_inverted_age_range() {
        let filter = PersonFilter {
            min_age: Some(50),
            max_age: Some(20),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let filter = PersonFilter {
            limit: 0,
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }
}
