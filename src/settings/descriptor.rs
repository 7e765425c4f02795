//! Setting descriptor types, grounded on the same name/type/setter shape
//! used for editor settings elsewhere in this codebase's lineage, but typed
//! around a generic [`SettingValue`] (produced by the external TOML loader)
//! instead of from raw strings.

use std::fmt;

/// Already-typed value handed in by the external config loader (e.g. a
/// `toml::Value` converted into this shape). Setters never see raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Str(String),
    List(Vec<String>),
}

/// Expected shape/bounds for a setting, used to validate an incoming
/// [`SettingValue`].
#[derive(Debug, Clone)]
pub enum SettingType {
    Boolean,
    Integer { min: Option<i64>, max: Option<i64> },
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    Validation(String),
    UnknownKey(String),
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::Validation(msg) => write!(f, "validation error: {msg}"),
            SettingError::UnknownKey(key) => write!(f, "unknown setting: {key}"),
        }
    }
}

impl From<SettingError> for crate::error::AnvilError {
    fn from(err: SettingError) -> Self {
        use crate::error::{AnvilError, ErrorCategory};
        match err {
            SettingError::Validation(msg) => {
                AnvilError::new(ErrorCategory::ConfigParse, "SETTING_VALIDATION_ERROR", msg)
            }
            SettingError::UnknownKey(key) => AnvilError::new(
                ErrorCategory::ConfigParse,
                "UNKNOWN_SETTING",
                format!("unknown setting: {key}"),
            ),
        }
    }
}

pub type SettingSetter = fn(&mut super::Settings, SettingValue) -> Result<(), SettingError>;

#[derive(Debug, Clone)]
pub struct SettingDescriptor {
    pub name: &'static str,
    pub ty: SettingType,
    pub set: SettingSetter,
}

/// Validate `value` against `ty`, returning it unchanged on success.
pub(crate) fn parse_value(ty: &SettingType, value: &SettingValue) -> Result<SettingValue, SettingError> {
    match (ty, value) {
        (SettingType::Boolean, SettingValue::Bool(_)) => Ok(value.clone()),
        (SettingType::Str, SettingValue::Str(_)) => Ok(value.clone()),
        (SettingType::Integer { min, max }, SettingValue::Integer(n)) => {
            if let Some(min) = min {
                if n < min {
                    return Err(SettingError::Validation(format!(
                        "{n} is below minimum {min}"
                    )));
                }
            }
            if let Some(max) = max {
                if n > max {
                    return Err(SettingError::Validation(format!(
                        "{n} is above maximum {max}"
                    )));
                }
            }
            Ok(value.clone())
        }
        _ => Err(SettingError::Validation("type mismatch".to_string())),
    }
}
