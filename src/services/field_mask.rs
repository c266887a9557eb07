//! Update-mask parsing
//!
//! Callers name the fields they intend to change; unknown paths are
//! rejected instead of silently ignored.

use std::str::FromStr;

use strum::{AsRefStr, EnumString};

use crate::errors::{LinkhubError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ShortcutField {
    Name,
    Link,
    Title,
    Description,
    Tags,
    Visibility,
    OgMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CollectionField {
    Name,
    Title,
    Description,
    Visibility,
    ShortcutIds,
}

/// 已校验的非空字段集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMask<F> {
    fields: Vec<F>,
}

impl<F: FromStr + PartialEq> FieldMask<F> {
    pub fn parse<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        if paths.is_empty() {
            return Err(LinkhubError::invalid_argument("update mask is required"));
        }

        let mut fields = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref().trim();
            let field = path.parse::<F>().map_err(|_| {
                LinkhubError::invalid_argument(format!("unsupported update mask path: {}", path))
            })?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }

        Ok(Self { fields })
    }

    pub fn contains(&self, field: &F) -> bool {
        self.fields.contains(field)
    }

    pub fn fields(&self) -> &[F] {
        &self.fields
    }
}
