//! Project input form: raw field strings -> validated `NewProject`.

use std::fmt;

use super::NewProject;
use super::validation::{Validatable, Violation, check};

/// Bounds applied to the people field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRules {
    pub people_min: u32,
    pub people_max: u32,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            people_min: 1,
            people_max: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    People,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::People => "people",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormErrorKind {
    #[error(transparent)]
    Violation(#[from] Violation),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} is not a whole number")]
    NotAnInteger(f64),
}

/// One invalid field. The form stops at the first one it finds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {kind}")]
pub struct FormError {
    pub field: FormField,
    pub kind: FormErrorKind,
}

impl FormError {
    fn new(field: FormField, kind: impl Into<FormErrorKind>) -> Self {
        Self {
            field,
            kind: kind.into(),
        }
    }
}

/// The three text inputs of the "add project" form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub people: String,
}

impl ProjectForm {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }

    /// Validate every field and build the store input.
    ///
    /// - title: required
    /// - description: required, at least 1 character
    /// - people: a number, required, within `rules` (inclusive), whole
    ///
    /// An empty people field counts as missing, not as zero.
    pub fn submit(&self, rules: &FormRules) -> Result<NewProject, FormError> {
        check(&Validatable::new(self.title.as_str()).required())
            .map_err(|v| FormError::new(FormField::Title, v))?;

        check(
            &Validatable::new(self.description.as_str())
                .required()
                .min_length(1),
        )
        .map_err(|v| FormError::new(FormField::Description, v))?;

        let people = self.parse_people()?;
        check(
            &Validatable::new(people)
                .required()
                .min(f64::from(rules.people_min))
                .max(f64::from(rules.people_max)),
        )
        .map_err(|v| FormError::new(FormField::People, v))?;

        if people.fract() != 0.0 {
            return Err(FormError::new(
                FormField::People,
                FormErrorKind::NotAnInteger(people),
            ));
        }

        Ok(NewProject::new(
            self.title.as_str(),
            self.description.as_str(),
            people as u32,
        ))
    }

    /// Reset all fields after a successful submit.
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
    }

    fn parse_people(&self) -> Result<f64, FormError> {
        let raw = self.people.trim();
        if raw.is_empty() {
            return Err(FormError::new(FormField::People, Violation::Required));
        }
        // "inf" / "NaN" は f64 としては読めるが人数ではない
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| {
                FormError::new(FormField::People, FormErrorKind::NotANumber(raw.to_string()))
            })
    }
}
