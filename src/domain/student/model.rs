//! Student domain entity

use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::school::EnrollmentRecord;

/// A student record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Server-generated identifier
    pub id: i32,
    pub last_name: String,
    /// First and middle names
    pub first_mid_name: String,
    pub enrollment_date: NaiveDate,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_mid_name)
    }
}

/// A student with its enrollments and their courses loaded
#[derive(Debug, Clone)]
pub struct StudentDetails {
    pub student: Student,
    pub enrollments: Vec<EnrollmentRecord>,
}

/// Editable student fields as submitted from a form.
///
/// Only these fields are ever bound from client input; the identifier is
/// taken from the route.
#[derive(Debug, Clone, Default, Validate)]
pub struct StudentInput {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Last name is required and cannot be longer than 50 characters."
    ))]
    pub last_name: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "First name is required and cannot be longer than 50 characters."
    ))]
    pub first_mid_name: String,
    pub enrollment_date: Option<NaiveDate>,
}

/// Student fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: NaiveDate,
}

impl StudentInput {
    /// Trim the names, run the field rules and return the checked fields.
    pub fn validated(self) -> Result<StudentFields, ValidationErrors> {
        let input = StudentInput {
            last_name: self.last_name.trim().to_string(),
            first_mid_name: self.first_mid_name.trim().to_string(),
            enrollment_date: self.enrollment_date,
        };

        let mut errors = match input.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let Some(enrollment_date) = input.enrollment_date else {
            let mut missing = ValidationError::new("required");
            missing.message = Some("Enrollment date is required.".into());
            errors.add("enrollment_date", missing);
            return Err(errors);
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(StudentFields {
            last_name: input.last_name,
            first_mid_name: input.first_mid_name,
            enrollment_date,
        })
    }
}

/// Ordering applied to the student list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentSortOrder {
    /// Last name ascending
    #[default]
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
}

impl StudentSortOrder {
    /// Parse the `sortOrder` query value; unknown values sort by last name.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("name_desc") => Self::NameDesc,
            Some("date_asc") => Self::DateAsc,
            Some("date_desc") => Self::DateDesc,
            _ => Self::NameAsc,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::NameAsc => "",
            Self::NameDesc => "name_desc",
            Self::DateAsc => "date_asc",
            Self::DateDesc => "date_desc",
        }
    }
}

/// Filter and ordering for a student list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    /// Substring matched against last name or first/middle name
    pub search: Option<String>,
    pub sort: StudentSortOrder,
}

impl StudentQuery {
    /// The search term, if it is non-empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(last: &str, first: &str, date: Option<NaiveDate>) -> StudentInput {
        StudentInput {
            last_name: last.into(),
            first_mid_name: first.into(),
            enrollment_date: date,
        }
    }

    fn date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2005, 9, 1)
    }

    #[test]
    fn valid_input_is_trimmed() {
        let fields = input("  Alexander ", "Carson", date()).validated().unwrap();
        assert_eq!(fields.last_name, "Alexander");
        assert_eq!(fields.enrollment_date, date().unwrap());
    }

    #[test]
    fn empty_last_name_is_rejected() {
        let errors = input("", "Carson", date()).validated().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
        assert!(!errors.field_errors().contains_key("first_mid_name"));
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let errors = input("Alexander", "   ", date()).validated().unwrap_err();
        assert!(errors.field_errors().contains_key("first_mid_name"));
    }

    #[test]
    fn long_name_is_rejected() {
        let long = "x".repeat(51);
        let errors = input(&long, "Carson", date()).validated().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
    }

    #[test]
    fn missing_date_is_reported_with_other_errors() {
        let errors = input("", "Carson", None).validated().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("last_name"));
        assert!(fields.contains_key("enrollment_date"));
    }

    #[test]
    fn sort_order_round_trips_through_params() {
        for order in [
            StudentSortOrder::NameAsc,
            StudentSortOrder::NameDesc,
            StudentSortOrder::DateAsc,
            StudentSortOrder::DateDesc,
        ] {
            let param = order.as_param();
            let parsed = StudentSortOrder::from_param((!param.is_empty()).then_some(param));
            assert_eq!(parsed, order);
        }
        assert_eq!(
            StudentSortOrder::from_param(Some("bogus")),
            StudentSortOrder::NameAsc
        );
    }

    #[test]
    fn empty_search_is_no_filter() {
        let query = StudentQuery {
            search: Some(String::new()),
            sort: StudentSortOrder::NameAsc,
        };
        assert_eq!(query.search_term(), None);
    }
}
