//! Student view models and form bodies

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::StudentsListView;
use crate::domain::{EnrollmentRecord, Student, StudentDetails, StudentInput};
use crate::shared::PaginatedList;

// ── Query parameters ────────────────────────────────────────────

/// Empty or unparsable query values read as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

/// Query string of `GET /Students`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentListParams {
    /// `name_desc`, `date_asc` or `date_desc`; anything else sorts by last name
    pub sort_order: Option<String>,
    /// New search text; resets paging to the first page
    pub search_string: Option<String>,
    /// Search text carried over from the previous page
    pub current_filter: Option<String>,
    /// 1-based page number; missing or malformed means the first page
    #[serde(default, deserialize_with = "lenient")]
    pub page_number: Option<i64>,
}

/// Query string of `GET /Students/Delete/{id}`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    /// Set after a failed delete
    #[serde(default, deserialize_with = "lenient")]
    pub save_changes_error: Option<bool>,
}

// ── Views ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentDto {
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
    pub full_name: String,
    pub enrollment_date: NaiveDate,
}

impl From<Student> for StudentDto {
    fn from(s: Student) -> Self {
        Self {
            full_name: s.full_name(),
            id: s.id,
            last_name: s.last_name,
            first_mid_name: s.first_mid_name,
            enrollment_date: s.enrollment_date,
        }
    }
}

/// One page of students with navigation flags
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentPageDto {
    pub items: Vec<StudentDto>,
    pub page_index: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl From<PaginatedList<Student>> for StudentPageDto {
    fn from(page: PaginatedList<Student>) -> Self {
        Self {
            page_index: page.page_index(),
            total_pages: page.total_pages(),
            total_count: page.total_count(),
            has_previous_page: page.has_previous_page(),
            has_next_page: page.has_next_page(),
            items: page.into_items().into_iter().map(Into::into).collect(),
        }
    }
}

/// `GET /Students` view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentsIndexView {
    pub current_sort: String,
    pub current_filter: String,
    pub name_sort_param: String,
    pub date_sort_param: String,
    pub students: StudentPageDto,
}

impl From<StudentsListView> for StudentsIndexView {
    fn from(view: StudentsListView) -> Self {
        Self {
            current_sort: view.current_sort,
            current_filter: view.current_filter,
            name_sort_param: view.name_sort_param,
            date_sort_param: view.date_sort_param,
            students: view.students.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentDto {
    pub id: i32,
    pub course_id: i32,
    pub course_title: String,
    pub credits: i32,
    /// Letter grade, absent until graded
    pub grade: Option<String>,
}

impl From<EnrollmentRecord> for EnrollmentDto {
    fn from(e: EnrollmentRecord) -> Self {
        Self {
            id: e.id,
            course_id: e.course.id,
            course_title: e.course.title,
            credits: e.course.credits,
            grade: e.grade.map(|g| g.to_string()),
        }
    }
}

/// `GET /Students/Details/{id}` view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentDetailsView {
    pub student: StudentDto,
    pub enrollments: Vec<EnrollmentDto>,
}

impl From<StudentDetails> for StudentDetailsView {
    fn from(d: StudentDetails) -> Self {
        Self {
            student: d.student.into(),
            enrollments: d.enrollments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create/edit form, as rendered and as re-rendered after a failed post
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct StudentFormView {
    pub id: Option<i32>,
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: Option<NaiveDate>,
    /// Field name → messages
    pub errors: BTreeMap<String, Vec<String>>,
    /// Message not tied to a single field
    pub form_error: Option<String>,
    /// Echo in `X-CSRF-Token` when posting the form
    pub csrf_token: String,
}

impl StudentFormView {
    pub fn empty(csrf_token: String) -> Self {
        Self {
            csrf_token,
            ..Default::default()
        }
    }

    pub fn for_student(student: Student, csrf_token: String) -> Self {
        Self {
            id: Some(student.id),
            last_name: student.last_name,
            first_mid_name: student.first_mid_name,
            enrollment_date: Some(student.enrollment_date),
            csrf_token,
            ..Default::default()
        }
    }

    /// Echo a posted form back to the client.
    pub fn from_request(form: StudentFormRequest, csrf_token: String) -> Self {
        Self {
            id: form.id,
            last_name: form.last_name,
            first_mid_name: form.first_mid_name,
            enrollment_date: form.enrollment_date,
            csrf_token,
            ..Default::default()
        }
    }
}

/// `GET /Students/Delete/{id}` view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmationView {
    pub student: StudentDto,
    pub error_message: Option<String>,
    pub csrf_token: String,
}

// ── Form bodies ─────────────────────────────────────────────────

/// Body of the create and edit posts. Missing fields bind as empty so the
/// validation messages, not a parse error, tell the user what is wrong.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct StudentFormRequest {
    /// Ignored on create; must match the route on edit
    pub id: Option<i32>,
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: Option<NaiveDate>,
}

impl StudentFormRequest {
    /// The editable fields only.
    pub fn to_input(&self) -> StudentInput {
        StudentInput {
            last_name: self.last_name.clone(),
            first_mid_name: self.first_mid_name.clone(),
            enrollment_date: self.enrollment_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;

    fn list_params(query: &str) -> StudentListParams {
        let uri: Uri = format!("/Students?{query}").parse().unwrap();
        Query::<StudentListParams>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn page_number_parses_when_numeric() {
        assert_eq!(list_params("pageNumber=2").page_number, Some(2));
        assert_eq!(list_params("pageNumber=-5").page_number, Some(-5));
    }

    #[test]
    fn blank_or_garbage_page_number_is_absent() {
        for query in ["pageNumber=", "pageNumber=abc", "pageNumber=1.5", ""] {
            assert_eq!(list_params(query).page_number, None, "query {:?}", query);
        }
    }

    #[test]
    fn other_fields_survive_a_bad_page_number() {
        let params = list_params("searchString=al&pageNumber=&sortOrder=name_desc");
        assert_eq!(params.search_string.as_deref(), Some("al"));
        assert_eq!(params.sort_order.as_deref(), Some("name_desc"));
        assert_eq!(params.page_number, None);
    }

    #[test]
    fn save_changes_flag_is_lenient() {
        let parse = |query: &str| {
            let uri: Uri = format!("/Students/Delete/1?{query}").parse().unwrap();
            Query::<DeleteParams>::try_from_uri(&uri).unwrap().0.save_changes_error
        };
        assert_eq!(parse("saveChangesError=true"), Some(true));
        assert_eq!(parse("saveChangesError="), None);
        assert_eq!(parse("saveChangesError=yes"), None);
    }
}
