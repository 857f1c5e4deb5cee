use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EnrollmentDateGroup;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentDateGroupDto {
    pub enrollment_date: NaiveDate,
    pub student_count: u64,
}

impl From<EnrollmentDateGroup> for EnrollmentDateGroupDto {
    fn from(g: EnrollmentDateGroup) -> Self {
        Self {
            enrollment_date: g.enrollment_date,
            student_count: g.student_count,
        }
    }
}

/// Student body statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AboutView {
    pub groups: Vec<EnrollmentDateGroupDto>,
    pub total_students: u64,
}
