//! Student list request resolution and the list view model

use crate::domain::{Student, StudentQuery, StudentSortOrder};
use crate::shared::PaginatedList;

/// Raw list parameters as they arrive from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentListRequest {
    pub sort_order: Option<String>,
    /// A newly submitted filter; present (even empty) means "search again"
    pub search_string: Option<String>,
    /// The filter carried over by paging and sorting links
    pub current_filter: Option<String>,
    pub page_number: Option<i64>,
}

impl StudentListRequest {
    /// The filter in effect: a new search wins over the carried filter.
    pub fn effective_filter(&self) -> Option<&str> {
        match self.search_string.as_deref() {
            Some(search) => Some(search),
            None => self.current_filter.as_deref(),
        }
    }

    /// Submitting a new search always restarts at the first page.
    pub fn effective_page(&self) -> Option<i64> {
        if self.search_string.is_some() {
            Some(1)
        } else {
            self.page_number
        }
    }

    pub fn query(&self) -> StudentQuery {
        StudentQuery {
            search: self.effective_filter().map(str::to_string),
            sort: StudentSortOrder::from_param(self.sort_order.as_deref()),
        }
    }
}

/// Everything the student index page renders, built per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentsListView {
    /// Sort order as requested, echoed for paging links
    pub current_sort: String,
    pub current_filter: String,
    /// Sort value the last-name column header links to
    pub name_sort_param: String,
    /// Sort value the enrollment-date column header links to
    pub date_sort_param: String,
    pub students: PaginatedList<Student>,
}

impl StudentsListView {
    pub fn new(request: &StudentListRequest, students: PaginatedList<Student>) -> Self {
        let current_sort = request.sort_order.clone().unwrap_or_default();

        let name_sort_param = if current_sort.is_empty() {
            StudentSortOrder::NameDesc.as_param()
        } else {
            StudentSortOrder::NameAsc.as_param()
        };
        let date_sort_param = if current_sort == StudentSortOrder::DateAsc.as_param() {
            StudentSortOrder::DateDesc.as_param()
        } else {
            StudentSortOrder::DateAsc.as_param()
        };

        Self {
            current_filter: request.effective_filter().unwrap_or_default().to_string(),
            name_sort_param: name_sort_param.to_string(),
            date_sort_param: date_sort_param.to_string(),
            current_sort,
            students,
        }
    }
}
