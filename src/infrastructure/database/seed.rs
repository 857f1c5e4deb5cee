//! Sample school data for a fresh database.

use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, TransactionTrait,
};
use tracing::info;

use super::entities::{
    course, course_assignment, department, enrollment, enrollment::Grade, instructor,
    office_assignment, student,
};

const STUDENTS: &[(i32, &str, &str, &str)] = &[
    (1, "Carson", "Alexander", "2010-09-01"),
    (2, "Meredith", "Alonso", "2012-09-01"),
    (3, "Arturo", "Anand", "2013-09-01"),
    (4, "Gytis", "Barzdukas", "2012-09-01"),
    (5, "Yan", "Li", "2012-09-01"),
    (6, "Peggy", "Justice", "2011-09-01"),
    (7, "Laura", "Norman", "2013-09-01"),
    (8, "Nino", "Olivetto", "2005-09-01"),
];

const INSTRUCTORS: &[(i32, &str, &str, &str)] = &[
    (1, "Kim", "Abercrombie", "1995-03-11"),
    (2, "Fadi", "Fakhouri", "2002-07-06"),
    (3, "Roger", "Harui", "1998-07-01"),
    (4, "Candace", "Kapoor", "2001-01-15"),
    (5, "Roger", "Zheng", "2004-02-12"),
];

/// (id, name, budget in cents, start date, administrator)
const DEPARTMENTS: &[(i32, &str, i64, &str, i32)] = &[
    (1, "English", 35_000_000, "2007-09-01", 1),
    (2, "Mathematics", 10_000_000, "2007-09-01", 2),
    (3, "Engineering", 35_000_000, "2007-09-01", 3),
    (4, "Economics", 10_000_000, "2007-09-01", 4),
];

/// (course number, title, credits, department)
const COURSES: &[(i32, &str, i32, i32)] = &[
    (1050, "Chemistry", 3, 3),
    (4022, "Microeconomics", 3, 4),
    (4041, "Macroeconomics", 3, 4),
    (1045, "Calculus", 4, 2),
    (3141, "Trigonometry", 4, 2),
    (2021, "Composition", 3, 1),
    (2042, "Literature", 4, 1),
];

const OFFICES: &[(i32, &str)] = &[(2, "Smith 17"), (3, "Gowan 27"), (4, "Thompson 304")];

/// (course, instructor)
const COURSE_ASSIGNMENTS: &[(i32, i32)] = &[
    (1050, 4),
    (1050, 3),
    (4022, 5),
    (4041, 5),
    (1045, 2),
    (3141, 3),
    (2021, 1),
    (2042, 1),
];

/// (student, course, grade)
const ENROLLMENTS: &[(i32, i32, Option<Grade>)] = &[
    (1, 1050, Some(Grade::A)),
    (1, 4022, Some(Grade::C)),
    (1, 4041, Some(Grade::B)),
    (2, 1045, Some(Grade::B)),
    (2, 3141, Some(Grade::B)),
    (2, 2021, Some(Grade::B)),
    (3, 1050, None),
    (3, 4022, Some(Grade::B)),
    (4, 1050, Some(Grade::B)),
    (5, 2021, Some(Grade::B)),
    (6, 2042, Some(Grade::B)),
];

fn date(value: &str) -> Result<NaiveDate, DbErr> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DbErr::Custom(format!("bad seed date {value}: {e}")))
}

/// Insert the sample school when the Student table is empty.
///
/// Returns `true` when rows were written. Everything is inserted in one
/// transaction.
pub async fn seed_if_empty(db: &DatabaseConnection) -> Result<bool, DbErr> {
    let existing = student::Entity::find().count(db).await?;
    if existing > 0 {
        info!(students = existing, "Database already populated, skipping seed");
        return Ok(false);
    }

    info!("🌱 Seeding sample school data...");
    let txn = db.begin().await?;

    let instructors = INSTRUCTORS
        .iter()
        .map(|&(id, first, last, hired)| {
            Ok(instructor::ActiveModel {
                id: Set(id),
                first_mid_name: Set(first.to_string()),
                last_name: Set(last.to_string()),
                hire_date: Set(date(hired)?),
            })
        })
        .collect::<Result<Vec<_>, DbErr>>()?;
    instructor::Entity::insert_many(instructors)
        .exec_without_returning(&txn)
        .await?;

    let departments = DEPARTMENTS
        .iter()
        .map(|&(id, name, budget, start, admin)| {
            Ok(department::ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
                budget: Set(budget),
                start_date: Set(date(start)?),
                instructor_id: Set(Some(admin)),
            })
        })
        .collect::<Result<Vec<_>, DbErr>>()?;
    department::Entity::insert_many(departments)
        .exec_without_returning(&txn)
        .await?;

    let courses = COURSES.iter().map(|&(id, title, credits, department_id)| course::ActiveModel {
        id: Set(id),
        title: Set(title.to_string()),
        credits: Set(credits),
        department_id: Set(department_id),
    });
    course::Entity::insert_many(courses)
        .exec_without_returning(&txn)
        .await?;

    let offices = OFFICES.iter().map(|&(instructor_id, location)| office_assignment::ActiveModel {
        instructor_id: Set(instructor_id),
        location: Set(location.to_string()),
    });
    office_assignment::Entity::insert_many(offices)
        .exec_without_returning(&txn)
        .await?;

    let assignments = COURSE_ASSIGNMENTS
        .iter()
        .map(|&(course_id, instructor_id)| course_assignment::ActiveModel {
            course_id: Set(course_id),
            instructor_id: Set(instructor_id),
        });
    course_assignment::Entity::insert_many(assignments)
        .exec_without_returning(&txn)
        .await?;

    let students = STUDENTS
        .iter()
        .map(|&(id, first, last, enrolled)| {
            Ok(student::ActiveModel {
                id: Set(id),
                first_mid_name: Set(first.to_string()),
                last_name: Set(last.to_string()),
                enrollment_date: Set(date(enrolled)?),
            })
        })
        .collect::<Result<Vec<_>, DbErr>>()?;
    student::Entity::insert_many(students)
        .exec_without_returning(&txn)
        .await?;

    let enrollments = ENROLLMENTS
        .iter()
        .map(|&(student_id, course_id, grade)| enrollment::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            grade: Set(grade),
            ..Default::default()
        });
    enrollment::Entity::insert_many(enrollments)
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await?;
    info!(
        students = STUDENTS.len(),
        courses = COURSES.len(),
        enrollments = ENROLLMENTS.len(),
        "Sample data inserted"
    );
    Ok(true)
}
