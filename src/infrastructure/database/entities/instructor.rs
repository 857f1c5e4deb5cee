//! Instructor entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Instructor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
    pub hire_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::office_assignment::Entity")]
    OfficeAssignment,
    #[sea_orm(has_many = "super::course_assignment::Entity")]
    CourseAssignment,
    #[sea_orm(has_many = "super::department::Entity")]
    Department,
}

impl Related<super::office_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OfficeAssignment.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_assignment::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_assignment::Relation::Instructor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
