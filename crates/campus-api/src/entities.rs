use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An academic (admission) year, e.g. "2024-25"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_current: bool,
}

/// A degree program such as "B.Tech CSE"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// A curriculum regulation that belongs to one program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
    pub id: i64,
    pub name: String,
    pub program_id: i64,
}

/// A cohort of students admitted under a regulation in a given year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub name: String,
    pub program_id: i64,
    pub regulation_id: i64,
    pub admission_year_id: i64,
}

/// One semester of a batch
///
/// The backend calls this a "batch semester"; its `id` is the
/// `batch_semester_id` every semester-scoped endpoint is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    pub batch_id: i64,
    pub semester_number: u32,
    #[serde(default)]
    pub name: Option<String>,
}

/// A theory section of a semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
    pub batch_semester_id: i64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub student_count: Option<u32>,
}

/// A practical (lab) batch of a semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticalBatch {
    pub id: i64,
    pub name: String,
    pub batch_semester_id: i64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub student_count: Option<u32>,
}

/// Kind of subject taught in a semester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    #[display(fmt = "theory")]
    Theory,
    #[display(fmt = "practical")]
    Practical,
}

/// A subject offered in a semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    pub batch_semester_id: i64,
    pub subject_type: SubjectType,
}
