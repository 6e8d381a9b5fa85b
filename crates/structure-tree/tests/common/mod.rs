#![allow(dead_code)]

use campus_api::{
    AcademicYear, Batch, InMemoryBackend, PracticalBatch, Program, Regulation, Section, Semester,
    Subject, SubjectType,
};
use structure_tree::prelude::*;

pub const YEAR_ID: i64 = 2024;
pub const PROGRAM_ID: i64 = 7;
pub const REGULATION_ID: i64 = 3;
pub const BATCH_ID: i64 = 12;
pub const SEMESTER_ID: i64 = 101;

pub fn year(id: i64, name: &str) -> AcademicYear {
    AcademicYear {
        id,
        name: name.to_string(),
        is_current: false,
    }
}

pub fn program(id: i64, name: &str) -> Program {
    Program {
        id,
        name: name.to_string(),
        code: None,
    }
}

pub fn regulation(id: i64, name: &str, program_id: i64) -> Regulation {
    Regulation {
        id,
        name: name.to_string(),
        program_id,
    }
}

pub fn batch(id: i64, name: &str, regulation_id: i64, admission_year_id: i64) -> Batch {
    Batch {
        id,
        name: name.to_string(),
        program_id: PROGRAM_ID,
        regulation_id,
        admission_year_id,
    }
}

pub fn semester(id: i64, batch_id: i64, semester_number: u32) -> Semester {
    Semester {
        id,
        batch_id,
        semester_number,
        name: None,
    }
}

pub fn section(id: i64, name: &str, batch_semester_id: i64) -> Section {
    Section {
        id,
        name: name.to_string(),
        batch_semester_id,
        capacity: None,
        student_count: None,
    }
}

pub fn lab(id: i64, name: &str, batch_semester_id: i64) -> PracticalBatch {
    PracticalBatch {
        id,
        name: name.to_string(),
        batch_semester_id,
        capacity: None,
        student_count: None,
    }
}

pub fn subject(id: i64, name: &str, subject_type: SubjectType) -> Subject {
    Subject {
        id,
        name: name.to_string(),
        code: None,
        batch_semester_id: SEMESTER_ID,
        subject_type,
    }
}

/// 2024 → B.Tech CSE (7) → R24 (3) → 2024-2028 (12) → Semester 1 (101)
/// with one section "A" and no labs
pub fn scenario_backend() -> InMemoryBackend {
    InMemoryBackend::new()
        .with_years(vec![year(YEAR_ID, "2024")])
        .with_programs(vec![program(PROGRAM_ID, "B.Tech CSE")])
        .with_regulations(vec![regulation(REGULATION_ID, "R24", PROGRAM_ID)])
        .with_batches(vec![batch(BATCH_ID, "2024-2028", REGULATION_ID, YEAR_ID)])
        .with_semesters(vec![semester(SEMESTER_ID, BATCH_ID, 1)])
        .with_sections(vec![section(5, "A", SEMESTER_ID)])
        .with_subjects(vec![
            subject(1, "Data Structures", SubjectType::Theory),
            subject(2, "Data Structures Lab", SubjectType::Practical),
        ])
}

pub fn year_id() -> NodeId {
    NodeId::child(&NodeId::root(), NodeType::Year.tag(), YEAR_ID)
}

pub fn program_id() -> NodeId {
    NodeId::child(&year_id(), NodeType::Program.tag(), PROGRAM_ID)
}

pub fn regulation_id() -> NodeId {
    NodeId::child(&program_id(), NodeType::Regulation.tag(), REGULATION_ID)
}

pub fn batch_id() -> NodeId {
    NodeId::child(&regulation_id(), NodeType::Batch.tag(), BATCH_ID)
}

pub fn semester_id() -> NodeId {
    NodeId::child(&batch_id(), NodeType::Semester.tag(), SEMESTER_ID)
}

pub fn section_group_id() -> NodeId {
    NodeId::group(&semester_id(), NodeType::SectionGroup.tag())
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
