//! The read-only collection endpoints the navigator depends on

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    AcademicYear, Batch, PracticalBatch, Program, Regulation, Section, Semester, Subject,
    SubjectType,
};

/// Read access to the academic structure collections
///
/// Every method fetches one collection. Filters that the backend cannot apply
/// are left to the caller, so implementations may return more than asked for
/// (e.g. `list_regulations` returns regulations of every program).
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_academic_years(&self) -> Result<Vec<AcademicYear>>;

    async fn list_programs(&self) -> Result<Vec<Program>>;

    async fn list_regulations(&self) -> Result<Vec<Regulation>>;

    /// List batches, optionally narrowed server-side to one program
    async fn list_batches(&self, program_id: Option<i64>) -> Result<Vec<Batch>>;

    async fn list_semesters(&self, batch_id: i64) -> Result<Vec<Semester>>;

    async fn list_sections(&self, batch_semester_id: i64) -> Result<Vec<Section>>;

    async fn list_practical_batches(&self, batch_semester_id: i64) -> Result<Vec<PracticalBatch>>;

    async fn list_subjects(
        &self,
        batch_semester_id: i64,
        subject_type: Option<SubjectType>,
    ) -> Result<Vec<Subject>>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn list_academic_years(&self) -> Result<Vec<AcademicYear>> {
        (**self).list_academic_years().await
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        (**self).list_programs().await
    }

    async fn list_regulations(&self) -> Result<Vec<Regulation>> {
        (**self).list_regulations().await
    }

    async fn list_batches(&self, program_id: Option<i64>) -> Result<Vec<Batch>> {
        (**self).list_batches(program_id).await
    }

    async fn list_semesters(&self, batch_id: i64) -> Result<Vec<Semester>> {
        (**self).list_semesters(batch_id).await
    }

    async fn list_sections(&self, batch_semester_id: i64) -> Result<Vec<Section>> {
        (**self).list_sections(batch_semester_id).await
    }

    async fn list_practical_batches(&self, batch_semester_id: i64) -> Result<Vec<PracticalBatch>> {
        (**self).list_practical_batches(batch_semester_id).await
    }

    async fn list_subjects(
        &self,
        batch_semester_id: i64,
        subject_type: Option<SubjectType>,
    ) -> Result<Vec<Subject>> {
        (**self)
            .list_subjects(batch_semester_id, subject_type)
            .await
    }
}
