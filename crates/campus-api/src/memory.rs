//! In-memory backend with call accounting
//!
//! Serves fixed collections, counts every call per endpoint, and can be told
//! to fail individual endpoints. Used by demos and tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use derive_more::Display;
use log::trace;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::backend::Backend;
use crate::entities::{
    AcademicYear, Batch, PracticalBatch, Program, Regulation, Section, Semester, Subject,
    SubjectType,
};

/// Identifies one collection endpoint of [`Backend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Endpoint {
    #[display(fmt = "academic-years")]
    AcademicYears,
    #[display(fmt = "programs")]
    Programs,
    #[display(fmt = "regulations")]
    Regulations,
    #[display(fmt = "batches")]
    Batches,
    #[display(fmt = "semesters")]
    Semesters,
    #[display(fmt = "sections")]
    Sections,
    #[display(fmt = "practical-batches")]
    PracticalBatches,
    #[display(fmt = "subjects")]
    Subjects,
}

#[derive(Default)]
struct Fixtures {
    years: Vec<AcademicYear>,
    programs: Vec<Program>,
    regulations: Vec<Regulation>,
    batches: Vec<Batch>,
    semesters: Vec<Semester>,
    sections: Vec<Section>,
    practical_batches: Vec<PracticalBatch>,
    subjects: Vec<Subject>,
}

/// A [`Backend`] serving fixed, in-memory collections
#[derive(Default)]
pub struct InMemoryBackend {
    fixtures: Mutex<Fixtures>,
    calls: Mutex<HashMap<Endpoint, usize>>,
    failing: Mutex<HashSet<Endpoint>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years(self, years: Vec<AcademicYear>) -> Self {
        lock(&self.fixtures).years = years;
        self
    }

    pub fn with_programs(self, programs: Vec<Program>) -> Self {
        lock(&self.fixtures).programs = programs;
        self
    }

    pub fn with_regulations(self, regulations: Vec<Regulation>) -> Self {
        lock(&self.fixtures).regulations = regulations;
        self
    }

    pub fn with_batches(self, batches: Vec<Batch>) -> Self {
        lock(&self.fixtures).batches = batches;
        self
    }

    pub fn with_semesters(self, semesters: Vec<Semester>) -> Self {
        lock(&self.fixtures).semesters = semesters;
        self
    }

    pub fn with_sections(self, sections: Vec<Section>) -> Self {
        lock(&self.fixtures).sections = sections;
        self
    }

    pub fn with_practical_batches(self, practical_batches: Vec<PracticalBatch>) -> Self {
        lock(&self.fixtures).practical_batches = practical_batches;
        self
    }

    pub fn with_subjects(self, subjects: Vec<Subject>) -> Self {
        lock(&self.fixtures).subjects = subjects;
        self
    }

    /// Make every later call to `endpoint` return an error
    pub fn fail(&self, endpoint: Endpoint) {
        lock(&self.failing).insert(endpoint);
    }

    /// Undo a previous [`fail`](Self::fail)
    pub fn recover(&self, endpoint: Endpoint) {
        lock(&self.failing).remove(&endpoint);
    }

    /// Number of calls made to `endpoint` so far (failed calls included)
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        lock(&self.calls).get(&endpoint).copied().unwrap_or(0)
    }

    /// Number of calls made to any endpoint
    pub fn total_calls(&self) -> usize {
        lock(&self.calls).values().sum()
    }

    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }

    fn record(&self, endpoint: Endpoint) -> Result<()> {
        *lock(&self.calls).entry(endpoint).or_insert(0) += 1;
        trace!("in-memory call to {}", endpoint);

        if lock(&self.failing).contains(&endpoint) {
            return Err(anyhow!("Simulated failure for endpoint {}", endpoint));
        }
        Ok(())
    }

    fn select<T: Clone>(
        &self,
        endpoint: Endpoint,
        pick: impl FnOnce(&Fixtures) -> Vec<T>,
    ) -> Result<Vec<T>> {
        self.record(endpoint)?;
        Ok(pick(&lock(&self.fixtures)))
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn list_academic_years(&self) -> Result<Vec<AcademicYear>> {
        self.select(Endpoint::AcademicYears, |f| f.years.clone())
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        self.select(Endpoint::Programs, |f| f.programs.clone())
    }

    async fn list_regulations(&self) -> Result<Vec<Regulation>> {
        self.select(Endpoint::Regulations, |f| f.regulations.clone())
    }

    async fn list_batches(&self, program_id: Option<i64>) -> Result<Vec<Batch>> {
        self.select(Endpoint::Batches, |f| {
            f.batches
                .iter()
                .filter(|b| program_id.map_or(true, |id| b.program_id == id))
                .cloned()
                .collect()
        })
    }

    async fn list_semesters(&self, batch_id: i64) -> Result<Vec<Semester>> {
        self.select(Endpoint::Semesters, |f| {
            f.semesters
                .iter()
                .filter(|s| s.batch_id == batch_id)
                .cloned()
                .collect()
        })
    }

    async fn list_sections(&self, batch_semester_id: i64) -> Result<Vec<Section>> {
        self.select(Endpoint::Sections, |f| {
            f.sections
                .iter()
                .filter(|s| s.batch_semester_id == batch_semester_id)
                .cloned()
                .collect()
        })
    }

    async fn list_practical_batches(&self, batch_semester_id: i64) -> Result<Vec<PracticalBatch>> {
        self.select(Endpoint::PracticalBatches, |f| {
            f.practical_batches
                .iter()
                .filter(|p| p.batch_semester_id == batch_semester_id)
                .cloned()
                .collect()
        })
    }

    async fn list_subjects(
        &self,
        batch_semester_id: i64,
        subject_type: Option<SubjectType>,
    ) -> Result<Vec<Subject>> {
        self.select(Endpoint::Subjects, |f| {
            f.subjects
                .iter()
                .filter(|s| s.batch_semester_id == batch_semester_id)
                .filter(|s| subject_type.map_or(true, |kind| s.subject_type == kind))
                .cloned()
                .collect()
        })
    }
}
