//! Session state for one loaded mark sheet.
//!
//! A front end owns one [`Gradebook`] per session and passes filter criteria into it on
//! every interaction. Loading a new sheet replaces the previous one wholesale.

use std::path::Path;

use crate::error::AnalysisResult;
use crate::export::{export, ExportBundle};
use crate::ingestion::{load_from_path, LoadOptions};
use crate::processing::{
    aggregate, filter, filter_options, find_student, subject_averages, subject_correlation,
    summarize, top_students, CorrelationMatrix, FilterCriteria, FilterOptions, MissingPolicy,
    SchemaConfig, StatsSummary, StudentRecord, SubjectColumns,
};
use crate::types::DataSet;

/// A loaded mark sheet with its subjects decided and aggregates computed.
#[derive(Debug, Clone)]
pub struct Gradebook {
    raw: DataSet,
    graded: DataSet,
    subjects: SubjectColumns,
    config: SchemaConfig,
    policy: MissingPolicy,
}

impl Gradebook {
    /// Detect subjects in `raw` and compute Total/Percentage/Grade.
    ///
    /// Fails with [`crate::AnalysisError::NoSubjectColumns`] if `raw` has no numeric subjects.
    pub fn new(raw: DataSet, config: &SchemaConfig, policy: MissingPolicy) -> AnalysisResult<Self> {
        let subjects = SubjectColumns::detect(&raw.schema, config)?;
        let graded = aggregate(&raw, &subjects, policy);
        log::debug!(
            "gradebook ready: rows={} subjects={:?} policy={policy:?}",
            graded.row_count(),
            subjects.names()
        );
        Ok(Self {
            raw,
            graded,
            subjects,
            config: config.clone(),
            policy,
        })
    }

    /// Load a sheet from disk and build a gradebook from it.
    pub fn open(
        path: impl AsRef<Path>,
        options: &LoadOptions,
        config: &SchemaConfig,
        policy: MissingPolicy,
    ) -> AnalysisResult<Self> {
        let raw = load_from_path(path, options)?;
        Self::new(raw, config, policy)
    }

    /// Swap in a newly loaded sheet. On error the current sheet stays in place.
    pub fn replace(&mut self, raw: DataSet) -> AnalysisResult<()> {
        *self = Self::new(raw, &self.config, self.policy)?;
        Ok(())
    }

    /// Recompute aggregates under a different missing-score policy.
    pub fn set_policy(&mut self, policy: MissingPolicy) {
        self.policy = policy;
        self.graded = aggregate(&self.raw, &self.subjects, policy);
    }

    /// The full dataset with `Total`, `Percentage` and `Grade`.
    pub fn dataset(&self) -> &DataSet {
        &self.graded
    }

    /// Subjects detected when the sheet was loaded.
    pub fn subjects(&self) -> &SubjectColumns {
        &self.subjects
    }

    /// Current missing-score policy.
    pub fn policy(&self) -> MissingPolicy {
        self.policy
    }

    /// Class and section choices over the whole sheet.
    pub fn filter_options(&self) -> FilterOptions {
        filter_options(&self.graded)
    }

    /// The rows selected by `criteria`.
    pub fn view(&self, criteria: &FilterCriteria) -> DataSet {
        filter(&self.graded, criteria)
    }

    /// KPIs of the filtered view.
    pub fn summary(&self, criteria: &FilterCriteria) -> StatsSummary {
        summarize(&self.view(criteria))
    }

    /// Per-subject mean over the filtered view.
    pub fn subject_averages(&self, criteria: &FilterCriteria) -> Vec<(String, Option<f64>)> {
        subject_averages(&self.view(criteria), &self.subjects)
    }

    /// Subject correlation over the filtered view.
    pub fn subject_correlation(&self, criteria: &FilterCriteria) -> CorrelationMatrix {
        subject_correlation(&self.view(criteria), &self.subjects)
    }

    /// Leaderboard of the filtered view, `criteria.top_n` long (all rows when unset).
    pub fn top_students(&self, criteria: &FilterCriteria) -> DataSet {
        let view = self.view(criteria);
        let n = criteria.top_n.filter(|&n| n > 0).unwrap_or(view.row_count());
        top_students(&view, n)
    }

    /// Detail record for the first student named `name`, ignoring filters.
    pub fn student(&self, name: &str) -> Option<StudentRecord> {
        find_student(&self.graded, &self.subjects, name)
    }

    /// CSV and XLSX bytes of the filtered view.
    pub fn export(&self, criteria: &FilterCriteria) -> AnalysisResult<ExportBundle> {
        export(&self.view(criteria))
    }
}
