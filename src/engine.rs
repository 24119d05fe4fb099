//! Layout engine – drives the edit → measure → pack cycle.
//!
//! Per document edit: `Idle → Measuring → HeightsReady → Packing →
//! Paginated`. Any edit restarts at `Measuring` by bumping the generation
//! counter; a measurement pass that completes against an older generation is
//! discarded instead of being packed (rapid edits during the deferral window
//! produce redundant passes, never wrong pages). Export forces one more
//! measurement under export styling, produces the artifact through the
//! independent export slicer, then always restores preview styling and
//! preview measurement — success or failure.

use crate::blocks::flatten;
use crate::document::Resume;
use crate::error::LayoutError;
use crate::export::paginate_flow;
use crate::fonts::FontManager;
use crate::group::{group_blocks, Group};
use crate::measure::{measure, Measured};
use crate::metrics::PageMetrics;
use crate::packer::{pack_measured, Page};
use crate::plan::LayoutPlan;
use crate::preview::render_preview;
use crate::render::render_pdf;
use crate::style::{RenderMode, StyleSheet};

/// Where the engine is in the measure/pack cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Measuring,
    HeightsReady,
    Packing,
    Paginated,
}

/// A scheduled measurement pass, stamped with the generation it was taken
/// from. Completing it after further edits yields a discarded result.
pub struct PendingMeasure {
    groups: Vec<Group>,
    mode: RenderMode,
    generation: u64,
}

impl PendingMeasure {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Stateful layout session over the latest document snapshot.
pub struct LayoutEngine {
    resume: Resume,
    fonts: FontManager,
    metrics: PageMetrics,
    mode: RenderMode,
    generation: u64,
    state: EngineState,
    measured: Option<Measured>,
    pages: Vec<Page>,
}

impl LayoutEngine {
    pub fn new(resume: Resume, metrics: PageMetrics) -> Self {
        Self {
            resume,
            fonts: FontManager::default(),
            metrics,
            mode: RenderMode::Preview,
            generation: 0,
            state: EngineState::Idle,
            measured: None,
            pages: Vec::new(),
        }
    }

    pub fn document(&self) -> &Resume {
        &self.resume
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the document snapshot. Invalidates all derived data and
    /// restarts the cycle at `Measuring`.
    pub fn edit(&mut self, resume: Resume) {
        self.resume = resume;
        self.invalidate();
    }

    /// Change page geometry; measured heights depend on content width, so
    /// this invalidates like an edit.
    pub fn set_metrics(&mut self, metrics: PageMetrics) {
        self.metrics = metrics;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.measured = None;
        self.pages.clear();
        self.state = EngineState::Measuring;
    }

    /// Schedule a measurement pass over the current snapshot.
    pub fn begin_measure(&mut self) -> PendingMeasure {
        self.state = EngineState::Measuring;
        PendingMeasure {
            groups: group_blocks(flatten(&self.resume)),
            mode: self.mode,
            generation: self.generation,
        }
    }

    /// Complete a scheduled pass. Returns `Ok(false)` when the result was
    /// computed against a superseded generation and has been discarded.
    pub fn complete_measure(&mut self, pending: PendingMeasure) -> Result<bool, LayoutError> {
        if pending.generation != self.generation {
            log::debug!(
                "discarding superseded measurement (generation {} < {})",
                pending.generation,
                self.generation
            );
            return Ok(false);
        }
        let sheet = StyleSheet::for_mode(pending.mode);
        let measured = measure(
            pending.groups,
            &sheet,
            &self.fonts,
            &self.metrics,
            pending.generation,
        )?;
        self.measured = Some(measured);
        self.state = EngineState::HeightsReady;
        Ok(true)
    }

    /// Pack the current measurement into pages.
    pub fn repaginate(&mut self) -> Result<&[Page], LayoutError> {
        let measured = self.measured.as_ref().ok_or_else(|| {
            LayoutError::MeasureFailed("no completed measurement to pack".to_string())
        })?;
        if measured.generation != self.generation {
            return Err(LayoutError::StaleMeasurement {
                groups: measured.groups.len(),
                heights: measured.heights.len(),
            });
        }
        self.state = EngineState::Packing;
        self.pages = pack_measured(measured, self.metrics.capacity())?;
        self.state = EngineState::Paginated;
        Ok(&self.pages)
    }

    /// Run a full measure → pack cycle for the current snapshot.
    pub fn refresh(&mut self) -> Result<&[Page], LayoutError> {
        let pending = self.begin_measure();
        self.complete_measure(pending)?;
        self.repaginate()
    }

    /// Packed pages from the last completed cycle.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Fixed-page preview plan for the current snapshot, re-running the
    /// cycle if needed.
    pub fn preview(&mut self, title: &str) -> Result<LayoutPlan, LayoutError> {
        if self.state != EngineState::Paginated {
            self.refresh()?;
        }
        let sheet = StyleSheet::for_mode(self.mode);
        render_preview(&self.pages, &sheet, &self.fonts, &self.metrics, title)
    }

    /// Produce the PDF export artifact.
    ///
    /// Re-measures under export styling (heights differ from preview),
    /// paginates the unpaginated flow through the export slicer, renders,
    /// then reverts to preview styling and measurement whatever the outcome.
    pub fn export(&mut self, title: &str) -> Result<Vec<u8>, LayoutError> {
        self.mode = RenderMode::Export;
        self.invalidate();
        let result = self.export_inner(title);

        // Styling must never stay switched to export mode.
        self.mode = RenderMode::Preview;
        self.invalidate();
        if let Err(e) = self.refresh() {
            log::warn!("preview re-measure after export failed: {e}");
        }

        result
    }

    fn export_inner(&mut self, title: &str) -> Result<Vec<u8>, LayoutError> {
        let pending = self.begin_measure();
        self.complete_measure(pending)?;
        let measured = self.measured.as_ref().ok_or_else(|| {
            LayoutError::ExportFailed("export measurement did not complete".to_string())
        })?;
        let plan = paginate_flow(&measured.boxes, &self.metrics, title);
        render_pdf(&plan)
    }
}
