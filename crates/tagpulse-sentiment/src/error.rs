use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::{BitMapBackend, DrawingBackend};
use thiserror::Error;

/// Error produced by drawing onto the bitmap backend.
pub type RenderError =
    DrawingAreaErrorKind<<BitMapBackend<'static> as DrawingBackend>::ErrorType>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot render an empty sentiment series")]
    EmptySeries,

    #[error("failed to render sentiment chart: {0}")]
    Render(#[from] RenderError),
}
