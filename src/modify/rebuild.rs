//! Contour rebuilder: reassembles mutated segments into a new contour.

use log::debug;

use crate::brep::Contour;
use crate::curve::Segment;
use crate::settings::EditSettings;
use crate::{EditError, Result};

/// Rebuild dirty segments and append every segment, in order, to a new
/// contour with the ruled check.
///
/// Any error here means the mutation left the segments inconsistent and is
/// propagated as-is. A result with no segments left is
/// [`EditError::InvalidGeometry`].
pub fn rebuild_contour(
    segments: Vec<Segment>,
    closed: bool,
    settings: &EditSettings,
) -> Result<Contour> {
    let count = segments.len();
    let mut contour = Contour::new();
    let mut rebuilt = 0usize;

    for mut segment in segments {
        if segment.is_dirty() {
            segment.rebuild()?;
            rebuilt += 1;
        }
        contour.append_with_ruled_check(
            segment,
            settings.ruled_tolerance,
            settings.allow_degenerate,
        )?;
    }

    if contour.is_empty() {
        return Err(EditError::InvalidGeometry(format!(
            "all {} segment(s) collapsed",
            count
        )));
    }

    if closed {
        contour.close_with_ruled_check(settings.ruled_tolerance)?;
    }

    debug!(
        "Rebuilt contour: {} segment(s), {} recomputed, closed = {}",
        contour.len(),
        rebuilt,
        contour.is_closed()
    );
    Ok(contour)
}
