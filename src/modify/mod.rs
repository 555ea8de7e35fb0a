//! Control-point editing of contours
//!
//! [`ModifyContourPoints`] binds a contour, indexes its control points, and
//! evaluates Move/Scale/Rotate transforms on a selection of them. Every
//! evaluation works on fresh copies of the bound segments, so previews are
//! independent of each other and the bound contour is never touched.
//!
//! # Example
//!
//! ```
//! use contour_edit::{Contour, ModifyContourPoints, Pnt, Polyline, PointTransform, Vec3};
//!
//! let a = Pnt::new(0.0, 0.0, 0.0);
//! let b = Pnt::new(1.0, 0.0, 0.0);
//! let c = Pnt::new(1.0, 1.0, 0.0);
//! let contour = Contour::from_segments(
//!     vec![
//!         Polyline::new(vec![a, b]).unwrap().into(),
//!         Polyline::new(vec![b, c]).unwrap().into(),
//!     ],
//!     false,
//! );
//!
//! let mut edit = ModifyContourPoints::bind(contour).unwrap();
//! edit.set_control_points([0usize]).unwrap();
//! let moved = edit.calculate(&PointTransform::translate(Vec3::new(0.0, -1.0, 0.0))).unwrap();
//! assert_eq!(moved.start_point(), Some(Pnt::new(0.0, -1.0, 0.0)));
//! ```

mod control_point;
mod mutate;
mod rebuild;
mod transform;

pub use control_point::{
    compute_control_point_info, ControlPointHandle, ControlPointInfo, ControlPointRef, PointLimit,
};
pub use mutate::{apply_control_point, change_interior_point, move_limit_point};
pub use rebuild::rebuild_contour;
pub use transform::PointTransform;

use log::{debug, trace};
use std::collections::BTreeSet;

use crate::brep::{Contour, Curve, SpaceInstance};
use crate::check::check_contour;
use crate::heal::normalize_instance;
use crate::settings::EditSettings;
use crate::{EditError, Result};

/// A bound control-point edit.
///
/// Constructing one is the `Unbound -> Bound` transition; [`calculate`]
/// previews a transform any number of times; [`commit`] consumes the engine.
///
/// [`calculate`]: ModifyContourPoints::calculate
/// [`commit`]: ModifyContourPoints::commit
#[derive(Debug, Clone)]
pub struct ModifyContourPoints {
    contour: Contour,
    control_point_info: Vec<ControlPointInfo>,
    control_points: BTreeSet<usize>,
    settings: EditSettings,
    original: Option<SpaceInstance>,
}

impl ModifyContourPoints {
    /// Normalize a persisted instance into a contour that can be bound.
    pub fn prepare(instance: &SpaceInstance) -> Result<Contour> {
        normalize_instance(instance)
    }

    /// Bind a contour and index its control points.
    pub fn bind(mut contour: Contour) -> Result<Self> {
        if contour.is_empty() {
            return Err(EditError::Validation("cannot edit an empty contour".into()));
        }
        contour.rebuild_all()?;

        let settings = EditSettings::default();
        let defects = check_contour(&contour, settings.ruled_tolerance);
        if !defects.is_empty() {
            let report: Vec<String> = defects.iter().map(|d| d.to_string()).collect();
            return Err(EditError::Validation(format!(
                "contour is not editable: {}",
                report.join("; ")
            )));
        }

        let control_point_info = compute_control_point_info(&contour);
        debug!(
            "Bound contour: {} segment(s), {} control point(s), closed = {}",
            contour.len(),
            control_point_info.len(),
            contour.is_closed()
        );

        Ok(Self {
            contour,
            control_point_info,
            control_points: BTreeSet::new(),
            settings,
            original: None,
        })
    }

    /// Bind the contour held by a persisted instance.
    ///
    /// Other curve kinds must go through [`ModifyContourPoints::prepare`] first.
    pub fn bind_instance(instance: &SpaceInstance) -> Result<Self> {
        let contour = match &instance.curve {
            Curve::Contour(c) => c.clone(),
            other => {
                return Err(EditError::Validation(format!(
                    "contour expected, got {}; normalize the curve first",
                    other.type_name()
                )))
            }
        };
        let mut engine = Self::bind(contour)?;
        engine.original = Some(instance.clone());
        Ok(engine)
    }

    pub fn with_settings(mut self, settings: EditSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    /// The bound contour, as it was when bound.
    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    /// The instance passed to [`ModifyContourPoints::bind_instance`], if any.
    pub fn original_item(&self) -> Option<&SpaceInstance> {
        self.original.as_ref()
    }

    pub fn control_point_info(&self) -> &[ControlPointInfo] {
        &self.control_point_info
    }

    /// Handles for every indexed control point, in index order.
    pub fn handles(&self) -> impl Iterator<Item = ControlPointHandle> + '_ {
        (0..self.control_point_info.len()).map(ControlPointHandle::new)
    }

    /// Selected flat indices, ascending.
    pub fn control_points(&self) -> &BTreeSet<usize> {
        &self.control_points
    }

    /// Replace the selection. Raw indices and handles may be mixed.
    ///
    /// Fails without changing the selection if any entry is out of range.
    pub fn set_control_points<I, R>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ControlPointRef>,
    {
        let len = self.control_point_info.len();
        let mut selection = BTreeSet::new();
        for point in points {
            let index = point.into().resolve();
            if index >= len {
                return Err(EditError::Validation(format!(
                    "control point {} out of range ({} control points)",
                    index, len
                )));
            }
            selection.insert(index);
        }
        self.control_points = selection;
        Ok(())
    }

    /// Evaluate `transform` on the selected control points.
    ///
    /// Returns a new contour; the bound contour is left untouched. Fails with
    /// [`EditError::NoOp`] when the transform is below the no-op threshold or
    /// nothing is selected.
    pub fn calculate(&self, transform: &PointTransform) -> Result<Contour> {
        transform.validate(self.settings.no_op_epsilon)?;
        if self.control_points.is_empty() {
            return Err(EditError::NoOp);
        }

        let mut segments = self.contour.segments().to_vec();
        let closed = self.contour.is_closed();

        for &index in &self.control_points {
            let info = &self.control_point_info[index];
            let target = transform.destination(&info.origin);
            trace!(
                "control point {} ({:?} of segment {}): {:?} -> {:?}",
                index,
                info.limit,
                info.segment_index,
                info.origin,
                target
            );
            apply_control_point(&mut segments, closed, info, target)?;
        }

        debug!(
            "Applied {:?} to {} control point(s)",
            transform,
            self.control_points.len()
        );
        rebuild_contour(segments, closed, &self.settings)
    }

    /// Evaluate `transform` and finish the edit, producing the replacement
    /// instance. The original instance name is kept.
    pub fn commit(self, transform: &PointTransform) -> Result<SpaceInstance> {
        let contour = self.calculate(transform)?;
        let name = self.original.and_then(|o| o.name);
        Ok(SpaceInstance {
            name,
            curve: Curve::Contour(contour),
        })
    }
}
