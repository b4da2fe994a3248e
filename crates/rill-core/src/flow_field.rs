//! The simulated flow state: staggered velocities, pressure, porosity.

use crate::boundary;
use crate::domain::Domain;
use crate::error::BoundaryError;
use crate::field::Field;

/// Prescribed wall velocities for the non-periodic axes.
///
/// `*_ym` / `*_yp` are the lower / upper y walls, `*_xm` / `*_xp` the left /
/// right x walls. `uy_yp` is the inflow speed through the upper wall; the
/// lower y wall is always a zero-gradient outflow for `uy`. Values on a
/// periodic axis are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WallValues {
    /// Tangential `ux` at the lower y wall.
    pub ux_ym: f64,
    /// Tangential `ux` at the upper y wall.
    pub ux_yp: f64,
    /// Tangential `uy` at the left x wall.
    pub uy_xm: f64,
    /// Tangential `uy` at the right x wall.
    pub uy_xp: f64,
    /// Wall-normal `uy` inflow at the upper y wall.
    pub uy_yp: f64,
}

/// The persistent flow state advanced by the integration pipeline.
///
/// `ux` lives on x faces, `uy` on y faces, `p` at cell centers. `weight` is
/// a cell-centered porosity in `[0, 1]`: 0 marks solid, 1 fluid; the
/// predictor multiplies face velocities by the face-averaged weight to
/// suppress flow inside solids (Brinkman-style penalization).
#[derive(Clone, Debug)]
pub struct FlowField {
    /// x-face velocity component.
    pub ux: Field,
    /// y-face velocity component.
    pub uy: Field,
    /// Cell-centered pressure.
    pub p: Field,
    /// Cell-centered porosity weight, 0 = solid, 1 = fluid.
    pub weight: Field,
    /// Wall velocities used whenever boundary conditions are re-imposed.
    pub walls: WallValues,
}

impl FlowField {
    /// Create a quiescent flow (zero velocity and pressure, weight 1
    /// everywhere) with halo/ghost cells consistent with `walls`.
    pub fn new(domain: &Domain, walls: WallValues) -> Result<Self, BoundaryError> {
        let mut flow = Self {
            ux: Field::new(domain),
            uy: Field::new(domain),
            p: Field::new(domain),
            weight: Field::new(domain),
            walls,
        };
        flow.weight.fill(1.0);
        flow.refresh_boundaries(domain)?;
        Ok(flow)
    }

    /// Re-apply halo exchanges / wall conditions on `ux`, `uy` and `p`.
    ///
    /// Call after overwriting interiors (initial conditions, restarts). The
    /// pressure only receives halo exchanges on periodic axes during
    /// stepping, but gets its zero-gradient wall ghosts here so the first
    /// predictor step sees a consistent state.
    pub fn refresh_boundaries(&mut self, domain: &Domain) -> Result<(), BoundaryError> {
        boundary::refresh_ux(domain, &self.walls, &mut self.ux)?;
        boundary::refresh_uy(domain, &self.walls, &mut self.uy)?;
        boundary::refresh_p(domain, &mut self.p)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiescent_flow_is_consistent() {
        let domain = Domain::new(1.0, 3.0, 8, 12, true, false).unwrap();
        let walls = WallValues {
            uy_yp: -1.0,
            ..WallValues::default()
        };
        let flow = FlowField::new(&domain, walls).unwrap();
        // interior at rest, fluid everywhere
        assert_eq!(flow.ux[(3, 3)], 0.0);
        assert_eq!(flow.weight[(3, 3)], 1.0);
        // inflow ghost row carries the prescribed wall value
        let ny = domain.ny();
        assert_eq!(flow.uy[(ny + 1, 4)], -1.0);
        // periodic x halo wraps
        assert_eq!(flow.ux[(3, 0)], flow.ux[(3, 8)]);
    }
}
