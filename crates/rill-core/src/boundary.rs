//! Halo exchange and wall boundary conditions.
//!
//! Every applier works in place on a halo-bearing [`Field`] and is tied to
//! one periodicity: halo exchanges demand a periodic axis, wall conditions a
//! walled one, and a mismatch is reported as a [`BoundaryError`] instead of
//! silently writing the wrong ghost values.
//!
//! The wall conditions encode a channel open at both y ends: impermeable
//! side walls, a Dirichlet inflow face at the upper y wall and a
//! zero-gradient outflow face at the lower y wall. Tangential components use
//! the mirror-ghost trick `ghost = 2 ·wall − interior` so the wall value sits
//! exactly on the wall.

use crate::domain::{Axis, Domain};
use crate::error::BoundaryError;
use crate::field::Field;
use crate::flow_field::WallValues;

fn require_periodic(domain: &Domain, axis: Axis) -> Result<(), BoundaryError> {
    if domain.periodic(axis) {
        Ok(())
    } else {
        Err(BoundaryError::NotPeriodic { axis })
    }
}

fn require_walled(domain: &Domain, axis: Axis) -> Result<(), BoundaryError> {
    if domain.periodic(axis) {
        Err(BoundaryError::Periodic { axis })
    } else {
        Ok(())
    }
}

/// Copy the periodic wrap into the x halo columns: column 0 mirrors column
/// `nx`, column `nx + 1` mirrors column 1.
pub fn exchange_halo_x(domain: &Domain, field: &mut Field) -> Result<(), BoundaryError> {
    require_periodic(domain, Axis::X)?;
    let nx = field.nx();
    for j in 0..=field.ny() + 1 {
        field[(j, 0)] = field[(j, nx)];
        field[(j, nx + 1)] = field[(j, 1)];
    }
    Ok(())
}

/// Copy the periodic wrap into the y halo rows: row 0 mirrors row `ny`,
/// row `ny + 1` mirrors row 1.
pub fn exchange_halo_y(domain: &Domain, field: &mut Field) -> Result<(), BoundaryError> {
    require_periodic(domain, Axis::Y)?;
    let ny = field.ny();
    let stride = field.stride();
    let data = field.as_mut_slice();
    for i in 0..stride {
        data[i] = data[ny * stride + i];
        data[(ny + 1) * stride + i] = data[stride + i];
    }
    Ok(())
}

/// Exchange halos on every periodic axis, leaving walled axes untouched.
///
/// Used after stages that cannot move boundary values (the projection
/// correction and the psi copy-out), where re-imposing wall conditions
/// would be redundant.
pub fn exchange_halos(domain: &Domain, field: &mut Field) -> Result<(), BoundaryError> {
    if domain.periodic_x() {
        exchange_halo_x(domain, field)?;
    }
    if domain.periodic_y() {
        exchange_halo_y(domain, field)?;
    }
    Ok(())
}

/// Wall-normal condition for `ux` at the x walls: the duplicated face on the
/// wall and both ghost columns are pinned to zero (impermeable walls).
pub fn impose_ux_x(domain: &Domain, ux: &mut Field) -> Result<(), BoundaryError> {
    require_walled(domain, Axis::X)?;
    let nx = ux.nx();
    for j in 0..=ux.ny() + 1 {
        ux[(j, 0)] = 0.0;
        ux[(j, 1)] = 0.0;
        ux[(j, nx + 1)] = 0.0;
    }
    Ok(())
}

/// Tangential condition for `ux` at the y walls: zero-gradient (plus the
/// wall offset) below, mirror ghost above.
pub fn impose_ux_y(
    domain: &Domain,
    ux: &mut Field,
    ux_ym: f64,
    ux_yp: f64,
) -> Result<(), BoundaryError> {
    require_walled(domain, Axis::Y)?;
    let ny = ux.ny();
    for i in 0..=ux.nx() + 1 {
        ux[(0, i)] = 2.0 * ux_ym + ux[(1, i)];
        ux[(ny + 1, i)] = 2.0 * ux_yp - ux[(ny, i)];
    }
    Ok(())
}

/// Tangential condition for `uy` at the x walls: mirror ghosts on both sides.
pub fn impose_uy_x(
    domain: &Domain,
    uy: &mut Field,
    uy_xm: f64,
    uy_xp: f64,
) -> Result<(), BoundaryError> {
    require_walled(domain, Axis::X)?;
    let nx = uy.nx();
    for j in 0..=uy.ny() + 1 {
        uy[(j, 0)] = 2.0 * uy_xm - uy[(j, 1)];
        uy[(j, nx + 1)] = 2.0 * uy_xp - uy[(j, nx)];
    }
    Ok(())
}

/// Wall-normal condition for `uy` at the y walls: zero-gradient outflow at
/// the lower wall, Dirichlet inflow at the upper one.
pub fn impose_uy_y(domain: &Domain, uy: &mut Field, uy_yp: f64) -> Result<(), BoundaryError> {
    require_walled(domain, Axis::Y)?;
    let ny = uy.ny();
    for i in 0..=uy.nx() + 1 {
        uy[(0, i)] = uy[(1, i)];
        uy[(ny + 1, i)] = uy_yp;
    }
    Ok(())
}

/// Zero-gradient condition for a cell-centered scalar at the x walls.
pub fn impose_p_x(domain: &Domain, p: &mut Field) -> Result<(), BoundaryError> {
    require_walled(domain, Axis::X)?;
    let nx = p.nx();
    for j in 0..=p.ny() + 1 {
        p[(j, 0)] = p[(j, 1)];
        p[(j, nx + 1)] = p[(j, nx)];
    }
    Ok(())
}

/// Zero-gradient condition for a cell-centered scalar at the y walls.
pub fn impose_p_y(domain: &Domain, p: &mut Field) -> Result<(), BoundaryError> {
    require_walled(domain, Axis::Y)?;
    let ny = p.ny();
    let stride = p.stride();
    let data = p.as_mut_slice();
    for i in 0..stride {
        data[i] = data[stride + i];
        data[(ny + 1) * stride + i] = data[ny * stride + i];
    }
    Ok(())
}

/// Refresh the `ux` halo/ghost cells on both axes after an interior update.
pub fn refresh_ux(domain: &Domain, walls: &WallValues, ux: &mut Field) -> Result<(), BoundaryError> {
    if domain.periodic_x() {
        exchange_halo_x(domain, ux)?;
    } else {
        impose_ux_x(domain, ux)?;
    }
    if domain.periodic_y() {
        exchange_halo_y(domain, ux)?;
    } else {
        impose_ux_y(domain, ux, walls.ux_ym, walls.ux_yp)?;
    }
    Ok(())
}

/// Refresh the `uy` halo/ghost cells on both axes after an interior update.
pub fn refresh_uy(domain: &Domain, walls: &WallValues, uy: &mut Field) -> Result<(), BoundaryError> {
    if domain.periodic_x() {
        exchange_halo_x(domain, uy)?;
    } else {
        impose_uy_x(domain, uy, walls.uy_xm, walls.uy_xp)?;
    }
    if domain.periodic_y() {
        exchange_halo_y(domain, uy)?;
    } else {
        impose_uy_y(domain, uy, walls.uy_yp)?;
    }
    Ok(())
}

/// Refresh the halo/ghost cells of a cell-centered scalar on both axes.
pub fn refresh_p(domain: &Domain, p: &mut Field) -> Result<(), BoundaryError> {
    if domain.periodic_x() {
        exchange_halo_x(domain, p)?;
    } else {
        impose_p_x(domain, p)?;
    }
    if domain.periodic_y() {
        exchange_halo_y(domain, p)?;
    } else {
        impose_p_y(domain, p)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periodic_domain() -> Domain {
        Domain::new(1.0, 1.0, 4, 4, true, true).unwrap()
    }

    fn walled_domain() -> Domain {
        Domain::new(1.0, 1.0, 4, 4, false, false).unwrap()
    }

    #[test]
    fn halo_x_wraps_columns() {
        let d = periodic_domain();
        let mut f = Field::new(&d);
        f.fill_interior_with(&d, |x, _| x);
        exchange_halo_x(&d, &mut f).unwrap();
        for j in 1..=4 {
            assert_eq!(f[(j, 0)], f[(j, 4)]);
            assert_eq!(f[(j, 5)], f[(j, 1)]);
        }
    }

    #[test]
    fn halo_y_wraps_rows() {
        let d = periodic_domain();
        let mut f = Field::new(&d);
        f.fill_interior_with(&d, |_, y| y);
        exchange_halo_y(&d, &mut f).unwrap();
        for i in 0..=5 {
            assert_eq!(f[(0, i)], f[(4, i)]);
            assert_eq!(f[(5, i)], f[(1, i)]);
        }
    }

    #[test]
    fn halo_on_walled_axis_is_rejected() {
        let d = walled_domain();
        let mut f = Field::new(&d);
        assert_eq!(
            exchange_halo_x(&d, &mut f),
            Err(BoundaryError::NotPeriodic { axis: Axis::X })
        );
        assert_eq!(
            exchange_halo_y(&d, &mut f),
            Err(BoundaryError::NotPeriodic { axis: Axis::Y })
        );
    }

    #[test]
    fn wall_condition_on_periodic_axis_is_rejected() {
        let d = periodic_domain();
        let mut f = Field::new(&d);
        assert_eq!(
            impose_ux_x(&d, &mut f),
            Err(BoundaryError::Periodic { axis: Axis::X })
        );
        assert_eq!(
            impose_p_y(&d, &mut f),
            Err(BoundaryError::Periodic { axis: Axis::Y })
        );
    }

    #[test]
    fn ux_walls_are_impermeable() {
        let d = walled_domain();
        let mut f = Field::new(&d);
        f.fill(3.0);
        impose_ux_x(&d, &mut f).unwrap();
        for j in 0..=5 {
            assert_eq!(f[(j, 0)], 0.0);
            assert_eq!(f[(j, 1)], 0.0);
            assert_eq!(f[(j, 5)], 0.0);
        }
    }

    #[test]
    fn tangential_mirror_pins_wall_value() {
        let d = walled_domain();
        let mut f = Field::new(&d);
        f.fill(1.0);
        impose_uy_x(&d, &mut f, 0.0, 0.5).unwrap();
        for j in 0..=5 {
            // wall value = mean of ghost and first interior column
            assert_eq!(0.5 * (f[(j, 0)] + f[(j, 1)]), 0.0);
            assert_eq!(0.5 * (f[(j, 5)] + f[(j, 4)]), 0.5);
        }
    }

    #[test]
    fn uy_y_wall_has_inflow_and_outflow() {
        let d = walled_domain();
        let mut f = Field::new(&d);
        f.fill(2.0);
        impose_uy_y(&d, &mut f, -1.0).unwrap();
        for i in 0..=5 {
            assert_eq!(f[(0, i)], f[(1, i)]);
            assert_eq!(f[(5, i)], -1.0);
        }
    }

    #[test]
    fn scalar_walls_are_zero_gradient() {
        let d = walled_domain();
        let mut f = Field::new(&d);
        f.fill_interior_with(&d, |x, y| x * y + 1.0);
        impose_p_x(&d, &mut f).unwrap();
        impose_p_y(&d, &mut f).unwrap();
        for j in 1..=4 {
            assert_eq!(f[(j, 0)], f[(j, 1)]);
            assert_eq!(f[(j, 5)], f[(j, 4)]);
        }
        for i in 0..=5 {
            assert_eq!(f[(0, i)], f[(1, i)]);
            assert_eq!(f[(5, i)], f[(4, i)]);
        }
    }
}
