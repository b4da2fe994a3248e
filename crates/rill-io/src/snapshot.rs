//! Whole-flow-field snapshots, one directory per save.

use std::fs;
use std::path::{Path, PathBuf};

use rill_core::{Domain, Field, FlowField};

use crate::error::NpyError;
use crate::npy::{read_array, write_array};

/// Save `ux`, `uy`, `p` and `weight` (halos included) plus a `step.txt`
/// sidecar with the step index and simulated time.
///
/// The snapshot lands in `root/snapshot-<id>` (ten-digit id); the directory
/// is created if needed and existing files are overwritten, so re-running
/// into the same output tree replaces earlier saves.
///
/// Returns the snapshot directory path.
///
/// # Errors
///
/// Returns [`NpyError::Io`] on filesystem failures.
pub fn save_flow_field(
    root: &Path,
    id: usize,
    step: usize,
    time: f64,
    domain: &Domain,
    flow: &FlowField,
) -> Result<PathBuf, NpyError> {
    let dir = root.join(format!("snapshot-{id:010}"));
    fs::create_dir_all(&dir)?;

    let rows = domain.ny() + 2;
    let cols = domain.nx() + 2;
    write_array(&dir.join("ux.npy"), rows, cols, flow.ux.as_slice())?;
    write_array(&dir.join("uy.npy"), rows, cols, flow.uy.as_slice())?;
    write_array(&dir.join("p.npy"), rows, cols, flow.p.as_slice())?;
    write_array(&dir.join("weight.npy"), rows, cols, flow.weight.as_slice())?;
    fs::write(dir.join("step.txt"), format!("{step} {time:.15e}\n"))?;
    Ok(dir)
}

/// Load one saved field array back into a [`Field`], checking the shape
/// against `domain`.
///
/// # Errors
///
/// Returns [`NpyError::Unsupported`] if the array shape does not match the
/// domain's halo-bearing field size.
pub fn load_field(path: &Path, domain: &Domain) -> Result<Field, NpyError> {
    let (data, (rows, cols)) = read_array(path)?;
    if rows != domain.ny() + 2 || cols != domain.nx() + 2 {
        return Err(NpyError::Unsupported {
            reason: format!(
                "shape ({rows}, {cols}) does not fit a {}x{} domain",
                domain.nx(),
                domain.ny()
            ),
        });
    }
    let mut field = Field::new(domain);
    field.as_mut_slice().copy_from_slice(&data);
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::WallValues;

    #[test]
    fn snapshot_round_trips_through_disk() {
        let domain = Domain::new(1.0, 1.0, 6, 4, true, false).unwrap();
        let mut flow = FlowField::new(&domain, WallValues::default()).unwrap();
        flow.ux.fill_interior_with(&domain, |x, y| x - 2.0 * y);
        flow.p.fill_interior_with(&domain, |x, y| x * y);
        flow.refresh_boundaries(&domain).unwrap();

        let root = std::env::temp_dir().join(format!("rill-snap-{}", std::process::id()));
        let dir = save_flow_field(&root, 3, 42, 1.25, &domain, &flow).unwrap();
        assert!(dir.ends_with("snapshot-0000000003"));

        let ux = load_field(&dir.join("ux.npy"), &domain).unwrap();
        assert_eq!(ux.as_slice(), flow.ux.as_slice());
        let sidecar = std::fs::read_to_string(dir.join("step.txt")).unwrap();
        assert!(sidecar.starts_with("42 "));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn wrong_domain_is_rejected() {
        let domain = Domain::new(1.0, 1.0, 6, 4, true, false).unwrap();
        let flow = FlowField::new(&domain, WallValues::default()).unwrap();
        let root = std::env::temp_dir().join(format!("rill-snap-shape-{}", std::process::id()));
        let dir = save_flow_field(&root, 0, 0, 0.0, &domain, &flow).unwrap();

        let other = Domain::new(1.0, 1.0, 8, 8, true, false).unwrap();
        assert!(matches!(
            load_field(&dir.join("ux.npy"), &other),
            Err(NpyError::Unsupported { .. })
        ));
        std::fs::remove_dir_all(&root).unwrap();
    }
}
