use super::geometry::normalize_degrees;
use super::sectors::FlatSector;

/// Disc-frame angle under the indicator for a given rotation. The indicator
/// points at screen angle 0 and the disc turns under it, so a disc rotated
/// clockwise by `r` shows its own angle `-r` there.
pub fn target_angle(rotation_degrees: f64) -> f64 {
    normalize_degrees(360.0 - normalize_degrees(rotation_degrees))
}

/// Index of the active sector. `None` only for an empty list; a non-empty
/// list with no containing sector (non-finite rotation) yields the first one.
pub fn resolve_index(rotation_degrees: f64, sectors: &[FlatSector]) -> Option<usize> {
    if sectors.is_empty() {
        return None;
    }
    let target = target_angle(rotation_degrees);
    Some(
        sectors
            .iter()
            .position(|s| s.contains(target))
            .unwrap_or(0),
    )
}

pub fn resolve(rotation_degrees: f64, sectors: &[FlatSector]) -> Option<&FlatSector> {
    resolve_index(rotation_degrees, sectors).map(|idx| &sectors[idx])
}
