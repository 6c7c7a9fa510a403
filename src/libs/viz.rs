//! Coloring-script generation for external viewers.
//!
//! Pure formatting over the residue identifiers of both structures; the
//! palette is bounded, so regions past the fourth keep the background color.

use itertools::Itertools;

use crate::libs::clique::Clique;
use crate::libs::compare::StructureComparison;

/// Region colors, best region first.
pub const PALETTE: [&str; 4] = ["green", "cyan", "yellow", "orange"];

/// Everything outside the colored regions.
pub const BACKGROUND: &str = "red";

/// PyMOL commands that select and color each region in both structures.
pub fn pymol_script(cmp: &StructureComparison, regions: &[Clique]) -> Vec<String> {
    let mut script = vec!["hide everything".to_string(), "show cartoon".to_string()];

    for (k, region) in regions.iter().enumerate() {
        script.push(format!(
            "select region{}, {} and i. {} or {} and i. {}",
            k + 1,
            cmp.ref_id(),
            cmp.region_ref_ids(region).iter().join("+"),
            cmp.alt_id(),
            cmp.region_alt_ids(region).iter().join("+"),
        ));
    }

    script.push(format!("color {}", BACKGROUND));
    // best region colored last so its color wins on overlap
    for k in (1..=regions.len().min(PALETTE.len())).rev() {
        script.push(format!("color {}, region{}", PALETTE[k - 1], k));
    }
    script
}

/// Chimera commands coloring each region in models #0 and #1.
pub fn chimera_script(cmp: &StructureComparison, regions: &[Clique]) -> Vec<String> {
    let mut script = vec![format!("color {}", BACKGROUND)];
    for (k, region) in regions.iter().enumerate().take(PALETTE.len()).rev() {
        script.push(format!(
            "color {} #0:{}; color {} #1:{}",
            PALETTE[k],
            cmp.region_ref_ids(region).iter().join(","),
            PALETTE[k],
            cmp.region_alt_ids(region).iter().join(","),
        ));
    }
    script
}
