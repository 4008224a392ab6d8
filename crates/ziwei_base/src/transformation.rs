//! Four transformations (四化) by year stem.

use crate::error::ZiweiError;
use crate::placement::StarMap;
use crate::star::{StarId, Transformation};
use crate::stem_branch::Stem;
use crate::tables::{TRANSFORMATION_COLUMNS, TRANSFORMATION_TABLE};

/// The 祿, 權, 科, 忌 stars for a year stem, in that order.
pub fn resolve_transformations(year_stem: Stem) -> [(StarId, Transformation); 4] {
    let row = TRANSFORMATION_TABLE[year_stem.index() as usize];
    std::array::from_fn(|i| (row[i], TRANSFORMATION_COLUMNS[i]))
}

/// Tag the placed stars with the transformations of `year_stem`.
///
/// Every star named by the table must already be in `map`; a missing one
/// means the placement stages and the table disagree.
pub fn apply_transformations(map: &mut StarMap, year_stem: Stem) -> Result<(), ZiweiError> {
    for (star, transformation) in resolve_transformations(year_stem) {
        let instance = map
            .values_mut()
            .flat_map(|stars| stars.iter_mut())
            .find(|s| s.star == star)
            .ok_or_else(|| {
                ZiweiError::configuration(format!(
                    "{year_stem} year {transformation} targets {star}, which is not placed"
                ))
            })?;
        instance.tag(transformation);
    }
    tracing::debug!(%year_stem, "applied transformations");
    Ok(())
}
