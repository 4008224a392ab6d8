//! Auxiliary, malefic and minor star placement.
//!
//! Each star is an independent lookup keyed by the year stem, year branch,
//! lunar month, lunar day or hour branch. Stars may share a branch with
//! each other or with major stars, and no placement reads another's result.

use crate::birth::{BirthInput, validate_day, validate_month};
use crate::calendar::resolve_year_stem_branch;
use crate::error::ZiweiError;
use crate::placement::{StarMap, insert_star};
use crate::star::StarId;
use crate::stem_branch::{Branch, Stem};
use crate::tables::{
    DIJIE_DIKONG_ZI_HOUR, HONGLUAN_ZI_YEAR, HUOXING_START_BY_TRIAD, LINGXING_START_BY_TRIAD,
    LUCUN_BY_STEM, TIANKUI_BY_STEM, TIANMA_BY_TRIAD, TIANXING_MONTH_ONE, TIANYAO_MONTH_ONE,
    TIANYUE_BY_STEM, WENCHANG_ZI_HOUR, WENQU_ZI_HOUR, YOUBI_MONTH_ONE, ZUOFU_MONTH_ONE,
};

/// The drivers every auxiliary lookup draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliaryInputs {
    pub year_stem: Stem,
    pub year_branch: Branch,
    /// Effective lunar month, 1..=12, after any leap-month adjustment.
    pub lunar_month: u8,
    pub lunar_day: u8,
    pub hour_branch: Branch,
}

impl AuxiliaryInputs {
    /// Drivers taken directly from a birth input; the month is used as given.
    pub fn from_birth(birth: &BirthInput) -> Result<Self, ZiweiError> {
        let year = resolve_year_stem_branch(birth.year())?;
        Ok(Self {
            year_stem: year.stem(),
            year_branch: year.branch(),
            lunar_month: birth.lunar_month(),
            lunar_day: birth.lunar_day(),
            hour_branch: birth.hour_branch(),
        })
    }
}

/// Place auxiliary, malefic and minor stars for a birth input.
pub fn place_auxiliary_stars(birth: &BirthInput) -> Result<StarMap, ZiweiError> {
    place_auxiliary_stars_with(&AuxiliaryInputs::from_birth(birth)?, true)
}

/// Place auxiliary and malefic stars, plus the minor stars when
/// `include_minor` is set.
pub fn place_auxiliary_stars_with(
    inputs: &AuxiliaryInputs,
    include_minor: bool,
) -> Result<StarMap, ZiweiError> {
    let month_steps = validate_month(inputs.lunar_month)? as i32 - 1;
    let day_steps = validate_day(inputs.lunar_day)? as i32 - 1;
    let hour_steps = inputs.hour_branch.index() as i32;
    let stem = inputs.year_stem.index() as usize;
    let triad = inputs.year_branch.triad() as usize;

    let mut map = StarMap::new();
    let mut put = |star: StarId, branch: Branch| insert_star(&mut map, branch, star);

    // 六吉
    put(StarId::Zuofu, ZUOFU_MONTH_ONE.offset(month_steps));
    put(StarId::Youbi, YOUBI_MONTH_ONE.offset(-month_steps));
    put(StarId::Wenchang, WENCHANG_ZI_HOUR.offset(-hour_steps));
    put(StarId::Wenqu, WENQU_ZI_HOUR.offset(hour_steps));
    put(StarId::Tiankui, TIANKUI_BY_STEM[stem]);
    put(StarId::Tianyue, TIANYUE_BY_STEM[stem]);

    // 祿存 and its flanking malefics
    let lucun = LUCUN_BY_STEM[stem];
    put(StarId::Lucun, lucun);
    put(StarId::Qingyang, lucun.offset(1));
    put(StarId::Tuoluo, lucun.offset(-1));
    put(StarId::Tianma, TIANMA_BY_TRIAD[triad]);

    put(StarId::Huoxing, HUOXING_START_BY_TRIAD[triad].offset(hour_steps));
    put(StarId::Lingxing, LINGXING_START_BY_TRIAD[triad].offset(hour_steps));
    put(StarId::Dijie, DIJIE_DIKONG_ZI_HOUR.offset(hour_steps));
    put(StarId::Dikong, DIJIE_DIKONG_ZI_HOUR.offset(-hour_steps));

    if include_minor {
        put(StarId::Tianxing, TIANXING_MONTH_ONE.offset(month_steps));
        put(StarId::Tianyao, TIANYAO_MONTH_ONE.offset(month_steps));
        put(StarId::Santai, ZUOFU_MONTH_ONE.offset(month_steps + day_steps));
        put(StarId::Bazuo, YOUBI_MONTH_ONE.offset(-month_steps - day_steps));
        let hongluan = HONGLUAN_ZI_YEAR.offset(-(inputs.year_branch.index() as i32));
        put(StarId::Hongluan, hongluan);
        put(StarId::Tianxi, hongluan.opposite());
    }

    tracing::debug!(
        stars = map.values().map(Vec::len).sum::<usize>(),
        include_minor,
        "placed auxiliary stars"
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birth::Gender;
    use crate::placement::find_star;
    use crate::stem_branch::{ALL_BRANCHES, ALL_STEMS};

    fn demo() -> StarMap {
        let birth = BirthInput::new(1984, 12, 3, Branch::Hai, Gender::Male).unwrap();
        place_auxiliary_stars(&birth).unwrap()
    }

    #[test]
    fn demo_positions() {
        let map = demo();
        let at = |s| find_star(&map, s).unwrap();
        assert_eq!(at(StarId::Zuofu), Branch::Mao);
        assert_eq!(at(StarId::Youbi), Branch::Hai);
        assert_eq!(at(StarId::Wenchang), Branch::Hai);
        assert_eq!(at(StarId::Wenqu), Branch::Mao);
        assert_eq!(at(StarId::Tiankui), Branch::Chou);
        assert_eq!(at(StarId::Tianyue), Branch::Wei);
        assert_eq!(at(StarId::Lucun), Branch::Yin);
        assert_eq!(at(StarId::Qingyang), Branch::Mao);
        assert_eq!(at(StarId::Tuoluo), Branch::Chou);
        assert_eq!(at(StarId::Tianma), Branch::Yin);
        assert_eq!(at(StarId::Huoxing), Branch::Chou);
        assert_eq!(at(StarId::Lingxing), Branch::You);
        assert_eq!(at(StarId::Dijie), Branch::Xu);
        assert_eq!(at(StarId::Dikong), Branch::Zi);
        assert_eq!(at(StarId::Tianxing), Branch::Shen);
        assert_eq!(at(StarId::Tianyao), Branch::Zi);
        assert_eq!(at(StarId::Santai), Branch::Si);
        assert_eq!(at(StarId::Bazuo), Branch::You);
        assert_eq!(at(StarId::Hongluan), Branch::Mao);
        assert_eq!(at(StarId::Tianxi), Branch::You);
    }

    #[test]
    fn minor_stars_optional() {
        let birth = BirthInput::new(1984, 12, 3, Branch::Hai, Gender::Male).unwrap();
        let inputs = AuxiliaryInputs::from_birth(&birth).unwrap();
        let map = place_auxiliary_stars_with(&inputs, false).unwrap();
        assert_eq!(map.values().map(Vec::len).sum::<usize>(), 14);
        assert!(find_star(&map, StarId::Santai).is_none());
        assert_eq!(demo().values().map(Vec::len).sum::<usize>(), 20);
    }

    #[test]
    fn zuofu_youbi_mirror_across_chou_wei() {
        // 辰 + k and 戌 − k always sum to 2 (mod 12)
        for m in 1..=12 {
            let inputs = AuxiliaryInputs {
                year_stem: Stem::Jia,
                year_branch: Branch::Zi,
                lunar_month: m,
                lunar_day: 1,
                hour_branch: Branch::Zi,
            };
            let map = place_auxiliary_stars_with(&inputs, false).unwrap();
            let zf = find_star(&map, StarId::Zuofu).unwrap();
            let yb = find_star(&map, StarId::Youbi).unwrap();
            assert_eq!((zf.index() + yb.index()) % 12, 2, "month {m}");
        }
    }

    #[test]
    fn goat_and_tuoluo_flank_lucun() {
        for stem in ALL_STEMS {
            let inputs = AuxiliaryInputs {
                year_stem: stem,
                year_branch: Branch::Zi,
                lunar_month: 1,
                lunar_day: 1,
                hour_branch: Branch::Zi,
            };
            let map = place_auxiliary_stars_with(&inputs, false).unwrap();
            let lucun = find_star(&map, StarId::Lucun).unwrap();
            assert_eq!(find_star(&map, StarId::Qingyang), Some(lucun.offset(1)));
            assert_eq!(find_star(&map, StarId::Tuoluo), Some(lucun.offset(-1)));
        }
    }

    #[test]
    fn hongluan_tianxi_opposite() {
        for yb in ALL_BRANCHES {
            let inputs = AuxiliaryInputs {
                year_stem: Stem::Jia,
                year_branch: yb,
                lunar_month: 1,
                lunar_day: 1,
                hour_branch: Branch::Zi,
            };
            let map = place_auxiliary_stars_with(&inputs, true).unwrap();
            let hl = find_star(&map, StarId::Hongluan).unwrap();
            assert_eq!(find_star(&map, StarId::Tianxi), Some(hl.opposite()));
        }
    }

    #[test]
    fn zi_hour_dijie_dikong_share_hai() {
        let inputs = AuxiliaryInputs {
            year_stem: Stem::Jia,
            year_branch: Branch::Zi,
            lunar_month: 1,
            lunar_day: 1,
            hour_branch: Branch::Zi,
        };
        let map = place_auxiliary_stars_with(&inputs, false).unwrap();
        let hai: Vec<_> = map[&Branch::Hai].iter().map(|s| s.star).collect();
        assert!(hai.contains(&StarId::Dijie));
        assert!(hai.contains(&StarId::Dikong));
    }

    #[test]
    fn invalid_month_rejected() {
        let inputs = AuxiliaryInputs {
            year_stem: Stem::Jia,
            year_branch: Branch::Zi,
            lunar_month: 13,
            lunar_day: 1,
            hour_branch: Branch::Zi,
        };
        assert_eq!(
            place_auxiliary_stars_with(&inputs, true),
            Err(ZiweiError::InvalidMonth(13))
        );
    }
}
