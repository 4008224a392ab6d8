//! Fixed placement tables of the Zhongzhou (中州派) convention.
//!
//! Every lookup the placement stages consume lives here so the data can be
//! tested on its own. Nothing in this module is computed at runtime.
//! Branch indices count from 子 = 0.

use crate::brightness::Brightness::{self, Miao, Ping, Wang, Xian};
use crate::stem_branch::Branch::{self, *};
use crate::star::StarId;
use crate::star::Transformation;

/// Revision of the tables below. Bump whenever any entry changes.
pub const TABLE_VERSION: &str = "zhongzhou-2024.2";

/// Bureau value by stem pair (甲乙, 丙丁, 戊己, 庚辛, 壬癸) and branch pair
/// group ({子丑, 午未}, {寅卯, 申酉}, {辰巳, 戌亥}), i.e. the 納音 element of
/// the Life Palace stem-branch: 2 水, 3 木, 4 金, 5 土, 6 火.
pub const BUREAU_TABLE: [[u8; 3]; 5] = [
    [4, 2, 6],
    [2, 6, 5],
    [6, 5, 3],
    [5, 3, 4],
    [3, 4, 2],
];

/// Branch of 紫微 by bureau (rows 2..=6) and lunar day (columns 1..=30).
pub const ZIWEI_TABLE: [[Branch; 30]; 5] = [
    // 水二局
    [
        Chou, Yin, Yin, Mao, Mao, Chen, Chen, Si, Si, Wu, Wu, Wei, Wei, Shen, Shen, You, You, Xu,
        Xu, Hai, Hai, Zi, Zi, Chou, Chou, Yin, Yin, Mao, Mao, Chen,
    ],
    // 木三局
    [
        Chen, Chou, Yin, Si, Yin, Mao, Wu, Mao, Chen, Wei, Chen, Si, Shen, Si, Wu, You, Wu, Wei,
        Xu, Wei, Shen, Hai, Shen, You, Zi, You, Xu, Chou, Xu, Hai,
    ],
    // 金四局
    [
        Hai, Chen, Chou, Yin, Zi, Si, Yin, Mao, Chou, Wu, Mao, Chen, Yin, Wei, Chen, Si, Mao, Shen,
        Si, Wu, Chen, You, Wu, Wei, Si, Xu, Wei, Shen, Wu, Hai,
    ],
    // 土五局
    [
        Wu, Hai, Chen, Chou, Yin, Wei, Zi, Si, Yin, Mao, Shen, Chou, Wu, Mao, Chen, You, Yin, Wei,
        Chen, Si, Xu, Mao, Shen, Si, Wu, Hai, Chen, You, Wu, Wei,
    ],
    // 火六局
    [
        You, Wu, Hai, Chen, Chou, Yin, Xu, Wei, Zi, Si, Yin, Mao, Hai, Shen, Chou, Wu, Mao, Chen,
        Zi, You, Yin, Wei, Chen, Si, Chou, Xu, Mao, Shen, Si, Wu,
    ],
];

/// 紫微 and 天府 mirror across the 寅–申 axis: their indices sum to this, mod 12.
pub const ZIWEI_TIANFU_AXIS_SUM: u8 = 4;

/// Ziwei series: steps counted along the reverse ring from 紫微.
pub const ZIWEI_SERIES: [(StarId, u8); 6] = [
    (StarId::Ziwei, 0),
    (StarId::Tianji, 1),
    (StarId::Taiyang, 3),
    (StarId::Wuqu, 4),
    (StarId::Tiantong, 5),
    (StarId::Lianzhen, 8),
];

/// Tianfu series: steps counted along the forward ring from 天府.
pub const TIANFU_SERIES: [(StarId, u8); 8] = [
    (StarId::Tianfu, 0),
    (StarId::Taiyin, 1),
    (StarId::Tanlang, 2),
    (StarId::Jumen, 3),
    (StarId::Tianxiang, 4),
    (StarId::Tianliang, 5),
    (StarId::Qisha, 6),
    (StarId::Pojun, 10),
];

/// 天魁 by year stem.
pub const TIANKUI_BY_STEM: [Branch; 10] = [Chou, Zi, Hai, Hai, Chou, Zi, Chou, Wu, Mao, Mao];

/// 天鉞 by year stem.
pub const TIANYUE_BY_STEM: [Branch; 10] = [Wei, Shen, You, You, Wei, Shen, Wei, Yin, Si, Si];

/// 祿存 by year stem. 擎羊 sits one step forward, 陀羅 one step back.
pub const LUCUN_BY_STEM: [Branch; 10] = [Yin, Mao, Si, Wu, Si, Wu, Shen, You, Hai, Zi];

/// 天馬 by year-branch triad (申子辰, 巳酉丑, 寅午戌, 亥卯未).
pub const TIANMA_BY_TRIAD: [Branch; 4] = [Yin, Hai, Shen, Si];

/// Starting branch of 火星 at the 子 hour, by year-branch triad.
pub const HUOXING_START_BY_TRIAD: [Branch; 4] = [Yin, Mao, Chou, You];

/// Starting branch of 鈴星 at the 子 hour, by year-branch triad.
pub const LINGXING_START_BY_TRIAD: [Branch; 4] = [Xu, Xu, Mao, Xu];

/// 左輔 in month 1; advances forward with the month.
pub const ZUOFU_MONTH_ONE: Branch = Chen;
/// 右弼 in month 1; retreats with the month.
pub const YOUBI_MONTH_ONE: Branch = Xu;
/// 文昌 at the 子 hour; retreats with the hour.
pub const WENCHANG_ZI_HOUR: Branch = Xu;
/// 文曲 at the 子 hour; advances with the hour.
pub const WENQU_ZI_HOUR: Branch = Chen;
/// 地劫 (forward) and 地空 (reverse) both start at 亥 for the 子 hour.
pub const DIJIE_DIKONG_ZI_HOUR: Branch = Hai;
/// 天刑 in month 1; advances with the month.
pub const TIANXING_MONTH_ONE: Branch = You;
/// 天姚 in month 1; advances with the month.
pub const TIANYAO_MONTH_ONE: Branch = Chou;
/// 紅鸞 for a 子 year; retreats with the year branch. 天喜 is opposite.
pub const HONGLUAN_ZI_YEAR: Branch = Mao;

/// Brightness of each major star (rows in `MAJOR_STARS` order) by branch
/// (columns 子..亥).
pub const BRIGHTNESS_TABLE: [[Brightness; 12]; 14] = [
    // 紫微
    [Miao, Ping, Wang, Ping, Ping, Xian, Ping, Xian, Wang, Ping, Xian, Xian],
    // 天機
    [Xian, Xian, Ping, Wang, Xian, Miao, Wang, Xian, Wang, Ping, Wang, Xian],
    // 太陽
    [Xian, Xian, Miao, Miao, Wang, Wang, Wang, Ping, Xian, Ping, Xian, Xian],
    // 武曲
    [Miao, Xian, Ping, Ping, Xian, Xian, Wang, Xian, Xian, Ping, Xian, Xian],
    // 天同
    [Ping, Xian, Wang, Wang, Xian, Xian, Miao, Xian, Xian, Ping, Xian, Xian],
    // 廉貞
    [Wang, Xian, Xian, Ping, Xian, Xian, Ping, Miao, Wang, Wang, Wang, Xian],
    // 天府
    [Xian, Wang, Miao, Ping, Miao, Xian, Ping, Wang, Miao, Xian, Miao, Xian],
    // 太陰
    [Miao, Miao, Xian, Xian, Xian, Xian, Xian, Xian, Ping, Wang, Miao, Miao],
    // 貪狼
    [Ping, Xian, Wang, Miao, Wang, Xian, Miao, Xian, Wang, Xian, Wang, Ping],
    // 巨門
    [Wang, Xian, Wang, Ping, Xian, Xian, Miao, Xian, Wang, Ping, Wang, Xian],
    // 天相
    [Miao, Xian, Wang, Ping, Xian, Xian, Miao, Xian, Wang, Ping, Xian, Xian],
    // 天梁
    [Ping, Xian, Miao, Wang, Wang, Xian, Wang, Xian, Xian, Ping, Xian, Xian],
    // 七殺
    [Ping, Xian, Wang, Wang, Wang, Xian, Wang, Xian, Miao, Ping, Xian, Xian],
    // 破軍
    [Ping, Xian, Xian, Ping, Xian, Miao, Wang, Xian, Wang, Xian, Xian, Xian],
];

/// Branch of 長生 by bureau (水二, 木三, 金四, 土五, 火六).
pub const LIFE_STAGE_START_BY_BUREAU: [Branch; 5] = [Shen, Hai, Si, Shen, Yin];

/// Branch of the first annual limit by year-branch triad (申子辰, 巳酉丑,
/// 寅午戌, 亥卯未).
pub const ANNUAL_LIMIT_START_BY_TRIAD: [Branch; 4] = [Xu, Wei, Chen, Chou];

/// Four transformations by year stem, in 祿, 權, 科, 忌 order.
pub const TRANSFORMATION_TABLE: [[StarId; 4]; 10] = [
    // 甲
    [StarId::Lianzhen, StarId::Pojun, StarId::Wuqu, StarId::Taiyang],
    // 乙
    [StarId::Tianji, StarId::Tianliang, StarId::Ziwei, StarId::Taiyin],
    // 丙
    [StarId::Tiantong, StarId::Tianji, StarId::Wenchang, StarId::Lianzhen],
    // 丁
    [StarId::Taiyin, StarId::Tiantong, StarId::Tianji, StarId::Jumen],
    // 戊
    [StarId::Tanlang, StarId::Taiyin, StarId::Youbi, StarId::Tianji],
    // 己
    [StarId::Wuqu, StarId::Tanlang, StarId::Tianliang, StarId::Wenqu],
    // 庚
    [StarId::Taiyang, StarId::Wuqu, StarId::Taiyin, StarId::Tiantong],
    // 辛
    [StarId::Jumen, StarId::Taiyang, StarId::Wenqu, StarId::Wenchang],
    // 壬
    [StarId::Tianliang, StarId::Ziwei, StarId::Zuofu, StarId::Wuqu],
    // 癸
    [StarId::Pojun, StarId::Jumen, StarId::Taiyin, StarId::Tanlang],
];

/// Transformation type of each column of [`TRANSFORMATION_TABLE`].
pub const TRANSFORMATION_COLUMNS: [Transformation; 4] = [
    Transformation::Lu,
    Transformation::Quan,
    Transformation::Ke,
    Transformation::Ji,
];
