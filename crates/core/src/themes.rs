//! Theme catalog for fortune slips
//!
//! The first entry of every row is the theme's resource folder name; the
//! rest are the aliases users may type when picking a theme.

/// Theme id that means "pick any enabled theme".
pub const RANDOM: &str = "random";

/// Compiled-in catalog: theme id -> aliases.
pub const THEME_CATALOG: &[(&str, &[&str])] = &[
    (RANDOM, &["随机"]),
    ("pcr", &["PCR", "公主链接", "公主连结", "Pcr", "pcr"]),
    ("genshin", &["原神", "Genshin Impact", "genshin", "Genshin", "op", "原批"]),
    ("hololive", &["Hololive", "hololive", "Vtb", "vtb", "管人", "Holo", "holo", "猴楼"]),
    ("touhou", &["东方", "touhou", "Touhou", "车万"]),
    ("touhou_lostword", &["东方归言录", "东方lostword", "touhou lostword", "Touhou dlc"]),
    ("touhou_old", &["旧东方", "旧版东方", "老东方", "老版东方", "经典东方"]),
    ("onmyoji", &["阴阳师", "yys", "Yys", "痒痒鼠"]),
    ("azure", &["碧蓝航线", "碧蓝", "azure", "Azure"]),
    ("asoul", &["Asoul", "asoul", "a手", "A手", "as", "As"]),
    ("arknights", &["明日方舟", "方舟", "arknights", "鹰角", "Arknights", "舟游"]),
    ("granblue_fantasy", &["碧蓝幻想", "Granblue Fantasy", "granblue fantasy", "幻想", "fantasy", "Fantasy"]),
    ("punishing", &["战双", "战双帕弥什"]),
    ("pretty_derby", &["赛马娘", "马", "马娘", "赛马"]),
    ("dc4", &["dc4", "DC4", "Dc4", "初音岛", "初音岛4"]),
    ("einstein", &["爱因斯坦携爱敬上", "爱因斯坦", "einstein", "Einstein"]),
    ("sweet_illusion", &["灵感满溢的甜蜜创想", "甜蜜一家人", "富婆妹"]),
    ("liqingge", &["李清歌", "清歌"]),
    ("hoshizora", &["星空列车与白的旅行", "星空列车"]),
    ("sakura", &["樱色之云绯色之恋", "樱云之恋", "樱云绯恋", "樱云"]),
    ("summer_pockets", &["夏日口袋", "夏兜", "sp", "SP"]),
    ("amazing_grace", &["奇异恩典"]),
];

/// Order in which flags are written to `fortune_config.json`.
pub const FLAG_ORDER: &[&str] = &[
    "amazing_grace",
    "arknights",
    "asoul",
    "azure",
    "genshin",
    "onmyoji",
    "pcr",
    "touhou",
    "touhou_lostword",
    "touhou_old",
    "hololive",
    "granblue_fantasy",
    "punishing",
    "pretty_derby",
    "dc4",
    "einstein",
    "sweet_illusion",
    "liqingge",
    "hoshizora",
    "sakura",
    "summer_pockets",
];

/// All theme ids in catalog order, `random` included.
pub fn theme_ids() -> impl Iterator<Item = &'static str> {
    THEME_CATALOG.iter().map(|(id, _)| *id)
}

/// Theme ids that carry an enable flag (everything but `random`).
pub fn flagged_theme_ids() -> impl Iterator<Item = &'static str> {
    theme_ids().filter(|id| *id != RANDOM)
}

pub fn is_valid(theme_id: &str) -> bool {
    theme_ids().any(|id| id == theme_id)
}

pub fn aliases(theme_id: &str) -> Option<&'static [&'static str]> {
    THEME_CATALOG
        .iter()
        .find(|(id, _)| *id == theme_id)
        .map(|(_, aliases)| *aliases)
}

/// Resolves a user-supplied name (an alias or the id itself) to a theme id.
pub fn resolve(name: &str) -> Option<&'static str> {
    let name = name.trim();
    THEME_CATALOG
        .iter()
        .find(|(id, aliases)| *id == name || aliases.contains(&name))
        .map(|(id, _)| *id)
}

/// Configuration key of a theme's enable flag, e.g. `pcr_flag`.
pub fn flag_key(theme_id: &str) -> String {
    format!("{}_flag", theme_id)
}
