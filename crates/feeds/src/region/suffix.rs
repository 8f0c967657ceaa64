//! Place-name normalization for region lookups.
//!
//! Uses a whitelist of administrative suffixes so that stripping never
//! mangles names that merely end in a suffix-looking character.

/// Tokens removed from a province query before matching.
const PROVINCE_NOISE: &[&str] = &["省", "市", "自治区", "壮族", "回族", "维吾尔"];

/// Trailing administrative suffixes stripped from a city/district key when
/// the verbatim lookup misses. Compound suffixes come before their
/// single-character tails.
const ADMIN_SUFFIXES: &[&str] = &["自治州", "自治县", "地区", "盟", "市", "区", "县", "旗"];

/// Normalize a province query: trim, then drop administrative noise tokens.
pub(crate) fn normalize_province(province: &str) -> String {
    let mut name = province.trim().to_string();
    for token in PROVINCE_NOISE {
        name = name.replace(token, "");
    }
    name
}

/// Strip one trailing administrative suffix from `key`.
///
/// When the remainder would be shorter than two characters while the
/// original key is longer than one, the original key is kept instead
/// ("东区" stays "东区" rather than collapsing to "东").
pub(crate) fn strip_admin_suffix(key: &str) -> &str {
    for suffix in ADMIN_SUFFIXES {
        if let Some(stripped) = key.strip_suffix(suffix) {
            if stripped.chars().count() < 2 && key.chars().count() > 1 {
                return key;
            }
            return stripped;
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_province() {
        assert_eq!(normalize_province("北京市"), "北京");
        assert_eq!(normalize_province("黑龙江省"), "黑龙江");
        assert_eq!(normalize_province("广西壮族自治区"), "广西");
        assert_eq!(normalize_province("新疆维吾尔自治区"), "新疆");
        assert_eq!(normalize_province("宁夏回族自治区"), "宁夏");
        assert_eq!(normalize_province("  四川省 "), "四川");
        assert_eq!(normalize_province("北京"), "北京");
    }

    #[test]
    fn test_strip_admin_suffix() {
        assert_eq!(strip_admin_suffix("朝阳区"), "朝阳");
        assert_eq!(strip_admin_suffix("昆山市"), "昆山");
        assert_eq!(strip_admin_suffix("大兴安岭地区"), "大兴安岭");
        assert_eq!(strip_admin_suffix("锡林郭勒盟"), "锡林郭勒");
        assert_eq!(strip_admin_suffix("阿拉善左旗"), "阿拉善左");
    }

    #[test]
    fn test_compound_suffix_wins_over_tail() {
        assert_eq!(strip_admin_suffix("延边朝鲜族自治州"), "延边朝鲜族");
        assert_eq!(strip_admin_suffix("门源回族自治县"), "门源回族");
    }

    #[test]
    fn test_short_names_are_not_over_stripped() {
        assert_eq!(strip_admin_suffix("东区"), "东区");
        assert_eq!(strip_admin_suffix("郊区"), "郊区");
        // A bare suffix has nothing left to protect.
        assert_eq!(strip_admin_suffix("市"), "");
    }

    #[test]
    fn test_no_suffix_is_untouched() {
        assert_eq!(strip_admin_suffix("武汉"), "武汉");
        assert_eq!(strip_admin_suffix("三亚"), "三亚");
    }
}
