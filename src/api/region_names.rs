use serde::{Deserialize, Serialize};

/// Language the price table is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-CN")]
    SimplifiedChinese,
}

impl DisplayLanguage {
    /// Maps a document language tag (`en`, `zh-CN`, `zh`) to a language.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("zh") {
            Self::SimplifiedChinese
        } else {
            Self::English
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::SimplifiedChinese => "zh-CN",
        }
    }
}

// (code, English, Simplified Chinese)
const REGION_NAMES: [(&str, &str, &str); 20] = [
    ("US", "United States", "美国"),
    ("CA", "Canada", "加拿大"),
    ("CN", "China", "中国"),
    ("MX", "Mexico", "墨西哥"),
    ("AR", "Argentina", "阿根廷"),
    ("TR", "Turkey", "土耳其"),
    ("RU", "Russia", "俄罗斯"),
    ("BR", "Brazil", "巴西"),
    ("IN", "India", "印度"),
    ("EU", "European Union", "欧盟"),
    ("UK", "United Kingdom", "英国"),
    ("GB", "United Kingdom", "英国"),
    ("DE", "Germany", "德国"),
    ("FR", "France", "法国"),
    ("IT", "Italy", "意大利"),
    ("ES", "Spain", "西班牙"),
    ("JP", "Japan", "日本"),
    ("KR", "South Korea", "韩国"),
    ("AU", "Australia", "澳大利亚"),
    ("HK", "Hong Kong", "香港"),
];

/// Looks up the translated name of a known region code.
#[must_use]
pub fn known_region_name(region: &str, language: DisplayLanguage) -> Option<&'static str> {
    let region = region.trim();
    REGION_NAMES
        .iter()
        .find(|(code, _, _)| code.eq_ignore_ascii_case(region))
        .map(|(_, en, zh)| match language {
            DisplayLanguage::English => *en,
            DisplayLanguage::SimplifiedChinese => *zh,
        })
}

/// Display name for a region: the translation table first, then the name
/// carried by the record, then the raw code.
#[must_use]
pub fn region_display_name(
    region: &str,
    record_name: Option<&str>,
    language: DisplayLanguage,
) -> String {
    known_region_name(region, language)
        .or(record_name.filter(|name| !name.trim().is_empty()))
        .unwrap_or(region)
        .to_owned()
}
