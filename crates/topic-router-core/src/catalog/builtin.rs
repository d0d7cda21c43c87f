//! Builtin catalog for the Uzbek community group in Saudi Arabia.
//!
//! Used when no categories are configured. Topic thread ids are deployment
//! specific, so each entry names the environment variable holding its id
//! instead of a fixed destination.

use crate::config::CategorySettings;

/// (name, destination env var, keywords, fallback)
const BUILTIN: &[(&str, &str, &[&str], bool)] = &[
    (
        "🏠 Uy-joy & Ijara",
        "TOPIC_IJARA_ID",
        &[
            "ijara", "uy", "xonadosh", "xona", "kvartira", "room", "kv", "ijaraga uy",
            "ижара", "уй", "квартира", "хона",
        ],
        false,
    ),
    (
        "💼 Ish & Daromad",
        "TOPIC_ISH_ID",
        &[
            "ish", "kuryer", "daromad", "vakansiya", "job", "work", "maosh", "ish bor",
            "ish kerak", "иш", "работа", "вакансия", "маош",
        ],
        false,
    ),
    (
        "🚕 Transport & Taksi",
        "TOPIC_TAXI_ID",
        &[
            "taksi", "careem", "uber", "transport", "bus", "velo", "velosiped", "такси",
            "транспорт", "автобус",
        ],
        false,
    ),
    (
        "📄 Hujjatlar & Visa",
        "TOPIC_VISA_ID",
        &[
            "iqoma", "visa", "viza", "bank", "karta", "mada", "stc", "sim", "absher",
            "иқома", "виза", "карта",
        ],
        false,
    ),
    (
        "🛒 Bozor & Narxlar",
        "TOPIC_BOZOR_ID",
        &[
            "bozor", "narx", "arzon", "market", "haraj", "sotib", "olib-sotish", "бозор",
            "нарх", "арзон",
        ],
        false,
    ),
    (
        "🕋 Ziyorat & Umra",
        "TOPIC_ZIYORAT_ID",
        &[
            "umra", "ziyorat", "masjid", "nabaviy", "haram", "makkah", "makka", "madina",
            "умра", "зиёрат", "масжид", "макка", "мадина",
        ],
        false,
    ),
    (
        "🌿 Salomatlik",
        "TOPIC_SALOMAT_ID",
        &[
            "yo'tal", "allergiya", "davo", "toshma", "og'riq", "dori", "tabiiy", "йўтал",
            "аллергия", "даво", "дори",
        ],
        false,
    ),
    // Listed by /topics only; unmatched messages stay where they are
    ("💬 Umumiy savollar", "TOPIC_UMUMIY_ID", &[], false),
];

/// Builtin categories, in routing order, with env-resolved destinations.
#[must_use]
pub fn categories() -> Vec<CategorySettings> {
    BUILTIN
        .iter()
        .map(|(name, env, keywords, fallback)| CategorySettings {
            name: (*name).to_string(),
            destination_id: None,
            destination_env: Some((*env).to_string()),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            fallback: *fallback,
        })
        .collect()
}
