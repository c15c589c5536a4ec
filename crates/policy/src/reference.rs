//! Shelf-life and category reference tables.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use fridgechef_core::{DomainError, DomainResult};

/// Bucket for ingredients that no category lists.
pub const OTHER_CATEGORY: &str = "Other";

/// One category label and its member ingredient names, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub names: Vec<String>,
}

/// Static reference data supplied by the surrounding application.
///
/// JSON shape:
///
/// ```json
/// {
///   "shelf_life": { "우유": 7, "계란": 35 },
///   "categories": [ { "label": "Dairy", "names": ["우유"] } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Ingredient name → days until expiry when refrigerated.
    pub shelf_life: BTreeMap<String, u32>,
    /// Category table; order decides bucket order and wins ties.
    pub categories: Vec<CategoryEntry>,
}

impl ReferenceData {
    pub fn new(shelf_life: BTreeMap<String, u32>, categories: Vec<CategoryEntry>) -> DomainResult<Self> {
        let data = Self { shelf_life, categories };
        data.validate()?;
        Ok(data)
    }

    /// The tables shipped with the app.
    pub fn builtin() -> Self {
        let shelf_life = BUILTIN_SHELF_LIFE
            .iter()
            .map(|(name, days)| ((*name).to_string(), *days))
            .collect();
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(label, names)| CategoryEntry {
                label: (*label).to_string(),
                names: names.iter().map(|n| (*n).to_string()).collect(),
            })
            .collect();
        Self { shelf_life, categories }
    }

    pub fn from_json_str(raw: &str) -> DomainResult<Self> {
        let data: ReferenceData = serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("invalid reference data: {e}")))?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> DomainResult<()> {
        let mut seen = HashSet::new();
        for entry in &self.categories {
            let label = entry.label.trim();
            if label.is_empty() {
                return Err(DomainError::validation("category label cannot be empty"));
            }
            if label == OTHER_CATEGORY {
                return Err(DomainError::validation(format!(
                    "category label {OTHER_CATEGORY:?} is reserved"
                )));
            }
            if !seen.insert(label) {
                return Err(DomainError::validation(format!("duplicate category label: {label}")));
            }
        }
        Ok(())
    }

    /// Build the name → category reverse index.
    pub fn category_index(&self) -> CategoryIndex {
        CategoryIndex::build(&self.categories)
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Precomputed reverse index from ingredient name to category.
///
/// Built once; lookups are O(1).
/// A name listed under several categories belongs to the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    labels: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl CategoryIndex {
    pub fn build(categories: &[CategoryEntry]) -> Self {
        let mut labels = Vec::with_capacity(categories.len());
        let mut by_name = HashMap::new();
        for (pos, entry) in categories.iter().enumerate() {
            labels.push(entry.label.clone());
            for name in &entry.names {
                by_name.entry(name.clone()).or_insert(pos);
            }
        }
        Self { labels, by_name }
    }

    /// Category of `name`, or [`OTHER_CATEGORY`].
    pub fn category_of(&self, name: &str) -> &str {
        self.by_name
            .get(name)
            .map(|pos| self.labels[*pos].as_str())
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Category labels in table order (without [`OTHER_CATEGORY`]).
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Sort key for a label: table position, `Other` last.
    pub fn rank(&self, label: &str) -> usize {
        self.labels
            .iter()
            .position(|l| l == label)
            .unwrap_or(self.labels.len())
    }
}

const BUILTIN_SHELF_LIFE: &[(&str, u32)] = &[
    ("계란", 35),
    ("메추리알", 35),
    ("감자", 4),
    ("고구마", 4),
    ("누룽지", 45),
    ("밀가루", 45),
    ("빵가루", 45),
    ("쌀", 45),
    ("옥수수콘", 45),
    ("오트밀", 45),
    ("찹쌀가루", 45),
    ("감", 7),
    ("건포도", 180),
    ("귤", 10),
    ("딸기", 5),
    ("라임", 14),
    ("레몬", 14),
    ("망고", 10),
    ("멜론", 7),
    ("바나나", 5),
    ("배", 14),
    ("복숭아", 5),
    ("블루베리", 7),
    ("사과", 30),
    ("수박", 7),
    ("아보카도", 7),
    ("오렌지", 14),
    ("자두", 5),
    ("자몽", 14),
    ("체리", 5),
    ("키위", 14),
    ("파인애플", 7),
    ("포도", 7),
    ("가지", 7),
    ("고추", 7),
    ("깻잎", 7),
    ("당근", 14),
    ("대파", 10),
    ("마늘", 30),
    ("무", 14),
    ("열무", 5),
    ("바질", 3),
    ("배추", 14),
    ("브로콜리", 7),
    ("비트", 14),
    ("시금치", 5),
    ("아스파라거스", 5),
    ("상추", 5),
    ("샐러리", 7),
    ("애호박", 7),
    ("양배추", 14),
    ("양송이버섯", 7),
    ("팽이버섯", 7),
    ("표고버섯", 7),
    ("양파", 30),
    ("오이", 7),
    ("콩나물", 5),
    ("토마토", 5),
    ("파프리카", 7),
    ("호박", 7),
    ("가래떡", 7),
    ("떡국떡", 7),
    ("바게트", 3),
    ("베이글", 5),
    ("식빵", 5),
    ("버터", 30),
    ("생크림", 7),
    ("요거트", 14),
    ("우유", 7),
    ("치즈", 14),
    ("닭고기", 3),
    ("돼지고기", 3),
    ("소고기", 3),
    ("양고기", 3),
    ("오리고기", 3),
    ("검은콩", 180),
    ("땅콩", 180),
    ("병아리", 180),
    ("아몬드", 180),
    ("완두", 180),
    ("팥", 180),
    ("피스타치오", 180),
    ("호두", 180),
    ("낙지젓", 30),
    ("명란젓", 30),
    ("새우젓", 30),
    ("오징어젓", 30),
    ("김치", 14),
    ("두부", 7),
    ("베이컨", 7),
    ("소세지", 7),
    ("어묵", 7),
    ("유부", 7),
    ("진미채", 30),
    ("참치캔", 365),
    ("스팸", 365),
    ("갈치", 3),
    ("고등어", 3),
    ("꽁치", 3),
    ("건새우", 180),
    ("게맛살", 7),
    ("굴", 3),
    ("골뱅이", 7),
    ("꽃게", 3),
    ("꼬막", 3),
    ("낙지", 3),
    ("동태", 3),
    ("대합", 3),
    ("다시마", 365),
    ("도다리", 3),
    ("명태", 3),
    ("멸치", 180),
    ("미역", 365),
    ("문어", 3),
    ("바지락", 3),
    ("새우", 3),
    ("소라", 7),
    ("아귀", 3),
    ("연어", 3),
    ("오징어", 3),
    ("조기", 3),
    ("전어", 3),
    ("조개", 3),
    ("쭈꾸미", 3),
    ("전복", 7),
    ("홍합", 7),
];

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    ("Eggs", &["계란", "메추리알"]),
    (
        "Grains",
        &["감자", "고구마", "누룽지", "밀가루", "빵가루", "쌀", "옥수수콘", "오트밀", "찹쌀가루"],
    ),
    (
        "Fruit",
        &[
            "감", "건포도", "귤", "딸기", "라임", "레몬", "망고", "멜론", "바나나", "배", "복숭아",
            "블루베리", "사과", "수박", "아보카도", "오렌지", "자두", "자몽", "체리", "키위",
            "파인애플", "포도",
        ],
    ),
    (
        "Vegetables",
        &[
            "가지", "고추", "깻잎", "당근", "대파", "마늘", "무", "열무", "바질", "배추", "브로콜리",
            "비트", "시금치", "아스파라거스", "상추", "샐러리", "애호박", "양배추", "양송이버섯",
            "팽이버섯", "표고버섯", "양파", "오이", "콩나물", "토마토", "파프리카", "호박",
        ],
    ),
    ("Rice cakes & bread", &["가래떡", "떡국떡", "바게트", "베이글", "식빵"]),
    ("Dairy", &["버터", "생크림", "요거트", "우유", "치즈"]),
    ("Meat", &["닭고기", "돼지고기", "소고기", "양고기", "오리고기"]),
    (
        "Beans & nuts",
        &["검은콩", "땅콩", "병아리", "아몬드", "완두", "팥", "피스타치오", "호두"],
    ),
    ("Salted seafood", &["낙지젓", "명란젓", "새우젓", "오징어젓"]),
    (
        "Processed",
        &["김치", "두부", "베이컨", "소세지", "어묵", "유부", "진미채", "참치캔", "스팸"],
    ),
    (
        "Seafood",
        &[
            "갈치", "고등어", "꽁치", "건새우", "게맛살", "굴", "골뱅이", "꽃게", "꼬막", "낙지",
            "동태", "대합", "다시마", "도다리", "명태", "멸치", "미역", "문어", "바지락", "새우",
            "소라", "아귀", "연어", "오징어", "조기", "전어", "조개", "쭈꾸미", "전복", "홍합",
        ],
    ),
];
