//! Built-in sub-region table and child derivation.
//!
//! The table lists the forecast offices under each JMA center. Entries carry
//! both the center code and its display name: lookups try the code first and
//! fall back to the name, so a center whose code changes upstream still
//! resolves as long as its name does not.

use std::collections::BTreeMap;

use crate::types::{ChildRegion, ParentRegion};

/// Forecast offices of one center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRegion {
    pub parent_code: &'static str,
    pub parent_name: &'static str,
    pub children: &'static [(&'static str, &'static str)],
}

impl StaticRegion {
    pub fn child_regions(&self) -> Vec<ChildRegion> {
        self.children
            .iter()
            .map(|(name, code)| ChildRegion::new(*name, *code))
            .collect()
    }
}

pub const STATIC_REGIONS: &[StaticRegion] = &[
    StaticRegion {
        parent_code: "010100",
        parent_name: "北海道地方",
        children: &[
            ("宗谷地方", "011000"),
            ("上川・留萌地方", "012000"),
            ("網走・北見・紋別地方", "013000"),
            ("十勝地方", "014030"),
            ("釧路・根室地方", "014100"),
            ("胆振・日高地方", "015000"),
            ("石狩・空知・後志地方", "016000"),
            ("渡島・檜山地方", "017000"),
        ],
    },
    StaticRegion {
        parent_code: "010200",
        parent_name: "東北地方",
        children: &[
            ("青森県", "020000"),
            ("岩手県", "030000"),
            ("宮城県", "040000"),
            ("秋田県", "050000"),
            ("山形県", "060000"),
            ("福島県", "070000"),
        ],
    },
    StaticRegion {
        parent_code: "010300",
        parent_name: "関東甲信地方",
        children: &[
            ("茨城県", "080000"),
            ("栃木県", "090000"),
            ("群馬県", "100000"),
            ("埼玉県", "110000"),
            ("千葉県", "120000"),
            ("東京都", "130000"),
            ("神奈川県", "140000"),
            ("山梨県", "190000"),
            ("長野県", "200000"),
        ],
    },
    StaticRegion {
        parent_code: "010400",
        parent_name: "東海地方",
        children: &[
            ("岐阜県", "210000"),
            ("静岡県", "220000"),
            ("愛知県", "230000"),
            ("三重県", "240000"),
        ],
    },
    StaticRegion {
        parent_code: "010500",
        parent_name: "北陸地方",
        children: &[
            ("新潟県", "150000"),
            ("富山県", "160000"),
            ("石川県", "170000"),
            ("福井県", "180000"),
        ],
    },
    StaticRegion {
        parent_code: "010600",
        parent_name: "近畿地方",
        children: &[
            ("滋賀県", "250000"),
            ("京都府", "260000"),
            ("大阪府", "270000"),
            ("兵庫県", "280000"),
            ("奈良県", "290000"),
            ("和歌山県", "300000"),
        ],
    },
    // Yamaguchi is forecast from the northern Kyushu center
    StaticRegion {
        parent_code: "010700",
        parent_name: "中国地方",
        children: &[
            ("鳥取県", "310000"),
            ("島根県", "320000"),
            ("岡山県", "330000"),
            ("広島県", "340000"),
        ],
    },
    StaticRegion {
        parent_code: "010800",
        parent_name: "四国地方",
        children: &[
            ("徳島県", "360000"),
            ("香川県", "370000"),
            ("愛媛県", "380000"),
            ("高知県", "390000"),
        ],
    },
    StaticRegion {
        parent_code: "010900",
        parent_name: "九州北部地方",
        children: &[
            ("山口県", "350000"),
            ("福岡県", "400000"),
            ("佐賀県", "410000"),
            ("長崎県", "420000"),
            ("熊本県", "430000"),
            ("大分県", "440000"),
        ],
    },
    StaticRegion {
        parent_code: "011000",
        parent_name: "九州南部・奄美地方",
        children: &[
            ("宮崎県", "450000"),
            ("鹿児島県", "460040"),
            ("奄美地方", "460100"),
        ],
    },
    StaticRegion {
        parent_code: "011100",
        parent_name: "沖縄地方",
        children: &[
            ("沖縄本島地方", "471000"),
            ("大東島地方", "472000"),
            ("宮古島地方", "473000"),
            ("八重山地方", "474000"),
        ],
    },
];

/// Find the table entry for a parent: by code, then by display name.
pub fn lookup(parent: &ParentRegion) -> Option<&'static StaticRegion> {
    STATIC_REGIONS
        .iter()
        .find(|r| r.parent_code == parent.code)
        .or_else(|| STATIC_REGIONS.iter().find(|r| r.parent_name == parent.name))
}

/// Children from the built-in table; empty when the parent is unknown.
pub fn static_children(parent: &ParentRegion) -> Vec<ChildRegion> {
    lookup(parent)
        .map(StaticRegion::child_regions)
        .unwrap_or_default()
}

/// Children from the catalog's own hierarchy, in catalog order.
/// Codes missing from `office_names` are shown by code.
pub fn catalog_children(
    parent: &ParentRegion,
    office_names: &BTreeMap<String, String>,
) -> Vec<ChildRegion> {
    parent
        .children
        .iter()
        .map(|code| {
            let name = office_names.get(code).cloned().unwrap_or_else(|| code.clone());
            ChildRegion::new(name, code.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(name: &str, code: &str) -> ParentRegion {
        ParentRegion {
            name: name.to_string(),
            code: code.to_string(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(STATIC_REGIONS.len(), 11);
        let total: usize = STATIC_REGIONS.iter().map(|r| r.children.len()).sum();
        assert_eq!(total, 58);
    }

    #[test]
    fn test_child_codes_are_unique() {
        let mut codes: Vec<&str> = STATIC_REGIONS
            .iter()
            .flat_map(|r| r.children.iter().map(|(_, code)| *code))
            .collect();
        let before = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), before);
    }

    #[test]
    fn test_hokkaido_children() {
        let children = static_children(&parent("北海道地方", "010100"));
        assert_eq!(children.len(), 8);
        assert_eq!(children[0], ChildRegion::new("宗谷地方", "011000"));
        assert_eq!(children[7], ChildRegion::new("渡島・檜山地方", "017000"));
    }

    #[test]
    fn test_lookup_falls_back_to_name() {
        let children = static_children(&parent("沖縄地方", "999999"));
        assert_eq!(children.len(), 4);
        assert_eq!(children[0].code, "471000");
    }

    #[test]
    fn test_lookup_prefers_code() {
        let entry = lookup(&parent("renamed", "010200")).unwrap();
        assert_eq!(entry.parent_name, "東北地方");
    }

    #[test]
    fn test_unknown_parent_has_no_children() {
        assert!(static_children(&parent("南極地方", "019999")).is_empty());
    }

    #[test]
    fn test_catalog_children_resolve_office_names() {
        let mut p = parent("東北地方", "010200");
        p.children = vec!["020000".into(), "030000".into()];
        let names = BTreeMap::from([("020000".to_string(), "青森県".to_string())]);

        let children = catalog_children(&p, &names);

        assert_eq!(
            children,
            vec![
                ChildRegion::new("青森県", "020000"),
                ChildRegion::new("030000", "030000"),
            ]
        );
    }
}
