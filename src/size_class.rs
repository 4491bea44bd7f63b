// 📏 Size Classes - Coarse hull categories used for display ordering
// Resolution order: explicit attribute, then name inference, then Medium

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Titan,
    Commander,
    Capital,
    Large,
    Medium,
    Small,
    XSmall,
    XxSmall,
    Unknown,
}

impl SizeClass {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SizeClass::Titan => "Titan",
            SizeClass::Commander => "Commander",
            SizeClass::Capital => "Capital",
            SizeClass::Large => "Large",
            SizeClass::Medium => "Medium",
            SizeClass::Small => "Small",
            SizeClass::XSmall => "X-Small",
            SizeClass::XxSmall => "XX-Small",
            SizeClass::Unknown => "Unknown",
        }
    }

    /// Ordinal rank for display ordering only (Titan first)
    pub fn rank(&self) -> u8 {
        match self {
            SizeClass::Titan => 1,
            SizeClass::Commander => 2,
            SizeClass::Capital => 3,
            SizeClass::Large => 4,
            SizeClass::Medium => 5,
            SizeClass::Small => 6,
            SizeClass::XSmall => 7,
            SizeClass::XxSmall => 8,
            SizeClass::Unknown => 9,
        }
    }

    /// Parse an explicit class/size attribute value, case-insensitive
    pub fn parse(value: &str) -> Option<SizeClass> {
        let compact: String = value
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        match compact.as_str() {
            "titan" => Some(SizeClass::Titan),
            "commander" => Some(SizeClass::Commander),
            "capital" => Some(SizeClass::Capital),
            "large" => Some(SizeClass::Large),
            "medium" => Some(SizeClass::Medium),
            "small" => Some(SizeClass::Small),
            "xsmall" => Some(SizeClass::XSmall),
            "xxsmall" => Some(SizeClass::XxSmall),
            _ => None,
        }
    }

    /// Infer a size class from a display name
    ///
    /// "xx" tokens are checked before "x" tokens so XX-Small names never
    /// collapse into X-Small.
    pub fn infer_from_name(name: &str) -> SizeClass {
        let compact: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        if compact.contains("xxsmall") {
            return SizeClass::XxSmall;
        }
        if compact.contains("xsmall") {
            return SizeClass::XSmall;
        }

        let lower = name.to_lowercase();
        for (token, class) in [
            ("titan", SizeClass::Titan),
            ("commander", SizeClass::Commander),
            ("capital", SizeClass::Capital),
            ("large", SizeClass::Large),
            ("medium", SizeClass::Medium),
            ("small", SizeClass::Small),
        ] {
            if lower.contains(token) {
                return class;
            }
        }

        SizeClass::Medium
    }

    /// Resolve from an optional explicit attribute, falling back to the name
    pub fn resolve(explicit: Option<&str>, name: &str) -> SizeClass {
        if let Some(value) = explicit {
            if let Some(class) = SizeClass::parse(value) {
                return class;
            }
        }
        SizeClass::infer_from_name(name)
    }
}
