

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BuiltinIntent {
    FindProduct,
    StoreInfo,
    Unknown,
}

impl BuiltinIntent {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentLabel(String);

impl IntentLabel {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn unknown() -> Self {
        Self::from(BuiltinIntent::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn builtin(&self) -> Option<BuiltinIntent> {
        self.0.parse().ok()
    }
}

impl From<BuiltinIntent> for IntentLabel {
    fn from(intent: BuiltinIntent) -> Self {
        Self(intent.as_str().to_string())
    }
}

impl From<&str> for IntentLabel {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl PartialEq<&str> for IntentLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: IntentLabel,
    pub confidence: f64,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum KeywordGroup {
    Product,
    Store,
}

impl KeywordGroup {
    pub fn intent(&self) -> BuiltinIntent {
        match self {
            Self::Product => BuiltinIntent::FindProduct,
            Self::Store => BuiltinIntent::StoreInfo,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntentDecision {
    Classified { label: IntentLabel, confidence: f64 },
    KeywordFallback { group: KeywordGroup, confidence: f64 },
    Unresolved { confidence: f64 },
}

impl IntentDecision {
    pub fn label(&self) -> IntentLabel {
        match self {
            Self::Classified { label, .. } => label.clone(),
            Self::KeywordFallback { group, .. } => group.intent().into(),
            Self::Unresolved { .. } => IntentLabel::unknown(),
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Classified { confidence, .. }
            | Self::KeywordFallback { confidence, .. }
            | Self::Unresolved { confidence } => *confidence,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Classified { .. } => "classifier",
            Self::KeywordFallback { .. } => "keyword_fallback",
            Self::Unresolved { .. } => "unresolved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_round_trip() {
        assert_eq!(IntentLabel::from("find_product").builtin(), Some(BuiltinIntent::FindProduct));
        assert_eq!(IntentLabel::from("store_info").builtin(), Some(BuiltinIntent::StoreInfo));
        assert_eq!(IntentLabel::unknown().builtin(), Some(BuiltinIntent::Unknown));
        assert_eq!(IntentLabel::from("greeting").builtin(), None);
    }

    #[test]
    fn test_unknown_sentinel() {
        assert!(IntentLabel::unknown().is_unknown());
        assert_eq!(IntentLabel::unknown(), "unknown");
        assert!(!IntentLabel::from("greeting").is_unknown());
    }

    #[test]
    fn test_decision_labels() {
        let classified = IntentDecision::Classified { label: "greeting".into(), confidence: 0.9 };
        assert_eq!(classified.label(), "greeting");
        assert_eq!(classified.stage(), "classifier");

        let fallback = IntentDecision::KeywordFallback { group: KeywordGroup::Store, confidence: 0.3 };
        assert_eq!(fallback.label(), "store_info");
        assert!((fallback.confidence() - 0.3).abs() < f64::EPSILON);

        let unresolved = IntentDecision::Unresolved { confidence: 0.2 };
        assert!(unresolved.label().is_unknown());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&IntentLabel::from("store_info")).unwrap();
        assert_eq!(json, "\"store_info\"");
    }
}
