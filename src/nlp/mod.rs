

pub mod classifier;
pub mod intent;
pub mod normalizer;
pub mod vectorizer;

pub use classifier::{IntentClassifier, LogisticModel, MultiClass};
pub use intent::{BuiltinIntent, IntentDecision, IntentLabel, KeywordGroup, Prediction};
pub use normalizer::{normalize, tokens};
pub use vectorizer::{SparseVector, TfidfVectorizer};
