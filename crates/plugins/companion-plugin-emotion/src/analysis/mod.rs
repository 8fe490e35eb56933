//! Text analysis: lexicon, feature extraction, dimensional fusion and
//! Plutchik classification

pub mod dimensional;
pub mod features;
pub mod lexicon;
pub mod plutchik;

pub use dimensional::DimensionalClassifier;
pub use features::{TextFeatureExtractor, TextFeatures};
pub use lexicon::{Lexicon, LexiconEntry};
pub use plutchik::{Classification, PlutchikClassifier, Signal};
