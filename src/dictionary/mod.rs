// Vocabulary index: the dictionary a model is initialized against.

pub mod traits;
pub mod text;

pub use text::{DictionaryDataset, TextDictionary};
pub use traits::{Dataset, Dictionary, DictionaryEntry};
