pub mod extractor;
pub mod model_resolver;
pub mod providers;
pub mod translator;

pub use extractor::extract_generated_text;
pub use providers::{GenerativeProvider, ProviderError};
