pub mod deepseek_provider;
pub mod fallback;
pub mod gemini_provider;
pub mod huggingface_provider;
pub mod openai_provider;
pub mod provider;
pub mod transport;
pub mod types;

pub use deepseek_provider::DeepSeekProvider;
pub use fallback::{FallbackOrchestrator, FallbackOrchestratorBuilder, RegistrationError};
pub use gemini_provider::GeminiProvider;
pub use huggingface_provider::HuggingFaceProvider;
pub use openai_provider::OpenAIProvider;
pub use provider::{AdapterSettings, ProviderAdapter, ProviderAdapterFactory};
pub use types::*;
