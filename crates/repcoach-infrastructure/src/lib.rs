//! Infrastructure layer: collaborator service implementations.
//!
//! Real HTTP clients and the in-process mock stack, all behind the
//! service traits from repcoach-core.

pub mod deepgram_stt;
pub mod mock;
pub mod smallest_agent_client;
pub mod waves_tts;

pub use deepgram_stt::DeepgramTranscriber;
pub use mock::{MockAgentClient, MockSynthesizer, MockTranscriber};
pub use smallest_agent_client::SmallestAgentClient;
pub use waves_tts::WavesSynthesizer;
