use async_trait::async_trait;
use base64::Engine;
use log::debug;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::OpenRouterConfig;

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f64 = 0.7;

const PROMPT: &str = "You are an expert fishing guide and angler with decades of experience. Analyze this fishing spot image and provide detailed recommendations.

Please provide:
1. **Structure Analysis**: Identify visible underwater structures, cover, vegetation, shoreline features
2. **Fish Habitat Assessment**: What types of fish might be present based on the environment
3. **Casting Recommendations**: Best spots to cast and why
4. **Bait/Lure Suggestions**: What baits or lures would work best in this spot
5. **Technique Tips**: Fishing techniques that would be most effective
6. **Best Times**: When this spot would fish best (time of day, weather conditions)
7. **Confidence Score**: Rate this spot 1-10 for fishing potential

Format your response in a clear, actionable way that helps an angler succeed at this location.";

/// What the demo backend answers for every photo.
pub const CANNED_RECOMMENDATION: &str = "**Structure Analysis**: This appears to be a shallow cove with visible vegetation and fallen timber. The water clarity suggests good visibility for sight fishing.

**Fish Habitat Assessment**: Excellent habitat for bass, bluegill, and possibly northern pike. The structure provides cover and ambush points.

**Casting Recommendations**:
- Cast parallel to the fallen log structure
- Target the weed edges in 3-6 feet of water
- Focus on shaded areas during midday

**Bait/Lure Suggestions**:
- Spinnerbaits for covering water quickly
- Soft plastics for working structure slowly
- Topwater lures during dawn/dusk

**Technique Tips**:
- Use a slow, steady retrieve near structure
- Vary your presentation depth
- Be patient around cover

**Best Times**: Early morning (6-8 AM) and evening (6-8 PM) when fish are most active.

**Confidence Score**: 8/10 - Excellent fishing potential with multiple species likely present.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not build the analysis http client")]
    BuildClient(#[source] reqwest::Error),

    #[error("could not reach the analysis backend")]
    Request(#[from] reqwest::Error),

    #[error("analysis backend answered {status}: {body}")]
    Backend {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("analysis backend returned no recommendation")]
    EmptyResponse,
}

/// An uploaded spot photo as handed to an analyzer.
#[derive(Debug, Clone)]
pub struct SpotImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Produces a markdown fishing recommendation for a spot photo.
#[async_trait]
pub trait SpotAnalyzer: Send + Sync {
    async fn analyze(&self, image: &SpotImage) -> Result<String, Error>;
}

/// Default analyzer: answers with [`CANNED_RECOMMENDATION`] without looking
/// at the photo, which keeps the demo self-contained.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedAnalyzer;

#[async_trait]
impl SpotAnalyzer for CannedAnalyzer {
    async fn analyze(&self, image: &SpotImage) -> Result<String, Error> {
        debug!("returning the canned recommendation for {}", image.filename);

        Ok(CANNED_RECOMMENDATION.to_string())
    }
}

/// Analyzer backed by a vision model behind OpenRouter's chat completions
/// API. The photo travels inline as a base64 data url.
#[derive(Debug)]
pub struct OpenRouterAnalyzer {
    client: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterAnalyzer {
    pub fn new(config: OpenRouterConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fishcast-api/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(Error::BuildClient)?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SpotAnalyzer for OpenRouterAnalyzer {
    async fn analyze(&self, image: &SpotImage) -> Result<String, Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        let data_url = format!("data:{};base64,{encoded}", image.content_type);

        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: vec![
                    Content::Text { text: PROMPT },
                    Content::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(
            "analyzing {} ({} bytes) with {}",
            image.filename,
            image.bytes.len(),
            self.config.model
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.site_name)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend { status, body });
        }

        let completion: CompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(Error::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Content<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
