//! Gemini API client for RTRWH analysis
//!
//! Builds the hydrogeologist prompt, invokes generateContent in structured-
//! output mode, and parses the payload into an `AnalysisReport`.
//! Uses a long-lived reqwest::Client for connection pooling.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

use crate::error::ReportError;
use crate::models::{AnalysisReport, PropertyProfile};
use crate::schema::analysis_response_schema;

/// Message shown to the user for any failure in the analysis path. The real
/// cause is logged, never displayed.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to get analysis from Gemini API.";

/// Seam between the controller and the external analysis service. The
/// production implementation is [`GeminiClient`]; tests inject stubs.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// One outbound call per invocation. No retries, no caching; the provider
    /// may return different plausible values for identical input.
    async fn analyze(&self, profile: &PropertyProfile) -> crate::Result<AnalysisReport>;
}

/// Reusable Gemini client (connection-pooled)
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent".to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(api_key: String, base_url: String) -> Self {
        let mut this = Self::new(api_key);
        this.base_url = base_url;
        this
    }
}

#[async_trait]
impl AnalysisProvider for GeminiClient {
    async fn analyze(&self, profile: &PropertyProfile) -> crate::Result<AnalysisReport> {
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(profile),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: analysis_response_schema(),
            },
        };

        info!("Requesting RTRWH analysis for location '{}'", profile.location);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                ReportError::Analysis(ANALYSIS_FAILED_MESSAGE.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error response ({}): {}", status, error_text);
            return Err(ReportError::Analysis(ANALYSIS_FAILED_MESSAGE.to_string()));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response envelope: {}", e);
            ReportError::Analysis(ANALYSIS_FAILED_MESSAGE.to_string())
        })?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| {
                error!("Gemini response contained no candidates");
                ReportError::Analysis(ANALYSIS_FAILED_MESSAGE.to_string())
            })?;

        let report = parse_report(text)?;

        info!(
            "Analysis received: {} ({}/100)",
            report.feasibility.status, report.feasibility.score
        );

        Ok(report)
    }
}

/// Build the analysis instruction embedding the user's property data.
/// The runoff coefficient is fixed at 0.85; the provider is instructed to
/// honor it but the client does not verify the arithmetic.
fn build_prompt(profile: &PropertyProfile) -> String {
    format!(
        r#"Act as an expert hydrogeologist and civil engineer specializing in rainwater harvesting.
Analyze the following data to determine the feasibility of Rooftop Rainwater Harvesting (RTRWH) and artificial recharge.

User Data:
- Location: {location}
- Number of Dwellers: {dwellers}
- Roof Area: {roof_area} sq. meters
- Available Open Space for recharge structures: {open_space} sq. meters
- Predominant Soil Type: {soil_type}

Based on this data, provide a detailed analysis. Your response MUST be a JSON object that conforms to the provided schema.

Analysis to perform:
1.  **Feasibility Check**: Based on roof area, rainfall (infer for the location), available open space, and the provided soil type (e.g., sandy soils are better for infiltration than clay soils).
2.  **Suggested Structure**: Recommend a suitable RTRWH or Artificial Recharge structure (e.g., Recharge Pit, Trench, Shaft, or simple Storage Tank). Your recommendation should be heavily influenced by the provided soil type and available open space. For example, a recharge pit is excellent for sandy soil, while a trench might be better for loam. Clay soils might favor a storage tank over direct recharge.
3.  **Principal Aquifer**: Identify the likely principal aquifer system for the given location.
4.  **Groundwater Depth**: Estimate the depth to the groundwater level.
5.  **Local Rainfall**: Provide an estimated average annual rainfall for the location.
6.  **Runoff Generation**: Calculate the potential annual runoff. Use a runoff coefficient of 0.85 for a typical roof. Formula: Runoff (Liters) = Roof Area (m²) * Annual Rainfall (mm) * 0.85.
7.  **Structure Dimensions**: Recommend practical dimensions (length, width, depth in meters) for the suggested recharge structure. The dimensions should be reasonable for the available open space.
8.  **Cost-Benefit Analysis**: Provide a rough cost estimate for the structure in the local currency (or USD if local is unknown) and a brief cost-benefit analysis, highlighting potential water savings and long-term value.

Generate the JSON output now."#,
        location = profile.location,
        dwellers = profile.dwellers,
        roof_area = profile.roof_area_m2,
        open_space = profile.open_space_m2,
        soil_type = profile.soil_type,
    )
}

/// Parse the candidate text into a typed report. Structured-output mode
/// should return bare JSON, but a markdown fence is stripped if present.
fn parse_report(text: &str) -> crate::Result<AnalysisReport> {
    let cleaned = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(cleaned).map_err(|e| {
        error!("Gemini payload did not conform to report schema: {} | raw={}", e, text);
        ReportError::Analysis(ANALYSIS_FAILED_MESSAGE.to_string())
    })
}

//
// ================= Wire Types =================
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::{sample_profile, sample_report};

    #[test]
    fn test_prompt_embeds_every_input_field() {
        let profile = sample_profile();
        let prompt = build_prompt(&profile);

        assert!(prompt.contains("Austin, TX"));
        assert!(prompt.contains("Number of Dwellers: 4"));
        assert!(prompt.contains("Roof Area: 100 sq. meters"));
        assert!(prompt.contains("Available Open Space for recharge structures: 50 sq. meters"));
        assert!(prompt.contains("Predominant Soil Type: Sand"));
    }

    #[test]
    fn test_prompt_fixes_runoff_coefficient() {
        let prompt = build_prompt(&sample_profile());
        assert!(prompt.contains("runoff coefficient of 0.85"));
        assert!(prompt.contains("Roof Area (m²) * Annual Rainfall (mm) * 0.85"));
    }

    #[test]
    fn test_request_serializes_structured_output_mode() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "analyze".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: analysis_response_schema(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["generationConfig"]["responseSchema"]["properties"]["feasibility"]
            .is_object());
    }

    #[test]
    fn test_parse_report_accepts_bare_json() {
        let payload = serde_json::to_string(&sample_report()).unwrap();
        let report = parse_report(&payload).unwrap();
        assert_eq!(report, sample_report());
    }

    #[test]
    fn test_parse_report_strips_markdown_fence() {
        let payload = format!(
            "```json\n{}\n```",
            serde_json::to_string(&sample_report()).unwrap()
        );
        let report = parse_report(&payload).unwrap();
        assert_eq!(report.suggested_structure.structure_type, "Recharge Pit");
    }

    #[test]
    fn test_parse_report_rejects_non_conformant_payload() {
        let err = parse_report(r#"{"feasibility": {"status": "ok"}}"#).unwrap_err();
        match err {
            ReportError::Analysis(msg) => assert_eq!(msg, ANALYSIS_FAILED_MESSAGE),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_maps_transport_failure_to_generic_message() {
        // Port 9 is discard; nothing listens there in the test environment.
        let client = GeminiClient::with_base_url(
            "test-key".to_string(),
            "http://127.0.0.1:9/v1beta/models/gemini-2.5-flash:generateContent".to_string(),
        );

        let err = client.analyze(&sample_profile()).await.unwrap_err();
        match err {
            ReportError::Analysis(msg) => assert_eq!(msg, ANALYSIS_FAILED_MESSAGE),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
