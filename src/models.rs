//! Core data models for the RTRWH advisor
//!
//! `PropertyProfile` is what the user submits; `AnalysisReport` is what the
//! analysis provider returns. Report structs deserialize the provider payload
//! with every field required, so a non-conformant response fails at parse
//! time instead of rendering with holes.

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Input =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SoilType {
    Clay,
    Silt,
    Sand,
    #[default]
    Loam,
    Gravel,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Clay,
        SoilType::Silt,
        SoilType::Sand,
        SoilType::Loam,
        SoilType::Gravel,
    ];

    /// Infiltration note shown next to the soil name in the form options.
    pub fn infiltration_label(&self) -> &'static str {
        match self {
            SoilType::Clay => "Slow infiltration",
            SoilType::Silt => "Medium infiltration",
            SoilType::Sand => "Fast infiltration",
            SoilType::Loam => "Good infiltration",
            SoilType::Gravel => "Very fast infiltration",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SoilType::Clay => "Clay",
            SoilType::Silt => "Silt",
            SoilType::Sand => "Sand",
            SoilType::Loam => "Loam",
            SoilType::Gravel => "Gravel",
        };
        write!(f, "{}", s)
    }
}

/// Property attributes entered in the form. Numeric fields arrive fully
/// populated: the browser's native constraint validation (`required`,
/// `min="1"`) blocks submission while a field is blank, and the form
/// extractor rejects anything that bypasses it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyProfile {
    pub name: String,
    pub location: String,
    pub soil_type: SoilType,
    pub dwellers: u32,
    pub roof_area_m2: f64,
    pub open_space_m2: f64,
}

impl Default for PropertyProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            soil_type: SoilType::Loam,
            dwellers: 4,
            roof_area_m2: 100.0,
            open_space_m2: 50.0,
        }
    }
}

//
// ================= Report =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feasibility {
    pub status: String,
    /// Provider-generated rating, intended range 0-100. Passed through
    /// verbatim; no clamping.
    pub score: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedStructure {
    #[serde(rename = "type")]
    pub structure_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AquiferInfo {
    pub name: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroundwaterDepth {
    pub depth_meters: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalRainfall {
    pub annual_average_mm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunoffCapacity {
    pub liters_per_year: f64,
    /// Formula trace, e.g. "100 m² × 900 mm × 0.85 = 76,500 L".
    pub calculation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructureDimensions {
    #[serde(rename = "type")]
    pub structure_type: String,
    pub length_meters: f64,
    pub width_meters: f64,
    pub depth_meters: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalysis {
    pub estimated_cost: f64,
    /// Currency code, e.g. "USD", "INR".
    pub currency: String,
    pub benefit_analysis: String,
}

/// Full structured analysis returned by the provider. One report per
/// accepted submission; each new submission fully replaces the last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub feasibility: Feasibility,
    pub suggested_structure: SuggestedStructure,
    pub aquifer_info: AquiferInfo,
    pub groundwater_depth: GroundwaterDepth,
    pub local_rainfall: LocalRainfall,
    pub runoff_capacity: RunoffCapacity,
    pub structure_dimensions: StructureDimensions,
    pub cost_analysis: CostAnalysis,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_type_serde_names() {
        for soil in SoilType::ALL {
            let json = serde_json::to_string(&soil).unwrap();
            assert_eq!(json, format!("\"{}\"", soil));
            let back: SoilType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, soil);
        }
    }

    #[test]
    fn test_profile_defaults() {
        let profile = PropertyProfile::default();
        assert_eq!(profile.soil_type, SoilType::Loam);
        assert_eq!(profile.dwellers, 4);
        assert_eq!(profile.roof_area_m2, 100.0);
        assert_eq!(profile.open_space_m2, 50.0);
        assert!(profile.name.is_empty());
    }

    #[test]
    fn test_report_deserializes_camel_case_payload() {
        let payload = serde_json::json!({
            "feasibility": { "status": "Moderately Feasible", "score": 60, "reasoning": "ok" },
            "suggestedStructure": { "type": "Trench", "description": "suits loam" },
            "aquiferInfo": { "name": "Alluvial", "details": "shallow" },
            "groundwaterDepth": { "depthMeters": 12.5, "notes": "stable" },
            "localRainfall": { "annualAverageMm": 700 },
            "runoffCapacity": { "litersPerYear": 59500, "calculation": "100 × 700 × 0.85" },
            "structureDimensions": { "type": "Trench", "lengthMeters": 5, "widthMeters": 1, "depthMeters": 2 },
            "costAnalysis": { "estimatedCost": 900, "currency": "INR", "benefitAnalysis": "good" }
        });

        let report: AnalysisReport = serde_json::from_value(payload).unwrap();
        assert_eq!(report.suggested_structure.structure_type, "Trench");
        assert_eq!(report.runoff_capacity.liters_per_year, 59500.0);
        assert_eq!(report.cost_analysis.currency, "INR");
    }

    #[test]
    fn test_report_rejects_missing_sub_record() {
        let mut payload =
            serde_json::to_value(test_fixtures::sample_report()).unwrap();
        payload.as_object_mut().unwrap().remove("costAnalysis");

        let result: std::result::Result<AnalysisReport, _> =
            serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_rejects_mistyped_field() {
        let mut payload =
            serde_json::to_value(test_fixtures::sample_report()).unwrap();
        payload["localRainfall"]["annualAverageMm"] =
            serde_json::Value::String("a lot".to_string());

        let result: std::result::Result<AnalysisReport, _> =
            serde_json::from_value(payload);
        assert!(result.is_err());
    }
}
