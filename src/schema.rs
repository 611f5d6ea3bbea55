//! Declarative output schema for the analysis provider
//!
//! Sent with every structured-output request so Gemini is constrained to the
//! exact shape of [`crate::models::AnalysisReport`]. Field names, types, and
//! required lists here must stay in lockstep with the serde definitions in
//! `models.rs`.

use serde_json::{json, Value};

/// Gemini `responseSchema` mirroring `AnalysisReport`.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "feasibility": {
                "type": "OBJECT",
                "properties": {
                    "status": { "type": "STRING", "description": "e.g., 'Highly Feasible', 'Moderately Feasible', 'Not Feasible'" },
                    "score": { "type": "NUMBER", "description": "A score from 0 to 100 representing feasibility." },
                    "reasoning": { "type": "STRING", "description": "A brief explanation for the feasibility status." }
                },
                "required": ["status", "score", "reasoning"]
            },
            "suggestedStructure": {
                "type": "OBJECT",
                "properties": {
                    "type": { "type": "STRING", "description": "e.g., 'Recharge Pit', 'Trench', 'Shaft', 'Storage Tank'" },
                    "description": { "type": "STRING", "description": "Brief description and suitability for the user's context." }
                },
                "required": ["type", "description"]
            },
            "aquiferInfo": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "Name of the principal aquifer in the specified location." },
                    "details": { "type": "STRING", "description": "Geological details about the aquifer." }
                },
                "required": ["name", "details"]
            },
            "groundwaterDepth": {
                "type": "OBJECT",
                "properties": {
                    "depthMeters": { "type": "NUMBER", "description": "Estimated depth to groundwater level in meters." },
                    "notes": { "type": "STRING", "description": "Any notes about seasonal variation or local factors." }
                },
                "required": ["depthMeters", "notes"]
            },
            "localRainfall": {
                "type": "OBJECT",
                "properties": {
                    "annualAverageMm": { "type": "NUMBER", "description": "Average annual rainfall in millimeters for the location." }
                },
                "required": ["annualAverageMm"]
            },
            "runoffCapacity": {
                "type": "OBJECT",
                "properties": {
                    "litersPerYear": { "type": "NUMBER", "description": "Total potential rainwater runoff in liters per year." },
                    "calculation": { "type": "STRING", "description": "Formula used: Roof Area (sq.m) * Annual Rainfall (mm) * Runoff Coefficient (0.85)." }
                },
                "required": ["litersPerYear", "calculation"]
            },
            "structureDimensions": {
                "type": "OBJECT",
                "properties": {
                    "type": { "type": "STRING", "description": "The type of structure for which dimensions are provided." },
                    "lengthMeters": { "type": "NUMBER", "description": "Recommended length in meters." },
                    "widthMeters": { "type": "NUMBER", "description": "Recommended width in meters." },
                    "depthMeters": { "type": "NUMBER", "description": "Recommended depth in meters." }
                },
                "required": ["type", "lengthMeters", "widthMeters", "depthMeters"]
            },
            "costAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "estimatedCost": { "type": "NUMBER", "description": "An estimated cost for implementing the suggested structure." },
                    "currency": { "type": "STRING", "description": "Currency, e.g., USD, INR." },
                    "benefitAnalysis": { "type": "STRING", "description": "A summary of the cost-benefit analysis and long-term savings." }
                },
                "required": ["estimatedCost", "currency", "benefitAnalysis"]
            }
        },
        "required": [
            "feasibility", "suggestedStructure", "aquiferInfo", "groundwaterDepth",
            "localRainfall", "runoffCapacity", "structureDimensions", "costAnalysis"
        ]
    })
}
