//! HTML presentation for the advisor page
//!
//! Pure functions of `ReportState`: same state in, same markup out. Exactly
//! one of {loading indicator, error banner, report, placeholder} is emitted,
//! with loading taking precedence. All free text is escaped, both
//! user-supplied and provider-supplied.

use crate::controller::{ReportState, ReportStatus};
use crate::models::{AnalysisReport, PropertyProfile, SoilType};

/// Render the full page for the current state.
pub fn render_page(state: &ReportState) -> String {
    let outcome = match state.status {
        ReportStatus::Loading => render_loading(),
        ReportStatus::Failed => {
            render_error(state.error_message.as_deref().unwrap_or_default())
        }
        ReportStatus::Succeeded => match &state.result {
            Some(report) => render_report(report),
            None => render_placeholder(),
        },
        ReportStatus::Idle => render_placeholder(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>RTRWH Advisor</title>
</head>
<body>
<header><h1>Rooftop Rainwater Harvesting Advisor</h1></header>
<main>
{form}
{outcome}
</main>
</body>
</html>"#,
        form = render_form(&state.input, state.status),
        outcome = outcome,
    )
}

fn render_form(input: &PropertyProfile, status: ReportStatus) -> String {
    let loading = status == ReportStatus::Loading;
    let (disabled, label) = if loading {
        (" disabled", "Analyzing...")
    } else {
        ("", "Generate Report")
    };

    let soil_options: String = SoilType::ALL
        .iter()
        .map(|soil| {
            let selected = if *soil == input.soil_type { " selected" } else { "" };
            format!(
                "<option value=\"{soil}\"{selected}>{soil} ({note})</option>",
                soil = soil,
                selected = selected,
                note = soil.infiltration_label(),
            )
        })
        .collect();

    format!(
        r#"<section class="input-form">
<h2>Your Details</h2>
<p>Enter information about your property to generate a personalized rainwater harvesting report.</p>
<form method="post" action="/report">
<label for="name">Full Name</label>
<input type="text" id="name" name="name" value="{name}" placeholder="e.g., Jane Doe" required>
<label for="location">Location</label>
<input type="text" id="location" name="location" value="{location}" placeholder="City, State/Country" required>
<label for="soilType">Predominant Soil Type</label>
<select id="soilType" name="soilType">{soil_options}</select>
<label for="dwellers">Number of Dwellers</label>
<input type="number" id="dwellers" name="dwellers" value="{dwellers}" placeholder="e.g., 4" required min="1">
<label for="roofArea">Roof Area (m²)</label>
<input type="number" id="roofArea" name="roofArea" value="{roof_area}" placeholder="e.g., 100" required min="1">
<label for="openSpace">Available Open Space (m²)</label>
<input type="number" id="openSpace" name="openSpace" value="{open_space}" placeholder="e.g., 50" required min="1">
<button type="submit"{disabled}>{label}</button>
</form>
</section>"#,
        name = escape_html(&input.name),
        location = escape_html(&input.location),
        soil_options = soil_options,
        dwellers = input.dwellers,
        roof_area = format_quantity(input.roof_area_m2),
        open_space = format_quantity(input.open_space_m2),
        disabled = disabled,
        label = label,
    )
}

fn render_loading() -> String {
    r#"<section class="loading-indicator">
<p>Analyzing your data...</p>
<p>This may take a moment.</p>
</section>"#
        .to_string()
}

fn render_error(message: &str) -> String {
    format!(
        r#"<section class="error-banner" role="alert">
<strong>Error:</strong> <span>{}</span>
</section>"#,
        escape_html(message)
    )
}

fn render_placeholder() -> String {
    r#"<section class="placeholder">
<h2>Ready for Your Analysis</h2>
<p>Fill out the form to get started. Your personalized rainwater harvesting report will appear here.</p>
</section>"#
        .to_string()
}

fn render_report(report: &AnalysisReport) -> String {
    format!(
        r#"<section class="report">
<h2>Your Rainwater Harvesting Analysis</h2>
<article class="card feasibility">
<h3>Feasibility: {feasibility_status}</h3>
<p>Score: {score} / 100</p>
<p>{reasoning}</p>
</article>
<article class="card runoff">
<h3>Runoff Capacity</h3>
<p>{liters} Liters/Year</p>
<p>{calculation}</p>
</article>
<article class="card rainfall">
<h3>Local Rainfall</h3>
<p>{rainfall} mm/Year</p>
</article>
<article class="card structure">
<h3>Suggested Structure</h3>
<p>{structure_type}</p>
<p>{structure_description}</p>
</article>
<article class="card dimensions">
<h3>Recommended Dimensions</h3>
<p>{dim_type}</p>
<p>Length: {length} m, Width: {width} m, Depth: {dim_depth} m</p>
</article>
<article class="card cost">
<h3>Cost Estimate</h3>
<p>{currency} {cost}</p>
</article>
<article class="card benefit">
<h3>Cost-Benefit Analysis</h3>
<p>{benefit}</p>
</article>
<article class="card aquifer">
<h3>Principal Aquifer</h3>
<p>{aquifer_name}</p>
<p>{aquifer_details}</p>
</article>
<article class="card groundwater">
<h3>Groundwater Depth</h3>
<p>{depth} m</p>
<p>{depth_notes}</p>
</article>
</section>"#,
        feasibility_status = escape_html(&report.feasibility.status),
        score = format_quantity(report.feasibility.score),
        reasoning = escape_html(&report.feasibility.reasoning),
        liters = format_thousands(report.runoff_capacity.liters_per_year),
        calculation = escape_html(&report.runoff_capacity.calculation),
        rainfall = format_quantity(report.local_rainfall.annual_average_mm),
        structure_type = escape_html(&report.suggested_structure.structure_type),
        structure_description = escape_html(&report.suggested_structure.description),
        dim_type = escape_html(&report.structure_dimensions.structure_type),
        length = format_quantity(report.structure_dimensions.length_meters),
        width = format_quantity(report.structure_dimensions.width_meters),
        dim_depth = format_quantity(report.structure_dimensions.depth_meters),
        currency = escape_html(&report.cost_analysis.currency),
        cost = format_thousands(report.cost_analysis.estimated_cost),
        benefit = escape_html(&report.cost_analysis.benefit_analysis),
        aquifer_name = escape_html(&report.aquifer_info.name),
        aquifer_details = escape_html(&report.aquifer_info.details),
        depth = format_quantity(report.groundwater_depth.depth_meters),
        depth_notes = escape_html(&report.groundwater_depth.notes),
    )
}

/// Escape text for safe interpolation into HTML content and attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a numeric value without a trailing ".0" for whole numbers.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Whole-number display with comma separators, e.g. 73100 -> "73,100".
fn format_thousands(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
