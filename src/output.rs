//! Rendering of analysis outcomes.

use std::io::Write;

use colored::*;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::analysis::{AnalysisOutcome, AnalysisResult};
use crate::catalog::CABLE_CATALOG;
use crate::cli::OutputFormat;
use crate::config::Preset;
use crate::units::format_feet_inches_tick_marks;

pub trait OutputWriter {
    fn write_outcome(&mut self, outcome: &AnalysisOutcome) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_outcome(&mut self, outcome: &AnalysisOutcome) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(outcome)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_outcome(&mut self, outcome: &AnalysisOutcome) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Pole Attachment Analysis".bold().blue())?;
        writeln!(self.writer, "{}", "========================".blue())?;
        writeln!(self.writer)?;

        if !outcome.ok {
            writeln!(self.writer, "{}", "Analysis failed".red().bold())?;
            for (field, message) in &outcome.errors {
                writeln!(self.writer, "  {}: {}", field.yellow(), message)?;
            }
            return Ok(());
        }

        if let Some(result) = &outcome.results {
            writeln!(self.writer, "{}", summary_table(result))?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", clearance_table(result))?;
            writeln!(self.writer)?;
            if !result.make_ready_lines.is_empty() {
                writeln!(self.writer, "{}", make_ready_table(result))?;
                writeln!(self.writer)?;
            }
        }

        write_list(&mut self.writer, &"Warnings".yellow().bold(), &outcome.warnings)?;
        write_list(&mut self.writer, &"Notes".bold(), &outcome.notes)?;
        if let Some(cost) = outcome.cost {
            writeln!(self.writer, "{} ${:.2}", "Estimated cost:".bold(), cost)?;
        }
        Ok(())
    }
}

fn write_list<W: Write>(writer: &mut W, title: &ColoredString, items: &[String]) -> anyhow::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{}:", title)?;
    for item in items {
        writeln!(writer, "  - {}", item)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn summary_table(result: &AnalysisResult) -> Table {
    let mut table = new_table(&["Item", "Value"]);
    let attach = &result.attach;
    table.add_row(vec![
        "Pole above ground".to_string(),
        format_feet_inches_tick_marks(result.pole.above_ground_ft),
    ]);
    table.add_row(vec![
        "Proposed attachment".to_string(),
        attach.proposed_attach_fmt.clone(),
    ]);
    table.add_row(vec![
        "Basis".to_string(),
        format!("{} ({})", attach.recommendation.basis, attach.recommendation.detail),
    ]);
    table.add_row(vec![
        "Controlling".to_string(),
        format!(
            "{} at {}",
            attach.recommendation.controlling.name,
            format_feet_inches_tick_marks(attach.recommendation.controlling.height_ft)
        ),
    ]);
    table.add_row(vec![
        "Separation".to_string(),
        format!(
            "{}in{}",
            attach.effective_separation_inches,
            if attach.first_energy { " (FirstEnergy)" } else { "" }
        ),
    ]);
    table.add_row(vec!["Cable".to_string(), result.cable.name.to_string()]);
    if let Some(span) = &result.span {
        table.add_row(vec![
            "Span".to_string(),
            format!("{:.0}ft at {:.0} mph", span.span_ft, span.wind),
        ]);
        table.add_row(vec!["Sag".to_string(), span.sag_fmt.clone()]);
        table.add_row(vec!["Midspan".to_string(), span.midspan_fmt.clone()]);
    }
    if let Some(guy) = &result.guy {
        let status = if guy.required { "required" } else { "not required" };
        table.add_row(vec![
            "Down guy".to_string(),
            format!("{} ({:.0} lb)", status, guy.tension),
        ]);
    }
    table
}

fn clearance_table(result: &AnalysisResult) -> Table {
    let c = &result.clearances;
    let mut table = new_table(&["Clearance", "Required"]);
    let rows = [
        ("Ground", c.ground_clearance),
        ("Road", c.road_clearance),
        ("Comm to power (distribution)", c.power_clearance_distribution),
        ("Comm to power (transmission)", c.power_clearance_transmission),
        ("Pole-top space", c.minimum_pole_top_space),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), format_feet_inches_tick_marks(value)]);
    }
    table
}

fn make_ready_table(result: &AnalysisResult) -> Table {
    let mut table = new_table(&["Line", "Owner", "Existing", "After", "Gap (in)", "Cost"]);
    for line in &result.make_ready_lines {
        table.add_row(vec![
            line.line_type.clone(),
            line.company_name.clone(),
            format_feet_inches_tick_marks(line.original_ft),
            format_feet_inches_tick_marks(line.new_ft),
            format!("{:.1}", line.pole_gap_in),
            format!("${:.2}", line.cost),
        ]);
    }
    table
}

fn optional_ft(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_feet_inches_tick_marks)
}

/// Every known preset and the fields it sets.
pub fn presets_table() -> Table {
    let mut table = new_table(&["Preset", "Name", "FirstEnergy", "Top space", "Road", "Comm to power"]);
    for preset in Preset::ALL {
        let rules = preset.rules();
        table.add_row(vec![
            preset.as_str().to_string(),
            preset.display_name().to_string(),
            if preset.is_first_energy_family() { "yes" } else { "no" }.to_string(),
            optional_ft(rules.min_top_space_ft),
            optional_ft(rules.road_clearance_ft),
            optional_ft(rules.comm_to_power_ft),
        ]);
    }
    table
}

pub fn cables_table() -> Table {
    let mut table = new_table(&["Key", "Name", "Diameter (in)", "Weight (lb/ft)", "Rated tension (lb)"]);
    for cable in CABLE_CATALOG {
        table.add_row(vec![
            cable.key.to_string(),
            cable.name.to_string(),
            format!("{:.3}", cable.diameter_in),
            format!("{:.3}", cable.weight_lb_per_ft),
            format!("{:.0}", cable.rated_tension_lb),
        ]);
    }
    table
}

pub fn create_writer(format: OutputFormat, sink: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compute_analysis, AnalysisInput};

    fn outcome() -> AnalysisOutcome {
        compute_analysis(&AnalysisInput {
            existing_power_height: Some("35ft".into()),
            ..AnalysisInput::new(40.0)
        })
    }

    #[test]
    fn json_writer_emits_camel_case_outcome() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_outcome(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["ok"], true);
        assert!(value["results"]["attach"]["proposedAttachFt"].is_number());
        assert_eq!(value["results"]["attach"]["recommendation"]["basis"], "NESC");
    }

    #[test]
    fn terminal_writer_renders_tables() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer).write_outcome(&outcome()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Proposed attachment"));
        assert!(text.contains("31' 8\""));
        assert!(text.contains("Pole-top space"));
    }

    #[test]
    fn catalog_tables_list_every_entry() {
        let presets = presets_table().to_string();
        assert!(presets.contains("firstEnergy"));
        assert!(presets.contains("JCP&L"));
        let cables = cables_table().to_string();
        assert!(cables.contains("adss-48"));
        assert!(cables.contains("11200"));
    }

    #[test]
    fn terminal_writer_lists_errors() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_outcome(&compute_analysis(&AnalysisInput::default()))
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("poleHeight"));
    }
}
