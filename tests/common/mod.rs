// Test utility module for polecalc integration tests
#![allow(dead_code)]

use polecalc::analysis::AnalysisInput;
use polecalc::core::{ExistingLine, SpanEnvironment, VoltageClass};
use polecalc::units::HeightValue;

/// Builder over [`AnalysisInput`] for the common job shapes.
#[derive(Debug, Clone)]
pub struct JobBuilder {
    input: AnalysisInput,
}

impl JobBuilder {
    /// Existing distribution pole with power at `power`.
    pub fn existing_pole(pole_height: impl Into<HeightValue>, power: impl Into<HeightValue>) -> Self {
        Self {
            input: AnalysisInput {
                existing_power_height: Some(power.into()),
                voltage_class: Some(VoltageClass::Distribution),
                ..AnalysisInput::new(pole_height)
            },
        }
    }

    pub fn new_construction(pole_height: impl Into<HeightValue>) -> Self {
        Self {
            input: AnalysisInput {
                is_new_construction: true,
                ..AnalysisInput::new(pole_height)
            },
        }
    }

    pub fn voltage(mut self, voltage: VoltageClass) -> Self {
        self.input.voltage_class = Some(voltage);
        self
    }

    pub fn environment(mut self, environment: SpanEnvironment) -> Self {
        self.input.span_environment = Some(environment);
        self
    }

    /// Span to an adjacent pole of the given height.
    pub fn span(mut self, span_ft: f64, adjacent_pole_height: impl Into<HeightValue>) -> Self {
        self.input.span_distance = Some(HeightValue::from(span_ft));
        self.input.adjacent_pole_height = Some(adjacent_pole_height.into());
        self
    }

    pub fn wind(mut self, mph: f64) -> Self {
        self.input.wind_speed = Some(mph);
        self
    }

    pub fn cable(mut self, key: &str) -> Self {
        self.input.cable_type = Some(key.to_string());
        self
    }

    pub fn preset(mut self, name: &str) -> Self {
        self.input.preset = Some(name.to_string());
        self
    }

    pub fn line(mut self, line: ExistingLine) -> Self {
        self.input.existing_lines.push(line);
        self
    }

    pub fn with(mut self, f: impl FnOnce(&mut AnalysisInput)) -> Self {
        f(&mut self.input);
        self
    }

    pub fn build(self) -> AnalysisInput {
        self.input
    }
}

/// 40ft FirstEnergy pole on a 150ft road span with one comm line moved
/// down a foot.
pub fn first_energy_road_job() -> AnalysisInput {
    JobBuilder::existing_pole(40.0, "35ft 0in")
        .environment(SpanEnvironment::Road)
        .span(150.0, 40.0)
        .line(
            ExistingLine::new("communication", "27ft 0in")
                .with_company("FirstEnergy")
                .with_make_ready("26ft 0in"),
        )
        .build()
}
