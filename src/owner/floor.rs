//! Owner separation floor.
//!
//! The floor is a decision table over (ownership signal, voltage class).
//! Every combination is listed so precedence is visible at a glance.

use serde::Serialize;
use tracing::debug;

use super::classify::OwnershipSignal;
use crate::config::nesc::ClearanceTable;
use crate::core::VoltageClass;
use crate::units::feet_to_inches;

/// Minimum comm-to-power separation an owner imposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SeparationFloor {
    /// Keep the resolved transmission separation as-is
    BaselineTransmission,
    Fixed { inches: f64 },
}

pub fn separation_floor(signal: OwnershipSignal, voltage: VoltageClass) -> SeparationFloor {
    use OwnershipSignal::{FirstEnergy, Generic};
    use VoltageClass::{Communication, Distribution, Transmission};

    match (signal, voltage) {
        (FirstEnergy, Transmission) => SeparationFloor::BaselineTransmission,
        (Generic, Transmission) => SeparationFloor::BaselineTransmission,
        (FirstEnergy, Distribution) => SeparationFloor::Fixed { inches: 44.0 },
        (FirstEnergy, Communication) => SeparationFloor::Fixed { inches: 44.0 },
        (Generic, Distribution) => SeparationFloor::Fixed { inches: 40.0 },
        (Generic, Communication) => SeparationFloor::Fixed { inches: 40.0 },
    }
}

/// Separation the new attachment must keep below the controlling conductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSeparation {
    pub base_ft: f64,
    pub owner_floor_ft: f64,
    pub effective_ft: f64,
    pub effective_inches: i64,
}

pub fn effective_separation(
    signal: OwnershipSignal,
    voltage: VoltageClass,
    clearances: &ClearanceTable,
) -> EffectiveSeparation {
    let base_ft = clearances.base_separation_ft(voltage);
    let owner_floor_ft = match separation_floor(signal, voltage) {
        SeparationFloor::BaselineTransmission => clearances.power_clearance_transmission,
        SeparationFloor::Fixed { inches } => inches / 12.0,
    };
    let effective_ft = base_ft.max(owner_floor_ft);
    let separation = EffectiveSeparation {
        base_ft,
        owner_floor_ft,
        effective_ft,
        effective_inches: feet_to_inches(effective_ft),
    };
    debug!(?signal, %voltage, ?separation, "effective separation");
    separation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::nesc::get_nesc_clearances;
    use crate::core::SpanEnvironment;

    fn table(voltage: VoltageClass) -> ClearanceTable {
        get_nesc_clearances(voltage, SpanEnvironment::Road)
    }

    #[test]
    fn first_energy_distribution_is_44_inches() {
        let sep = effective_separation(
            OwnershipSignal::FirstEnergy,
            VoltageClass::Distribution,
            &table(VoltageClass::Distribution),
        );
        assert_eq!(sep.effective_inches, 44);
    }

    #[test]
    fn generic_distribution_is_40_inches() {
        let sep = effective_separation(
            OwnershipSignal::Generic,
            VoltageClass::Distribution,
            &table(VoltageClass::Distribution),
        );
        assert_eq!(sep.effective_inches, 40);
    }

    #[test]
    fn transmission_keeps_baseline_for_every_owner() {
        for signal in [OwnershipSignal::FirstEnergy, OwnershipSignal::Generic] {
            let sep = effective_separation(
                signal,
                VoltageClass::Transmission,
                &table(VoltageClass::Transmission),
            );
            assert_eq!(sep.effective_ft, 10.0);
            assert_eq!(sep.effective_inches, 120);
        }
    }

    #[test]
    fn larger_base_separation_wins_over_floor() {
        let mut t = table(VoltageClass::Distribution);
        t.power_clearance_distribution = 4.0;
        let sep = effective_separation(OwnershipSignal::FirstEnergy, VoltageClass::Distribution, &t);
        assert_eq!(sep.effective_inches, 48);
        assert_eq!(sep.base_ft, 4.0);
    }

    #[test]
    fn floor_is_not_lowered_by_custom_base() {
        let mut t = table(VoltageClass::Distribution);
        t.power_clearance_distribution = 30.0 / 12.0;
        let sep = effective_separation(OwnershipSignal::FirstEnergy, VoltageClass::Distribution, &t);
        assert_eq!(sep.effective_inches, 44);
    }
}
