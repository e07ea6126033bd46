//! Static attribute schema of the source design tool.
//!
//! Each entity field is bound to exactly one attribute key. Values of the
//! wrong type leave the field unset rather than failing the record.

use std::collections::HashSet;

use dh_core::{kw, kwh, m, m2, mm, unitless};

use crate::entity::{Building, Pipe};
use crate::record::AttrValue;

pub const ID: &str = "id";
pub const IN_SOLUTION: &str = "solution/included";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Duplicate attribute key '{key}' in {context} schema")]
    DuplicateKey { key: &'static str, context: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeField {
    Id,
    Start,
    End,
    Diameter,
    Length,
    Capacity,
    Diversity,
}

impl PipeField {
    pub const ALL: [PipeField; 7] = [
        PipeField::Id,
        PipeField::Start,
        PipeField::End,
        PipeField::Diameter,
        PipeField::Length,
        PipeField::Capacity,
        PipeField::Diversity,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            PipeField::Id => ID,
            PipeField::Start => "path/start",
            PipeField::End => "path/end",
            PipeField::Diameter => "solution/diameter-mm",
            PipeField::Length => "path/length",
            PipeField::Capacity => "solution/capacity-kw",
            PipeField::Diversity => "solution/diversity",
        }
    }

    pub fn apply(self, pipe: &mut Pipe, value: &AttrValue) {
        match self {
            PipeField::Id => pipe.feature_id = value.as_ident(),
            PipeField::Start => pipe.start_label = value.as_ident(),
            PipeField::End => pipe.end_label = value.as_ident(),
            PipeField::Diameter => pipe.diameter = value.as_number().map(mm),
            PipeField::Length => pipe.length = value.as_number().map(m),
            PipeField::Capacity => pipe.capacity = value.as_number().map(kw),
            PipeField::Diversity => pipe.diversity = value.as_number().map(unitless),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingField {
    Id,
    AreaRoof,
    AreaGround,
    DemandCapHeat,
    DemandCapCooling,
    DemandConsHeat,
    DemandConsCooling,
    Height,
    Category,
    SupplyCapacity,
}

impl BuildingField {
    pub const ALL: [BuildingField; 10] = [
        BuildingField::Id,
        BuildingField::AreaRoof,
        BuildingField::AreaGround,
        BuildingField::DemandCapHeat,
        BuildingField::DemandCapCooling,
        BuildingField::DemandConsHeat,
        BuildingField::DemandConsCooling,
        BuildingField::Height,
        BuildingField::Category,
        BuildingField::SupplyCapacity,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            BuildingField::Id => ID,
            BuildingField::AreaRoof => "candidate/roof-area",
            BuildingField::AreaGround => "candidate/ground-area",
            BuildingField::DemandCapHeat => "demand/kwp",
            BuildingField::DemandCapCooling => "cooling/kwp",
            BuildingField::DemandConsHeat => "demand/kwh",
            BuildingField::DemandConsCooling => "cooling/kwh",
            BuildingField::Height => "candidate/user-fields Height",
            BuildingField::Category => "candidate/user-fields Category",
            BuildingField::SupplyCapacity => "supply/capacity-kwp",
        }
    }

    pub fn apply(self, building: &mut Building, value: &AttrValue) {
        match self {
            BuildingField::Id => building.feature_id = value.as_ident(),
            BuildingField::AreaRoof => building.area_roof = value.as_number().map(m2),
            BuildingField::AreaGround => building.area_ground = value.as_number().map(m2),
            BuildingField::DemandCapHeat => building.demand_cap_heat = value.as_number().map(kw),
            BuildingField::DemandCapCooling => {
                building.demand_cap_cooling = value.as_number().map(kw)
            }
            BuildingField::DemandConsHeat => {
                building.demand_cons_heat = value.as_number().map(kwh)
            }
            BuildingField::DemandConsCooling => {
                building.demand_cons_cooling = value.as_number().map(kwh)
            }
            BuildingField::Height => building.height = value.as_number().map(m),
            BuildingField::Category => building.category = value.as_text().map(str::to_string),
            BuildingField::SupplyCapacity => {
                building.supply_capacity = value.as_number().map(kw)
            }
        }
    }
}

/// Check that no attribute key is bound twice within an entity schema.
pub fn validate_schema() -> Result<(), SchemaError> {
    check_unique(PipeField::ALL.iter().map(|f| f.key()), "pipe")?;
    check_unique(BuildingField::ALL.iter().map(|f| f.key()), "building")?;
    Ok(())
}

fn check_unique(
    keys: impl Iterator<Item = &'static str>,
    context: &'static str,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(SchemaError::DuplicateKey { key, context });
        }
    }
    Ok(())
}
