use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::status::{PropertyStatus, PropertyType};
use crate::types::{EntityId, EntityKind, Money};

/// A managed building or complex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub units: u32,
    pub vacant_units: u32,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub monthly_rent: Money,
}

impl Property {
    pub fn occupied_units(&self) -> u32 {
        self.units.saturating_sub(self.vacant_units)
    }

    /// Occupied share of units as a percentage. A property with no units
    /// reports 0 rather than NaN.
    pub fn occupancy_rate(&self) -> f64 {
        if self.units == 0 {
            return 0.0;
        }
        f64::from(self.occupied_units()) / f64::from(self.units) * 100.0
    }
}

impl Record for Property {
    const KIND: EntityKind = EntityKind::Property;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(units: u32, vacant_units: u32) -> Property {
        Property {
            id: "P900".into(),
            name: "Test Tower".into(),
            address: "1 Test St".into(),
            city: "Hilo".into(),
            units,
            vacant_units,
            property_type: PropertyType::Residential,
            status: PropertyStatus::Active,
            monthly_rent: 2000,
        }
    }

    #[test]
    fn occupancy_rate_is_percentage_of_occupied_units() {
        let p = property(24, 2);
        assert_eq!(p.occupied_units(), 22);
        assert!((p.occupancy_rate() - 91.666_666).abs() < 0.001);
    }

    #[test]
    fn occupancy_rate_of_empty_property_is_zero() {
        assert_eq!(property(0, 0).occupancy_rate(), 0.0);
    }

    #[test]
    fn type_field_uses_reserved_name_on_the_wire() {
        let json = serde_json::to_value(property(1, 0)).unwrap();
        assert_eq!(json["type"], "Residential");
        assert_eq!(json["vacantUnits"], 0);
    }
}
