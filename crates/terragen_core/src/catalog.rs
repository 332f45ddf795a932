//! Resource catalog and the tier assigner.
//!
//! The catalog is an explicit, injected lookup table from map identity to
//! resource pools - there is no global resource enumeration in the
//! pipeline. Common tiers index the identity's two-slot common pool;
//! elite tiers yield the identity's designated rare resource. An identity
//! without a catalog entry is a hard configuration error, never a silent
//! default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifiedMap;
use crate::error::{Result, TerragenError};
use crate::identity::MapIdentity;
use crate::thresholds::Tier;

/// Wire identifier for a concrete resource.
///
/// Ids are nonzero by construction; the registry convention reserves 0
/// for the NULL slot, which the encoder reuses as the empty sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(u8);

impl ResourceId {
    /// Create a resource id; `None` for the reserved 0 slot.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(Self(id))
        }
    }

    /// The raw wire id.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Well-known resource ids from the shipped registry.
pub mod resources {
    use super::ResourceId;

    /// Iron.
    pub const IRON: ResourceId = ResourceId(1);
    /// Copper.
    pub const COPPER: ResourceId = ResourceId(2);
    /// Lithium.
    pub const LITHIUM: ResourceId = ResourceId(3);
    /// Titanium.
    pub const TITANIUM: ResourceId = ResourceId(4);
    /// Iridium.
    pub const IRIDIUM: ResourceId = ResourceId(5);
    /// Kimberlite.
    pub const KIMBERLITE: ResourceId = ResourceId(6);
    /// Platinum.
    pub const PLATINUM: ResourceId = ResourceId(7);
}

/// Resource pools for one map identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// One resource per common tier, in tier order.
    pub common: [ResourceId; 2],
    /// The rare resource elite tiers yield.
    pub rare: ResourceId,
}

/// Injected lookup table resolving (identity, tier) to a resource.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    entries: HashMap<MapIdentity, PoolEntry>,
}

impl ResourceCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register the pools for an identity, replacing any previous entry.
    pub fn register(&mut self, identity: MapIdentity, entry: PoolEntry) {
        self.entries.insert(identity, entry);
    }

    /// Catalog mirroring the shipped registry: iron/copper commons
    /// everywhere; the rare resource is the identity's namesake, or
    /// kimberlite (the reserve resource) for maps without one.
    #[must_use]
    pub fn shipped() -> Self {
        use resources::{COPPER, IRIDIUM, IRON, KIMBERLITE, PLATINUM, TITANIUM};

        let mut catalog = Self::new();
        for identity in MapIdentity::ALL {
            let rare = match identity {
                MapIdentity::Kimberlite => KIMBERLITE,
                MapIdentity::Iridium => IRIDIUM,
                MapIdentity::Platinum => PLATINUM,
                MapIdentity::Titanium => TITANIUM,
                MapIdentity::Primary | MapIdentity::Wormhole | MapIdentity::Common => KIMBERLITE,
            };
            catalog.register(
                identity,
                PoolEntry {
                    common: [IRON, COPPER],
                    rare,
                },
            );
        }
        catalog
    }

    /// Resolve the resource for a tier on a map.
    ///
    /// # Errors
    ///
    /// Returns [`TerragenError::UnmappedTier`] when the identity has no
    /// catalog entry.
    pub fn resolve(&self, identity: MapIdentity, tier: Tier) -> Result<ResourceId> {
        let entry = self
            .entries
            .get(&identity)
            .ok_or(TerragenError::UnmappedTier { identity, tier })?;

        Ok(match tier {
            Tier::Common1 => entry.common[0],
            Tier::Common2 => entry.common[1],
            _ => entry.rare,
        })
    }
}

/// Reserve amount for a classified tier.
#[must_use]
pub const fn reserve_for(tier: Tier, base_reserve: u64) -> u64 {
    base_reserve * (tier.rank() as u64 + 1)
}

/// Resolve every classified cell's resource and reserve in place.
///
/// # Errors
///
/// Returns [`TerragenError::UnmappedTier`] on the first cell whose tier
/// cannot be resolved for the map's identity.
pub fn assign_resources(
    map: &mut ClassifiedMap,
    catalog: &ResourceCatalog,
    base_reserve: u64,
) -> Result<()> {
    let identity = map.identity();
    for cell in map.cells_mut() {
        if let Some(tier) = cell.tier {
            cell.resource = Some(catalog.resolve(identity, tier)?);
            cell.reserve = reserve_for(tier, base_reserve);
        }
    }
    Ok(())
}
