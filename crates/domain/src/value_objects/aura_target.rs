//! Entity filter for an aura: every entity, or an explicit id set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{DomainError, EntityId};

/// Which entities an aura applies to.
///
/// # Invariants
///
/// - `Entities` is never empty
/// - `Entities` never contains [`EntityId::WILDCARD`]; a set containing it
///   is normalized to `All`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EntityId>", into = "Vec<EntityId>")]
pub enum AuraTarget {
    All,
    Entities(BTreeSet<EntityId>),
}

impl AuraTarget {
    /// Build a target from explicit ids.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `ids` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mystery_encounters_domain::value_objects::AuraTarget;
    /// use mystery_encounters_domain::EntityId;
    ///
    /// let one = AuraTarget::entities([EntityId::new(7)]).unwrap();
    /// assert!(one.includes(EntityId::new(7)));
    ///
    /// let everyone = AuraTarget::entities([EntityId::WILDCARD]).unwrap();
    /// assert_eq!(everyone, AuraTarget::All);
    ///
    /// assert!(AuraTarget::entities(Vec::<EntityId>::new()).is_err());
    /// ```
    pub fn entities(ids: impl IntoIterator<Item = EntityId>) -> Result<Self, DomainError> {
        let ids: BTreeSet<EntityId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Err(DomainError::validation("Aura target set cannot be empty"));
        }
        if ids.iter().any(|id| id.is_wildcard()) {
            return Ok(Self::All);
        }
        Ok(Self::Entities(ids))
    }

    /// Convenience over raw host ids (`0` is the wildcard).
    pub fn from_raw(ids: &[u32]) -> Result<Self, DomainError> {
        Self::entities(ids.iter().copied().map(EntityId::new))
    }

    pub fn single(id: EntityId) -> Self {
        if id.is_wildcard() {
            Self::All
        } else {
            Self::Entities(BTreeSet::from([id]))
        }
    }

    pub fn includes(&self, entity: EntityId) -> bool {
        match self {
            Self::All => true,
            Self::Entities(ids) => ids.contains(&entity),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<AuraTarget> for Vec<EntityId> {
    fn from(target: AuraTarget) -> Self {
        match target {
            AuraTarget::All => vec![EntityId::WILDCARD],
            AuraTarget::Entities(ids) => ids.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<EntityId>> for AuraTarget {
    type Error = DomainError;

    fn try_from(ids: Vec<EntityId>) -> Result<Self, Self::Error> {
        Self::entities(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_ids_only_include_listed_entities() {
        let target = AuraTarget::from_raw(&[3, 7]).unwrap();
        assert!(target.includes(EntityId::new(3)));
        assert!(target.includes(EntityId::new(7)));
        assert!(!target.includes(EntityId::new(4)));
        assert!(!target.is_all());
    }

    #[test]
    fn wildcard_anywhere_normalizes_to_all() {
        let target = AuraTarget::from_raw(&[5, 0]).unwrap();
        assert_eq!(target, AuraTarget::All);
        assert!(target.includes(EntityId::new(12345)));
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = AuraTarget::from_raw(&[]).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn serializes_as_id_list() {
        assert_eq!(serde_json::to_string(&AuraTarget::All).unwrap(), "[0]");
        let parsed: AuraTarget = serde_json::from_str("[9,2]").unwrap();
        assert_eq!(parsed, AuraTarget::from_raw(&[2, 9]).unwrap());
        assert!(serde_json::from_str::<AuraTarget>("[]").is_err());
    }
}
