//! Localized display names for the closed category sets.
//!
//! Every category has a canonical key (the column or value name used by the
//! UNHCR tables) and a Spanish label shown to the user. The forward direction is
//! an exhaustive match on the enum; [`LabelDictionary`] fixes the display order
//! and refuses to exist if two categories share a key or a label.

use crate::types::{Continent, PetitionType, PopulationCategory, Selection, Situation};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub trait Labelled: Copy + Eq + Hash + Debug + 'static {
    /// Every value, in display order.
    fn variants() -> Vec<Self>;
    fn key(self) -> &'static str;
    fn label(self) -> &'static str;
}

/// Category sets that can be wrapped in [`Selection`] and so need a label for "all".
pub trait HasAllLabel: Labelled {
    const ALL_LABEL: &'static str;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("label '{label}' is used by both '{first}' and '{second}'")]
    DuplicateLabel {
        label: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("key '{key}' is used by more than one category")]
    DuplicateKey { key: &'static str },
}

#[derive(Debug, Clone)]
pub struct LabelDictionary<K: Labelled> {
    entries: Vec<(K, &'static str)>,
    by_label: HashMap<&'static str, K>,
}

impl<K: Labelled> LabelDictionary<K> {
    pub fn new() -> Result<Self, LabelError> {
        let mut entries = Vec::new();
        let mut by_label = HashMap::new();
        let mut by_key = HashMap::new();

        for value in K::variants() {
            if let Some(previous) = by_label.insert(value.label(), value) {
                return Err(LabelError::DuplicateLabel {
                    label: value.label(),
                    first: previous.key(),
                    second: value.key(),
                });
            }
            if by_key.insert(value.key(), value).is_some() {
                return Err(LabelError::DuplicateKey { key: value.key() });
            }
            entries.push((value, value.label()));
        }

        Ok(Self { entries, by_label })
    }

    pub fn label(&self, value: K) -> &'static str {
        value.label()
    }

    /// Inverse of [`label`](Self::label).
    pub fn from_label(&self, label: &str) -> Option<K> {
        self.by_label.get(label).copied()
    }

    /// Values and labels in display order.
    pub fn entries(&self) -> &[(K, &'static str)] {
        &self.entries
    }
}

#[cfg(test)]
impl<K: Labelled> LabelDictionary<K> {
    fn key(&self, value: K) -> &'static str {
        value.key()
    }

    fn from_key(&self, key: &str) -> Option<K> {
        self.entries
            .iter()
            .map(|(value, _)| *value)
            .find(|value| value.key() == key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The dictionaries every page needs, built once at startup.
#[derive(Debug, Clone)]
pub struct Dictionaries {
    pub continents: LabelDictionary<Selection<Continent>>,
    pub population: LabelDictionary<Selection<PopulationCategory>>,
    pub categories: LabelDictionary<PopulationCategory>,
    pub petitions: LabelDictionary<PetitionType>,
    pub situations: LabelDictionary<Situation>,
}

impl Dictionaries {
    pub fn new() -> Result<Self, LabelError> {
        Ok(Self {
            continents: LabelDictionary::new()?,
            population: LabelDictionary::new()?,
            categories: LabelDictionary::new()?,
            petitions: LabelDictionary::new()?,
            situations: LabelDictionary::new()?,
        })
    }
}

impl<T: HasAllLabel> Labelled for Selection<T> {
    fn variants() -> Vec<Self> {
        T::variants()
            .into_iter()
            .map(Selection::Only)
            .chain(std::iter::once(Selection::All))
            .collect()
    }

    fn key(self) -> &'static str {
        match self {
            Selection::Only(value) => value.key(),
            Selection::All => "all",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Selection::Only(value) => value.label(),
            Selection::All => T::ALL_LABEL,
        }
    }
}

impl Labelled for Continent {
    fn variants() -> Vec<Self> {
        Continent::ALL.to_vec()
    }

    fn key(self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::NorthernAmerica => "Northern America",
            Continent::Stateless => "Stateless",
            Continent::Asia => "Asia",
            Continent::Unknown => "Unknown",
            Continent::Europe => "Europe",
            Continent::LatinAmerica => "Latin America and the Caribbean",
            Continent::Oceania => "Oceania",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::NorthernAmerica => "América del Norte",
            Continent::Stateless => "Apátrida",
            Continent::Asia => "Asia",
            Continent::Unknown => "Desconocido",
            Continent::Europe => "Europa",
            Continent::LatinAmerica => "Latinoamérica y el Caribe",
            Continent::Oceania => "Oceania",
        }
    }
}

impl HasAllLabel for Continent {
    const ALL_LABEL: &'static str = "Todos";
}

impl Labelled for PopulationCategory {
    fn variants() -> Vec<Self> {
        PopulationCategory::ALL.to_vec()
    }

    fn key(self) -> &'static str {
        match self {
            PopulationCategory::Stateless => "stateless",
            PopulationCategory::InternallyDisplaced => "internally_displaced",
            PopulationCategory::ReturnedInternallyDisplaced => "returned_internally_displaced",
            PopulationCategory::Refugees => "refugees",
            PopulationCategory::ReturnedRefugees => "returned_refugees",
            PopulationCategory::AsylumSeekers => "asylum_seekers",
            PopulationCategory::OtherNeed => "other_need",
            PopulationCategory::OtherConcern => "other_concern",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PopulationCategory::Stateless => "Apátridas",
            PopulationCategory::InternallyDisplaced => "Desplazados internos",
            PopulationCategory::ReturnedInternallyDisplaced => "Desplazados internos retornados",
            PopulationCategory::Refugees => "Refugiados",
            PopulationCategory::ReturnedRefugees => "Refugiados retornados",
            PopulationCategory::AsylumSeekers => "Solicitantes de asilo",
            PopulationCategory::OtherNeed => "Venezolanos desplazados",
            PopulationCategory::OtherConcern => "Otras poblaciones",
        }
    }
}

impl HasAllLabel for PopulationCategory {
    const ALL_LABEL: &'static str = "Todas";
}

impl Labelled for PetitionType {
    fn variants() -> Vec<Self> {
        PetitionType::ALL.to_vec()
    }

    fn key(self) -> &'static str {
        match self {
            PetitionType::TotalApplied => "total_applied",
            PetitionType::RefugeeRecognized => "refugee_recognized",
            PetitionType::OtherRecognized => "other_recognized",
            PetitionType::AsylumRejected => "asylum_rejected",
            PetitionType::ClaimsClosed => "claims_closed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PetitionType::TotalApplied => "Solicitudes",
            PetitionType::RefugeeRecognized => "Status de refugiado reconocido",
            PetitionType::OtherRecognized => "Otro status reconocido",
            PetitionType::AsylumRejected => "Status de refugiado rechazado",
            PetitionType::ClaimsClosed => "Caso cerrado",
        }
    }
}

impl Labelled for Situation {
    fn variants() -> Vec<Self> {
        Situation::ALL.to_vec()
    }

    fn key(self) -> &'static str {
        match self {
            Situation::Received => "received",
            Situation::Sent => "sent",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Situation::Received => "Recibidos",
            Situation::Sent => "Enviados",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijective<K: Labelled>(dict: &LabelDictionary<K>) {
        for (value, label) in dict.entries() {
            assert_eq!(dict.from_label(label), Some(*value));
            assert_eq!(dict.from_key(dict.key(*value)), Some(*value));
            assert_eq!(dict.label(*value), *label);
        }
    }

    #[test]
    fn builtin_dictionaries_are_bijective() {
        let dicts = Dictionaries::new().unwrap();
        assert_eq!(dicts.population.len(), 9);
        assert_eq!(dicts.petitions.len(), 5);
        assert_eq!(dicts.continents.len(), 9);
        assert_bijective(&dicts.population);
        assert_bijective(&dicts.categories);
        assert_bijective(&dicts.petitions);
        assert_bijective(&dicts.continents);
        assert_bijective(&dicts.situations);
    }

    #[test]
    fn sentinel_sits_last_with_its_own_label() {
        let dicts = Dictionaries::new().unwrap();
        let (last, label) = *dicts.population.entries().last().unwrap();
        assert_eq!(last, Selection::All);
        assert_eq!(label, "Todas");
        assert_eq!(dicts.continents.from_label("Todos"), Some(Selection::All));
        assert_eq!(dicts.population.from_key("all"), Some(Selection::All));
    }

    #[test]
    fn labels_resolve_to_canonical_keys() {
        let dicts = Dictionaries::new().unwrap();
        let refugees = dicts.population.from_label("Refugiados").unwrap();
        assert_eq!(dicts.population.key(refugees), "refugees");
        let closed = dicts.petitions.from_label("Caso cerrado").unwrap();
        assert_eq!(closed, PetitionType::ClaimsClosed);
        let latam = dicts.continents.from_label("Latinoamérica y el Caribe").unwrap();
        assert_eq!(latam.key(), "Latin America and the Caribbean");
        assert_eq!(dicts.petitions.from_label("Solicitud"), None);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Clash {
        A,
        B,
    }

    impl Labelled for Clash {
        fn variants() -> Vec<Self> {
            vec![Clash::A, Clash::B]
        }

        fn key(self) -> &'static str {
            match self {
                Clash::A => "a",
                Clash::B => "b",
            }
        }

        fn label(self) -> &'static str {
            "same"
        }
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = LabelDictionary::<Clash>::new().unwrap_err();
        assert_eq!(
            err,
            LabelError::DuplicateLabel {
                label: "same",
                first: "a",
                second: "b"
            }
        );
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum SharedKey {
        A,
        B,
    }

    impl Labelled for SharedKey {
        fn variants() -> Vec<Self> {
            vec![SharedKey::A, SharedKey::B]
        }

        fn key(self) -> &'static str {
            "shared"
        }

        fn label(self) -> &'static str {
            match self {
                SharedKey::A => "A",
                SharedKey::B => "B",
            }
        }
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = LabelDictionary::<SharedKey>::new().unwrap_err();
        assert_eq!(err, LabelError::DuplicateKey { key: "shared" });
    }
}
