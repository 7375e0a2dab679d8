use geo::Point;
use serde::Deserialize;

/// Continent or region grouping as written in the UNHCR tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Continent {
    Africa,
    #[serde(rename = "Northern America")]
    NorthernAmerica,
    Stateless,
    Asia,
    Unknown,
    Europe,
    #[serde(rename = "Latin America and the Caribbean")]
    LatinAmerica,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 8] = [
        Continent::Africa,
        Continent::NorthernAmerica,
        Continent::Stateless,
        Continent::Asia,
        Continent::Unknown,
        Continent::Europe,
        Continent::LatinAmerica,
        Continent::Oceania,
    ];
}

/// One of the eight population classifications tracked per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PopulationCategory {
    Stateless,
    InternallyDisplaced,
    ReturnedInternallyDisplaced,
    Refugees,
    ReturnedRefugees,
    AsylumSeekers,
    OtherNeed,
    OtherConcern,
}

impl PopulationCategory {
    pub const ALL: [PopulationCategory; 8] = [
        PopulationCategory::Stateless,
        PopulationCategory::InternallyDisplaced,
        PopulationCategory::ReturnedInternallyDisplaced,
        PopulationCategory::Refugees,
        PopulationCategory::ReturnedRefugees,
        PopulationCategory::AsylumSeekers,
        PopulationCategory::OtherNeed,
        PopulationCategory::OtherConcern,
    ];
}

/// Asylum application outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PetitionType {
    TotalApplied,
    RefugeeRecognized,
    OtherRecognized,
    AsylumRejected,
    ClaimsClosed,
}

impl PetitionType {
    pub const ALL: [PetitionType; 5] = [
        PetitionType::TotalApplied,
        PetitionType::RefugeeRecognized,
        PetitionType::OtherRecognized,
        PetitionType::AsylumRejected,
        PetitionType::ClaimsClosed,
    ];
}

/// A filter over a closed category set where `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selection<T> {
    Only(T),
    All,
}

impl<T: PartialEq + Copy> Selection<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => *wanted == value,
        }
    }

    pub fn only(&self) -> Option<T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(*value),
        }
    }
}

pub type ContinentFilter = Selection<Continent>;
pub type PopulationType = Selection<PopulationCategory>;

/// Whether a country is looked at as the place people arrived in or left from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Situation {
    Received,
    Sent,
}

impl Situation {
    pub const ALL: [Situation; 2] = [Situation::Received, Situation::Sent];

    /// Categories summed into the "forcibly displaced" metric and plotted in the
    /// per-country breakdown. Internal displacement only shows up on the sending side.
    pub fn tracked_categories(self) -> &'static [PopulationCategory] {
        match self {
            Situation::Received => &[
                PopulationCategory::Refugees,
                PopulationCategory::AsylumSeekers,
                PopulationCategory::OtherConcern,
                PopulationCategory::OtherNeed,
            ],
            Situation::Sent => &[
                PopulationCategory::Refugees,
                PopulationCategory::AsylumSeekers,
                PopulationCategory::OtherConcern,
                PopulationCategory::InternallyDisplaced,
                PopulationCategory::OtherNeed,
                PopulationCategory::ReturnedInternallyDisplaced,
            ],
        }
    }
}

/// Anything holding one count per category of `Key`.
pub trait CategoryCounts: Default {
    type Key: Copy;

    fn count(&self, key: Self::Key) -> u64;
    /// Adds `other` field by field, saturating at `u64::MAX`.
    fn accumulate(&mut self, other: &Self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationCounts {
    pub stateless: u64,
    pub internally_displaced: u64,
    pub returned_internally_displaced: u64,
    pub refugees: u64,
    pub returned_refugees: u64,
    pub asylum_seekers: u64,
    pub other_need: u64,
    pub other_concern: u64,
}

impl PopulationCounts {
    pub fn sum_of(&self, categories: &[PopulationCategory]) -> u64 {
        categories
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(self.count(*c)))
    }
}

impl CategoryCounts for PopulationCounts {
    type Key = PopulationCategory;

    fn count(&self, key: PopulationCategory) -> u64 {
        match key {
            PopulationCategory::Stateless => self.stateless,
            PopulationCategory::InternallyDisplaced => self.internally_displaced,
            PopulationCategory::ReturnedInternallyDisplaced => self.returned_internally_displaced,
            PopulationCategory::Refugees => self.refugees,
            PopulationCategory::ReturnedRefugees => self.returned_refugees,
            PopulationCategory::AsylumSeekers => self.asylum_seekers,
            PopulationCategory::OtherNeed => self.other_need,
            PopulationCategory::OtherConcern => self.other_concern,
        }
    }

    fn accumulate(&mut self, other: &Self) {
        self.stateless = self.stateless.saturating_add(other.stateless);
        self.internally_displaced = self
            .internally_displaced
            .saturating_add(other.internally_displaced);
        self.returned_internally_displaced = self
            .returned_internally_displaced
            .saturating_add(other.returned_internally_displaced);
        self.refugees = self.refugees.saturating_add(other.refugees);
        self.returned_refugees = self.returned_refugees.saturating_add(other.returned_refugees);
        self.asylum_seekers = self.asylum_seekers.saturating_add(other.asylum_seekers);
        self.other_need = self.other_need.saturating_add(other.other_need);
        self.other_concern = self.other_concern.saturating_add(other.other_concern);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PetitionCounts {
    pub total_applied: u64,
    pub refugee_recognized: u64,
    pub other_recognized: u64,
    pub asylum_rejected: u64,
    pub claims_closed: u64,
}

impl CategoryCounts for PetitionCounts {
    type Key = PetitionType;

    fn count(&self, key: PetitionType) -> u64 {
        match key {
            PetitionType::TotalApplied => self.total_applied,
            PetitionType::RefugeeRecognized => self.refugee_recognized,
            PetitionType::OtherRecognized => self.other_recognized,
            PetitionType::AsylumRejected => self.asylum_rejected,
            PetitionType::ClaimsClosed => self.claims_closed,
        }
    }

    fn accumulate(&mut self, other: &Self) {
        self.total_applied = self.total_applied.saturating_add(other.total_applied);
        self.refugee_recognized = self.refugee_recognized.saturating_add(other.refugee_recognized);
        self.other_recognized = self.other_recognized.saturating_add(other.other_recognized);
        self.asylum_rejected = self.asylum_rejected.saturating_add(other.asylum_rejected);
        self.claims_closed = self.claims_closed.saturating_add(other.claims_closed);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationRecord {
    pub year: i32,
    pub origin_country: String,
    pub asylum_country: String,
    pub origin_continent: Continent,
    pub asylum_continent: Continent,
    // (longitude, latitude); absent when the source left either cell empty
    pub origin_location: Option<Point<f64>>,
    pub asylum_location: Option<Point<f64>>,
    pub counts: PopulationCounts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PetitionRecord {
    pub year: i32,
    pub origin_continent: Continent,
    pub asylum_continent: Continent,
    pub counts: PetitionCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SexTotals {
    pub total: u64,
    pub female: u64,
    pub male: u64,
}

impl SexTotals {
    pub fn accumulate(&mut self, other: &SexTotals) {
        self.total = self.total.saturating_add(other.total);
        self.female = self.female.saturating_add(other.female);
        self.male = self.male.saturating_add(other.male);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemographicsRecord {
    pub year: i32,
    pub asylum_country: String,
    pub origin_country: String,
    pub totals: SexTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub name: String,
    pub continent: Continent,
}

/// The four source tables, loaded once and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub population: Vec<PopulationRecord>,
    pub petitions: Vec<PetitionRecord>,
    pub countries: Vec<Country>,
    pub demographics: Vec<DemographicsRecord>,
}

impl Datasets {
    pub fn max_population_year(&self) -> Option<i32> {
        self.population.iter().map(|r| r.year).max()
    }

    /// Countries of `continent`, in reference-table order.
    pub fn countries_in(&self, continent: Continent) -> impl Iterator<Item = &Country> {
        self.countries.iter().filter(move |c| c.continent == continent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulating_huge_counts_saturates() {
        let mut counts = PopulationCounts {
            refugees: u64::MAX - 1,
            asylum_seekers: 5,
            ..PopulationCounts::default()
        };
        counts.accumulate(&PopulationCounts {
            refugees: 10,
            ..PopulationCounts::default()
        });
        assert_eq!(counts.refugees, u64::MAX);
        assert_eq!(
            counts.sum_of(&[PopulationCategory::Refugees, PopulationCategory::AsylumSeekers]),
            u64::MAX
        );

        let mut petitions = PetitionCounts {
            total_applied: u64::MAX,
            ..PetitionCounts::default()
        };
        let same = petitions;
        petitions.accumulate(&same);
        assert_eq!(petitions.total_applied, u64::MAX);

        let mut sexes = SexTotals { total: u64::MAX, female: 1, male: 2 };
        sexes.accumulate(&SexTotals { total: 1, female: 1, male: 1 });
        assert_eq!(sexes, SexTotals { total: u64::MAX, female: 2, male: 3 });
    }
}
