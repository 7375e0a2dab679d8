//! Reshaping applied between the source tables and a chart: filter and
//! aggregate, wide/long reshape, relabel, and order-of-magnitude scaling.
//! Everything here is pure and re-derives its output from the inputs.

use crate::labels::{LabelDictionary, Labelled};
use crate::types::{
    CategoryCounts, Continent, ContinentFilter, DemographicsRecord, PetitionCounts, PetitionRecord,
    PopulationCategory, PopulationCounts, PopulationRecord, SexTotals, Situation,
};
use geo::{Line, Point};
use std::collections::{BTreeMap, HashSet};

/// Divisor and wording used to show a series in units, thousands or millions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magnitude {
    pub divisor: u64,
    pub suffix: &'static str,
    pub letter: &'static str,
}

impl Magnitude {
    pub const UNITS: Magnitude = Magnitude { divisor: 1, suffix: "", letter: "" };
    pub const THOUSANDS: Magnitude = Magnitude { divisor: 1_000, suffix: "(en miles)", letter: "m" };
    pub const MILLIONS: Magnitude = Magnitude { divisor: 1_000_000, suffix: "(en millones)", letter: "M" };

    pub fn for_max(max: u64) -> Magnitude {
        if max < 1_000 {
            Magnitude::UNITS
        } else if max < 1_000_000 {
            Magnitude::THOUSANDS
        } else {
            Magnitude::MILLIONS
        }
    }

    pub fn for_values<I: IntoIterator<Item = u64>>(values: I) -> Magnitude {
        Magnitude::for_max(values.into_iter().max().unwrap_or(0))
    }

    pub fn scale(&self, value: u64) -> f64 {
        value as f64 / self.divisor as f64
    }

    /// "Refugiados (en miles)", or the bare title when no scaling applies.
    pub fn title(&self, base: &str) -> String {
        if self.suffix.is_empty() {
            base.to_string()
        } else {
            format!("{} {}", base, self.suffix)
        }
    }

    /// Bar label: two decimals plus the magnitude letter, e.g. "12.50m".
    pub fn format(&self, scaled: f64) -> String {
        format!("{:.2}{}", scaled, self.letter)
    }
}

/// One row per year, one value per category column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRow<K: Ord> {
    pub year: i32,
    pub values: BTreeMap<K, u64>,
}

/// One (year, category, value) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongRow<K> {
    pub year: i32,
    pub variable: K,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelledRow<K> {
    pub year: i32,
    pub variable: K,
    pub label: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledRow<K> {
    pub year: i32,
    pub variable: K,
    pub label: &'static str,
    pub value: f64,
}

/// A display-ready table: relabeled rows already divided by `magnitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledTable<K> {
    pub magnitude: Magnitude,
    pub rows: Vec<ScaledRow<K>>,
}

impl<K> ScaledTable<K> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds wide rows from per-year counts, keeping only `columns`.
pub fn wide_rows<C, K>(by_year: &BTreeMap<i32, C>, columns: &[K]) -> Vec<YearRow<K>>
where
    C: CategoryCounts<Key = K>,
    K: Copy + Ord,
{
    by_year
        .iter()
        .map(|(year, counts)| YearRow {
            year: *year,
            values: columns.iter().map(|k| (*k, counts.count(*k))).collect(),
        })
        .collect()
}

/// Wide to long. Rows come out sorted by year, then by canonical key.
pub fn melt<K: Labelled + Ord>(rows: &[YearRow<K>], columns: &[K]) -> Vec<LongRow<K>> {
    let mut long: Vec<LongRow<K>> = rows
        .iter()
        .flat_map(|row| {
            columns.iter().map(move |column| LongRow {
                year: row.year,
                variable: *column,
                value: row.values.get(column).copied().unwrap_or(0),
            })
        })
        .collect();
    long.sort_by(|a, b| {
        a.year
            .cmp(&b.year)
            .then_with(|| a.variable.key().cmp(b.variable.key()))
    });
    long
}

/// Long to wide, the inverse of [`melt`].
pub fn pivot<K: Copy + Ord>(rows: &[LongRow<K>]) -> Vec<YearRow<K>> {
    let mut by_year: BTreeMap<i32, BTreeMap<K, u64>> = BTreeMap::new();
    for row in rows {
        let cell = by_year
            .entry(row.year)
            .or_default()
            .entry(row.variable)
            .or_insert(0);
        *cell = cell.saturating_add(row.value);
    }
    by_year
        .into_iter()
        .map(|(year, values)| YearRow { year, values })
        .collect()
}

/// Attaches the localized label of each row's category. Order is preserved.
pub fn relabel<K: Labelled>(rows: Vec<LongRow<K>>, dict: &LabelDictionary<K>) -> Vec<LabelledRow<K>> {
    rows.into_iter()
        .map(|row| LabelledRow {
            year: row.year,
            variable: row.variable,
            label: dict.label(row.variable),
            value: row.value,
        })
        .collect()
}

/// Divides every row by the magnitude chosen from the largest value.
pub fn scale_rows<K>(rows: Vec<LabelledRow<K>>) -> ScaledTable<K> {
    let magnitude = Magnitude::for_values(rows.iter().map(|r| r.value));
    let rows = rows
        .into_iter()
        .map(|row| ScaledRow {
            year: row.year,
            variable: row.variable,
            label: row.label,
            value: magnitude.scale(row.value),
        })
        .collect();
    ScaledTable { magnitude, rows }
}

/// Sums population counts per year for records whose origin continent matches.
pub fn population_by_year(
    records: &[PopulationRecord],
    origin: ContinentFilter,
) -> BTreeMap<i32, PopulationCounts> {
    let mut by_year: BTreeMap<i32, PopulationCounts> = BTreeMap::new();
    for record in records.iter().filter(|r| origin.matches(r.origin_continent)) {
        by_year.entry(record.year).or_default().accumulate(&record.counts);
    }
    by_year
}

/// Years in which `category` is non-zero, as a one-column wide table.
pub fn category_series(
    by_year: &BTreeMap<i32, PopulationCounts>,
    category: PopulationCategory,
) -> Vec<YearRow<PopulationCategory>> {
    wide_rows(by_year, &[category])
        .into_iter()
        .filter(|row| row.values.get(&category).copied().unwrap_or(0) != 0)
        .collect()
}

/// Petitions filtered by origin continent and summed per (year, asylum continent).
pub fn petitions_by_year_and_asylum(
    records: &[PetitionRecord],
    origin: ContinentFilter,
) -> BTreeMap<(i32, Continent), PetitionCounts> {
    let mut grouped: BTreeMap<(i32, Continent), PetitionCounts> = BTreeMap::new();
    for record in records.iter().filter(|r| origin.matches(r.origin_continent)) {
        grouped
            .entry((record.year, record.asylum_continent))
            .or_default()
            .accumulate(&record.counts);
    }
    grouped
}

/// Keeps the groups of the chosen asylum continent and collapses them per year.
pub fn collapse_by_year(
    grouped: &BTreeMap<(i32, Continent), PetitionCounts>,
    asylum: ContinentFilter,
) -> BTreeMap<i32, PetitionCounts> {
    let mut by_year: BTreeMap<i32, PetitionCounts> = BTreeMap::new();
    for ((year, continent), counts) in grouped {
        if asylum.matches(*continent) {
            by_year.entry(*year).or_default().accumulate(counts);
        }
    }
    by_year
}

fn involves(situation: Situation, country: &str, asylum: &str, origin: &str) -> bool {
    match situation {
        Situation::Received => asylum == country,
        Situation::Sent => origin == country,
    }
}

/// Population counts for a country and year, or `None` when nothing matches.
pub fn country_totals(
    records: &[PopulationRecord],
    country: &str,
    year: i32,
    situation: Situation,
) -> Option<PopulationCounts> {
    records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| involves(situation, country, &r.asylum_country, &r.origin_country))
        .fold(None, |acc: Option<PopulationCounts>, r| {
            let mut totals = acc.unwrap_or_default();
            totals.accumulate(&r.counts);
            Some(totals)
        })
}

pub fn demographics_totals(
    records: &[DemographicsRecord],
    country: &str,
    year: i32,
    situation: Situation,
) -> Option<SexTotals> {
    records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| involves(situation, country, &r.asylum_country, &r.origin_country))
        .fold(None, |acc: Option<SexTotals>, r| {
            let mut totals = acc.unwrap_or_default();
            totals.accumulate(&r.totals);
            Some(totals)
        })
}

/// `part` as a percentage of `total`, rounded to two decimals; 0 when `total` is 0.
pub fn share_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
}

/// Non-zero categories of `counts`, in category order.
pub fn breakdown(
    counts: &PopulationCounts,
    categories: &[PopulationCategory],
    year: i32,
) -> Vec<LongRow<PopulationCategory>> {
    let mut categories = categories.to_vec();
    categories.sort();
    categories
        .into_iter()
        .map(|category| LongRow {
            year,
            variable: category,
            value: counts.count(category),
        })
        .filter(|row| row.value != 0)
        .collect()
}

/// An origin to asylum movement drawn on the overview map.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub origin_country: String,
    pub asylum_country: String,
    pub line: Line<f64>,
}

/// Movements of `year` with both endpoints located and distinct countries,
/// optionally restricted to one origin continent.
pub fn movements(records: &[PopulationRecord], year: i32, origin: Option<Continent>) -> Vec<Movement> {
    records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| origin.map_or(true, |c| r.origin_continent == c))
        .filter(|r| r.origin_country != r.asylum_country)
        .filter_map(|r| match (r.origin_location, r.asylum_location) {
            (Some(from), Some(to)) => Some(Movement {
                origin_country: r.origin_country.clone(),
                asylum_country: r.asylum_country.clone(),
                line: Line::new(from, to),
            }),
            _ => None,
        })
        .collect()
}

/// Distinct locations at the other end of a country's flows: where people came
/// from when receiving, where they went when sending.
pub fn counterpart_locations(
    records: &[PopulationRecord],
    country: &str,
    year: i32,
    situation: Situation,
) -> Vec<Point<f64>> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| involves(situation, country, &r.asylum_country, &r.origin_country))
        .filter_map(|r| match situation {
            Situation::Received => r.origin_location,
            Situation::Sent => r.asylum_location,
        })
        .filter(|p| seen.insert((p.x().to_bits(), p.y().to_bits())))
        .collect()
}
