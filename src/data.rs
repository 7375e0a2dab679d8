use crate::config::InputConfig;
use crate::types::{
    Continent, Country, Datasets, DemographicsRecord, PetitionCounts, PetitionRecord,
    PopulationCounts, PopulationRecord, SexTotals,
};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use geo::Point;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub fn load_data(config: &InputConfig) -> Result<Datasets> {
    info!("Loading datasets...");

    let population = open_and_read(&config.population_csv, read_population)?;
    info!("Loaded {} population rows", population.len());

    let petitions = open_and_read(&config.petitions_csv, read_petitions)?;
    info!("Loaded {} asylum petition rows", petitions.len());

    let countries = open_and_read(&config.countries_csv, read_countries)?;
    info!("Loaded {} countries", countries.len());

    let demographics = open_and_read(&config.demographics_csv, read_demographics)?;
    info!("Loaded {} demographics rows", demographics.len());

    Ok(Datasets {
        population,
        petitions,
        countries,
        demographics,
    })
}

fn open_and_read<T>(path: &Path, read: fn(File) -> Result<Vec<T>>) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    read(file).with_context(|| format!("Failed to load CSV file: {:?}", path))
}

pub fn read_population<R: Read>(reader: R) -> Result<Vec<PopulationRecord>> {
    read_rows::<_, PopulationRow>(reader)
        .map(|rows| rows.into_iter().map(PopulationRecord::from).collect())
}

pub fn read_petitions<R: Read>(reader: R) -> Result<Vec<PetitionRecord>> {
    read_rows::<_, PetitionRow>(reader)
        .map(|rows| rows.into_iter().map(PetitionRecord::from).collect())
}

pub fn read_countries<R: Read>(reader: R) -> Result<Vec<Country>> {
    read_rows(reader)
}

pub fn read_demographics<R: Read>(reader: R) -> Result<Vec<DemographicsRecord>> {
    read_rows::<_, DemographicsRow>(reader)
        .map(|rows| rows.into_iter().map(DemographicsRecord::from).collect())
}

fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    // Header is line 1, so the first record is line 2
    for (line, result) in rdr.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("Invalid row at line {}", line + 2))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Counts arrive as "123", "123.0" (pandas writes floats once a column held a
/// NaN) or an empty cell, which means zero.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    use serde::de::Error;

    let raw: Option<String> = Option::deserialize(deserializer)?;
    let raw = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(0),
        Some(s) => s,
    };

    if let Ok(value) = raw.parse::<u64>() {
        return Ok(value);
    }

    match raw.parse::<f64>() {
        // u64::MAX as f64 rounds up to 2^64, which is itself out of range
        Ok(value) if value >= 0.0 && value < u64::MAX as f64 && value.fract() == 0.0 => {
            Ok(value as u64)
        }
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole count, found '{}'",
            raw
        ))),
    }
}

fn location(longitude: Option<f64>, latitude: Option<f64>) -> Option<Point<f64>> {
    match (longitude, latitude) {
        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct PopulationRow {
    year: i32,
    name_origin_country: String,
    name_asylum_country: String,
    continent_origin_country: Continent,
    continent_asylum_country: Continent,
    longitude_origin_country: Option<f64>,
    latitude_origin_country: Option<f64>,
    longitude_asylum_country: Option<f64>,
    latitude_asylum_country: Option<f64>,
    #[serde(deserialize_with = "count")]
    stateless: u64,
    #[serde(deserialize_with = "count")]
    internally_displaced: u64,
    #[serde(deserialize_with = "count")]
    returned_internally_displaced: u64,
    #[serde(deserialize_with = "count")]
    refugees: u64,
    #[serde(deserialize_with = "count")]
    returned_refugees: u64,
    #[serde(deserialize_with = "count")]
    asylum_seekers: u64,
    #[serde(deserialize_with = "count")]
    other_need: u64,
    #[serde(deserialize_with = "count")]
    other_concern: u64,
}

impl From<PopulationRow> for PopulationRecord {
    fn from(row: PopulationRow) -> Self {
        PopulationRecord {
            year: row.year,
            origin_location: location(row.longitude_origin_country, row.latitude_origin_country),
            asylum_location: location(row.longitude_asylum_country, row.latitude_asylum_country),
            origin_country: row.name_origin_country,
            asylum_country: row.name_asylum_country,
            origin_continent: row.continent_origin_country,
            asylum_continent: row.continent_asylum_country,
            counts: PopulationCounts {
                stateless: row.stateless,
                internally_displaced: row.internally_displaced,
                returned_internally_displaced: row.returned_internally_displaced,
                refugees: row.refugees,
                returned_refugees: row.returned_refugees,
                asylum_seekers: row.asylum_seekers,
                other_need: row.other_need,
                other_concern: row.other_concern,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PetitionRow {
    year: i32,
    continent_origin_country: Continent,
    continent_asylum_country: Continent,
    #[serde(deserialize_with = "count")]
    total_applied: u64,
    #[serde(deserialize_with = "count")]
    refugee_recognized: u64,
    #[serde(deserialize_with = "count")]
    other_recognized: u64,
    #[serde(deserialize_with = "count")]
    asylum_rejected: u64,
    #[serde(deserialize_with = "count")]
    claims_closed: u64,
}

impl From<PetitionRow> for PetitionRecord {
    fn from(row: PetitionRow) -> Self {
        PetitionRecord {
            year: row.year,
            origin_continent: row.continent_origin_country,
            asylum_continent: row.continent_asylum_country,
            counts: PetitionCounts {
                total_applied: row.total_applied,
                refugee_recognized: row.refugee_recognized,
                other_recognized: row.other_recognized,
                asylum_rejected: row.asylum_rejected,
                claims_closed: row.claims_closed,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct DemographicsRow {
    year: i32,
    name_asylum_country: String,
    name_origin_country: String,
    #[serde(deserialize_with = "count")]
    total: u64,
    #[serde(deserialize_with = "count")]
    f_total: u64,
    #[serde(deserialize_with = "count")]
    m_total: u64,
}

impl From<DemographicsRow> for DemographicsRecord {
    fn from(row: DemographicsRow) -> Self {
        DemographicsRecord {
            year: row.year,
            asylum_country: row.name_asylum_country,
            origin_country: row.name_origin_country,
            totals: SexTotals {
                total: row.total,
                female: row.f_total,
                male: row.m_total,
            },
        }
    }
}
