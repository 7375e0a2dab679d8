//! Selection widgets.
//!
//! A widget knows its options and default, describes itself to the client as a
//! [`WidgetSpec`], and resolves the raw choice sent back (absent means "keep the
//! default") into a typed value.

use crate::labels::{LabelDictionary, Labelled};
use crate::types::{Continent, ContinentFilter, Datasets, PetitionType, PopulationType, Situation};
use serde::Serialize;
use std::ops::RangeInclusive;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{choice}' is not an option of '{widget}'")]
    UnknownOption { widget: String, choice: String },
    #[error("'{widget}' has no options to choose from")]
    NoOptions { widget: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Selectbox,
    Multiselect,
    Radio,
}

/// What a client needs to draw a widget with the current choice highlighted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSpec {
    pub key: String,
    pub title: String,
    pub kind: WidgetKind,
    pub options: Vec<String>,
    pub selected: Vec<String>,
}

/// The resolved value of a single-choice widget plus what to show for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected<T> {
    pub value: T,
    pub label: String,
    pub spec: WidgetSpec,
}

#[derive(Debug, Clone)]
pub struct Selectbox<T> {
    key: String,
    title: String,
    kind: WidgetKind,
    options: Vec<(String, T)>,
    index: usize,
}

impl<T: Clone> Selectbox<T> {
    pub fn new(key: &str, title: &str, options: Vec<(String, T)>, index: usize) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            kind: WidgetKind::Selectbox,
            options,
            index,
        }
    }

    pub fn radio(mut self) -> Self {
        self.kind = WidgetKind::Radio;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(label, _)| label.as_str())
    }

    /// Out-of-range defaults fall back to the last option.
    fn default_position(&self) -> usize {
        self.index.min(self.options.len().saturating_sub(1))
    }

    pub fn select(&self, choice: Option<&str>) -> Result<Selected<T>, SelectionError> {
        self.resolve(choice, |wanted| {
            self.options.iter().position(|(label, _)| label == wanted)
        })
    }

    /// Shared by every lookup strategy: `find` maps a raw choice to an option position.
    fn resolve(
        &self,
        choice: Option<&str>,
        find: impl Fn(&str) -> Option<usize>,
    ) -> Result<Selected<T>, SelectionError> {
        if self.options.is_empty() {
            return Err(SelectionError::NoOptions {
                widget: self.key.clone(),
            });
        }

        let position = match choice {
            None => self.default_position(),
            Some(choice) => find(choice).ok_or_else(|| SelectionError::UnknownOption {
                widget: self.key.clone(),
                choice: choice.to_string(),
            })?,
        };

        let (label, value) = &self.options[position];
        Ok(Selected {
            value: value.clone(),
            label: label.clone(),
            spec: WidgetSpec {
                key: self.key.clone(),
                title: self.title.clone(),
                kind: self.kind,
                options: self.labels().map(str::to_string).collect(),
                selected: vec![label.clone()],
            },
        })
    }
}

impl<T: Clone + PartialEq> Selectbox<T> {
    fn position_of(&self, value: &T) -> Option<usize> {
        self.options.iter().position(|(_, option)| option == value)
    }
}

#[derive(Debug, Clone)]
pub struct Multiselect<T> {
    key: String,
    title: String,
    options: Vec<(String, T)>,
    defaults: Vec<usize>,
}

impl<T: Clone> Multiselect<T> {
    pub fn new(key: &str, title: &str, options: Vec<(String, T)>, defaults: Vec<usize>) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            options,
            defaults,
        }
    }

    /// Resolves a comma-separated list. An empty string is a valid, empty
    /// selection; `None` keeps the defaults. Order follows the option list.
    fn resolve(
        &self,
        choice: Option<&str>,
        find: impl Fn(&str) -> Option<usize>,
    ) -> Result<(Vec<T>, WidgetSpec), SelectionError> {
        let positions: Vec<usize> = match choice {
            None => self
                .defaults
                .iter()
                .copied()
                .filter(|i| *i < self.options.len())
                .collect(),
            Some(raw) => {
                let mut positions = Vec::new();
                for wanted in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let position = find(wanted).ok_or_else(|| SelectionError::UnknownOption {
                        widget: self.key.clone(),
                        choice: wanted.to_string(),
                    })?;
                    if !positions.contains(&position) {
                        positions.push(position);
                    }
                }
                positions.sort_unstable();
                positions
            }
        };

        let values = positions.iter().map(|&i| self.options[i].1.clone()).collect();
        let spec = WidgetSpec {
            key: self.key.clone(),
            title: self.title.clone(),
            kind: WidgetKind::Multiselect,
            options: self.options.iter().map(|(label, _)| label.clone()).collect(),
            selected: positions.iter().map(|&i| self.options[i].0.clone()).collect(),
        };
        Ok((values, spec))
    }
}

/// A selectbox over a closed category set. Choices go through the dictionary's
/// label index first, then must still be among this widget's options.
#[derive(Debug, Clone)]
pub struct LabelledSelectbox<'a, K: Labelled> {
    dict: &'a LabelDictionary<K>,
    inner: Selectbox<K>,
}

impl<'a, K: Labelled> LabelledSelectbox<'a, K> {
    fn new(dict: &'a LabelDictionary<K>, inner: Selectbox<K>) -> Self {
        Self { dict, inner }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.inner.labels()
    }

    pub fn select(&self, choice: Option<&str>) -> Result<Selected<K>, SelectionError> {
        self.inner.resolve(choice, |wanted| {
            let value = self.dict.from_label(wanted)?;
            self.inner.position_of(&value)
        })
    }
}

#[derive(Debug, Clone)]
pub struct LabelledMultiselect<'a, K: Labelled> {
    dict: &'a LabelDictionary<K>,
    inner: Multiselect<K>,
}

impl<K: Labelled> LabelledMultiselect<'_, K> {
    pub fn select(&self, choice: Option<&str>) -> Result<(Vec<K>, WidgetSpec), SelectionError> {
        self.inner.resolve(choice, |wanted| {
            let value = self.dict.from_label(wanted)?;
            self.inner.options.iter().position(|(_, option)| *option == value)
        })
    }
}

fn labelled_options<K: Labelled>(dict: &LabelDictionary<K>) -> Vec<(String, K)> {
    dict.entries()
        .iter()
        .map(|(value, label)| (label.to_string(), *value))
        .collect()
}

/// Continent picker. `suffix` completes the title ("Continente de origen");
/// `key` tells several pickers on one page apart.
pub fn continent_selectbox<'a>(
    dict: &'a LabelDictionary<ContinentFilter>,
    exclude: &[ContinentFilter],
    key: &str,
    suffix: Option<&str>,
    index: usize,
) -> LabelledSelectbox<'a, ContinentFilter> {
    let options = labelled_options(dict)
        .into_iter()
        .filter(|(_, value)| !exclude.contains(value))
        .collect();
    let title = match suffix {
        Some(suffix) => format!("Continente {}", suffix),
        None => "Continente".to_string(),
    };
    LabelledSelectbox::new(dict, Selectbox::new(key, &title, options, index))
}

pub fn population_selectbox(
    dict: &LabelDictionary<PopulationType>,
) -> LabelledSelectbox<'_, PopulationType> {
    let inner = Selectbox::new("population", "Tipo de población", labelled_options(dict), 3);
    LabelledSelectbox::new(dict, inner)
}

pub fn petition_multiselect(
    dict: &LabelDictionary<PetitionType>,
) -> LabelledMultiselect<'_, PetitionType> {
    LabelledMultiselect {
        dict,
        inner: Multiselect::new(
            "petitions",
            "Solicitudes y tipos de resoluciones",
            labelled_options(dict),
            vec![0],
        ),
    }
}

pub fn country_selectbox(data: &Datasets, continent: Continent) -> Selectbox<String> {
    let options = data
        .countries_in(continent)
        .map(|c| (c.name.clone(), c.name.clone()))
        .collect();
    Selectbox::new("country", "País", options, 0)
}

pub fn year_selectbox(key: &str, title: &str, years: RangeInclusive<i32>, index: usize) -> Selectbox<i32> {
    let options = years.map(|year| (year.to_string(), year)).collect();
    Selectbox::new(key, title, options, index)
}

pub fn situation_radio(dict: &LabelDictionary<Situation>) -> LabelledSelectbox<'_, Situation> {
    let inner = Selectbox::new("situation", "Refugiados", labelled_options(dict), 0).radio();
    LabelledSelectbox::new(dict, inner)
}
