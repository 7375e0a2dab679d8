use crate::config::MapConfig;
use crate::processing::{Movement, ScaledTable};
use crate::types::{PetitionType, PopulationCategory};
use crate::widgets::WidgetSpec;
use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::json;

const YEAR_AXIS: &str = "Año";

/// Sink for everything a page shows. Each visualization kind has exactly one entry point.
pub trait Renderer {
    fn widget(&mut self, spec: WidgetSpec);
    fn heading(&mut self, text: &str, level: u8);
    fn markdown(&mut self, text: &str);
    fn caption(&mut self, text: &str);
    fn notice(&mut self, text: &str);
    fn metrics(&mut self, metrics: Vec<Metric>);
    fn line_chart(&mut self, chart: LineChart);
    fn grouped_bar_chart(&mut self, chart: GroupedBarChart);
    fn horizontal_bar_chart(&mut self, chart: HorizontalBarChart);
    fn arc_map(&mut self, map: MapLayer);
    fn point_map(&mut self, map: MapLayer);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Panel {
    Heading { text: String, level: u8 },
    Markdown { text: String },
    Caption { text: String },
    Notice { text: String },
    Metrics { metrics: Vec<Metric> },
    LineChart(LineChart),
    GroupedBarChart(GroupedBarChart),
    HorizontalBarChart(HorizontalBarChart),
    ArcMap(MapLayer),
    PointMap(MapLayer),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    // Years travel as strings so clients treat them as categories
    pub points: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBarChart {
    pub x_title: String,
    pub y_title: String,
    pub bars: Vec<Bar>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub group: String,
    pub category: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalBarChart {
    pub category_title: String,
    pub value_title: String,
    pub bars: Vec<LabelledBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledBar {
    pub category: String,
    pub value: f64,
    pub text: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub layer: &'static str,
    pub view_state: ViewState,
    pub map_style: Option<&'static str>,
    pub features: FeatureCollection,
}

pub fn petition_color(petition: PetitionType) -> &'static str {
    match petition {
        PetitionType::TotalApplied => "#14848f",
        PetitionType::RefugeeRecognized => "#d4c44e",
        PetitionType::OtherRecognized => "#5ab4bd",
        PetitionType::AsylumRejected => "#f58624",
        PetitionType::ClaimsClosed => "#c27615",
    }
}

pub fn population_color(category: PopulationCategory) -> &'static str {
    match category {
        PopulationCategory::Stateless => "#14848f",
        PopulationCategory::InternallyDisplaced => "#d4c44e",
        PopulationCategory::ReturnedInternallyDisplaced => "#5ab4bd",
        PopulationCategory::Refugees => "#f58624",
        PopulationCategory::ReturnedRefugees => "#c27615",
        PopulationCategory::AsylumSeekers => "#1d445e",
        PopulationCategory::OtherNeed => "#b5d63d",
        PopulationCategory::OtherConcern => "#ffae49",
    }
}

/// One line per category, in first-appearance order.
pub fn line_chart<K: PartialEq + Copy>(table: &ScaledTable<K>, y_title: &str) -> LineChart {
    let mut series: Vec<(K, Series)> = Vec::new();
    for row in &table.rows {
        let point = (row.year.to_string(), row.value);
        match series.iter_mut().find(|(key, _)| *key == row.variable) {
            Some((_, existing)) => existing.points.push(point),
            None => series.push((
                row.variable,
                Series {
                    name: row.label.to_string(),
                    points: vec![point],
                },
            )),
        }
    }

    LineChart {
        x_title: YEAR_AXIS.to_string(),
        y_title: table.magnitude.title(y_title),
        series: series.into_iter().map(|(_, s)| s).collect(),
    }
}

/// Bars clustered by year; colors come from the petition type, not from position.
pub fn grouped_bar_chart(table: &ScaledTable<PetitionType>) -> GroupedBarChart {
    let bars = table
        .rows
        .iter()
        .map(|row| Bar {
            group: row.year.to_string(),
            category: row.label.to_string(),
            value: row.value,
            color: petition_color(row.variable),
        })
        .collect();

    let mut present: Vec<(PetitionType, &'static str)> =
        table.rows.iter().map(|row| (row.variable, row.label)).collect();
    present.sort();
    present.dedup();

    GroupedBarChart {
        x_title: YEAR_AXIS.to_string(),
        y_title: table.magnitude.title("Personas"),
        bars,
        legend: present
            .into_iter()
            .map(|(petition, label)| LegendEntry {
                label: label.to_string(),
                color: petition_color(petition),
            })
            .collect(),
    }
}

pub fn horizontal_bar_chart(table: &ScaledTable<PopulationCategory>) -> HorizontalBarChart {
    HorizontalBarChart {
        category_title: "Tipo de población".to_string(),
        value_title: table.magnitude.title("Cantidad de personas"),
        bars: table
            .rows
            .iter()
            .map(|row| LabelledBar {
                category: row.label.to_string(),
                value: row.value,
                text: table.magnitude.format(row.value),
                color: population_color(row.variable),
            })
            .collect(),
    }
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

/// Arcs from origin to asylum country; `width` thins them out when flows get dense.
pub fn arc_map(movements: &[Movement], width: f64, config: &MapConfig) -> MapLayer {
    let features = movements
        .iter()
        .map(|m| {
            feature(
                Value::from(&m.line),
                object(json!({
                    "origin": m.origin_country,
                    "asylum": m.asylum_country,
                    "width": width,
                    "source_color": config.source_color,
                    "target_color": config.target_color,
                })),
            )
        })
        .collect();

    MapLayer {
        layer: "ArcLayer",
        view_state: ViewState { latitude: 0.0, longitude: 0.0, zoom: 1.0 },
        map_style: None,
        features: FeatureCollection { bbox: None, features, foreign_members: None },
    }
}

pub fn point_map(points: &[Point<f64>], config: &MapConfig) -> MapLayer {
    let features = points
        .iter()
        .map(|p| {
            feature(
                Value::from(p),
                object(json!({
                    "icon": {
                        "url": config.icon_url,
                        "width": config.icon_width,
                        "height": config.icon_height,
                    },
                    "size": 4,
                    "size_scale": 4,
                })),
            )
        })
        .collect();

    MapLayer {
        layer: "IconLayer",
        view_state: ViewState { latitude: 0.0, longitude: 0.0, zoom: 1.7 },
        map_style: Some("light"),
        features: FeatureCollection { bbox: None, features, foreign_members: None },
    }
}

/// Collects widgets and panels in call order for serialization.
#[derive(Debug, Default)]
pub struct PanelRenderer {
    pub widgets: Vec<WidgetSpec>,
    pub panels: Vec<Panel>,
}

impl Renderer for PanelRenderer {
    fn widget(&mut self, spec: WidgetSpec) {
        self.widgets.push(spec);
    }

    fn heading(&mut self, text: &str, level: u8) {
        self.panels.push(Panel::Heading { text: text.to_string(), level });
    }

    fn markdown(&mut self, text: &str) {
        self.panels.push(Panel::Markdown { text: text.to_string() });
    }

    fn caption(&mut self, text: &str) {
        self.panels.push(Panel::Caption { text: text.to_string() });
    }

    fn notice(&mut self, text: &str) {
        self.panels.push(Panel::Notice { text: text.to_string() });
    }

    fn metrics(&mut self, metrics: Vec<Metric>) {
        self.panels.push(Panel::Metrics { metrics });
    }

    fn line_chart(&mut self, chart: LineChart) {
        self.panels.push(Panel::LineChart(chart));
    }

    fn grouped_bar_chart(&mut self, chart: GroupedBarChart) {
        self.panels.push(Panel::GroupedBarChart(chart));
    }

    fn horizontal_bar_chart(&mut self, chart: HorizontalBarChart) {
        self.panels.push(Panel::HorizontalBarChart(chart));
    }

    fn arc_map(&mut self, map: MapLayer) {
        self.panels.push(Panel::ArcMap(map));
    }

    fn point_map(&mut self, map: MapLayer) {
        self.panels.push(Panel::PointMap(map));
    }
}
