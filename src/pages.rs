//! Page controller: for each navigation section, which widgets are shown, what
//! they select, and which transform and render pair runs on the result.

use crate::config::MapConfig;
use crate::labels::Dictionaries;
use crate::processing::{self, LongRow};
use crate::render::{self, Metric, Panel, PanelRenderer, Renderer};
use crate::types::{
    Continent, Datasets, PetitionCounts, PetitionType, PopulationCategory, Selection, Situation,
};
use crate::widgets::{self, SelectionError, WidgetSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const NO_DATA_FOR_SELECTION: &str = "No existen datos para la selección realizada, prueba otra.";
pub const NO_DATA_TO_SHOW: &str = "No hay datos para mostrar";
pub const SOURCE_CAPTION: &str = "Fuente: Elaboración propia con datos extraídos de ACNUR.";

const MOVEMENT_FIRST_YEAR: i32 = 1970;
const COUNTRY_FIRST_YEAR: i32 = 1951;
const LAST_YEAR: i32 = 2022;
// After this year the world map is unreadable without an origin continent filter
const DENSE_FLOW_YEAR: i32 = 1995;

/// Read-only handles every page works from.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    pub data: &'a Datasets,
    pub labels: &'a Dictionaries,
    pub map: &'a MapConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Overview,
    General,
    Country,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Overview, Page::General, Page::Country];

    pub fn key(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::General => "general",
            Page::Country => "country",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Problemática",
            Page::General => "Situación general",
            Page::Country => "Situación por país",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewParams {
    pub year: Option<String>,
    pub continent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralParams {
    pub population: Option<String>,
    pub continent: Option<String>,
    pub petitions: Option<String>,
    pub origin: Option<String>,
    pub asylum: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryParams {
    pub continent: Option<String>,
    pub country: Option<String>,
    pub year: Option<String>,
    pub situation: Option<String>,
}

#[derive(Debug, Clone)]
pub enum PageRequest {
    Overview(OverviewParams),
    General(GeneralParams),
    Country(CountryParams),
}

impl PageRequest {
    pub fn page(&self) -> Page {
        match self {
            PageRequest::Overview(_) => Page::Overview,
            PageRequest::General(_) => Page::General,
            PageRequest::Country(_) => Page::Country,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDocument {
    pub page: Page,
    pub widgets: Vec<WidgetSpec>,
    pub panels: Vec<Panel>,
}

/// Evaluates one interaction top to bottom into a serializable document.
pub fn evaluate(ctx: PageContext<'_>, request: &PageRequest) -> Result<PageDocument, SelectionError> {
    debug!(page = request.page().key(), "evaluating page");

    let mut renderer = PanelRenderer::default();
    match request {
        PageRequest::Overview(params) => overview(ctx, params, &mut renderer)?,
        PageRequest::General(params) => general(ctx, params, &mut renderer)?,
        PageRequest::Country(params) => country(ctx, params, &mut renderer)?,
    }

    Ok(PageDocument {
        page: request.page(),
        widgets: renderer.widgets,
        panels: renderer.panels,
    })
}

pub fn overview<R: Renderer>(
    ctx: PageContext<'_>,
    params: &OverviewParams,
    out: &mut R,
) -> Result<(), SelectionError> {
    out.heading("Obligado a dejar mi hogar, mi país.", 1);
    out.heading("¿Qué significa ser refugiado?", 3);
    out.markdown(
        "El Artículo 14 de la Declaración Universal de Derechos Humanos reconoce el derecho \
         de las personas a solicitar asilo en otros países a raíz de persecución. A partir de \
         él, la Convención de Naciones Unidas sobre el Estatuto de los Refugiados define a \
         estos como personas que no pueden o no quieren regresar a su país de origen por \
         fundados temores de ser perseguidas por motivos de raza, religión, nacionalidad, \
         pertenencia a un determinado grupo social u opinión política.",
    );
    out.heading("¿Quién protege a los refugiados en el mundo?", 3);
    out.markdown(
        "La protección de las personas refugiadas abarca la garantía de no ser devueltas al \
         peligro, el acceso a procedimientos de asilo justos y eficientes, y el respeto de sus \
         derechos humanos básicos mientras se buscan soluciones a largo plazo. El Alto \
         Comisionado de las Naciones Unidas para los Refugiados tiene como misión protegerlas \
         y promover soluciones duraderas, ya sea el retorno voluntario a su país de origen o \
         el reasentamiento en el de acogida.",
    );

    let last_year = ctx
        .data
        .max_population_year()
        .unwrap_or(MOVEMENT_FIRST_YEAR)
        .clamp(MOVEMENT_FIRST_YEAR, LAST_YEAR);
    let year = widgets::year_selectbox("year", "Selecciona un año", MOVEMENT_FIRST_YEAR..=last_year, 18)
        .select(params.year.as_deref())?;
    out.widget(year.spec);
    let year = year.value;

    let (origin, width) = if year > DENSE_FLOW_YEAR {
        out.markdown(
            "Debido al aumento del flujo de refugiados mundial, elige un continente para una \
             mejor visualización.",
        );
        let continent = widgets::continent_selectbox(
            &ctx.labels.continents,
            &[
                Selection::Only(Continent::Stateless),
                Selection::Only(Continent::Unknown),
                Selection::All,
            ],
            "continent",
            None,
            0,
        )
        .select(params.continent.as_deref())?;
        out.widget(continent.spec);
        (continent.value.only(), 0.4)
    } else {
        (None, 1.0)
    };

    let movements = processing::movements(&ctx.data.population, year, origin);
    if movements.is_empty() {
        out.notice(NO_DATA_FOR_SELECTION);
        return Ok(());
    }
    out.arc_map(render::arc_map(&movements, width, ctx.map));
    out.caption(SOURCE_CAPTION);
    Ok(())
}

pub fn general<R: Renderer>(
    ctx: PageContext<'_>,
    params: &GeneralParams,
    out: &mut R,
) -> Result<(), SelectionError> {
    out.heading("Situación general de los refugiados", 2);

    out.heading("Evolución de los flujos poblacionales a lo largo del tiempo", 3);
    let population = widgets::population_selectbox(&ctx.labels.population)
        .select(params.population.as_deref())?;
    out.widget(population.spec);
    let continent = widgets::continent_selectbox(&ctx.labels.continents, &[], "continent", None, 0)
        .select(params.continent.as_deref())?;
    out.widget(continent.spec);

    let by_year = processing::population_by_year(&ctx.data.population, continent.value);
    let (wide, columns, y_title) = match population.value {
        Selection::Only(category) => (
            processing::category_series(&by_year, category),
            vec![category],
            population.label.clone(),
        ),
        Selection::All => (
            processing::wide_rows(&by_year, &PopulationCategory::ALL),
            PopulationCategory::ALL.to_vec(),
            "Población".to_string(),
        ),
    };
    let long = processing::melt(&wide, &columns);
    if long.is_empty() {
        out.notice(NO_DATA_FOR_SELECTION);
    } else {
        let table = processing::scale_rows(processing::relabel(long, &ctx.labels.categories));
        out.line_chart(render::line_chart(&table, &y_title));
        out.caption(SOURCE_CAPTION);
    }

    out.heading(
        "Evolución de las solicitudes y resoluciones de asilo a lo largo del tiempo",
        3,
    );
    let (petitions, spec) = widgets::petition_multiselect(&ctx.labels.petitions)
        .select(params.petitions.as_deref())?;
    out.widget(spec);
    let origin = widgets::continent_selectbox(
        &ctx.labels.continents,
        &[],
        "origin",
        Some("de origen"),
        0,
    )
    .select(params.origin.as_deref())?;
    out.widget(origin.spec);
    let asylum = widgets::continent_selectbox(
        &ctx.labels.continents,
        &[
            Selection::Only(Continent::Stateless),
            Selection::Only(Continent::Unknown),
        ],
        "asylum",
        Some("de asilo"),
        0,
    )
    .select(params.asylum.as_deref())?;
    out.widget(asylum.spec);

    let grouped = processing::petitions_by_year_and_asylum(&ctx.data.petitions, origin.value);
    let by_year = processing::collapse_by_year(&grouped, asylum.value);
    let long = petitions_long(&by_year, &petitions);
    if long.is_empty() {
        out.notice(NO_DATA_FOR_SELECTION);
    } else {
        let table = processing::scale_rows(processing::relabel(long, &ctx.labels.petitions));
        out.grouped_bar_chart(render::grouped_bar_chart(&table));
        out.caption(SOURCE_CAPTION);
    }

    Ok(())
}

fn petitions_long(
    by_year: &BTreeMap<i32, PetitionCounts>,
    petitions: &[PetitionType],
) -> Vec<LongRow<PetitionType>> {
    let wide = processing::wide_rows(by_year, petitions);
    processing::melt(&wide, petitions)
}

pub fn country<R: Renderer>(
    ctx: PageContext<'_>,
    params: &CountryParams,
    out: &mut R,
) -> Result<(), SelectionError> {
    out.heading("Situación de los refugiados por país", 2);

    let continent = widgets::continent_selectbox(
        &ctx.labels.continents,
        &[
            Selection::Only(Continent::Stateless),
            Selection::Only(Continent::Unknown),
            Selection::All,
        ],
        "continent",
        None,
        2,
    )
    .select(params.continent.as_deref())?;
    out.widget(continent.spec);

    let countries = match continent.value {
        Selection::Only(c) => widgets::country_selectbox(ctx.data, c),
        // excluded from the options above
        Selection::All => return Ok(()),
    };
    if countries.is_empty() {
        out.notice(NO_DATA_TO_SHOW);
        return Ok(());
    }
    let country = countries.select(params.country.as_deref())?;
    out.widget(country.spec);

    let year = widgets::year_selectbox("year", "Año", COUNTRY_FIRST_YEAR..=LAST_YEAR, 70)
        .select(params.year.as_deref())?;
    out.widget(year.spec);

    let situation = widgets::situation_radio(&ctx.labels.situations)
        .select(params.situation.as_deref())?;
    out.widget(situation.spec);

    let (name, year, situation) = (country.value, year.value, situation.value);

    out.heading(&name, 3);
    out.markdown(&match situation {
        Situation::Received => format!(
            "**Las personas de los siguientes países se localizaron en {} en el año {}.**",
            name, year
        ),
        Situation::Sent => format!(
            "**Las personas de {} se localizaron en los siguientes países en el año {}.**",
            name, year
        ),
    });

    let totals = processing::country_totals(&ctx.data.population, &name, year, situation);
    let sexes = processing::demographics_totals(&ctx.data.demographics, &name, year, situation)
        .unwrap_or_default();
    let counts = totals.unwrap_or_default();
    let tracked = situation.tracked_categories();

    out.metrics(vec![
        Metric {
            label: "Desplazados por la fuerza".to_string(),
            value: counts.sum_of(tracked).to_string(),
        },
        Metric {
            label: "Apátridas".to_string(),
            value: counts.stateless.to_string(),
        },
        Metric {
            label: "Mujeres".to_string(),
            value: format!("{:.2}%", processing::share_percent(sexes.female, sexes.total)),
        },
        Metric {
            label: "Hombres".to_string(),
            value: format!("{:.2}%", processing::share_percent(sexes.male, sexes.total)),
        },
    ]);

    let rows = processing::breakdown(&counts, tracked, year);
    if rows.is_empty() {
        out.notice(NO_DATA_TO_SHOW);
        return Ok(());
    }

    let table = processing::scale_rows(processing::relabel(rows, &ctx.labels.categories));
    out.horizontal_bar_chart(render::horizontal_bar_chart(&table));
    out.caption(SOURCE_CAPTION);

    let locations = processing::counterpart_locations(&ctx.data.population, &name, year, situation);
    if locations.is_empty() {
        out.notice(NO_DATA_TO_SHOW);
        return Ok(());
    }
    out.point_map(render::point_map(&locations, ctx.map));
    out.caption(SOURCE_CAPTION);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{GroupedBarChart, HorizontalBarChart, LineChart, MapLayer};
    use crate::types::{
        Country, DemographicsRecord, PetitionRecord, PopulationCounts, PopulationRecord, SexTotals,
    };
    use geo::Point;

    /// Counts calls per entry point and keeps the text of notices.
    #[derive(Default)]
    struct Recorder {
        widgets: Vec<WidgetSpec>,
        notices: Vec<String>,
        metrics: Vec<Metric>,
        lines: Vec<LineChart>,
        grouped: Vec<GroupedBarChart>,
        horizontal: Vec<HorizontalBarChart>,
        arcs: Vec<MapLayer>,
        points: Vec<MapLayer>,
    }

    impl Recorder {
        fn charts(&self) -> usize {
            self.lines.len() + self.grouped.len() + self.horizontal.len() + self.arcs.len() + self.points.len()
        }
    }

    impl Renderer for Recorder {
        fn widget(&mut self, spec: WidgetSpec) {
            self.widgets.push(spec);
        }
        fn heading(&mut self, _text: &str, _level: u8) {}
        fn markdown(&mut self, _text: &str) {}
        fn caption(&mut self, _text: &str) {}
        fn notice(&mut self, text: &str) {
            self.notices.push(text.to_string());
        }
        fn metrics(&mut self, metrics: Vec<Metric>) {
            self.metrics = metrics;
        }
        fn line_chart(&mut self, chart: LineChart) {
            self.lines.push(chart);
        }
        fn grouped_bar_chart(&mut self, chart: GroupedBarChart) {
            self.grouped.push(chart);
        }
        fn horizontal_bar_chart(&mut self, chart: HorizontalBarChart) {
            self.horizontal.push(chart);
        }
        fn arc_map(&mut self, map: MapLayer) {
            self.arcs.push(map);
        }
        fn point_map(&mut self, map: MapLayer) {
            self.points.push(map);
        }
    }

    fn flow(year: i32, origin: &str, asylum: &str, continent: Continent, refugees: u64) -> PopulationRecord {
        PopulationRecord {
            year,
            origin_country: origin.to_string(),
            asylum_country: asylum.to_string(),
            origin_continent: continent,
            asylum_continent: Continent::Europe,
            origin_location: Some(Point::new(refugees as f64, 1.0)),
            asylum_location: Some(Point::new(2.0, 46.0)),
            counts: PopulationCounts {
                refugees,
                asylum_seekers: 10,
                stateless: 3,
                ..PopulationCounts::default()
            },
        }
    }

    fn fixture() -> (Datasets, Dictionaries, MapConfig) {
        let data = Datasets {
            population: vec![
                flow(1988, "Vietnam", "France", Continent::Asia, 2_000),
                flow(2000, "Syria", "France", Continent::Asia, 1_500_000),
                flow(2000, "Mali", "France", Continent::Africa, 4_000),
                flow(2010, "Mali", "France", Continent::Africa, 50),
            ],
            petitions: vec![
                PetitionRecord {
                    year: 2010,
                    origin_continent: Continent::Africa,
                    asylum_continent: Continent::Europe,
                    counts: crate::types::PetitionCounts {
                        total_applied: 900,
                        claims_closed: 100,
                        ..Default::default()
                    },
                },
                PetitionRecord {
                    year: 2011,
                    origin_continent: Continent::Africa,
                    asylum_continent: Continent::Europe,
                    counts: crate::types::PetitionCounts {
                        total_applied: 1_200,
                        ..Default::default()
                    },
                },
            ],
            countries: vec![
                Country { name: "France".into(), continent: Continent::Europe },
                Country { name: "Mali".into(), continent: Continent::Africa },
            ],
            demographics: vec![DemographicsRecord {
                year: 2010,
                asylum_country: "France".into(),
                origin_country: "Mali".into(),
                totals: SexTotals { total: 40, female: 10, male: 30 },
            }],
        };
        (data, Dictionaries::new().unwrap(), MapConfig::default())
    }

    #[test]
    fn overview_defaults_to_1988_without_continent_filter() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let mut out = Recorder::default();
        overview(ctx, &OverviewParams::default(), &mut out).unwrap();

        assert_eq!(out.widgets.len(), 1);
        assert_eq!(out.widgets[0].selected, ["1988"]);
        assert_eq!(out.arcs.len(), 1);
        assert_eq!(out.arcs[0].features.features.len(), 1);
    }

    #[test]
    fn overview_after_1995_filters_by_origin_continent() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = OverviewParams { year: Some("2000".into()), continent: Some("Africa".into()) };
        let mut out = Recorder::default();
        overview(ctx, &params, &mut out).unwrap();

        assert_eq!(out.widgets.len(), 2);
        let arcs = &out.arcs[0].features.features;
        assert_eq!(arcs.len(), 1);
        let props = arcs[0].properties.as_ref().unwrap();
        assert_eq!(props["origin"], "Mali");
        assert_eq!(props["width"], 0.4);
    }

    #[test]
    fn overview_year_without_flows_shows_notice() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let mut out = Recorder::default();
        overview(ctx, &OverviewParams { year: Some("1975".into()), continent: None }, &mut out).unwrap();
        assert_eq!(out.notices, [NO_DATA_FOR_SELECTION]);
        assert_eq!(out.charts(), 0);
    }

    #[test]
    fn general_page_scales_single_population_series() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = GeneralParams { continent: Some("Todos".into()), ..Default::default() };
        let mut out = Recorder::default();
        general(ctx, &params, &mut out).unwrap();

        let chart = &out.lines[0];
        assert_eq!(chart.y_title, "Refugiados (en millones)");
        assert_eq!(chart.series.len(), 1);
        let years: Vec<_> = chart.series[0].points.iter().map(|(y, _)| y.as_str()).collect();
        assert_eq!(years, ["1988", "2000", "2010"]);
        assert_eq!(chart.series[0].points[1].1, 1.504);
    }

    #[test]
    fn general_page_all_categories_draws_every_series() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = GeneralParams {
            population: Some("Todas".into()),
            continent: Some("Todos".into()),
            ..Default::default()
        };
        let mut out = Recorder::default();
        general(ctx, &params, &mut out).unwrap();
        assert_eq!(out.lines[0].series.len(), 8);
    }

    #[test]
    fn general_page_empty_continent_never_reaches_renderer() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = GeneralParams {
            continent: Some("Oceania".into()),
            origin: Some("Oceania".into()),
            ..Default::default()
        };
        let mut out = Recorder::default();
        general(ctx, &params, &mut out).unwrap();
        assert_eq!(out.notices, [NO_DATA_FOR_SELECTION, NO_DATA_FOR_SELECTION]);
        assert_eq!(out.charts(), 0);
    }

    #[test]
    fn petitions_long_form_has_one_row_per_selected_type_and_year() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = GeneralParams {
            petitions: Some("Solicitudes,Caso cerrado".into()),
            origin: Some("Africa".into()),
            asylum: Some("Europa".into()),
            ..Default::default()
        };
        let mut out = Recorder::default();
        general(ctx, &params, &mut out).unwrap();

        let chart = &out.grouped[0];
        assert_eq!(chart.bars.len(), 4);
        for year in ["2010", "2011"] {
            let labels: Vec<_> = chart
                .bars
                .iter()
                .filter(|b| b.group == year)
                .map(|b| b.category.as_str())
                .collect();
            assert_eq!(labels, ["Caso cerrado", "Solicitudes"]);
        }
        assert_eq!(chart.y_title, "Personas (en miles)");
    }

    #[test]
    fn empty_petition_selection_shows_notice() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = GeneralParams {
            petitions: Some(String::new()),
            origin: Some("Africa".into()),
            asylum: Some("Europa".into()),
            ..Default::default()
        };
        let mut out = Recorder::default();
        general(ctx, &params, &mut out).unwrap();
        assert!(out.grouped.is_empty());
        assert_eq!(out.notices, [NO_DATA_FOR_SELECTION]);
    }

    #[test]
    fn country_without_rows_skips_breakdown_and_map() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = CountryParams {
            continent: Some("Europa".into()),
            country: Some("France".into()),
            year: Some("2015".into()),
            situation: Some("Recibidos".into()),
        };
        let mut out = Recorder::default();
        country(ctx, &params, &mut out).unwrap();

        assert_eq!(out.notices, [NO_DATA_TO_SHOW]);
        assert_eq!(out.charts(), 0);
        let values: Vec<_> = out.metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, ["0", "0", "0.00%", "0.00%"]);
    }

    #[test]
    fn country_received_breakdown_and_metrics() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = CountryParams {
            continent: Some("Europa".into()),
            country: Some("France".into()),
            year: Some("2010".into()),
            situation: None,
        };
        let mut out = Recorder::default();
        country(ctx, &params, &mut out).unwrap();

        let values: Vec<_> = out.metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, ["60", "3", "25.00%", "75.00%"]);

        let bars = &out.horizontal[0].bars;
        let categories: Vec<_> = bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(categories, ["Refugiados", "Solicitantes de asilo"]);
        assert_eq!(bars[0].text, "50.00");
        assert_eq!(out.points[0].features.features.len(), 1);
    }

    #[test]
    fn country_with_unlocated_counterparts_skips_point_map() {
        let (mut data, labels, map) = fixture();
        let mut unknown = flow(2012, "Unknown", "France", Continent::Unknown, 500);
        unknown.origin_location = None;
        data.population.push(unknown);
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let params = CountryParams {
            continent: Some("Europa".into()),
            country: Some("France".into()),
            year: Some("2012".into()),
            situation: Some("Recibidos".into()),
        };
        let mut out = Recorder::default();
        country(ctx, &params, &mut out).unwrap();

        assert_eq!(out.horizontal.len(), 1);
        assert!(out.points.is_empty());
        assert_eq!(out.notices, [NO_DATA_TO_SHOW]);
    }

    #[test]
    fn country_defaults_to_third_continent_option() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let mut out = Recorder::default();
        country(ctx, &CountryParams::default(), &mut out).unwrap();

        // Asia has no reference countries in the fixture
        assert_eq!(out.widgets[0].selected, ["Asia"]);
        assert_eq!(out.widgets.len(), 1);
        assert_eq!(out.notices, [NO_DATA_TO_SHOW]);
    }

    #[test]
    fn unknown_choice_is_a_selection_error() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let request = PageRequest::General(GeneralParams {
            population: Some("Marcianos".into()),
            ..Default::default()
        });
        assert!(matches!(
            evaluate(ctx, &request),
            Err(SelectionError::UnknownOption { .. })
        ));
    }

    #[test]
    fn evaluate_collects_a_document() {
        let (data, labels, map) = fixture();
        let ctx = PageContext { data: &data, labels: &labels, map: &map };
        let doc = evaluate(ctx, &PageRequest::Overview(OverviewParams::default())).unwrap();
        assert_eq!(doc.page, Page::Overview);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["page"], "overview");
        assert!(json["panels"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p["type"] == "arc_map"));
    }
}
