use crate::errors::PresenterError;
use crate::models::{ClassAttendanceRecord, MonthlyAttendanceRecord};
use crate::stats::{month_label, parse_month, DerivedPercentage};
use serde::Serialize;
use tracing::{debug, error, info};

/// The two charts on the attendance page and the DOM names tied to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSlot {
    Monthly,
    Class,
}

impl ChartSlot {
    pub fn canvas_id(self) -> &'static str {
        match self {
            Self::Monthly => "monthlyChart",
            Self::Class => "classChart",
        }
    }

    pub fn data_input_id(self) -> &'static str {
        match self {
            Self::Monthly => "monthlyChartData",
            Self::Class => "classChartData",
        }
    }

    pub fn download_control_id(self) -> &'static str {
        match self {
            Self::Monthly => "download-monthly-chart",
            Self::Class => "download-class-chart",
        }
    }

    pub fn export_filename(self) -> &'static str {
        match self {
            Self::Monthly => "monthly_attendance_trends.png",
            Self::Class => "class_attendance_distribution.png",
        }
    }

    fn payload_name(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Class => "class",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteColor {
    Primary,
    Success,
    Info,
    Warning,
    Danger,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 5] = [
        Self::Primary,
        Self::Success,
        Self::Info,
        Self::Warning,
        Self::Danger,
    ];

    /// Round-robin pick used for doughnut slices.
    pub fn cycle(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn solid(self) -> &'static str {
        match self {
            Self::Primary => "rgb(13, 110, 253)",
            Self::Success => "rgb(25, 135, 84)",
            Self::Info => "rgb(13, 202, 240)",
            Self::Warning => "rgb(255, 193, 7)",
            Self::Danger => "rgb(220, 53, 69)",
        }
    }

    pub fn translucent(self) -> &'static str {
        match self {
            Self::Primary => "rgba(13, 110, 253, 0.5)",
            Self::Success => "rgba(25, 135, 84, 0.5)",
            Self::Info => "rgba(13, 202, 240, 0.5)",
            Self::Warning => "rgba(255, 193, 7, 0.5)",
            Self::Danger => "rgba(220, 53, 69, 0.5)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Single(&'static str),
    PerPoint(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Paint,
    pub border_color: Paint,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontOptions {
    pub size: u32,
    pub weight: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: &'static str,
    pub font: FontOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub title: TitleOptions,
    pub legend: LegendOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

/// A Chart.js configuration object, serialized as-is into the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Everything the engine needs to draw one chart. Tooltip lines and the tick
/// suffix are precomputed because Chart.js expects them as callbacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub canvas_id: &'static str,
    pub config: ChartConfig,
    pub tooltips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_suffix: Option<&'static str>,
}

/// The charting engine the presenter draws through.
pub trait ChartEngine {
    fn has_surface(&self, canvas_id: &str) -> bool;

    fn render(&mut self, spec: ChartSpec);

    /// PNG data URI of the surface's current contents.
    fn to_data_url(&self, canvas_id: &str) -> Option<String>;
}

pub trait DownloadSink {
    fn trigger_download(&mut self, filename: &str, href: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Uninitialized,
    Rendered,
}

/// Raw JSON arrays as embedded in the page's hidden inputs.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedPayloads {
    pub monthly: Option<String>,
    pub class: Option<String>,
}

impl EmbeddedPayloads {
    pub fn from_records(
        monthly: &[MonthlyAttendanceRecord],
        classes: &[ClassAttendanceRecord],
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            monthly: Some(serde_json::to_string(monthly)?),
            class: Some(serde_json::to_string(classes)?),
        })
    }
}

#[derive(Debug)]
pub struct ChartInitReport {
    pub monthly: Result<(), PresenterError>,
    pub class: Result<(), PresenterError>,
}

impl ChartInitReport {
    pub fn rendered_count(&self) -> usize {
        [&self.monthly, &self.class]
            .iter()
            .filter(|result| result.is_ok())
            .count()
    }
}

pub fn parse_monthly_payload(
    raw: Option<&str>,
) -> Result<Vec<MonthlyAttendanceRecord>, PresenterError> {
    let records: Vec<MonthlyAttendanceRecord> = parse_payload(ChartSlot::Monthly, raw)?;
    for record in &records {
        if parse_month(&record.month).is_none() {
            return Err(PresenterError::malformed(
                "monthly",
                format!("month `{}` is not YYYY-MM", record.month),
            ));
        }
        check_counts("monthly", record.present_count, record.total_sessions)?;
    }
    Ok(records)
}

pub fn parse_class_payload(
    raw: Option<&str>,
) -> Result<Vec<ClassAttendanceRecord>, PresenterError> {
    let records: Vec<ClassAttendanceRecord> = parse_payload(ChartSlot::Class, raw)?;
    for record in &records {
        check_counts("class", record.present_count, record.total_sessions)?;
    }
    Ok(records)
}

fn parse_payload<T: serde::de::DeserializeOwned>(
    slot: ChartSlot,
    raw: Option<&str>,
) -> Result<Vec<T>, PresenterError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text)
            .map_err(|err| PresenterError::malformed(slot.payload_name(), err)),
    }
}

fn check_counts(payload: &'static str, present: u32, total: u32) -> Result<(), PresenterError> {
    if present > total {
        return Err(PresenterError::malformed(
            payload,
            format!("present_count {present} exceeds total_sessions {total}"),
        ));
    }
    Ok(())
}

pub fn monthly_chart_spec(records: &[MonthlyAttendanceRecord]) -> ChartSpec {
    let values: Vec<DerivedPercentage> = records
        .iter()
        .map(|r| DerivedPercentage::new(r.present_count, r.total_sessions))
        .collect();

    ChartSpec {
        canvas_id: ChartSlot::Monthly.canvas_id(),
        config: ChartConfig {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: records
                    .iter()
                    .map(|r| month_label(&r.month).unwrap_or_else(|| r.month.clone()))
                    .collect(),
                datasets: vec![Dataset {
                    label: Some("Attendance Rate (%)".to_string()),
                    data: values.iter().map(|pct| pct.value).collect(),
                    background_color: Paint::Single(PaletteColor::Primary.translucent()),
                    border_color: Paint::Single(PaletteColor::Primary.solid()),
                    border_width: 1,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: Plugins {
                    title: chart_title("Monthly Attendance Trends"),
                    legend: LegendOptions {
                        display: false,
                        position: None,
                    },
                },
                scales: Some(Scales {
                    y: AxisOptions {
                        begin_at_zero: true,
                        min: 0.0,
                        max: 100.0,
                    },
                }),
            },
        },
        tooltips: values
            .iter()
            .map(|pct| format!("Attendance: {}%", pct.display()))
            .collect(),
        tick_suffix: Some("%"),
    }
}

pub fn class_chart_spec(records: &[ClassAttendanceRecord]) -> ChartSpec {
    let values: Vec<DerivedPercentage> = records
        .iter()
        .map(|r| DerivedPercentage::new(r.present_count, r.total_sessions))
        .collect();
    let colors: Vec<PaletteColor> = (0..records.len()).map(PaletteColor::cycle).collect();

    ChartSpec {
        canvas_id: ChartSlot::Class.canvas_id(),
        config: ChartConfig {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: records.iter().map(|r| r.class_name.clone()).collect(),
                datasets: vec![Dataset {
                    label: None,
                    data: values.iter().map(|pct| pct.value).collect(),
                    background_color: Paint::PerPoint(
                        colors.iter().map(|c| c.translucent()).collect(),
                    ),
                    border_color: Paint::PerPoint(colors.iter().map(|c| c.solid()).collect()),
                    border_width: 1,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: Plugins {
                    title: chart_title("Class-wise Attendance Distribution"),
                    legend: LegendOptions {
                        display: true,
                        position: Some("bottom"),
                    },
                },
                scales: None,
            },
        },
        tooltips: records
            .iter()
            .zip(&values)
            .map(|(r, pct)| format!("{}: {}%", r.class_name, pct.display()))
            .collect(),
        tick_suffix: None,
    }
}

fn chart_title(text: &'static str) -> TitleOptions {
    TitleOptions {
        display: true,
        text,
        font: FontOptions {
            size: 16,
            weight: "bold",
        },
    }
}

/// Turns the embedded attendance payloads into rendered charts.
///
/// Each chart moves from `Uninitialized` to `Rendered` at most once; a second
/// render request for a rendered chart is ignored.
pub struct ChartDataPresenter<E> {
    engine: E,
    monthly: ChartState,
    class: ChartState,
}

impl<E: ChartEngine> ChartDataPresenter<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            monthly: ChartState::Uninitialized,
            class: ChartState::Uninitialized,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn state(&self, slot: ChartSlot) -> ChartState {
        match slot {
            ChartSlot::Monthly => self.monthly,
            ChartSlot::Class => self.class,
        }
    }

    /// Initializes both charts independently; a failure in one never stops
    /// the other.
    pub fn initialize_charts(&mut self, payloads: &EmbeddedPayloads) -> ChartInitReport {
        let monthly = parse_monthly_payload(payloads.monthly.as_deref())
            .and_then(|records| self.render_monthly_chart(&records));
        log_outcome(ChartSlot::Monthly, &monthly);

        let class = parse_class_payload(payloads.class.as_deref())
            .and_then(|records| self.render_class_chart(&records));
        log_outcome(ChartSlot::Class, &class);

        ChartInitReport { monthly, class }
    }

    pub fn render_monthly_chart(
        &mut self,
        records: &[MonthlyAttendanceRecord],
    ) -> Result<(), PresenterError> {
        self.check_ready(ChartSlot::Monthly, records.is_empty())?;
        if self.monthly == ChartState::Rendered {
            return Ok(());
        }

        self.engine.render(monthly_chart_spec(records));
        self.monthly = ChartState::Rendered;
        debug!(points = records.len(), "monthly chart created");
        Ok(())
    }

    pub fn render_class_chart(
        &mut self,
        records: &[ClassAttendanceRecord],
    ) -> Result<(), PresenterError> {
        self.check_ready(ChartSlot::Class, records.is_empty())?;
        if self.class == ChartState::Rendered {
            return Ok(());
        }

        self.engine.render(class_chart_spec(records));
        self.class = ChartState::Rendered;
        debug!(slices = records.len(), "class chart created");
        Ok(())
    }

    pub fn export_chart_as_image(
        &self,
        chart_id: &str,
        filename: &str,
        sink: &mut impl DownloadSink,
    ) -> Result<(), PresenterError> {
        let data_url = self
            .engine
            .has_surface(chart_id)
            .then(|| self.engine.to_data_url(chart_id))
            .flatten();

        match data_url {
            Some(href) => {
                sink.trigger_download(filename, &href);
                Ok(())
            }
            None => {
                error!("canvas not found for chart: {chart_id}");
                Err(PresenterError::MissingElement(chart_id.to_string()))
            }
        }
    }

    fn check_ready(&self, slot: ChartSlot, empty: bool) -> Result<(), PresenterError> {
        if empty {
            return Err(PresenterError::MissingData(slot.payload_name()));
        }
        if !self.engine.has_surface(slot.canvas_id()) {
            return Err(PresenterError::MissingElement(slot.canvas_id().to_string()));
        }
        Ok(())
    }
}

fn log_outcome(slot: ChartSlot, outcome: &Result<(), PresenterError>) {
    match outcome {
        Ok(()) => {}
        Err(err @ PresenterError::MissingData(_)) => info!(chart = slot.canvas_id(), "{err}"),
        Err(err) => error!(chart = slot.canvas_id(), "{err}"),
    }
}

/// Engine backing the server-rendered page: it knows which canvases the page
/// declares and collects the specs the browser will hand to Chart.js.
#[derive(Debug, Default)]
pub struct PageCharts {
    surfaces: Vec<String>,
    specs: Vec<ChartSpec>,
}

impl PageCharts {
    pub fn with_surfaces<I, S>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            surfaces: surfaces.into_iter().map(Into::into).collect(),
            specs: Vec::new(),
        }
    }

    pub fn specs(&self) -> &[ChartSpec] {
        &self.specs
    }

    pub fn into_specs(self) -> Vec<ChartSpec> {
        self.specs
    }
}

impl ChartEngine for PageCharts {
    fn has_surface(&self, canvas_id: &str) -> bool {
        self.surfaces.iter().any(|id| id == canvas_id)
    }

    fn render(&mut self, spec: ChartSpec) {
        self.specs.push(spec);
    }

    fn to_data_url(&self, _canvas_id: &str) -> Option<String> {
        // Pixels only exist in the browser.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingEngine {
        surfaces: Vec<&'static str>,
        rendered: Vec<ChartSpec>,
    }

    impl RecordingEngine {
        fn with_both_canvases() -> Self {
            Self {
                surfaces: vec!["monthlyChart", "classChart"],
                rendered: Vec::new(),
            }
        }
    }

    impl ChartEngine for RecordingEngine {
        fn has_surface(&self, canvas_id: &str) -> bool {
            self.surfaces.iter().any(|id| *id == canvas_id)
        }

        fn render(&mut self, spec: ChartSpec) {
            self.rendered.push(spec);
        }

        fn to_data_url(&self, canvas_id: &str) -> Option<String> {
            self.rendered
                .iter()
                .any(|spec| spec.canvas_id == canvas_id)
                .then(|| "data:image/png;base64,iVBORw0KGgo=".to_string())
        }
    }

    #[derive(Default)]
    struct Downloads(Vec<(String, String)>);

    impl DownloadSink for Downloads {
        fn trigger_download(&mut self, filename: &str, href: &str) {
            self.0.push((filename.to_string(), href.to_string()));
        }
    }

    fn class(name: &str, total: u32, present: u32) -> ClassAttendanceRecord {
        ClassAttendanceRecord {
            class_id: None,
            class_name: name.to_string(),
            course_name: None,
            total_sessions: total,
            present_count: present,
        }
    }

    #[test]
    fn monthly_chart_has_labeled_percentage_bar() {
        let mut presenter = ChartDataPresenter::new(RecordingEngine::with_both_canvases());
        let records = parse_monthly_payload(Some(
            r#"[{"month":"2024-01","total_sessions":20,"present_count":18}]"#,
        ))
        .unwrap();

        presenter.render_monthly_chart(&records).unwrap();

        let spec = &presenter.engine().rendered[0];
        assert_eq!(spec.config.kind, ChartKind::Bar);
        assert_eq!(spec.config.data.labels, vec!["January 2024"]);
        assert_eq!(spec.config.data.datasets[0].data, vec![90.0]);
        assert_eq!(spec.tooltips, vec!["Attendance: 90.0%"]);
        assert_eq!(spec.tick_suffix, Some("%"));
        let y = &spec.config.options.scales.as_ref().unwrap().y;
        assert_eq!((y.min, y.max), (0.0, 100.0));
        assert_eq!(presenter.state(ChartSlot::Monthly), ChartState::Rendered);
    }

    #[test]
    fn class_chart_keeps_zero_slices() {
        let mut presenter = ChartDataPresenter::new(RecordingEngine::with_both_canvases());
        presenter.render_class_chart(&[class("Math", 10, 0)]).unwrap();

        let spec = &presenter.engine().rendered[0];
        assert_eq!(spec.config.kind, ChartKind::Doughnut);
        assert_eq!(spec.config.data.labels, vec!["Math"]);
        assert_eq!(spec.config.data.datasets[0].data, vec![0.0]);
        assert_eq!(spec.tooltips, vec!["Math: 0.0%"]);
    }

    #[test]
    fn class_colors_cycle_through_palette() {
        let records: Vec<_> = (0..7).map(|i| class(&format!("C{i}"), 4, 2)).collect();
        let spec = class_chart_spec(&records);

        let Paint::PerPoint(colors) = &spec.config.data.datasets[0].border_color else {
            panic!("expected per-slice colors");
        };
        assert_eq!(colors.len(), 7);
        assert_eq!(colors[0], PaletteColor::Primary.solid());
        assert_eq!(colors[4], PaletteColor::Danger.solid());
        assert_eq!(colors[5], PaletteColor::Primary.solid());
        assert_eq!(colors[6], PaletteColor::Success.solid());
    }

    #[test]
    fn empty_records_construct_nothing() {
        let mut presenter = ChartDataPresenter::new(RecordingEngine::with_both_canvases());

        let monthly = presenter.render_monthly_chart(&[]);
        let classes = presenter.render_class_chart(&[]);

        assert!(matches!(monthly, Err(PresenterError::MissingData(_))));
        assert!(matches!(classes, Err(PresenterError::MissingData(_))));
        assert!(presenter.engine().rendered.is_empty());
        assert_eq!(presenter.state(ChartSlot::Class), ChartState::Uninitialized);
    }

    #[test]
    fn missing_canvas_skips_chart() {
        let engine = RecordingEngine {
            surfaces: vec!["classChart"],
            rendered: Vec::new(),
        };
        let mut presenter = ChartDataPresenter::new(engine);
        let records = vec![MonthlyAttendanceRecord {
            month: "2024-02".into(),
            total_sessions: 4,
            present_count: 4,
        }];

        let result = presenter.render_monthly_chart(&records);
        assert!(matches!(result, Err(PresenterError::MissingElement(id)) if id == "monthlyChart"));
        assert!(presenter.engine().rendered.is_empty());
    }

    #[test]
    fn malformed_payload_only_aborts_its_chart() {
        let mut presenter = ChartDataPresenter::new(RecordingEngine::with_both_canvases());
        let payloads = EmbeddedPayloads {
            monthly: Some("[{\"month\":".to_string()),
            class: Some(r#"[{"class_name":"Art","total_sessions":8,"present_count":6}]"#.into()),
        };

        let report = presenter.initialize_charts(&payloads);

        assert!(matches!(
            report.monthly,
            Err(PresenterError::MalformedInput { payload: "monthly", .. })
        ));
        assert!(report.class.is_ok());
        assert_eq!(report.rendered_count(), 1);
        assert_eq!(presenter.engine().rendered[0].tooltips, vec!["Art: 75.0%"]);
    }

    #[test]
    fn payload_validation_rejects_bad_records() {
        let bad_month = parse_monthly_payload(Some(
            r#"[{"month":"Jan 2024","total_sessions":1,"present_count":1}]"#,
        ));
        assert!(matches!(bad_month, Err(PresenterError::MalformedInput { .. })));

        let too_many = parse_class_payload(Some(
            r#"[{"class_name":"Math","total_sessions":1,"present_count":2}]"#,
        ));
        assert!(matches!(too_many, Err(PresenterError::MalformedInput { .. })));

        let negative = parse_class_payload(Some(
            r#"[{"class_name":"Math","total_sessions":-1,"present_count":0}]"#,
        ));
        assert!(matches!(negative, Err(PresenterError::MalformedInput { .. })));
    }

    #[test]
    fn absent_payload_is_missing_data() {
        let mut presenter = ChartDataPresenter::new(RecordingEngine::with_both_canvases());
        let report = presenter.initialize_charts(&EmbeddedPayloads {
            monthly: None,
            class: Some("  ".into()),
        });
        assert!(matches!(report.monthly, Err(PresenterError::MissingData("monthly"))));
        assert!(matches!(report.class, Err(PresenterError::MissingData("class"))));
    }

    #[test]
    fn export_downloads_rendered_chart() {
        let mut presenter = ChartDataPresenter::new(RecordingEngine::with_both_canvases());
        presenter.render_class_chart(&[class("Math", 2, 1)]).unwrap();
        let mut downloads = Downloads::default();

        presenter
            .export_chart_as_image(
                ChartSlot::Class.canvas_id(),
                ChartSlot::Class.export_filename(),
                &mut downloads,
            )
            .unwrap();

        assert_eq!(downloads.0.len(), 1);
        assert_eq!(downloads.0[0].0, "class_attendance_distribution.png");
        assert!(downloads.0[0].1.starts_with("data:image/png"));
    }

    #[test]
    fn export_without_surface_downloads_nothing() {
        let presenter = ChartDataPresenter::new(RecordingEngine::default());
        let mut downloads = Downloads::default();

        let result =
            presenter.export_chart_as_image("monthlyChart", "monthly.png", &mut downloads);

        assert!(matches!(result, Err(PresenterError::MissingElement(_))));
        assert!(downloads.0.is_empty());
    }

    #[test]
    fn chart_config_serializes_for_chartjs() {
        let spec = monthly_chart_spec(&[MonthlyAttendanceRecord {
            month: "2024-03".into(),
            total_sessions: 0,
            present_count: 0,
        }]);
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["canvasId"], "monthlyChart");
        assert_eq!(json["config"]["type"], "bar");
        assert_eq!(json["config"]["options"]["maintainAspectRatio"], false);
        assert_eq!(json["config"]["options"]["scales"]["y"]["max"], 100.0);
        assert_eq!(json["config"]["data"]["datasets"][0]["data"][0], 0.0);
        assert_eq!(
            json["config"]["data"]["datasets"][0]["backgroundColor"],
            "rgba(13, 110, 253, 0.5)"
        );
    }

    #[test]
    fn page_charts_collects_specs_for_declared_canvases() {
        let mut presenter =
            ChartDataPresenter::new(PageCharts::with_surfaces(["monthlyChart", "classChart"]));
        let payloads = EmbeddedPayloads::from_records(
            &[MonthlyAttendanceRecord {
                month: "2024-01".into(),
                total_sessions: 20,
                present_count: 18,
            }],
            &[class("Math", 10, 0)],
        )
        .unwrap();

        let report = presenter.initialize_charts(&payloads);
        assert_eq!(report.rendered_count(), 2);

        let specs = presenter.into_engine().into_specs();
        assert_eq!(specs[0].canvas_id, "monthlyChart");
        assert_eq!(specs[1].canvas_id, "classChart");
    }
}
