use crate::charts::{ChartSlot, ChartSpec, EmbeddedPayloads};
use crate::models::{ClassAttendanceRecord, OverallStats, StudentProfile};
use crate::records::{RecordFilter, RecordPage, DATE_FORMAT};
use crate::stats::DerivedPercentage;
use crate::views::{progress_bar_style, History, PageUrl, ViewStateController};
use std::fmt::Write as _;

pub struct PageView<'a, H> {
    pub student: Option<&'a StudentProfile>,
    pub overall: &'a OverallStats,
    pub views: &'a ViewStateController<H>,
    pub classes: &'a [ClassAttendanceRecord],
    pub records: &'a RecordPage<'a>,
    pub filter: &'a RecordFilter,
    pub payloads: &'a EmbeddedPayloads,
    pub chart_specs: &'a [ChartSpec],
}

pub fn render_attendance_page<H: History>(page: &PageView<'_, H>) -> String {
    let student = page
        .student
        .map(|s| format!("{} &middot; {}", escape_html(&s.full_name()), escape_html(&s.student_id)))
        .unwrap_or_else(|| "Student".to_string());
    let specs = serde_json::to_string(page.chart_specs).unwrap_or_else(|_| "[]".to_string());

    INDEX_HTML
        .replace("{{STUDENT}}", &student)
        .replace("{{ACTION_CARDS}}", &action_cards(page.views))
        .replace("{{OVERVIEW_ACTIVE}}", active_class(page.views, "overview"))
        .replace("{{ATTENDANCE_ACTIVE}}", active_class(page.views, "attendance"))
        .replace("{{CLASS_ACTIVE}}", active_class(page.views, "class"))
        .replace("{{TOTAL}}", &page.overall.total_sessions.to_string())
        .replace("{{PRESENT}}", &page.overall.present_count.to_string())
        .replace("{{ABSENT}}", &page.overall.absent_count.to_string())
        .replace("{{RATE}}", &format!("{:.1}", page.overall.attendance_rate))
        .replace("{{MONTHLY_DATA_ID}}", ChartSlot::Monthly.data_input_id())
        .replace("{{CLASS_DATA_ID}}", ChartSlot::Class.data_input_id())
        .replace(
            "{{MONTHLY_DATA}}",
            &escape_html(page.payloads.monthly.as_deref().unwrap_or("[]")),
        )
        .replace(
            "{{CLASS_DATA}}",
            &escape_html(page.payloads.class.as_deref().unwrap_or("[]")),
        )
        .replace("{{MONTHLY_CARD}}", &chart_card(ChartSlot::Monthly))
        .replace("{{CLASS_CARD}}", &chart_card(ChartSlot::Class))
        .replace("{{FILTER_LINKS}}", &filter_links(page))
        .replace("{{DATE_FORM}}", &date_form(page.filter))
        .replace("{{REPORT_URL}}", &escape_html(&report_url(page.filter).to_string()))
        .replace("{{RECORD_ROWS}}", &record_rows(page.records))
        .replace("{{PAGINATION}}", &pagination(page))
        .replace("{{CLASS_ROWS}}", &class_rows(page.classes))
        .replace("{{CHART_SPECS}}", &script_json(&specs))
}

fn active_class<H: History>(views: &ViewStateController<H>, view: &str) -> &'static str {
    if views.is_active(view) { " active" } else { "" }
}

fn action_cards<H: History>(views: &ViewStateController<H>) -> String {
    let mut out = String::new();
    for entry in views.registry().entries() {
        let _ = writeln!(
            out,
            r#"<button class="action-card{}" type="button" data-target="{}">{}</button>"#,
            active_class(views, &entry.view),
            escape_html(&entry.section_id),
            escape_html(&entry.label)
        );
    }
    out
}

fn chart_card(slot: ChartSlot) -> String {
    format!(
        r##"<div class="chart-card">
          <div class="chart-frame"><canvas id="{canvas}"></canvas></div>
          <a href="#" class="download" id="{control}" data-chart="{canvas}" data-filename="{file}">Download PNG</a>
        </div>"##,
        canvas = slot.canvas_id(),
        control = slot.download_control_id(),
        file = slot.export_filename(),
    )
}

fn filter_links<H: History>(page: &PageView<'_, H>) -> String {
    let views = page.views;
    let view = views.current_view();
    let mut out = String::new();

    let all = views
        .filter_url(view, None)
        .with_param("class", None)
        .with_param("page", None);
    let _ = writeln!(
        out,
        r#"<a class="filter-link{}" href="{}" data-class="">All classes</a>"#,
        if page.filter.class_id().is_none() { " active" } else { "" },
        escape_html(&all.to_string())
    );

    for class in page.classes {
        let Some(class_id) = class.class_id.as_deref() else {
            continue;
        };
        let url = views
            .filter_url(view, Some(class_id))
            .with_param("page", None);
        let _ = writeln!(
            out,
            r#"<a class="filter-link{}" href="{}" data-class="{}">{}</a>"#,
            if page.filter.class_id() == Some(class_id) { " active" } else { "" },
            escape_html(&url.to_string()),
            escape_html(class_id),
            escape_html(&class.class_name)
        );
    }
    out
}

fn date_form(filter: &RecordFilter) -> String {
    let date = |value: Option<chrono::NaiveDate>| {
        value
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };
    let class = filter
        .class_id()
        .map(|id| format!(r#"<input type="hidden" name="class" value="{}" />"#, escape_html(id)))
        .unwrap_or_default();

    format!(
        r#"<form class="date-filter" method="get" action="/attendance">
          <input type="hidden" name="view" value="attendance" />{class}
          <label>From <input type="date" name="from_date" value="{from}" /></label>
          <label>To <input type="date" name="to_date" value="{to}" /></label>
          <button class="btn" type="submit">Apply</button>
        </form>"#,
        from = date(filter.from_date),
        to = date(filter.to_date),
    )
}

/// CSV download link carrying the active filter.
fn report_url(filter: &RecordFilter) -> PageUrl {
    let from = filter.from_date.map(|d| d.format(DATE_FORMAT).to_string());
    let to = filter.to_date.map(|d| d.format(DATE_FORMAT).to_string());
    PageUrl::parse("/attendance/download")
        .with_param("format", Some("csv"))
        .with_param("class", filter.class_id())
        .with_param("from_date", from.as_deref())
        .with_param("to_date", to.as_deref())
}

fn record_rows(records: &RecordPage<'_>) -> String {
    if records.records.is_empty() {
        return r#"<tr><td colspan="5" class="empty">No attendance records found.</td></tr>"#
            .to_string();
    }

    let mut out = String::new();
    for record in &records.records {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} - {}</td><td class=\"status-{}\">{}</td></tr>",
            escape_html(&record.date),
            escape_html(&record.class_name),
            escape_html(&record.course_name),
            escape_html(&record.start_time),
            escape_html(&record.end_time),
            escape_html(&record.status.to_lowercase()),
            escape_html(&record.status)
        );
    }
    out
}

fn pagination<H: History>(page: &PageView<'_, H>) -> String {
    if page.records.pages <= 1 {
        return String::new();
    }

    let mut out = String::new();
    for number in 1..=page.records.pages {
        let number_text = number.to_string();
        let url = page
            .views
            .history()
            .location()
            .clone()
            .with_param("page", Some(number_text.as_str()));
        let _ = write!(
            out,
            r#"<a class="page-link{}" href="{}">{}</a>"#,
            if number == page.records.page { " active" } else { "" },
            escape_html(&url.to_string()),
            number
        );
    }
    out
}

fn class_rows(classes: &[ClassAttendanceRecord]) -> String {
    if classes.is_empty() {
        return r#"<tr><td colspan="4" class="empty">No classes yet.</td></tr>"#.to_string();
    }

    let mut out = String::new();
    for class in classes {
        let rate = DerivedPercentage::new(class.present_count, class.total_sessions);
        let width = rate.display();
        let style = progress_bar_style(Some(&width)).unwrap_or_default();
        let rate_text = if rate.has_sessions {
            format!("{width}%")
        } else {
            "No sessions".to_string()
        };
        let _ = writeln!(
            out,
            r#"<tr><td>{}</td><td>{}/{}</td><td><div class="progress"><div class="progress-bar" data-width="{}" style="{}"></div></div></td><td>{}</td></tr>"#,
            escape_html(&class.class_name),
            class.present_count,
            class.total_sessions,
            width,
            style,
            rate_text
        );
    }
    out
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON placed inside a `<script>` element must not close it early.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>My Attendance</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    :root {
      --bg: #f4f6fb;
      --ink: #212529;
      --muted: #6c757d;
      --primary: rgb(13, 110, 253);
      --success: rgb(25, 135, 84);
      --danger: rgb(220, 53, 69);
      --card: #ffffff;
      --shadow: 0 12px 32px rgba(33, 37, 41, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", system-ui, -apple-system, sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 3vw, 2.4rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 12px;
    }

    .action-card {
      appearance: none;
      border: 1px solid rgba(13, 110, 253, 0.15);
      background: var(--card);
      border-radius: 14px;
      padding: 16px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      box-shadow: var(--shadow);
    }

    .action-card.active {
      background: var(--primary);
      color: white;
    }

    .content-section {
      display: none;
      gap: 20px;
    }

    .content-section.active {
      display: grid;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .stat, .chart-card, .panel {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      box-shadow: var(--shadow);
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
      margin-top: 6px;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .chart-frame {
      position: relative;
      height: 300px;
    }

    .download {
      display: inline-block;
      margin-top: 10px;
      color: var(--primary);
      font-size: 0.9rem;
    }

    .report-link {
      display: inline-block;
      margin-top: 12px;
      color: var(--primary);
    }

    .date-filter {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 12px;
      margin-top: 12px;
    }

    .filters {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .filter-link, .page-link {
      padding: 6px 12px;
      border-radius: 999px;
      background: rgba(13, 110, 253, 0.08);
      color: var(--primary);
      text-decoration: none;
      font-size: 0.9rem;
    }

    .filter-link.active, .page-link.active {
      background: var(--primary);
      color: white;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid rgba(33, 37, 41, 0.08);
    }

    td.empty {
      color: var(--muted);
      text-align: center;
    }

    .status-present {
      color: var(--success);
    }

    .status-absent {
      color: var(--danger);
    }

    .progress {
      height: 10px;
      background: rgba(13, 110, 253, 0.1);
      border-radius: 999px;
      overflow: hidden;
    }

    .progress-bar {
      height: 100%;
      background: var(--primary);
    }

    .btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      background: var(--primary);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>My Attendance</h1>
      <p class="subtitle">{{STUDENT}}</p>
    </header>

    <nav class="cards">
      {{ACTION_CARDS}}
    </nav>

    <section id="overview-section" class="content-section{{OVERVIEW_ACTIVE}}">
      <div class="stats">
        <div class="stat"><span class="label">Total sessions</span><span class="value">{{TOTAL}}</span></div>
        <div class="stat"><span class="label">Present</span><span class="value">{{PRESENT}}</span></div>
        <div class="stat"><span class="label">Absent</span><span class="value">{{ABSENT}}</span></div>
        <div class="stat"><span class="label">Attendance rate</span><span class="value">{{RATE}}%</span></div>
      </div>
      <input type="hidden" id="{{MONTHLY_DATA_ID}}" value="{{MONTHLY_DATA}}" />
      <input type="hidden" id="{{CLASS_DATA_ID}}" value="{{CLASS_DATA}}" />
      <div class="charts">
        {{MONTHLY_CARD}}
        {{CLASS_CARD}}
      </div>
      <div>
        <button class="btn" type="button" id="view-class-stats">View class statistics</button>
      </div>
    </section>

    <section id="attendance-section" class="content-section{{ATTENDANCE_ACTIVE}}">
      <div class="panel">
        <div class="filters">
          {{FILTER_LINKS}}
        </div>
        {{DATE_FORM}}
        <a class="report-link" id="download-report" href="{{REPORT_URL}}">Download CSV report</a>
      </div>
      <div class="panel">
        <table>
          <thead>
            <tr><th>Date</th><th>Class</th><th>Course</th><th>Time</th><th>Status</th></tr>
          </thead>
          <tbody>
            {{RECORD_ROWS}}
          </tbody>
        </table>
        <div class="filters">{{PAGINATION}}</div>
      </div>
    </section>

    <section id="class-section" class="content-section{{CLASS_ACTIVE}}">
      <div class="panel">
        <table>
          <thead>
            <tr><th>Class</th><th>Attended</th><th>Progress</th><th>Rate</th></tr>
          </thead>
          <tbody>
            {{CLASS_ROWS}}
          </tbody>
        </table>
      </div>
    </section>
  </main>

  <script type="application/json" id="chartSpecs">{{CHART_SPECS}}</script>
  <script>
    const renderCharts = () => {
      if (typeof Chart === 'undefined') {
        console.error('Chart.js is not available');
        return;
      }
      Chart.defaults.font.family = "'Inter', system-ui, -apple-system, sans-serif";
      Chart.defaults.color = '#6c757d';

      const specs = JSON.parse(document.getElementById('chartSpecs').textContent || '[]');
      specs.forEach((spec) => {
        const canvas = document.getElementById(spec.canvasId);
        if (!canvas) {
          console.error(`Chart canvas not found: ${spec.canvasId}`);
          return;
        }
        const config = spec.config;
        config.options.plugins.tooltip = {
          callbacks: { label: (context) => spec.tooltips[context.dataIndex] }
        };
        if (spec.tickSuffix && config.options.scales) {
          config.options.scales.y.ticks = { callback: (value) => value + spec.tickSuffix };
        }
        new Chart(canvas.getContext('2d'), config);
      });
    };

    const bindDownloads = () => {
      document.querySelectorAll('.download').forEach((control) => {
        control.addEventListener('click', (event) => {
          event.preventDefault();
          const canvas = document.getElementById(control.dataset.chart);
          if (!canvas) {
            console.error(`Canvas not found for chart: ${control.dataset.chart}`);
            return;
          }
          const link = document.createElement('a');
          link.download = control.dataset.filename;
          link.href = canvas.toDataURL('image/png');
          link.click();
        });
      });
    };

    const bindViews = () => {
      const cards = Array.from(document.querySelectorAll('.action-card'));
      const sections = Array.from(document.querySelectorAll('.content-section'));

      const activate = (card) => {
        const target = document.getElementById(card.dataset.target);
        if (!target) {
          return;
        }
        cards.forEach((c) => c.classList.remove('active'));
        sections.forEach((s) => s.classList.remove('active'));
        card.classList.add('active');
        target.classList.add('active');

        const url = new URL(window.location);
        url.searchParams.set('view', card.dataset.target.replace(/-section$/, ''));
        window.history.pushState({}, '', url);
      };

      cards.forEach((card) => card.addEventListener('click', () => activate(card)));

      document.getElementById('view-class-stats')?.addEventListener('click', () => {
        const card = cards.find((c) => c.dataset.target === 'class-section');
        if (card) {
          activate(card);
        }
      });

      document.querySelectorAll('.filter-link').forEach((link) => {
        link.addEventListener('click', (event) => {
          event.preventDefault();
          const url = new URL(window.location);
          url.searchParams.set('view', url.searchParams.get('view') || 'overview');
          url.searchParams.delete('page');
          if (link.dataset.class) {
            url.searchParams.set('class', link.dataset.class);
          } else {
            url.searchParams.delete('class');
          }
          window.location.href = url.toString();
        });
      });
    };

    document.addEventListener('DOMContentLoaded', () => {
      renderCharts();
      bindDownloads();
      bindViews();
    });
  </script>
</body>
</html>
"#;
