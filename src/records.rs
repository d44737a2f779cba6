use crate::models::SessionRecord;
use crate::views::PageUrl;
use chrono::NaiveDate;
use tracing::warn;

pub const PER_PAGE: usize = 10;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which sessions the records list and the CSV report show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub class_id: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl RecordFilter {
    /// Reads `class`, `from_date` and `to_date` from the URL. Blank or
    /// unparsable values are dropped; a repeated key keeps its first value.
    pub fn from_url(url: &PageUrl) -> Self {
        Self {
            class_id: url
                .param("class")
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            from_date: date_param(url, "from_date"),
            to_date: date_param(url, "to_date"),
        }
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }

    /// Inclusive on both ends. Sessions with an unreadable date only pass
    /// when no range is set.
    pub fn matches(&self, session: &SessionRecord) -> bool {
        if self.class_id().is_some_and(|id| session.class_id != id) {
            return false;
        }
        if self.from_date.is_none() && self.to_date.is_none() {
            return true;
        }
        let Ok(date) = NaiveDate::parse_from_str(&session.date, DATE_FORMAT) else {
            return false;
        };
        self.from_date.is_none_or(|from| date >= from) && self.to_date.is_none_or(|to| date <= to)
    }
}

fn date_param(url: &PageUrl, key: &str) -> Option<NaiveDate> {
    let raw = url.param(key).map(str::trim).filter(|value| !value.is_empty())?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("ignoring {key}={raw}: {err}");
            None
        }
    }
}

/// The `page` parameter; anything that is not a page number means page 1.
pub fn requested_page(url: &PageUrl) -> Option<usize> {
    url.param("page").and_then(|page| page.trim().parse().ok())
}

#[derive(Debug)]
pub struct RecordPage<'a> {
    pub records: Vec<&'a SessionRecord>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

/// Sessions passing `filter`, newest first.
pub fn select_sessions<'a>(
    sessions: &'a [SessionRecord],
    filter: &RecordFilter,
) -> Vec<&'a SessionRecord> {
    let mut selected: Vec<&SessionRecord> = sessions.iter().filter(|s| filter.matches(s)).collect();
    selected.sort_by(|a, b| (&b.date, &b.start_time).cmp(&(&a.date, &a.start_time)));
    selected
}

/// One page of `records`; out-of-range page numbers are clamped.
pub fn paginate(records: Vec<&SessionRecord>, page: Option<usize>) -> RecordPage<'_> {
    let total = records.len();
    let pages = total.div_ceil(PER_PAGE);
    let page = page.unwrap_or(1).clamp(1, pages.max(1));

    RecordPage {
        records: records
            .into_iter()
            .skip((page - 1) * PER_PAGE)
            .take(PER_PAGE)
            .collect(),
        page,
        pages,
        total,
    }
}
