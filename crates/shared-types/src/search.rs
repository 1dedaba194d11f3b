use serde::{Deserialize, Serialize};

use crate::dates::parse_dmy;
use crate::error::AppError;

/// Validated, normalized search parameters — the only shape that may reach
/// the network layer. Every field is optional; an all-`None` query is
/// representable so callers can detect it and fall back to the default
/// "latest N" fetch instead of issuing an empty-filter search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub search_term: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_month: Option<u32>,
    pub end_month: Option<u32>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    pub province: Option<String>,
    pub camera_id: Option<i64>,
    pub camera_name: Option<String>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// A query consisting solely of a plate-number fragment (quick search).
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }

    /// A query covering a `DD/MM/YYYY` date range (quick-range buttons).
    pub fn date_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            ..Self::default()
        }
    }

    /// True when no filter field is populated (`limit` alone does not count —
    /// it bounds a fetch, it does not filter one).
    pub fn is_empty(&self) -> bool {
        self.search_term.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.start_month.is_none()
            && self.end_month.is_none()
            && self.start_year.is_none()
            && self.end_year.is_none()
            && self.start_hour.is_none()
            && self.end_hour.is_none()
            && self.province.is_none()
            && self.camera_id.is_none()
            && self.camera_name.is_none()
    }

    /// Wire-format query pairs for `GET /plates/search`.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.search_term {
            pairs.push(("search_term", v.clone()));
        }
        if let Some(v) = &self.start_date {
            pairs.push(("start_date", v.clone()));
        }
        if let Some(v) = &self.end_date {
            pairs.push(("end_date", v.clone()));
        }
        if let Some(v) = self.start_month {
            pairs.push(("start_month", v.to_string()));
        }
        if let Some(v) = self.end_month {
            pairs.push(("end_month", v.to_string()));
        }
        if let Some(v) = self.start_year {
            pairs.push(("start_year", v.to_string()));
        }
        if let Some(v) = self.end_year {
            pairs.push(("end_year", v.to_string()));
        }
        if let Some(v) = self.start_hour {
            pairs.push(("start_hour", v.to_string()));
        }
        if let Some(v) = self.end_hour {
            pairs.push(("end_hour", v.to_string()));
        }
        if let Some(v) = &self.province {
            pairs.push(("province", v.clone()));
        }
        if let Some(v) = self.camera_id {
            pairs.push(("camera_id", v.to_string()));
        }
        if let Some(v) = &self.camera_name {
            pairs.push(("camera_name", v.clone()));
        }
        if let Some(v) = self.limit {
            pairs.push(("limit", v.to_string()));
        }
        pairs
    }

    /// Human-readable `(label, value)` pairs echoed back above the results
    /// so the user can see which filters produced them.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(v) = &self.search_term {
            out.push(("Plate", v.clone()));
        }
        if let (Some(s), Some(e)) = (&self.start_date, &self.end_date) {
            out.push(("Date", format!("{s} – {e}")));
        }
        if let (Some(sm), Some(em)) = (self.start_month, self.end_month) {
            out.push(("Month", format!("{sm} – {em}")));
        }
        if let (Some(sy), Some(ey)) = (self.start_year, self.end_year) {
            out.push(("Year", format!("{sy} – {ey}")));
        }
        if let (Some(sh), Some(eh)) = (self.start_hour, self.end_hour) {
            out.push(("Hour", format!("{sh:02}:00 – {eh:02}:59")));
        }
        if let Some(v) = &self.province {
            out.push(("Province", v.clone()));
        }
        if let Some(v) = &self.camera_name {
            out.push(("Camera", v.clone()));
        } else if let Some(v) = self.camera_id {
            out.push(("Camera", format!("#{v}")));
        }
        out
    }
}

/// Raw field values as entered in the advanced-search form. `build` either
/// produces a validated [`SearchQuery`] or a validation error naming the
/// first incomplete pair, checked in order: date range, month/year range,
/// hour range. A pair is complete iff both members are non-empty; half-set
/// pairs are rejected before any request is dispatched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub search_term: String,
    pub start_date: String,
    pub end_date: String,
    pub start_month: String,
    pub end_month: String,
    pub start_year: String,
    pub end_year: String,
    pub start_hour: String,
    pub end_hour: String,
    pub province: String,
    pub camera_id: String,
    pub camera_name: String,
}

fn trimmed(value: &str) -> Option<&str> {
    let v = value.trim();
    (!v.is_empty()).then_some(v)
}

impl SearchForm {
    pub fn build(&self) -> Result<SearchQuery, AppError> {
        let mut query = SearchQuery::default();

        if let Some(term) = trimmed(&self.search_term) {
            query.search_term = Some(term.to_string());
        }

        // Date range: all-or-nothing, and each bound must be a real date.
        match (trimmed(&self.start_date), trimmed(&self.end_date)) {
            (Some(start), Some(end)) => {
                if parse_dmy(start).is_none() || parse_dmy(end).is_none() {
                    return Err(AppError::validation(
                        "Dates must be valid and in DD/MM/YYYY format",
                    ));
                }
                query.start_date = Some(start.to_string());
                query.end_date = Some(end.to_string());
            }
            (None, None) => {}
            _ => {
                return Err(AppError::validation(
                    "Date search requires both a start and an end date",
                ))
            }
        }

        // Month/year range: months are only meaningful with both years; a
        // year pair may also stand alone.
        let start_month = trimmed(&self.start_month);
        let end_month = trimmed(&self.end_month);
        let start_year = trimmed(&self.start_year);
        let end_year = trimmed(&self.end_year);

        if start_month.is_some() || end_month.is_some() {
            let (Some(sm), Some(em)) = (start_month, end_month) else {
                return Err(AppError::validation(
                    "Month search requires both a start and an end month",
                ));
            };
            let (Some(sy), Some(ey)) = (start_year, end_year) else {
                return Err(AppError::validation(
                    "Month search requires both a start and an end year",
                ));
            };
            query.start_month = Some(parse_month(sm)?);
            query.end_month = Some(parse_month(em)?);
            query.start_year = Some(parse_year(sy)?);
            query.end_year = Some(parse_year(ey)?);
        } else {
            match (start_year, end_year) {
                (Some(sy), Some(ey)) => {
                    query.start_year = Some(parse_year(sy)?);
                    query.end_year = Some(parse_year(ey)?);
                }
                (None, None) => {}
                _ => {
                    return Err(AppError::validation(
                        "Year search requires both a start and an end year",
                    ))
                }
            }
        }

        // Hour range: all-or-nothing, 0-23, start no later than end.
        match (trimmed(&self.start_hour), trimmed(&self.end_hour)) {
            (Some(start), Some(end)) => {
                let start = parse_hour(start)?;
                let end = parse_hour(end)?;
                if start > end {
                    return Err(AppError::validation(
                        "Start hour must not be after end hour",
                    ));
                }
                query.start_hour = Some(start);
                query.end_hour = Some(end);
            }
            (None, None) => {}
            _ => {
                return Err(AppError::validation(
                    "Hour search requires both a start and an end hour",
                ))
            }
        }

        if let Some(province) = trimmed(&self.province) {
            query.province = Some(province.to_string());
        }
        if let Some(raw) = trimmed(&self.camera_id) {
            let id = raw
                .parse::<i64>()
                .map_err(|_| AppError::validation("Camera id must be a number"))?;
            query.camera_id = Some(id);
        }
        if let Some(name) = trimmed(&self.camera_name) {
            query.camera_name = Some(name.to_string());
        }

        Ok(query)
    }
}

fn parse_month(raw: &str) -> Result<u32, AppError> {
    raw.parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| AppError::validation("Months must be between 1 and 12"))
}

fn parse_year(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::validation("Years must be numbers"))
}

fn parse_hour(raw: &str) -> Result<u32, AppError> {
    raw.parse::<u32>()
        .ok()
        .filter(|h| *h <= 23)
        .ok_or_else(|| AppError::validation("Hours must be between 0 and 23"))
}
