use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::selector::Outcome;

/// Submitted form values keyed by field id.
pub type LeadData = BTreeMap<String, String>;

/// One input of the registration form, as configured by the operator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LeadField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    /// Free-form input type. `email` and `tel` mark identity fields.
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
}

impl LeadField {
    pub fn new(id: &str, label: &str, field_type: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            field_type: field_type.to_string(),
            required,
        }
    }
}

/// A completed spin, written once and never edited.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Prize awarded.
    pub nombre: String,
    /// ISO-8601 timestamp.
    pub fecha: String,
    #[serde(rename = "leadData", default, skip_serializing_if = "Option::is_none")]
    pub lead_data: Option<LeadData>,
}

impl HistoryEntry {
    pub fn record(outcome: &Outcome, lead_data: Option<LeadData>, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            nombre: outcome.prize_name.clone(),
            fecha: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            lead_data,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.fecha)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Search and date-range criteria for the lead table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub search: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl HistoryFilter {
    /// Matches the prize name and the values of the given fields
    /// case-insensitively; date bounds are inclusive whole days (UTC).
    pub fn matches(&self, entry: &HistoryEntry, fields: &[LeadField]) -> bool {
        let term = self.search.to_lowercase();
        if !term.is_empty() {
            let in_name = entry.nombre.to_lowercase().contains(&term);
            let in_fields = entry.lead_data.as_ref().map_or(false, |data| {
                fields.iter().any(|f| {
                    data.get(&f.id)
                        .map_or(false, |v| v.to_lowercase().contains(&term))
                })
            });
            if !in_name && !in_fields {
                return false;
            }
        }

        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }

        let Some(day) = entry.timestamp().map(|ts| ts.date_naive()) else {
            return false;
        };
        if self.start_date.map_or(false, |start| day < start) {
            return false;
        }
        if self.end_date.map_or(false, |end| day > end) {
            return false;
        }
        true
    }
}

/// All spins recorded for one account.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Bulk reset. Individual entries cannot be removed.
    pub fn reset(&mut self) {
        log::warn!("History reset, {} entries cleared", self.entries.len());
        self.entries.clear();
    }

    pub fn filter<'a>(
        &'a self,
        filter: &'a HistoryFilter,
        fields: &'a [LeadField],
    ) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        self.entries.iter().filter(move |e| filter.matches(e, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(nombre: &str, fecha: &str, email: Option<&str>) -> HistoryEntry {
        HistoryEntry {
            id: None,
            nombre: nombre.to_string(),
            fecha: fecha.to_string(),
            lead_data: email.map(|e| [("email".to_string(), e.to_string())].into_iter().collect()),
        }
    }

    fn fields() -> Vec<LeadField> {
        vec![LeadField::new("email", "Email", "email", true)]
    }

    #[test]
    fn test_entry_json_shape() {
        let raw = serde_json::json!({
            "nombre": "CAFE",
            "fecha": "2024-03-01T10:00:00.000Z",
            "leadData": { "email": "a@x.com" },
            "usuarioNombre": "legacy"
        });
        let parsed: HistoryEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed, entry("CAFE", "2024-03-01T10:00:00.000Z", Some("a@x.com")));

        let out = serde_json::to_value(entry("TAZA", "2024-03-01T10:00:00.000Z", None)).unwrap();
        assert!(out.get("leadData").is_none());
    }

    #[test]
    fn test_record_uses_iso_timestamp() {
        let outcome = Outcome { prize_name: "TAZA".into(), index: 2 };
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let recorded = HistoryEntry::record(&outcome, None, now);
        assert_eq!(recorded.nombre, "TAZA");
        assert_eq!(recorded.fecha, "2024-05-06T07:08:09.000Z");
        assert_eq!(recorded.timestamp(), Some(now));
    }

    #[test]
    fn test_filter_by_search() {
        let history = History::new(vec![
            entry("CAFE", "2024-03-01T10:00:00.000Z", Some("ana@x.com")),
            entry("TAZA", "2024-03-02T10:00:00.000Z", Some("luis@x.com")),
        ]);
        let fields = fields();
        let by_lead = HistoryFilter { search: "ANA".into(), ..Default::default() };
        let names: Vec<_> = history.filter(&by_lead, &fields).map(|e| e.nombre.as_str()).collect();
        assert_eq!(names, vec!["CAFE"]);

        let by_prize = HistoryFilter { search: "taz".into(), ..Default::default() };
        assert_eq!(history.filter(&by_prize, &fields).count(), 1);
        assert_eq!(history.filter(&HistoryFilter::default(), &fields).count(), 2);
    }

    #[test]
    fn test_filter_by_date_range() {
        let history = History::new(vec![
            entry("A", "2024-03-01T23:59:00.000Z", None),
            entry("B", "2024-03-05T00:00:00.000Z", None),
            entry("C", "not a date", None),
        ]);
        let filter = HistoryFilter {
            search: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 4),
        };
        let names: Vec<_> = history.filter(&filter, &[]).map(|e| e.nombre.as_str()).collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut history = History::default();
        history.push(entry("A", "2024-03-01T00:00:00.000Z", None));
        history.push(entry("B", "2024-03-01T00:00:00.000Z", None));
        history.reset();
        assert!(history.is_empty());
    }
}
