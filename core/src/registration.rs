use crate::constants::{duplicate_notice, DUPLICATE_BUTTON_LABEL, SUBMIT_BUTTON_LABEL};
use crate::duplicate::DuplicateCheck;
use crate::error::RegistrationError;
use crate::leads::{HistoryEntry, LeadData, LeadField};
use crate::validation::FormReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    Editing,
    /// An identity value was seen before. Editing that value lifts the block.
    Blocked { field_label: String, value: String },
    Submitted,
}

/// Lead-capture form gating a spin.
///
/// The report is recomputed on every edit, so validity and the duplicate
/// block always reflect the current values.
#[derive(Debug, Clone)]
pub struct RegistrationForm<'a> {
    fields: &'a [LeadField],
    history: &'a [HistoryEntry],
    values: LeadData,
    report: FormReport,
    submitted: bool,
}

impl<'a> RegistrationForm<'a> {
    pub fn new(fields: &'a [LeadField], history: &'a [HistoryEntry]) -> Self {
        let values = LeadData::new();
        let report = FormReport::evaluate(&values, fields, history);
        Self {
            fields,
            history,
            values,
            report,
            submitted: false,
        }
    }

    pub fn values(&self) -> &LeadData {
        &self.values
    }

    pub fn report(&self) -> &FormReport {
        &self.report
    }

    pub fn set_value(&mut self, field_id: &str, value: &str) {
        self.values.insert(field_id.to_string(), value.to_string());
        self.submitted = false;
        self.report = FormReport::evaluate(&self.values, self.fields, self.history);
    }

    pub fn status(&self) -> RegistrationStatus {
        if self.submitted {
            return RegistrationStatus::Submitted;
        }
        match &self.report.duplicate {
            DuplicateCheck::Duplicate { field_label, value, .. } => RegistrationStatus::Blocked {
                field_label: field_label.clone(),
                value: value.clone(),
            },
            DuplicateCheck::Clear => RegistrationStatus::Editing,
        }
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitted && self.report.is_valid()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.report.duplicate.is_duplicate() {
            DUPLICATE_BUTTON_LABEL
        } else {
            SUBMIT_BUTTON_LABEL
        }
    }

    /// Inline message shown while blocked.
    pub fn notice(&self) -> Option<String> {
        match &self.report.duplicate {
            DuplicateCheck::Duplicate { field_label, .. } => Some(duplicate_notice(field_label)),
            DuplicateCheck::Clear => None,
        }
    }

    /// Validated values to hand to the spin.
    pub fn submit(&mut self) -> Result<LeadData, RegistrationError> {
        self.report.clone().into_result()?;
        self.submitted = true;
        log::info!("Registration accepted with {} fields", self.values.len());
        Ok(self.values.clone())
    }
}

/// Greeting shown while a lead is typing: first schema field, uppercased.
///
/// The name always comes from `fields[0]`, not from whichever field the lead
/// filled in first, so typing an email before the name shows nothing until
/// the name is entered.
pub fn live_lead_name(values: &LeadData, fields: &[LeadField]) -> String {
    fields
        .first()
        .and_then(|f| values.get(&f.id))
        .map(|v| v.trim().to_uppercase())
        .unwrap_or_default()
}
