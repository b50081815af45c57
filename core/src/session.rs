use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::{SpinSettings, WheelConfig};
use crate::error::SelectionError;
use crate::inventory::Inventory;
use crate::leads::{HistoryEntry, LeadData};
use crate::selector::Outcome;
use crate::wheel::{SpinStart, Wheel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRequest {
    /// Lead capture is on and no validated lead is waiting.
    NeedsRegistration,
    Started,
    Ignored,
    Refused,
}

/// Delivered once per spin, for the host to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub entry: HistoryEntry,
}

/// Registration gate in front of the wheel.
#[derive(Debug, Clone)]
pub struct SpinSession {
    wheel: Wheel,
    require_registration: bool,
    pending_lead: Option<LeadData>,
    in_flight_lead: Option<LeadData>,
}

impl SpinSession {
    pub fn new(require_registration: bool, settings: SpinSettings) -> Self {
        Self {
            wheel: Wheel::new(settings),
            require_registration,
            pending_lead: None,
            in_flight_lead: None,
        }
    }

    pub fn from_config(config: &WheelConfig, settings: SpinSettings) -> Self {
        Self::new(config.require_registration, settings)
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn has_pending_lead(&self) -> bool {
        self.pending_lead.is_some()
    }

    /// Stores the values a `RegistrationForm` accepted.
    pub fn confirm_registration(&mut self, lead: LeadData) {
        self.pending_lead = Some(lead);
    }

    pub fn request_spin<R: Rng + ?Sized>(
        &mut self,
        inventory: &Inventory,
        rng: &mut R,
    ) -> Result<SpinRequest, SelectionError> {
        if self.wheel.is_spinning() {
            return Ok(SpinRequest::Ignored);
        }
        if self.require_registration && self.pending_lead.is_none() {
            return Ok(SpinRequest::NeedsRegistration);
        }

        match self.wheel.request_spin(inventory, rng)? {
            SpinStart::Started => {
                self.in_flight_lead = self.pending_lead.take();
                Ok(SpinRequest::Started)
            }
            SpinStart::Ignored => Ok(SpinRequest::Ignored),
            SpinStart::Refused => Ok(SpinRequest::Refused),
        }
    }

    /// Current angle, plus the resolution on the final frame.
    pub fn advance(&mut self, elapsed_ms: f64) -> (f64, Option<Resolution>) {
        self.advance_at(elapsed_ms, Utc::now())
    }

    pub fn advance_at(&mut self, elapsed_ms: f64, now: DateTime<Utc>) -> (f64, Option<Resolution>) {
        let frame = self.wheel.advance(elapsed_ms);
        let resolution = frame.resolved.map(|outcome| {
            let entry = HistoryEntry::record(&outcome, self.in_flight_lead.take(), now);
            log::info!("Winner recorded: {} at {}", entry.nombre, entry.fecha);
            Resolution { outcome, entry }
        });
        (frame.angle, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::{History, LeadField};
    use crate::registration::RegistrationForm;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn finish(session: &mut SpinSession, now: DateTime<Utc>) -> Vec<Resolution> {
        let mut out = Vec::new();
        let mut t = 0.0;
        while t <= 6500.0 {
            if let (_, Some(r)) = session.advance_at(t, now) {
                out.push(r);
            }
            t += 100.0;
        }
        out
    }

    #[test]
    fn test_open_wheel_spins_without_registration() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = SpinSession::new(false, SpinSettings::default());
        let inventory = Inventory::simple(["A", "B"]);
        assert_eq!(session.request_spin(&inventory, &mut rng), Ok(SpinRequest::Started));
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let resolutions = finish(&mut session, now);
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].entry.nombre, resolutions[0].outcome.prize_name);
        assert!(resolutions[0].entry.lead_data.is_none());
    }

    #[test]
    fn test_registration_gates_each_spin() {
        let mut rng = StdRng::seed_from_u64(4);
        let fields = vec![LeadField::new("email", "Email", "email", true)];
        let mut history = History::default();
        let config = WheelConfig {
            require_registration: true,
            prizes: vec!["A".into(), "B".into(), "C".into()],
            ..Default::default()
        };
        let inventory = Inventory::from_config(&config);
        let mut session = SpinSession::from_config(&config, SpinSettings::default());
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        assert_eq!(session.request_spin(&inventory, &mut rng), Ok(SpinRequest::NeedsRegistration));

        let lead = {
            let mut form = RegistrationForm::new(&fields, history.entries());
            form.set_value("email", "ana@x.com");
            form.submit().unwrap()
        };
        session.confirm_registration(lead);
        assert_eq!(session.request_spin(&inventory, &mut rng), Ok(SpinRequest::Started));
        assert!(!session.has_pending_lead());
        assert_eq!(session.request_spin(&inventory, &mut rng), Ok(SpinRequest::Ignored));

        let resolutions = finish(&mut session, now);
        assert_eq!(resolutions.len(), 1);
        let entry = resolutions[0].entry.clone();
        assert_eq!(
            entry.lead_data.as_ref().and_then(|d| d.get("email")).map(String::as_str),
            Some("ana@x.com")
        );
        history.push(entry);

        // The lead was consumed and the same person is now known.
        assert_eq!(session.request_spin(&inventory, &mut rng), Ok(SpinRequest::NeedsRegistration));
        let mut form = RegistrationForm::new(&fields, history.entries());
        form.set_value("email", "ANA@x.com");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_no_stock_keeps_pending_lead() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = SpinSession::new(true, SpinSettings::default());
        session.confirm_registration(LeadData::new());
        let inventory = Inventory::weighted(vec![
            crate::inventory::PrizeItem::new("1", "A", 0, 1.0),
            crate::inventory::PrizeItem::new("2", "B", 0, 1.0),
        ]);
        assert_eq!(
            session.request_spin(&inventory, &mut rng),
            Err(SelectionError::NoStockAvailable)
        );
        assert!(session.has_pending_lead());
    }
}
