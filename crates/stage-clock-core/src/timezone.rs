use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ClockError, Result};

/// Zones offered by the timezone picker, as `(label, IANA name)`.
///
/// Any other valid IANA name is accepted too; this list only drives the
/// picker and `stage-clock timezones`.
pub const TIMEZONES: &[(&str, &str)] = &[
    ("New York (EST)", "America/New_York"),
    ("Los Angeles (PST)", "America/Los_Angeles"),
    ("London (GMT)", "Europe/London"),
    ("Paris (CET)", "Europe/Paris"),
    ("Tokyo (JST)", "Asia/Tokyo"),
    ("Sydney (AEST)", "Australia/Sydney"),
    ("Dubai (GST)", "Asia/Dubai"),
    ("Singapore (SGT)", "Asia/Singapore"),
    ("Hong Kong (HKT)", "Asia/Hong_Kong"),
    ("Mumbai (IST)", "Asia/Kolkata"),
    ("Moscow (MSK)", "Europe/Moscow"),
    ("Beijing (CST)", "Asia/Shanghai"),
    ("São Paulo (BRT)", "America/Sao_Paulo"),
    ("Mexico City (CST)", "America/Mexico_City"),
    ("Toronto (EST)", "America/Toronto"),
    ("Chicago (CST)", "America/Chicago"),
    ("Denver (MST)", "America/Denver"),
    ("Vancouver (PST)", "America/Vancouver"),
    ("Berlin (CET)", "Europe/Berlin"),
    ("Rome (CET)", "Europe/Rome"),
];

/// The zone wall-clock times are shown in and user-entered times are
/// interpreted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The system's local zone.
    #[default]
    Local,
    Named(Tz),
}

impl DisplayZone {
    /// Parse `"local"` or an IANA zone name such as `"Europe/Paris"`.
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(DisplayZone::Local);
        }
        trimmed
            .parse::<Tz>()
            .map(DisplayZone::Named)
            .map_err(|_| ClockError::UnknownTimezone(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            DisplayZone::Local => "local",
            DisplayZone::Named(tz) => tz.name(),
        }
    }

    /// Picker label when the zone is in [`TIMEZONES`], otherwise the raw name.
    pub fn label(&self) -> &str {
        let name = self.name();
        TIMEZONES
            .iter()
            .find(|(_, iana)| *iana == name)
            .map(|(label, _)| *label)
            .unwrap_or(name)
    }

    /// Wall-clock reading of `instant` in this zone.
    pub fn to_local_naive(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).naive_local(),
            DisplayZone::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// The instant a wall-clock reading in this zone refers to.
    ///
    /// Ambiguous readings (clocks turned back) resolve to the earlier
    /// instant; readings that do not exist (clocks turned forward) give
    /// `None`.
    pub fn from_local_naive(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DisplayZone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            DisplayZone::Named(tz) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Step through [`TIMEZONES`], with the local zone between the last and
    /// the first entry. Zones outside the list start from local.
    pub fn cycle(&self, forward: bool) -> DisplayZone {
        let len = TIMEZONES.len();
        let slot = match self {
            DisplayZone::Local => len,
            DisplayZone::Named(tz) => TIMEZONES
                .iter()
                .position(|(_, iana)| *iana == tz.name())
                .unwrap_or(len),
        };
        let next = if forward { (slot + 1) % (len + 1) } else { (slot + len) % (len + 1) };
        TIMEZONES
            .get(next)
            .and_then(|(_, iana)| iana.parse::<Tz>().ok())
            .map_or(DisplayZone::Local, DisplayZone::Named)
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn cycle_wraps_through_local() {
        let first = DisplayZone::Local.cycle(true);
        assert_eq!(first.name(), "America/New_York");
        assert_eq!(first.cycle(false), DisplayZone::Local);
        assert_eq!(DisplayZone::Local.cycle(false).name(), "Europe/Rome");
        let off_list = DisplayZone::parse("Pacific/Auckland").unwrap();
        assert_eq!(off_list.cycle(true).name(), "America/New_York");
    }

    #[test]
    fn parses_local_and_iana_names() {
        assert_eq!(DisplayZone::parse("local").unwrap(), DisplayZone::Local);
        assert_eq!(DisplayZone::parse("LOCAL").unwrap(), DisplayZone::Local);
        assert_eq!(
            DisplayZone::parse("Asia/Tokyo").unwrap(),
            DisplayZone::Named(Tz::Asia__Tokyo)
        );
        assert!(matches!(
            DisplayZone::parse("Mars/Olympus_Mons"),
            Err(ClockError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn every_listed_zone_parses() {
        for (label, iana) in TIMEZONES {
            let zone = DisplayZone::parse(iana).unwrap();
            assert_eq!(zone.label(), *label);
        }
    }

    #[test]
    fn label_falls_back_to_name() {
        let zone = DisplayZone::parse("Africa/Nairobi").unwrap();
        assert_eq!(zone.label(), "Africa/Nairobi");
    }

    #[test]
    fn naive_round_trip_in_named_zone() {
        let zone = DisplayZone::Named(Tz::Asia__Tokyo);
        let instant = Utc.with_ymd_and_hms(2026, 10, 18, 3, 0, 0).unwrap();
        let naive = zone.to_local_naive(instant);
        assert_eq!(
            naive,
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().and_hms_opt(12, 0, 0).unwrap()
        );
        assert_eq!(zone.from_local_naive(&naive), Some(instant));
    }

    #[test]
    fn nonexistent_local_time_is_none() {
        // 02:30 on the spring-forward day does not exist in New York.
        let zone = DisplayZone::Named(Tz::America__New_York);
        let naive = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap().and_hms_opt(2, 30, 0).unwrap();
        assert_eq!(zone.from_local_naive(&naive), None);
    }
}
