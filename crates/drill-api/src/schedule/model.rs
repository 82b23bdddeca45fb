use drill_db::models::ScheduleDay;
use drill_srs::Phase;
use serde::Serialize;

/// A stored plan day with its phase spelled out.
#[derive(Debug, Serialize)]
pub struct ScheduleDayView {
    #[serde(flatten)]
    pub day: ScheduleDay,
    pub phase: Phase,
}

impl From<ScheduleDay> for ScheduleDayView {
    fn from(day: ScheduleDay) -> Self {
        let phase = day.phase();
        Self { day, phase }
    }
}
