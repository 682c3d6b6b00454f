#![forbid(unsafe_code)]

use time::{Date, Month, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndDateError {
    StartOutOfRange,
    EndOutOfRange,
}

/// Default end date of a course: one calendar year after `start_date` (unix seconds, UTC).
///
/// The time of day is kept. A start on 29 February rolls over to 1 March of the
/// following year.
pub fn default_course_end_date(start_date: i64) -> Result<i64, EndDateError> {
    let start = OffsetDateTime::from_unix_timestamp(start_date)
        .map_err(|_| EndDateError::StartOutOfRange)?;
    let date = start.date();
    let year = date
        .year()
        .checked_add(1)
        .ok_or(EndDateError::EndOutOfRange)?;

    let end_date = match Date::from_calendar_date(year, date.month(), date.day()) {
        Ok(end_date) => end_date,
        Err(_) if date.month() == Month::February && date.day() == 29 => {
            Date::from_calendar_date(year, Month::March, 1)
                .map_err(|_| EndDateError::EndOutOfRange)?
        }
        Err(_) => return Err(EndDateError::EndOutOfRange),
    };

    Ok(start.replace_date(end_date).unix_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_is_one_year_after_start() {
        // 2015-10-24T00:00:00Z
        let start = 1_445_644_800;
        // 2016-10-24T00:00:00Z
        assert_eq!(default_course_end_date(start), Ok(1_477_267_200));
    }

    #[test]
    fn end_date_keeps_time_of_day() {
        // 2021-03-01T12:30:00Z -> 2022-03-01T12:30:00Z
        assert_eq!(default_course_end_date(1_614_601_800), Ok(1_646_137_800));
    }

    #[test]
    fn leap_day_rolls_over_to_march_first() {
        // 2020-02-29T00:00:00Z -> 2021-03-01T00:00:00Z
        assert_eq!(default_course_end_date(1_582_934_400), Ok(1_614_556_800));
    }

    #[test]
    fn out_of_range_start_is_rejected() {
        assert_eq!(
            default_course_end_date(i64::MAX),
            Err(EndDateError::StartOutOfRange)
        );
    }
}
