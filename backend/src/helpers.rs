//! Small shared helpers.

use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

/// Current instant in UTC, read from the system clock.
///
/// Used as the serde default factory for creation and update stamps, so every
/// record decoded without a stamp receives its own fresh value.
///
/// # Examples
/// ```
/// use backend::helpers::current_timestamp;
///
/// let earlier = current_timestamp();
/// assert!(current_timestamp() >= earlier);
/// ```
pub fn current_timestamp() -> DateTime<Utc> {
    timestamp_from(&DefaultClock)
}

/// Current instant in UTC according to the supplied clock.
pub fn timestamp_from(clock: &dyn Clock) -> DateTime<Utc> {
    clock.utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::rstest;
    use std::time::Duration;

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    #[rstest]
    fn successive_stamps_do_not_go_backwards() {
        let first = current_timestamp();
        let second = current_timestamp();
        assert!(second >= first);
    }

    #[rstest]
    fn stamps_separated_by_a_delay_differ() {
        let first = current_timestamp();
        std::thread::sleep(Duration::from_millis(5));
        let second = current_timestamp();
        assert!(second > first);
    }

    #[rstest]
    fn reads_the_supplied_clock() {
        let fixed = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
            .single()
            .expect("valid instant");
        let clock = FixtureClock { utc_now: fixed };

        assert_eq!(timestamp_from(&clock), fixed);
    }
}
