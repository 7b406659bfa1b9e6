use chrono::{DateTime, FixedOffset, NaiveTime};

pub const REFRESH_NOTICE: &str =
    "**⚠️ 안내:** API는 오전 10시 10분에 최신화됩니다. 현재 제공되는 데이터는 전날의 데이터일 수 있습니다.\n\n";

/// Korea Standard Time, the zone the exchange snapshot is published in.
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

/// The provider refreshes the snapshot at 10:10 KST. Between 07:00:00 and
/// 10:09:00 (inclusive on both ends, date ignored) the served data may still
/// be the previous day's, so lookups in that window carry a notice.
pub fn refresh_advisory(now: DateTime<FixedOffset>) -> Option<&'static str> {
    let window_start = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
    let window_end = NaiveTime::from_hms_opt(10, 9, 0).unwrap();
    let time = now.time();

    (time >= window_start && time <= window_end).then_some(REFRESH_NOTICE)
}
