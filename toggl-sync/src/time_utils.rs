use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

const DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const TIME: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Local UTC offset, falling back to UTC when it cannot be determined.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn format_date_time(dt: OffsetDateTime, offset: UtcOffset) -> String {
    dt.to_offset(offset)
        .format(DATE_TIME)
        .unwrap_or_else(|_| dt.to_string())
}

pub fn format_time(dt: OffsetDateTime, offset: UtcOffset) -> String {
    dt.to_offset(offset)
        .format(TIME)
        .unwrap_or_else(|_| dt.to_string())
}

/// `h:mm`, negative durations clamp to zero.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.whole_minutes().max(0);
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
