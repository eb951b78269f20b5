use chrono::{Local, NaiveDate};

const STORY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Current calendar date on the server clock
pub fn server_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse `day/month/year` into a calendar date.
///
/// Exactly three `/`-separated integer components are required, and they must
/// name a real date with a year in 1..=9999. Components may carry surrounding
/// whitespace and leading zeros.
pub fn parse_story_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let day: u32 = day.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    if !(1..=9999).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render as `DD/MM/YYYY`
pub fn format_story_date(date: NaiveDate) -> String {
    date.format(STORY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_month_year() {
        assert_eq!(parse_story_date("01/01/2020"), NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(parse_story_date("5/11/2021"), NaiveDate::from_ymd_opt(2021, 11, 5));
        assert_eq!(parse_story_date(" 29 / 02 / 2024 "), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert_eq!(parse_story_date("31/02/2024"), None);
        assert_eq!(parse_story_date("29/02/2023"), None);
        assert_eq!(parse_story_date("00/01/2020"), None);
        assert_eq!(parse_story_date("01/13/2020"), None);
        assert_eq!(parse_story_date("01/01/0"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["", "2020-01-01", "01/01", "01/01/2020/1", "aa/01/2020", "1.5/01/2020", "-1/01/2020"] {
            assert_eq!(parse_story_date(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn formats_with_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(format_story_date(date), "07/03/2021");
        assert_eq!(parse_story_date(&format_story_date(date)), Some(date));
    }
}
