use chrono::NaiveDate;

/// "2025-08-12" becomes "August 12, 2025". Anything that is not a valid
/// YYYY-MM-DD calendar date is returned unchanged.
pub fn format_date(date: &str) -> String {
    let parts: Vec<&str> = date.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return date.to_owned();
    };

    let parsed = match (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>()) {
        (Ok(year), Ok(month), Ok(day)) => NaiveDate::from_ymd_opt(year, month, day),
        _ => None,
    };

    match parsed {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => date.to_owned(),
    }
}

#[test]
fn test_format_date() {
    assert_eq!(format_date("2025-08-12"), "August 12, 2025");
    assert_eq!(format_date("2024-02-29"), "February 29, 2024");
    assert_eq!(format_date("2025-02-30"), "2025-02-30");
    assert_eq!(format_date("next summer"), "next summer");
}
