use std::{cmp::Ordering, fmt};

use chrono::{DateTime, NaiveDate};
use icu_collator::{Collator, CollatorOptions};

use crate::destination::Destination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Insertion order.
    #[default]
    Default,
    Name,
    Date,
}

impl SortKey {
    pub fn title(&self) -> &'static str {
        match self {
            SortKey::Default => "Default",
            SortKey::Name => "Name",
            SortKey::Date => "Date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOptions {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Selecting the active key flips the direction. A new key starts
    /// ascending, except dates which start with the latest first.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            return Self::new(key, self.direction.flipped());
        }
        let direction = match key {
            SortKey::Date => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self::new(key, direction)
    }

    pub fn is_active(&self, key: SortKey) -> bool {
        self.key == key
    }

    /// Accessible label for the sort button of `key`.
    pub fn button_label(&self, key: SortKey) -> String {
        if self.is_active(key) {
            format!("Sort by {} ({})", key.title(), self.direction.label())
        } else {
            format!("Sort by {}", key.title())
        }
    }
}

impl fmt::Display for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            SortKey::Default => write!(f, "insertion order"),
            key => write!(f, "{} {}", key.title().to_lowercase(), self.direction.label()),
        }
    }
}

/// Returns a freshly sorted copy, `destinations` is never reordered.
pub fn sorted(destinations: &[Destination], options: SortOptions) -> Vec<Destination> {
    let mut result = destinations.to_vec();

    match options.key {
        SortKey::Default => return result,
        SortKey::Name => {
            let collator = NameCollator::new();
            result.sort_by(|a, b| collator.compare(&a.name, &b.name));
        }
        SortKey::Date => result.sort_by(|a, b| compare_dates(&a.date, &b.date)),
    }

    // Descending is the reversed ascending order, ties included
    if options.direction == SortDirection::Desc {
        result.reverse();
    }

    result
}

/// Unicode collation with root (English) tailoring at default strength:
/// accents and case only break ties, lowercase sorts before uppercase.
pub struct NameCollator(Option<Collator>);

impl NameCollator {
    pub fn new() -> Self {
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Self(Some(collator)),
            Err(e) => {
                tracing::warn!("Name collation unavailable, using code point order: {e}");
                Self(None)
            }
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.0 {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// Unparseable dates order after every valid date.
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(id: &str, name: &str, date: &str) -> Destination {
        Destination {
            id: id.into(),
            name: name.into(),
            date: date.into(),
            lng: 0.,
            lat: 0.,
        }
    }

    fn names(list: &[Destination]) -> Vec<&str> {
        list.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn default_key_ignores_direction() {
        let list = vec![dest("1", "b", "2025-01-01"), dest("2", "a", "2024-01-01")];
        let desc = SortOptions::new(SortKey::Default, SortDirection::Desc);
        assert_eq!(names(&sorted(&list, desc)), ["b", "a"]);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let list = vec![
            dest("1", "rome", ""),
            dest("2", "Berlin", ""),
            dest("3", "amsterdam", ""),
            dest("4", "Amsterdam", ""),
        ];
        let asc = SortOptions::new(SortKey::Name, SortDirection::Asc);
        assert_eq!(names(&sorted(&list, asc)), ["amsterdam", "Amsterdam", "Berlin", "rome"]);
    }

    #[test]
    fn name_sort_places_accents_and_symbols_like_locale_compare() {
        let list = vec![
            dest("1", "Zurich", ""),
            dest("2", "Éclair", ""),
            dest("3", "Bergen", ""),
            dest("4", "Ålesund", ""),
            dest("5", "apple", ""),
            dest("6", "~x", ""),
        ];
        let asc = SortOptions::new(SortKey::Name, SortDirection::Asc);
        assert_eq!(names(&sorted(&list, asc)), ["~x", "Ålesund", "apple", "Bergen", "Éclair", "Zurich"]);
    }

    #[test]
    fn accent_only_breaks_ties() {
        let collator = NameCollator::new();
        assert_eq!(collator.compare("resume", "résumé"), Ordering::Less);
        assert_eq!(collator.compare("résumé", "resumes"), Ordering::Less);
    }

    #[test]
    fn descending_reverses_ascending() {
        let list = vec![
            dest("1", "Oslo", ""),
            dest("2", "Kyoto", ""),
            dest("3", "Oslo", ""),
            dest("4", "Cusco", ""),
        ];
        let asc = sorted(&list, SortOptions::new(SortKey::Name, SortDirection::Asc));
        let mut desc = sorted(&list, SortOptions::new(SortKey::Name, SortDirection::Desc));
        desc.reverse();
        assert_eq!(asc, desc);
        // Stable ascending keeps the first Oslo first
        assert_eq!(asc[2].id, "1");
        assert_eq!(asc[3].id, "3");
    }

    #[test]
    fn unparseable_dates_sort_last_ascending() {
        let list = vec![
            dest("1", "a", "not a date"),
            dest("2", "b", "2025-08-12"),
            dest("3", "c", "1999-01-01"),
        ];
        let asc = sorted(&list, SortOptions::new(SortKey::Date, SortDirection::Asc));
        assert_eq!(names(&asc), ["c", "b", "a"]);
        let desc = sorted(&list, SortOptions::new(SortKey::Date, SortDirection::Desc));
        assert_eq!(names(&desc), ["a", "b", "c"]);
    }

    #[test]
    fn toggle_semantics() {
        let options = SortOptions::default();
        let by_date = options.toggle(SortKey::Date);
        assert_eq!(by_date, SortOptions::new(SortKey::Date, SortDirection::Desc));
        assert_eq!(by_date.toggle(SortKey::Date).direction, SortDirection::Asc);
        assert_eq!(by_date.toggle(SortKey::Name), SortOptions::new(SortKey::Name, SortDirection::Asc));
    }

    #[test]
    fn button_labels() {
        let options = SortOptions::new(SortKey::Name, SortDirection::Desc);
        assert_eq!(options.button_label(SortKey::Name), "Sort by Name (descending)");
        assert_eq!(options.button_label(SortKey::Date), "Sort by Date");
    }

    #[test]
    fn parses_timestamps_as_dates() {
        assert_eq!(parse_date("2025-05-01T10:00:00Z"), NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(parse_date("2025-13-01"), None);
    }
}
