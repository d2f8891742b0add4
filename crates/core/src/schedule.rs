//! Calendar grouping for schedule items.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::models::ScheduleItem;

/// All items falling on one date, earliest first.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDay<'a> {
    pub date: NaiveDate,
    pub items: Vec<&'a ScheduleItem>,
}

/// Group items by date (ascending) and order each day by time of day.
///
/// Items sharing a date and time keep their insertion order.
pub fn agenda<'a>(items: impl IntoIterator<Item = &'a ScheduleItem>) -> Vec<AgendaDay<'a>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a ScheduleItem>> = BTreeMap::new();
    for item in items {
        by_date.entry(item.date).or_default().push(item);
    }
    by_date
        .into_iter()
        .map(|(date, mut items)| {
            items.sort_by_key(|item| item.time);
            AgendaDay { date, items }
        })
        .collect()
}

/// Heading for a calendar day relative to `today`.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.checked_add_days(Days::new(1)) == Some(date) {
        return "Tomorrow".to_string();
    }
    date.format("%A, %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, Criteria, ScheduleCriteria};
    use crate::fixtures;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn agenda_groups_by_date_and_sorts_by_time() {
        let data = fixtures::seed().unwrap();
        let days = agenda(&data.schedule_items);

        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2025, 1, 19), ymd(2025, 1, 20), ymd(2025, 1, 21), ymd(2025, 1, 22)]
        );

        let today: Vec<&str> = days[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(today, vec!["S001", "S004", "S006"]);
    }

    #[test]
    fn morning_sorts_before_afternoon_regardless_of_digits() {
        let mut data = fixtures::seed().unwrap();
        // "10:00 AM" must come after "9:00 AM" even though it sorts first as text.
        data.schedule_items[0].date = ymd(2025, 1, 20);
        let days = agenda(&data.schedule_items);
        let tomorrow: Vec<&str> = days[1].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(tomorrow, vec!["S002", "S001"]);
    }

    #[test]
    fn agenda_of_filtered_view() {
        let data = fixtures::seed().unwrap();
        let criteria = ScheduleCriteria::default()
            .with_filter("type", "Showing")
            .unwrap();
        let days = agenda(filter(&data.schedule_items, &criteria));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].items.len(), 2);
    }

    #[test]
    fn agenda_of_nothing_is_empty() {
        assert!(agenda(&Vec::<ScheduleItem>::new()).is_empty());
    }

    #[test]
    fn day_labels() {
        let today = fixtures::demo_today();
        assert_eq!(day_label(today, today), "Today");
        assert_eq!(day_label(ymd(2025, 1, 20), today), "Tomorrow");
        assert_eq!(day_label(ymd(2025, 1, 21), today), "Tuesday, Jan 21");
        assert_eq!(day_label(ymd(2025, 1, 18), today), "Saturday, Jan 18");
    }
}
