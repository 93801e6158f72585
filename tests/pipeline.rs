use std::sync::Arc;

use chrono::{NaiveDate, Weekday};

use emergency_call_data::ingestion::LoadOptions;
use emergency_call_data::pipeline::{CallPipeline, NO_DATA_NOTICE};
use emergency_call_data::processing::{filter_calls, sample, DateRange, FilterCriteria};
use emergency_call_data::summary;
use emergency_call_data::LoadError;

const FIXTURE: &str = "tests/fixtures/calls.csv.gz";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn dashboard_defaults_select_everything() {
    let mut pipeline = CallPipeline::new(LoadOptions::default());
    let table = pipeline.load(FIXTURE).unwrap();

    let criteria = FilterCriteria::all(&table).unwrap();
    assert_eq!(
        criteria.categories.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["EMS", "Fire", "Traffic"]
    );
    assert_eq!(criteria.date_range, DateRange::new(day(2015, 12, 10), day(2017, 1, 1)));

    let selection = pipeline.select(FIXTURE, &criteria).unwrap();
    assert_eq!(selection.filtered, *table);
    assert_eq!(selection.sample.row_count(), 8);
    assert_eq!(selection.notice(), None);
}

#[test]
fn select_reuses_the_cached_table() {
    let mut pipeline = CallPipeline::new(LoadOptions::default());
    let first = pipeline.load(FIXTURE).unwrap();
    let criteria = FilterCriteria::new(["Fire"], DateRange::new(day(2015, 1, 1), day(2017, 12, 31)));
    pipeline.select(FIXTURE, &criteria).unwrap();

    let again = pipeline.load(FIXTURE).unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(pipeline.cache().len(), 1);

    pipeline.cache_mut().clear();
    assert!(!Arc::ptr_eq(&first, &pipeline.load(FIXTURE).unwrap()));
}

#[test]
fn category_date_and_year_filters() {
    let mut pipeline = CallPipeline::new(LoadOptions::default());

    let ems_2015 = FilterCriteria::new(["EMS"], DateRange::new(day(2015, 12, 10), day(2015, 12, 10)));
    assert_eq!(pipeline.select(FIXTURE, &ems_2015).unwrap().filtered.row_count(), 4);

    let ems_any = FilterCriteria::new(["EMS"], DateRange::new(day(2015, 1, 1), day(2017, 12, 31)));
    assert_eq!(pipeline.select(FIXTURE, &ems_any).unwrap().filtered.row_count(), 5);

    let ems_2017 = ems_any.clone().with_year(2017);
    assert_eq!(pipeline.select(FIXTURE, &ems_2017).unwrap().filtered.row_count(), 1);

    // Year outside the date range: conjunction leaves nothing.
    let ems_2016_out_of_range = ems_2015.with_year(2016);
    let selection = pipeline.select(FIXTURE, &ems_2016_out_of_range).unwrap();
    assert!(selection.is_empty());
    assert_eq!(selection.notice(), Some(NO_DATA_NOTICE));
}

#[test]
fn empty_category_set_yields_no_rows_for_any_range() {
    let mut pipeline = CallPipeline::new(LoadOptions::default());
    let table = pipeline.load(FIXTURE).unwrap();
    for range in [
        DateRange::new(day(2015, 12, 10), day(2015, 12, 10)),
        DateRange::new(day(1900, 1, 1), day(2100, 1, 1)),
    ] {
        let criteria = FilterCriteria::new(Vec::<String>::new(), range);
        assert!(filter_calls(&table, &criteria).is_empty());
    }
}

#[test]
fn nested_filters_match_combined_criteria() {
    let mut pipeline = CallPipeline::new(LoadOptions::default());
    let table = pipeline.load(FIXTURE).unwrap();

    let c1 = FilterCriteria::new(["EMS", "Traffic"], DateRange::new(day(2015, 1, 1), day(2016, 12, 31)));
    let c2 = FilterCriteria::new(["Traffic", "Fire"], DateRange::new(day(2016, 1, 1), day(2017, 12, 31)));
    let combined = FilterCriteria::new(["Traffic"], DateRange::new(day(2016, 1, 1), day(2016, 12, 31)));

    let nested = filter_calls(&filter_calls(&table, &c1), &c2);
    assert_eq!(nested, filter_calls(&table, &combined));
    assert_eq!(nested.row_count(), 2);
}

#[test]
fn sampling_the_loaded_table() {
    let mut pipeline = CallPipeline::new(LoadOptions::default());
    let table = pipeline.load(FIXTURE).unwrap();

    assert_eq!(sample(&table, 3, Some(42)).row_count(), 3);
    assert_eq!(sample(&table, 3, Some(42)), sample(&table, 3, Some(42)));
    assert_eq!(sample(&table, 100, Some(42)).row_count(), 8);
    assert_eq!(sample(&table, 3, None).row_count(), 3);
}

#[test]
fn criteria_from_json_drive_selection() {
    let criteria = FilterCriteria::from_json(
        r#"{
            "categories": ["EMS", "Fire"],
            "date_range": {"start": "2015-12-10", "end": "2015-12-31"},
            "sample_size": 2,
            "seed": 7
        }"#,
    )
    .unwrap();

    let mut pipeline = CallPipeline::new(LoadOptions::default());
    let selection = pipeline.select(FIXTURE, &criteria).unwrap();
    assert_eq!(selection.filtered.row_count(), 5);
    assert_eq!(selection.sample.row_count(), 2);
}

#[test]
fn summaries_of_the_fixture() {
    let mut pipeline = CallPipeline::new(LoadOptions::default());
    let table = pipeline.load(FIXTURE).unwrap();

    let counts = summary::category_counts(&table);
    assert_eq!(counts.get("EMS"), Some(&5));
    assert_eq!(counts.get("Fire"), Some(&1));
    assert_eq!(counts.get("Traffic"), Some(&2));

    let by_day = summary::day_of_week_counts(&table);
    assert_eq!(by_day[3], (Weekday::Thu, 5));
    assert_eq!(by_day.iter().map(|(_, n)| n).sum::<usize>(), table.row_count());

    assert_eq!(summary::heat_points(&table).len(), 8);
    let (lat, lng) = summary::centroid(&table).unwrap();
    assert!((40.0..40.4).contains(&lat));
    assert!((-75.7..-75.2).contains(&lng));

    let described = summary::describe(&table, &["Category", "timeStamp", "zip", "twp"]);
    assert_eq!(described.len(), 4);
    assert_eq!(described[0].top.as_deref(), Some("EMS"));
    // Two rows have an empty zip.
    assert_eq!(described[2].count, 6);
    assert_eq!(described[3].top.as_deref(), Some("NORRISTOWN"));

    assert_eq!(table.head(3).row_count(), 3);
}

#[test]
fn pipeline_surfaces_load_errors() {
    let mut pipeline = CallPipeline::default();
    let criteria = FilterCriteria::new(["EMS"], DateRange::new(day(2015, 1, 1), day(2015, 12, 31)));
    let err = pipeline.select("tests/fixtures/absent.csv.gz", &criteria).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert!(pipeline.cache().is_empty());
}
