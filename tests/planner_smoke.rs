//! End-to-end planning over real attractions, through to export rows.

mod fixtures;

use std::collections::HashSet;

use itinerary_planner::export::{self, ItineraryRow};
use itinerary_planner::haversine::Haversine;
use itinerary_planner::point::Coordinate;
use itinerary_planner::traits::{DistanceMetric, ItinerarySink, PartitionObserver};
use itinerary_planner::{DayPartitioner, PartitionKind, PlanOptions, Planner, RouteShape, plan_trip};

#[derive(Default)]
struct VecSink {
    rows: Vec<ItineraryRow>,
}

impl ItinerarySink for VecSink {
    type Error = std::convert::Infallible;

    fn write_row(&mut self, row: &ItineraryRow) -> Result<(), Self::Error> {
        self.rows.push(row.clone());
        Ok(())
    }
}

struct FullSink {
    capacity: usize,
    written: usize,
}

impl ItinerarySink for FullSink {
    type Error = String;

    fn write_row(&mut self, _row: &ItineraryRow) -> Result<(), Self::Error> {
        if self.written == self.capacity {
            return Err("sheet full".to_string());
        }
        self.written += 1;
        Ok(())
    }
}

#[derive(Default)]
struct LabelCounter {
    calls: usize,
    labels: Vec<usize>,
}

impl PartitionObserver for LabelCounter {
    fn observe(&mut self, _coordinates: &[Coordinate], labels: &[usize]) {
        self.calls += 1;
        self.labels = labels.to_vec();
    }
}

#[test]
fn test_three_day_trip_visits_everything_once() {
    let anchor = fixtures::bellagio();
    let pois = fixtures::all_points();
    let plan = Planner::<Haversine>::default().plan(&anchor, &pois, 3).unwrap();

    assert_eq!(plan.partition, PartitionKind::Clustered);
    assert_eq!(plan.days.len(), 3);

    let mut seen = HashSet::new();
    for day in &plan.days {
        if day.is_empty() {
            continue;
        }
        assert_eq!(day.legs[0].start, "Bellagio");
        assert_eq!(day.legs.len(), day.stops.len());
        for window in day.legs.windows(2) {
            assert_eq!(window[0].end, window[1].start);
        }
        for stop in &day.stops {
            assert!(seen.insert(stop.id().to_string()), "{} visited twice", stop.id());
        }
        let sum: f64 = day.legs.iter().map(|leg| leg.distance).sum();
        assert!((sum - day.total_distance).abs() < 1e-9);
    }
    assert_eq!(seen.len(), pois.len());
}

#[test]
fn test_round_trip_days_end_at_lodging() {
    let anchor = fixtures::golden_nugget();
    let pois = fixtures::all_points();
    let options = PlanOptions {
        shape: RouteShape::RoundTrip,
        ..PlanOptions::default()
    };
    let plan = plan_trip(&anchor, &pois, 2, &Haversine::default(), &options).unwrap();

    for day in plan.days.iter().filter(|day| !day.is_empty()) {
        assert_eq!(day.legs.first().unwrap().start, "Golden Nugget");
        assert_eq!(day.legs.last().unwrap().end, "Golden Nugget");
        assert_eq!(day.legs.len(), day.stops.len() + 1);
    }
}

#[test]
fn test_round_trip_adds_one_return_leg_per_day() {
    let anchor = fixtures::bellagio();
    let pois = fixtures::all_points();
    let open = Planner::<Haversine>::default().plan(&anchor, &pois, 2).unwrap();
    let round = Planner::new(
        Haversine::default(),
        PlanOptions {
            shape: RouteShape::RoundTrip,
            ..PlanOptions::default()
        },
    )
    .plan(&anchor, &pois, 2)
    .unwrap();

    let busy_days = open.days.iter().filter(|day| !day.is_empty()).count();
    assert_eq!(round.legs().count(), open.legs().count() + busy_days);
}

#[test]
fn test_rows_follow_plan_order() {
    let anchor = fixtures::bellagio();
    let plan = Planner::<Haversine>::default()
        .plan(&anchor, &fixtures::sample_points(12), 2)
        .unwrap();
    let rows = export::rows(&plan);

    assert_eq!(rows.len(), plan.legs().count());
    assert!(rows.windows(2).all(|pair| pair[0].day <= pair[1].day));

    let mut sink = VecSink::default();
    let written = export::write_to(&plan, &mut sink).unwrap();
    assert_eq!(written, rows.len());
    assert_eq!(sink.rows, rows);
}

#[test]
fn test_sink_error_stops_export() {
    let anchor = fixtures::bellagio();
    let plan = Planner::<Haversine>::default()
        .plan(&anchor, &fixtures::sample_points(6), 1)
        .unwrap();
    let mut sink = FullSink { capacity: 2, written: 0 };

    assert_eq!(export::write_to(&plan, &mut sink), Err("sheet full".to_string()));
    assert_eq!(sink.written, 2);
}

#[test]
fn test_row_serializes_with_sheet_headers() {
    let row = ItineraryRow {
        day: 1,
        start: "Bellagio".to_string(),
        end: "High Roller".to_string(),
        distance: 0.95,
    };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["Day"], 1);
    assert_eq!(json["Start"], "Bellagio");
    assert_eq!(json["End"], "High Roller");
    assert_eq!(json["Distance"], 0.95);
}

#[test]
fn test_options_load_from_partial_config() {
    let options: PlanOptions =
        serde_json::from_str(r#"{ "shape": "RoundTrip", "kmeans": { "seed": 7 } }"#).unwrap();
    assert_eq!(options.shape, RouteShape::RoundTrip);
    assert_eq!(options.kmeans.seed, 7);
    assert_eq!(options.kmeans.max_iterations, 300);
    assert!(options.parallel);
}

#[test]
fn test_observer_matches_planned_days() {
    let pois = fixtures::all_points();
    let mut counter = LabelCounter::default();
    let partition = DayPartitioner::default()
        .partition_observed(&pois, 3, &mut counter)
        .unwrap();

    assert_eq!(counter.calls, 1);
    assert_eq!(counter.labels.len(), pois.len());
    for (poi, &label) in pois.iter().zip(&counter.labels) {
        assert!(partition.buckets()[label].contains(poi));
    }
}

#[test]
fn test_plan_serializes() {
    let anchor = fixtures::bellagio();
    let plan = Planner::<Haversine>::default()
        .plan(&anchor, &fixtures::sample_points(4), 2)
        .unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("\"Bellagio\""));

    let metric = Haversine::default();
    let first = plan.days.iter().find(|day| !day.is_empty()).unwrap();
    let expected = metric.distance(anchor.coordinate(), first.stops[0].coordinate());
    assert!((first.legs[0].distance - expected).abs() < 1e-9);
}
