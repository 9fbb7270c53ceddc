use pv_forecast_eval::baselines::BaselineKind;
use pv_forecast_eval::segmentation::NamedHours;
use pv_forecast_eval::{ColumnConfig, HourSplit, SegmentationConfig};
use pv_forecast_eval::{evaluate, EvalError, EvaluationBuilder, EvaluationConfig, ResultsFrame};
use tracing_subscriber::EnvFilter;

const MODEL: &str = "pvnet";

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Dve entity (1, 2), štyri polhodinové body cez letné poludnie v Anglicku.
fn sample_frame() -> ResultsFrame {
    let times = ["11:00:00", "11:30:00", "12:00:00", "12:30:00"];
    let mut ids = Vec::new();
    let mut timestamps = Vec::new();
    let mut observed = Vec::new();
    for (id, values) in [(1.0, [2.0, 4.0, 6.0, 8.0]), (2.0, [10.0; 4])] {
        for (t, v) in times.iter().zip(values) {
            ids.push(id);
            timestamps.push(format!("2022-06-01 {t}"));
            observed.push(v);
        }
    }

    ResultsFrame::new()
        .with_column("id", ids)
        .unwrap()
        .with_column("target_datetime_utc", timestamps)
        .unwrap()
        .with_column("actual_pv_outturn_mw", observed.clone())
        .unwrap()
        .with_column(
            "forecast_pv_outturn_mw_0",
            observed.iter().map(|o| o + 1.0).collect::<Vec<f64>>(),
        )
        .unwrap()
        .with_column("forecast_pv_outturn_mw_2", observed.clone())
        .unwrap()
        .with_column(
            "reference_pv_outturn_mw",
            observed.iter().map(|o| o + 2.0).collect::<Vec<f64>>(),
        )
        .unwrap()
        .with_column("capacity_mwp", vec![20.0; 8])
        .unwrap()
        .with_column("latitude", vec![52.0; 8])
        .unwrap()
        .with_column("longitude", vec![-1.0; 8])
        .unwrap()
}

fn empty_frame() -> ResultsFrame {
    let mut frame = ResultsFrame::new();
    for name in [
        "id",
        "actual_pv_outturn_mw",
        "forecast_pv_outturn_mw_0",
        "reference_pv_outturn_mw",
        "capacity_mwp",
        "latitude",
        "longitude",
    ] {
        frame.add_column(name, Vec::<f64>::new()).unwrap();
    }
    frame
        .add_column("target_datetime_utc", Vec::<String>::new())
        .unwrap();
    frame
}

#[test]
fn default_evaluation_has_full_key_space() {
    init_logging();
    let result = evaluate(&sample_frame(), MODEL).unwrap();

    // model + 5 baseline, každý surový aj normalizovaný
    assert_eq!(result.representations().len(), 12);
    assert_eq!(result.horizons("pvnet/mw"), vec!["horizon_0", "horizon_2"]);
    // (2+1) deň/noc x (4+1) časť dňa x (4+1) sezóna x (2+1) entita, 6 metrík
    assert_eq!(result.metric_count(), 12 * 2 * 225 * 6);
    assert_eq!(result.row_count, 8);
}

#[test]
fn model_metrics_per_horizon_and_segment() {
    let result = evaluate(&sample_frame(), MODEL).unwrap();

    assert_eq!(result.get("pvnet/mw", "horizon_0", "all", "mae"), Some(1.0));
    assert_eq!(result.get("pvnet/mw", "horizon_2", "all", "mae"), Some(0.0));
    assert_eq!(
        result.get("pvnet/mw", "horizon_0", "all", "large_error_count_threshold_1000"),
        Some(0.0)
    );

    let normalized = result.get("pvnet/normalized", "horizon_0", "all", "mae").unwrap();
    assert!(close(normalized, 0.05));

    let sliced = "daylight=day/time_of_day=afternoon/season=summer/entity=1";
    assert_eq!(result.get("pvnet/mw", "horizon_0", sliced, "mbe"), Some(1.0));

    // v noci ani v zime nie sú žiadne riadky
    assert!(result
        .get("pvnet/mw", "horizon_0", "daylight=night", "mae")
        .unwrap()
        .is_nan());
    assert!(result
        .get("pvnet/mw", "horizon_0", "season=winter", "rmse")
        .unwrap()
        .is_nan());
}

#[test]
fn zero_baseline_bias_is_negative_mean_observation() {
    let result = evaluate(&sample_frame(), MODEL).unwrap();
    let mbe = result
        .get("zero_baseline/mw", "horizon_0", "all", "mbe")
        .unwrap();
    assert!(close(mbe, -7.5));
}

#[test]
fn max_baseline_predicts_capacity() {
    let result = evaluate(&sample_frame(), MODEL).unwrap();
    let mae = result.get("max_baseline/mw", "horizon_2", "all", "mae").unwrap();
    assert!(close(mae, 12.5));
    let normalized = result
        .get("max_baseline/normalized", "horizon_2", "entity=2", "mae")
        .unwrap();
    assert!(close(normalized, 0.5));
}

#[test]
fn persistence_and_reference_baselines() {
    let result = evaluate(&sample_frame(), MODEL).unwrap();

    // konštantné pozorovania = dokonalá persistencia
    assert_eq!(
        result.get(
            "last_value_persistence_baseline/mw",
            "horizon_0",
            "entity=2",
            "mae"
        ),
        Some(0.0)
    );
    assert_eq!(
        result.get(
            "last_value_persistence_baseline/mw",
            "horizon_0",
            "entity=1",
            "mae"
        ),
        Some(2.0)
    );
    assert_eq!(
        result.get("reference_baseline/mw", "horizon_0", "all", "mae"),
        Some(2.0)
    );
    // menej ako deň histórie
    assert!(result
        .get("last_day_persistence_baseline/mw", "horizon_0", "all", "mae")
        .unwrap()
        .is_nan());
}

#[test]
fn empty_table_gives_nan_everywhere() {
    let result = evaluate(&empty_frame(), MODEL).unwrap();
    assert_eq!(result.row_count, 0);
    // entita nemá buckety: 3 x 5 x 5 x 1 segmentov
    assert_eq!(result.metric_count(), 12 * 75 * 6);
    assert!(result.flatten().values().all(|v| v.is_nan()));
}

#[test]
fn missing_columns_fail_fast() {
    let mut frame = ResultsFrame::new();
    for name in sample_frame().headers() {
        if name != "reference_pv_outturn_mw" {
            let column = sample_frame().column(&name).unwrap().clone();
            frame.add_column(&name, column).unwrap();
        }
    }

    match evaluate(&frame, MODEL) {
        Err(EvalError::Schema { column }) => assert_eq!(column, "reference_pv_outturn_mw"),
        other => panic!("expected schema error, got {other:?}"),
    }

    // bez reference baseline stĺpec netreba
    let pipeline = EvaluationBuilder::new()
        .baselines(vec![BaselineKind::Zero, BaselineKind::Max])
        .build()
        .unwrap();
    let result = pipeline.evaluate(&frame, MODEL).unwrap();
    assert_eq!(result.representations().len(), 6);
}

#[test]
fn daylight_axis_needs_location() {
    let mut frame = ResultsFrame::new();
    for name in sample_frame().headers() {
        if name != "latitude" {
            let column = sample_frame().column(&name).unwrap().clone();
            frame.add_column(&name, column).unwrap();
        }
    }
    assert!(matches!(
        evaluate(&frame, MODEL),
        Err(EvalError::Schema { column }) if column == "latitude"
    ));

    let pipeline = EvaluationBuilder::new().daylight(false).build().unwrap();
    assert!(pipeline.evaluate(&frame, MODEL).is_ok());
}

#[test]
fn input_frame_is_not_mutated() {
    let frame = sample_frame();
    let before = frame.clone();
    evaluate(&frame, MODEL).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn config_from_json_drives_the_pipeline() {
    let config = EvaluationConfig::from_json(
        r#"{
            "normalize": false,
            "baselines": ["zero"],
            "per_entity": false,
            "segmentation": {"daylight": false, "time_of_day": null, "season": null},
            "error_thresholds": [5]
        }"#,
    )
    .unwrap();
    let result = EvaluationBuilder::from_config(config)
        .build()
        .unwrap()
        .evaluate(&sample_frame(), MODEL)
        .unwrap();

    assert_eq!(result.representations(), vec!["pvnet/mw", "zero_baseline/mw"]);
    // jediný segment "all", 5 metrík
    assert_eq!(result.metric_count(), 2 * 2 * 5);
    assert_eq!(
        result.get("zero_baseline/mw", "horizon_0", "all", "large_error_count_threshold_5"),
        Some(6.0)
    );
}

#[test]
fn json_output_uses_null_for_empty_segments() {
    let json = evaluate(&sample_frame(), MODEL).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["model_name"], MODEL);
    assert_eq!(value["metrics"]["pvnet/mw"]["horizon_0"]["all"]["mae"], 1.0);
    assert!(value["metrics"]["pvnet/mw"]["horizon_0"]["daylight=night"]["mae"].is_null());
    assert!(value["overall"]["pvnet/mw"]["rmse"].is_number());
}

#[test]
fn flatten_matches_nested_lookup() {
    let result = evaluate(&sample_frame(), MODEL).unwrap();
    let flat = result.flatten();
    assert_eq!(flat["pvnet/mw/horizon_0/all/mae"], 1.0);
    assert_eq!(flat["pvnet/mw/overall/mae"], 0.5);
}

#[test]
fn repeated_bucket_names_are_rejected_at_build() {
    let split = HourSplit::Named {
        groups: vec![
            NamedHours::new("night", &[0, 1, 2, 3]),
            NamedHours::new("day", &(4..21).collect::<Vec<u32>>()),
            NamedHours::new("night", &[21, 22, 23]),
        ],
    };
    let err = EvaluationBuilder::new()
        .time_of_day(Some(split))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, EvalError::InvalidConfig(_)));
}

#[test]
fn two_columns_for_one_horizon_are_rejected() {
    let frame = sample_frame()
        .with_column("second_h2", vec![0.0; 8])
        .unwrap();
    let columns = ColumnConfig::default()
        .horizon("forecast_pv_outturn_mw_2", 2)
        .horizon("second_h2", 2);
    let pipeline = EvaluationBuilder::new().columns(columns).build().unwrap();
    assert!(matches!(
        pipeline.evaluate(&frame, MODEL),
        Err(EvalError::InvalidConfig(_))
    ));
}

#[test]
fn last_day_persistence_works_on_daytime_only_rows() {
    // dva dni po 20 polhodinových bodoch (7:00 - 16:30), druhý deň o 100 vyšší
    let mut timestamps = Vec::new();
    let mut observed = Vec::new();
    for day in 1..=2 {
        for i in 0..20 {
            let minutes = 7 * 60 + 30 * i;
            timestamps.push(format!(
                "2022-06-0{day} {:02}:{:02}:00",
                minutes / 60,
                minutes % 60
            ));
            observed.push(if day == 1 { 100.0 } else { 200.0 });
        }
    }
    let frame = ResultsFrame::new()
        .with_column("id", vec![1.0; 40])
        .unwrap()
        .with_column("target_datetime_utc", timestamps)
        .unwrap()
        .with_column("actual_pv_outturn_mw", observed.clone())
        .unwrap()
        .with_column("forecast_pv_outturn_mw_0", observed)
        .unwrap()
        .with_column("capacity_mwp", vec![500.0; 40])
        .unwrap();

    let result = EvaluationBuilder::new()
        .baselines(vec![BaselineKind::LastDay])
        .segmentation(SegmentationConfig::none())
        .build()
        .unwrap()
        .evaluate(&frame, MODEL)
        .unwrap();

    assert_eq!(
        result.get(
            "last_day_persistence_baseline/mw",
            "horizon_0",
            "all",
            "mae"
        ),
        Some(100.0)
    );
}
