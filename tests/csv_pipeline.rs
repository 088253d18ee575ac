use std::path::{Path, PathBuf};

use sales_trends::app::pipeline::run_analysis;
use sales_trends::domain::AnalyzeConfig;
use sales_trends::io::{write_snapshot_json, write_totals_csv};

const SALES_CSV: &str = "\
Order_Date,Item,Quantity,Amount
2024-01-15,Mug,10,100
2024-01-20,Tee,,0
2024-02-15,Mug,5,60
Feb 2024,Cap,20,300
2024-02-28,,3,30
";

fn config(csv_path: PathBuf) -> AnalyzeConfig {
    AnalyzeConfig {
        csv_path,
        currency: "USD".to_string(),
        json: false,
        plot: true,
        plot_width: 20,
        export_snapshot: None,
        export_totals: None,
        parallel: false,
        chunk_size: 4096,
    }
}

fn write_csv(dir: &Path) -> PathBuf {
    let path = dir.join("sales.csv");
    std::fs::write(&path, SALES_CSV).unwrap();
    path
}

#[test]
fn csv_to_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let run = run_analysis(&config(write_csv(dir.path()))).unwrap();

    assert_eq!(run.ingest.rows_read, 5);
    assert_eq!(run.ingest.records.len(), 3);
    assert_eq!(run.ingest.rows_filtered, 1);
    assert_eq!(run.ingest.row_errors.len(), 1);
    assert_eq!(run.ingest.row_errors[0].line, 6);

    assert_eq!(
        run.snapshot.quick_alerts,
        vec!["Cap sales spiked 100%", "Highest demand: 2024-02", "Revenue up 260% MoM"]
    );
}

#[test]
fn parallel_run_matches_sequential_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path());

    let sequential = run_analysis(&config(path.clone())).unwrap();
    let mut parallel_config = config(path);
    parallel_config.parallel = true;
    parallel_config.chunk_size = 2;
    let parallel = run_analysis(&parallel_config).unwrap();

    assert_eq!(sequential.snapshot, parallel.snapshot);
}

#[test]
fn exports_round_out_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let run = run_analysis(&config(write_csv(dir.path()))).unwrap();

    let json_path = dir.path().join("snapshot.json");
    let csv_path = dir.path().join("totals.csv");
    write_snapshot_json(&json_path, &run.snapshot).unwrap();
    write_totals_csv(&csv_path, &run.snapshot).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["trending_product"]["name"], "Cap");
    assert_eq!(json["revenue_change_pct"], 260);
    assert_eq!(json["quantity_series"][1]["quantity"], 25.0);

    let totals = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(totals, "product,quantity,revenue\nMug,15.0,160.0\nCap,20.0,300.0\n");
}

#[test]
fn missing_csv_reports_io_exit_code() {
    let err = run_analysis(&config(PathBuf::from("/no/such/sales.csv"))).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
