use anyhow::Result;
use perf_report::core::Pipeline;
use perf_report::{EtlEngine, EtlError, LocalStorage, PerformancePipeline, TomlConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_inputs(dir: &Path, files: &[(&str, &str)]) -> Vec<String> {
    files
        .iter()
        .map(|(name, content)| {
            fs::write(dir.join(name), content).unwrap();
            name.to_string()
        })
        .collect()
}

fn toml_config(files: &[String], report: &str) -> TomlConfig {
    let quoted: Vec<String> = files.iter().map(|f| format!("\"{}\"", f)).collect();
    TomlConfig::from_toml_str(&format!(
        "[input]\nfiles = [{}]\n\n[report]\npath = \"{}\"\n",
        quoted.join(", "),
        report
    ))
    .unwrap()
}

fn engine_for(
    dir: &Path,
    files: &[String],
    report: &str,
) -> EtlEngine<PerformancePipeline<LocalStorage, TomlConfig>> {
    let pipeline = PerformancePipeline::new(LocalStorage::new(dir), toml_config(files, report));
    EtlEngine::new(pipeline)
}

#[test]
fn test_two_files_same_position_are_averaged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[
            ("first.csv", "position,performance\nDev,80\n"),
            ("second.csv", "position,performance\nDev,90\n"),
        ],
    );

    let summary = engine_for(temp_dir.path(), &files, "report.csv").run()?;

    assert_eq!(summary.rows.len(), 1);
    assert_eq!(summary.rows[0].position, "Dev");
    assert_eq!(summary.rows[0].average_performance, 85.0);
    assert_eq!(summary.rows[0].count, 2);
    assert_eq!(summary.source_rows, 2);

    let report = fs::read_to_string(temp_dir.path().join("report.csv"))?;
    assert_eq!(report, "position,average_performance\nDev,85.00\n");
    Ok(())
}

#[test]
fn test_blank_performance_does_not_count() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[("team.csv", "position,performance\nQA,\nQA,70\n")],
    );

    let summary = engine_for(temp_dir.path(), &files, "report.csv").run()?;

    assert_eq!(summary.skipped_rows, 1);
    assert_eq!(summary.rows[0].average_performance, 70.0);
    assert_eq!(summary.rows[0].count, 1);
    Ok(())
}

#[test]
fn test_all_files_empty_is_no_data() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(temp_dir.path(), &[("a.csv", ""), ("b.csv", "")]);

    let result = engine_for(temp_dir.path(), &files, "report.csv").run();

    assert!(matches!(result, Err(EtlError::NoDataError)));
    assert!(!temp_dir.path().join("report.csv").exists());
    Ok(())
}

#[test]
fn test_missing_performance_column_fails_before_aggregation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[
            ("a.csv", "position,task_id,salary\nDev,1,100000\n"),
            ("b.csv", "position,task_id\nQA,2\n"),
        ],
    );

    let result = engine_for(temp_dir.path(), &files, "report.csv").run();

    match result {
        Err(EtlError::MissingRequiredColumnsError { missing, .. }) => {
            assert_eq!(missing, vec!["performance".to_string()]);
        }
        other => panic!("expected missing columns error, got {:?}", other.map(|s| s.rows)),
    }
    assert!(!temp_dir.path().join("report.csv").exists());
    Ok(())
}

#[test]
fn test_missing_file_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut files = write_inputs(
        temp_dir.path(),
        &[("present.csv", "position,performance\nDev,80\n")],
    );
    files.push("absent.csv".to_string());

    let result = engine_for(temp_dir.path(), &files, "report.csv").run();

    assert!(matches!(result, Err(EtlError::MissingFileError { .. })));
    Ok(())
}

#[test]
fn test_no_valid_rows_is_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[("bad.csv", "position,performance\nDev,n/a\n,80\n")],
    );

    let result = engine_for(temp_dir.path(), &files, "report.csv").run();

    assert!(matches!(
        result,
        Err(EtlError::NoValidDataError { skipped: 2 })
    ));
    Ok(())
}

#[test]
fn test_unwritable_report_is_write_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[("team.csv", "position,performance\nDev,80\n")],
    );

    let result = engine_for(temp_dir.path(), &files, "missing/dir/report.csv").run();

    assert!(matches!(result, Err(EtlError::WriteError { .. })));
    Ok(())
}

#[test]
fn test_heterogeneous_files_sorted_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[
            (
                "employees.csv",
                "name,position,completed_tasks,performance\nAlice,Backend Developer,45,4.8\nBob,QA Engineer,38,4.5\nCarol,Backend Developer,50,4.6\n",
            ),
            (
                "contractors.csv",
                "position;performance;team\nQA Engineer;4.9;Apollo\nDesigner;4.5;Apollo\nDesigner;oops;Apollo\n",
            ),
            ("empty.csv", ""),
        ],
    );

    let summary = engine_for(temp_dir.path(), &files, "report.csv").run()?;

    assert_eq!(summary.source_rows, 6);
    assert_eq!(summary.skipped_rows, 1);
    let report = fs::read_to_string(temp_dir.path().join("report.csv"))?;
    assert_eq!(
        report,
        "position,average_performance\nBackend Developer,4.70\nQA Engineer,4.70\nDesigner,4.50\n"
    );
    assert!(summary
        .rows
        .windows(2)
        .all(|w| w[0].average_performance >= w[1].average_performance));
    Ok(())
}

#[test]
fn test_record_count_matches_inputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[
            ("a.csv", "position,performance\nDev,1\nQA,2\nPM,3\n"),
            ("b.csv", "position,performance\nDev,4\n"),
            ("c.csv", ""),
            ("d.csv", "position,performance\nOps,5\nSec,6\n"),
        ],
    );
    let pipeline = PerformancePipeline::new(
        LocalStorage::new(temp_dir.path()),
        toml_config(&files, "report.csv"),
    );

    let ingested = pipeline.extract()?;

    assert_eq!(ingested.records.len(), 6);
    assert_eq!(ingested.files_read, 3);
    assert_eq!(ingested.files_skipped, 1);
    Ok(())
}

#[test]
fn test_config_file_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let files = write_inputs(
        temp_dir.path(),
        &[("team.csv", "position,performance\nDev,80\nQA,60\n")],
    );
    let config_path = temp_dir.path().join("perf-report.toml");
    fs::write(
        &config_path,
        format!(
            "[input]\nfiles = [\"{}\"]\n\n[report]\npath = \"out.csv\"\n\n[monitoring]\nenabled = true\n",
            files[0]
        ),
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    assert!(config.monitoring_enabled());
    let pipeline = PerformancePipeline::new(LocalStorage::new(temp_dir.path()), config);
    let summary = EtlEngine::new_with_monitoring(pipeline, true).run()?;

    assert_eq!(summary.output_path, "out.csv");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("out.csv"))?,
        "position,average_performance\nDev,80.00\nQA,60.00\n"
    );
    Ok(())
}
