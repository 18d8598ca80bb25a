use sortarm::config::SortArmConfig;
use sortarm::labels::{LabelStore, LabelStoreError};
use std::io::Write;

#[tokio::test]
async fn missing_config_file_is_created_with_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    let config = SortArmConfig::load(&path).await?;

    assert!(path.exists(), "defaults should be written back to disk");
    assert_eq!(config.vote.window, 10);
    assert_eq!(config.classifier.confidence_threshold, 0.6);
    assert_eq!(config.classifier.fallback_label_id, 1);
    assert_eq!(config.serial.port, "/dev/ttyUSB0");
    assert_eq!(config.serial.baud, 115_200);

    Ok(())
}

#[tokio::test]
async fn config_round_trips_through_toml() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    let mut config = SortArmConfig::default();
    config.vote.window = 5;
    config.serial.port = "/dev/ttyACM0".to_string();
    config.save(&path).await?;

    let loaded = SortArmConfig::load(&path).await?;
    assert_eq!(loaded.vote.window, 5);
    assert_eq!(loaded.serial.port, "/dev/ttyACM0");
    assert_eq!(loaded.vision.width, config.vision.width);

    Ok(())
}

#[test]
fn label_ids_follow_line_order() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "cap")?;
    writeln!(file, "background")?;
    writeln!(file, "paper")?;

    let labels = LabelStore::load(file.path())?;

    assert_eq!(labels.len(), 3);
    assert_eq!(labels.name(0), "cap");
    assert_eq!(labels.name(1), "background");
    assert_eq!(labels.name(2), "paper");
    // Out-of-range ids fall back to the bare id
    assert_eq!(labels.name(7), "label 7");

    Ok(())
}

#[test]
fn blank_lines_keep_their_label_ids() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "cap")?;
    writeln!(file)?;
    writeln!(file, "paper")?;

    let labels = LabelStore::load(file.path())?;

    assert_eq!(labels.name(2), "paper");

    Ok(())
}

#[test]
fn an_empty_label_file_is_rejected() -> anyhow::Result<()> {
    let file = tempfile::NamedTempFile::new()?;

    let result = LabelStore::load(file.path());

    assert!(matches!(result, Err(LabelStoreError::Empty(_))));

    Ok(())
}
