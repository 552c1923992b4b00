use std::collections::HashMap;

use skat_bootstrap::{ClientConfig, RuntimeBuilder};
use skat_core::{Command, GameType, ParticipantIndex, RoundOutcome, Step, TableMode};
use skat_runtime::{FileSeriesRepository, MockScoreSync, RuntimeHandle, SeriesRepository};

fn config_for(data_dir: &std::path::Path) -> ClientConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("SKAT_SERIES_ID", "bootstrap-test".to_owned()),
        ("SKAT_PARTICIPANTS", "3".to_owned()),
        ("SKAT_TOTAL_ROUNDS", "6".to_owned()),
        ("SKAT_DATA_DIR", data_dir.display().to_string()),
    ]);
    ClientConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid configuration")
}

async fn win_clubs(handle: &RuntimeHandle, player: u8) {
    for command in [
        Command::select_player(ParticipantIndex(player)),
        Command::select_game_type(GameType::Clubs),
        Command::proceed(),
        Command::proceed(),
        Command::complete(RoundOutcome::Won),
    ] {
        handle.execute(command).await.expect("command should be accepted");
    }
}

#[tokio::test]
async fn stored_series_resumes_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    assert_eq!(config.series.mode, TableMode::Three);

    let setup = RuntimeBuilder::new(config.clone())
        .score_sync(MockScoreSync::new())
        .build()
        .await
        .unwrap();
    let handle = setup.runtime.handle();
    win_clubs(&handle, 0).await;
    drop(handle);
    setup.runtime.shutdown().await.unwrap();

    assert!(config.series_dir().join("series_bootstrap-test.json").exists());

    let setup = RuntimeBuilder::new(config).build().await.unwrap();
    let handle = setup.runtime.handle();
    let sheet = handle.query_sheet().await.unwrap();

    assert_eq!(sheet.current().number, 2);
    assert_eq!(sheet.step(), Step::SelectingPlayer);
    assert_eq!(sheet.aggregates()[0].won_count, 1);
    assert_eq!(sheet.aggregates()[0].total_points, 12 + 50);

    drop(handle);
    setup.runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn fresh_start_replaces_stored_series() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let setup = RuntimeBuilder::new(config.clone()).build().await.unwrap();
    let handle = setup.runtime.handle();
    win_clubs(&handle, 1).await;
    drop(handle);
    setup.runtime.shutdown().await.unwrap();

    let setup = RuntimeBuilder::new(config.clone()).resume(false).build().await.unwrap();
    let handle = setup.runtime.handle();
    let sheet = handle.query_sheet().await.unwrap();

    assert_eq!(sheet.current().number, 1);
    assert!(sheet.aggregates().iter().all(|aggregate| aggregate.won_count == 0));

    drop(handle);
    setup.runtime.shutdown().await.unwrap();

    let repository = FileSeriesRepository::new(config.series_dir()).unwrap();
    let stored = repository.load("bootstrap-test").unwrap().unwrap();
    assert!(stored.rounds.is_empty());
    assert!(config.series_dir().join("series_bootstrap-test.json.bak").exists());
}
