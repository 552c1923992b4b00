use skat_core::{
    GameType, ParticipantAggregate, ParticipantIndex, Round, RoundRecord, RoundValue,
    SeriesConfig, SeriesStatus, TableMode,
};
use skat_runtime::{FileSeriesRepository, RepositoryError, SeriesRepository};
use tempfile::TempDir;

fn record(series_id: &str, number: u32, player: u8, total: i64) -> RoundRecord {
    let mut round = Round::new(number, ParticipantIndex(0));
    round.player = Some(ParticipantIndex(player));
    round.game_type = Some(GameType::Spades);
    round.won = true;
    round.completed = true;
    round.awarded = Some(RoundValue {
        base_points: 11,
        total_points: 61,
        defender_bonus: 0,
    });

    let mut aggregates = vec![ParticipantAggregate::default(); 4];
    aggregates[usize::from(player)].total_points = total;

    RoundRecord {
        series_id: series_id.to_owned(),
        config: SeriesConfig::new(TableMode::Four),
        round,
        aggregates,
        status: SeriesStatus::InProgress,
    }
}

#[test]
fn saved_rounds_survive_reopening() {
    let dir = TempDir::new().unwrap();

    {
        let repository = FileSeriesRepository::new(dir.path()).unwrap();
        repository.save_round(&record("club-night", 1, 1, 61)).unwrap();
        repository.save_round(&record("club-night", 2, 2, 61)).unwrap();
    }

    let repository = FileSeriesRepository::new(dir.path()).unwrap();
    let stored = repository.load("club-night").unwrap().expect("series stored");

    assert_eq!(stored.series_id, "club-night");
    assert_eq!(stored.rounds.len(), 2);
    assert_eq!(stored.rounds[1].player, Some(ParticipantIndex(2)));
    assert_eq!(stored.aggregates[2].total_points, 61);
    assert!(repository.exists("club-night").unwrap());
    assert!(!repository.exists("other").unwrap());
    assert!(dir.path().join("series_club-night.json").exists());
    assert!(!dir.path().join("series_club-night.json.tmp").exists());
}

#[test]
fn resaving_a_round_replaces_it() {
    let dir = TempDir::new().unwrap();
    let repository = FileSeriesRepository::new(dir.path()).unwrap();

    repository.save_round(&record("s1", 1, 1, 61)).unwrap();
    repository.save_round(&record("s1", 1, 3, 61)).unwrap();

    let stored = repository.load("s1").unwrap().unwrap();
    assert_eq!(stored.rounds.len(), 1);
    assert_eq!(stored.rounds[0].player, Some(ParticipantIndex(3)));
}

#[test]
fn reset_archives_the_previous_document() {
    let dir = TempDir::new().unwrap();
    let repository = FileSeriesRepository::new(dir.path()).unwrap();
    repository.save_round(&record("s1", 1, 1, 61)).unwrap();
    repository.save_round(&record("s1", 2, 2, 61)).unwrap();

    let config = SeriesConfig::new(TableMode::Three).with_total_rounds(6);
    repository.reset("s1", &config).unwrap();

    let stored = repository.load("s1").unwrap().unwrap();
    assert!(stored.rounds.is_empty());
    assert_eq!(stored.config, config);
    assert_eq!(stored.aggregates.len(), 3);
    assert!(stored.aggregates.iter().all(|aggregate| aggregate.total_points == 0));

    let archived = std::fs::read_to_string(dir.path().join("series_s1.json.bak")).unwrap();
    assert!(archived.contains("\"series_id\""));

    repository.save_round(&record("s1", 1, 3, 61)).unwrap();
    let stored = repository.load("s1").unwrap().unwrap();
    assert_eq!(stored.rounds.len(), 1);
    assert_eq!(stored.rounds[0].player, Some(ParticipantIndex(3)));
}

#[test]
fn reset_without_a_document_creates_an_empty_one() {
    let dir = TempDir::new().unwrap();
    let repository = FileSeriesRepository::new(dir.path()).unwrap();

    repository.reset("fresh", &SeriesConfig::new(TableMode::Four)).unwrap();

    let stored = repository.load("fresh").unwrap().unwrap();
    assert!(stored.rounds.is_empty());
    assert_eq!(stored.aggregates.len(), 4);
    assert!(!dir.path().join("series_fresh.json.bak").exists());
}

#[test]
fn rejects_series_ids_that_escape_the_directory() {
    let dir = TempDir::new().unwrap();
    let repository = FileSeriesRepository::new(dir.path()).unwrap();

    for series_id in ["", "../escape", "a/b", ".hidden"] {
        assert!(matches!(
            repository.load(series_id),
            Err(RepositoryError::InvalidSeriesId(_))
        ));
    }
}

#[test]
fn corrupted_document_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("series_broken.json"), b"{ not json").unwrap();
    let repository = FileSeriesRepository::new(dir.path()).unwrap();

    assert!(matches!(
        repository.load("broken"),
        Err(RepositoryError::Json(_))
    ));
}
