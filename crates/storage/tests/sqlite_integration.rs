use std::collections::BTreeSet;

use quiz_core::model::TopicId;
use storage::repository::ExclusionRepository;
use storage::sqlite::SqliteRepository;

async fn connect() -> SqliteRepository {
    let repo = SqliteRepository::connect("sqlite::memory:").await.unwrap();
    repo.migrate().await.unwrap();
    repo
}

fn topic(value: &str) -> TopicId {
    TopicId::new(value).unwrap()
}

#[tokio::test]
async fn round_trips_used_indices() {
    let repo = connect().await;
    let tema = topic("tema1");

    assert!(repo.load_used(&tema).await.unwrap().is_empty());

    let used: BTreeSet<usize> = [4, 0, 17].into_iter().collect();
    repo.save_used(&tema, &used).await.unwrap();
    assert_eq!(repo.load_used(&tema).await.unwrap(), used);
}

#[tokio::test]
async fn save_overwrites_previous_set() {
    let repo = connect().await;
    let tema = topic("tema1");

    let first: BTreeSet<usize> = (0..25).collect();
    repo.save_used(&tema, &first).await.unwrap();

    let second: BTreeSet<usize> = [1, 2, 3].into_iter().collect();
    repo.save_used(&tema, &second).await.unwrap();

    assert_eq!(repo.load_used(&tema).await.unwrap(), second);
}

#[tokio::test]
async fn topics_are_keyed_independently() {
    let repo = connect().await;
    let one: BTreeSet<usize> = [1].into_iter().collect();
    let two: BTreeSet<usize> = [2].into_iter().collect();

    repo.save_used(&topic("tema1"), &one).await.unwrap();
    repo.save_used(&topic("tema2"), &two).await.unwrap();

    assert_eq!(repo.load_used(&topic("tema1")).await.unwrap(), one);
    assert_eq!(repo.load_used(&topic("tema2")).await.unwrap(), two);
}

#[tokio::test]
async fn clear_drops_only_that_topic() {
    let repo = connect().await;
    let one: BTreeSet<usize> = [1].into_iter().collect();

    repo.save_used(&topic("tema1"), &one).await.unwrap();
    repo.save_used(&topic("tema2"), &one).await.unwrap();
    repo.clear_used(&topic("tema1")).await.unwrap();

    assert!(repo.load_used(&topic("tema1")).await.unwrap().is_empty());
    assert_eq!(repo.load_used(&topic("tema2")).await.unwrap(), one);
}

#[tokio::test]
async fn duplicate_indices_collapse_on_read() {
    let repo = connect().await;

    sqlx::query("INSERT INTO used_questions (key, indices, updated_at) VALUES (?1, ?2, ?3)")
        .bind("usedQuestions_tema1")
        .bind("[3, 3, 1, 1, 2]")
        .bind("2026-01-01T00:00:00Z")
        .execute(repo.pool())
        .await
        .unwrap();

    let expected: BTreeSet<usize> = [1, 2, 3].into_iter().collect();
    assert_eq!(repo.load_used(&topic("tema1")).await.unwrap(), expected);
}

#[tokio::test]
async fn corrupt_history_reads_as_empty() {
    let repo = connect().await;

    sqlx::query("INSERT INTO used_questions (key, indices, updated_at) VALUES (?1, ?2, ?3)")
        .bind("usedQuestions_tema1")
        .bind("definitely not a json list")
        .bind("2026-01-01T00:00:00Z")
        .execute(repo.pool())
        .await
        .unwrap();

    assert!(repo.load_used(&topic("tema1")).await.unwrap().is_empty());
}
