use k53_core::model::{
    Lesson, LessonSection, Preferences, Question, QuestionDraft, QuestionId, Topic, TopicId,
};
use storage::repository::{
    PreferencesRepository, QuestionCriteria, QuestionRepository, StorageError, TopicRepository,
};
use storage::sqlite::SqliteRepository;

fn build_topic(id: u64) -> Topic {
    Topic::new(
        TopicId::new(id),
        format!("Topic {id}"),
        "Essential",
        "summary",
    )
    .unwrap()
}

fn build_question(id: u64, topic: u64, correct: usize) -> Question {
    QuestionDraft {
        prompt: format!("Question {id}?"),
        image: (id % 2 == 0).then(|| format!("signs/q{id}.png")),
        options: vec!["a".into(), "b".into(), "c".into()],
        correct_option: correct,
        explanation: "explained".into(),
    }
    .validate(QuestionId::new(id), TopicId::new(topic))
    .unwrap()
}

#[tokio::test]
async fn sqlite_round_trips_questions_with_options_and_images() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_questions?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic(1)).await.unwrap();
    repo.upsert_topic(&build_topic(2)).await.unwrap();

    for (id, topic) in [(1, 1), (2, 1), (3, 2)] {
        repo.upsert_question(&build_question(id, topic, 1))
            .await
            .unwrap();
    }

    let all = repo.fetch_set(&QuestionCriteria::all()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id(), QuestionId::new(1));
    assert_eq!(all[1].image().map(|image| image.as_str()), Some("signs/q2.png"));
    assert_eq!(all[0].options().len(), 3);
    assert_eq!(all[0].correct_option(), 1);

    let topic_two = repo
        .fetch_set(&QuestionCriteria::for_topic(TopicId::new(2)))
        .await
        .unwrap();
    assert_eq!(topic_two.len(), 1);
    assert_eq!(topic_two[0].topic_id(), TopicId::new(2));

    let limited = repo
        .fetch_set(&QuestionCriteria {
            topic: None,
            limit: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);

    assert_eq!(repo.count_questions(None).await.unwrap(), 3);
    assert_eq!(
        repo.count_questions(Some(TopicId::new(1))).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn sqlite_upsert_overwrites_question_in_place() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic(1)).await.unwrap();
    repo.upsert_question(&build_question(1, 1, 0)).await.unwrap();
    repo.upsert_question(&build_question(1, 1, 2)).await.unwrap();

    let all = repo.fetch_set(&QuestionCriteria::all()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].correct_option(), 2);
}

#[tokio::test]
async fn sqlite_round_trips_lessons_and_reports_unknown_topic() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_lessons?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic(1)).await.unwrap();
    let lesson = Lesson::new(
        TopicId::new(1),
        "15 min",
        50,
        vec![LessonSection {
            title: "Signs".into(),
            paragraphs: vec!["Triangles warn.".into(), "Circles regulate.".into()],
        }],
        vec!["Know the three sign families".into()],
    )
    .unwrap();
    repo.upsert_lesson(&lesson).await.unwrap();

    let fetched = repo.get_lesson(TopicId::new(1)).await.unwrap();
    assert_eq!(fetched, lesson);

    let err = repo.get_lesson(TopicId::new(99)).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));

    let topics = repo.list_topics().await.unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].name(), "Topic 1");
}

#[tokio::test]
async fn sqlite_round_trips_preferences() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_prefs?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.get_preferences().await.unwrap().is_none());

    let prefs = Preferences {
        sound_enabled: false,
        communication_enabled: true,
    };
    repo.save_preferences(&prefs).await.unwrap();
    assert_eq!(repo.get_preferences().await.unwrap(), Some(prefs));

    let flipped = prefs.with_communication_toggled();
    repo.save_preferences(&flipped).await.unwrap();
    assert_eq!(repo.get_preferences().await.unwrap(), Some(flipped));
}
