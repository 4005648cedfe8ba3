//! Starter K53 content: topics, lesson material, and the question bank.
//!
//! Used by the `seed` binary and by the app shell when it finds an empty
//! database on first launch.

use tracing::info;

use k53_core::model::{
    Lesson, LessonSection, Question, QuestionDraft, QuestionId, Topic, TopicId,
};

use crate::repository::{Storage, StorageError};

pub const RULES_OF_THE_ROAD: TopicId = TopicId::new(1);
pub const ROAD_SIGNS: TopicId = TopicId::new(2);
pub const VEHICLE_CONTROLS: TopicId = TopicId::new(3);

/// True when the question bank already has content.
///
/// # Errors
///
/// Returns `StorageError` for connection failures.
pub async fn is_seeded(storage: &Storage) -> Result<bool, StorageError> {
    Ok(storage.questions.count_questions(None).await? > 0)
}

/// Populate the default K53 bank. Upserts, so re-running is harmless.
///
/// # Errors
///
/// Returns `StorageError` if any write fails.
pub async fn seed_default_bank(storage: &Storage) -> Result<(), StorageError> {
    for topic in default_topics() {
        storage.topics.upsert_topic(&topic).await?;
    }
    for lesson in default_lessons() {
        storage.topics.upsert_lesson(&lesson).await?;
    }
    let questions = default_questions();
    for question in &questions {
        storage.questions.upsert_question(question).await?;
    }
    info!(questions = questions.len(), "seeded default question bank");
    Ok(())
}

fn topic(id: TopicId, name: &str, category: &str, summary: &str) -> Topic {
    // Static content; the literals below satisfy the domain validation.
    Topic::new(id, name, category, summary).expect("seed topic is valid")
}

#[must_use]
pub fn default_topics() -> Vec<Topic> {
    vec![
        topic(
            RULES_OF_THE_ROAD,
            "Rules of the Road",
            "Essential",
            "Right of way, speed limits, following distances and general road rules.",
        ),
        topic(
            ROAD_SIGNS,
            "Road Signs",
            "Essential",
            "Warning, regulatory and information signs, and road markings.",
        ),
        topic(
            VEHICLE_CONTROLS,
            "Vehicle Controls",
            "Safety",
            "The controls used in the K53 test and safe vehicle operation.",
        ),
    ]
}

struct SeedQuestion {
    id: u64,
    topic: TopicId,
    prompt: &'static str,
    options: &'static [&'static str],
    correct: usize,
    explanation: &'static str,
}

const SEED_QUESTIONS: &[SeedQuestion] = &[
    SeedQuestion {
        id: 1,
        topic: RULES_OF_THE_ROAD,
        prompt: "What is the general speed limit in an urban area, unless a sign shows otherwise?",
        options: &["60 km/h", "80 km/h", "100 km/h", "120 km/h"],
        correct: 0,
        explanation: "The general speed limit in urban areas is 60 km/h unless a regulatory sign \
                      indicates a different limit.",
    },
    SeedQuestion {
        id: 2,
        topic: RULES_OF_THE_ROAD,
        prompt: "What is the general speed limit on a freeway for a light motor vehicle?",
        options: &["100 km/h", "110 km/h", "120 km/h", "140 km/h"],
        correct: 2,
        explanation: "The general freeway limit for light motor vehicles is 120 km/h.",
    },
    SeedQuestion {
        id: 3,
        topic: RULES_OF_THE_ROAD,
        prompt: "At a four-way stop, which vehicle may proceed first?",
        options: &[
            "The vehicle on the right",
            "The vehicle that stopped first",
            "The heaviest vehicle",
            "The vehicle turning left",
        ],
        correct: 1,
        explanation: "Vehicles at a four-way stop proceed in the order in which they stopped.",
    },
    SeedQuestion {
        id: 4,
        topic: RULES_OF_THE_ROAD,
        prompt: "What minimum following distance should you keep behind the vehicle ahead in dry \
                 conditions?",
        options: &["One second", "Two seconds", "Five seconds", "Ten seconds"],
        correct: 1,
        explanation: "Keep at least a two-second gap in dry conditions and double it in wet \
                      weather.",
    },
    SeedQuestion {
        id: 5,
        topic: RULES_OF_THE_ROAD,
        prompt: "How close to a pedestrian crossing may you park?",
        options: &[
            "Not within 9 m of the crossing",
            "Not within 5 m of the crossing",
            "Not within 1,5 m of the crossing",
            "On the crossing, if you stop briefly",
        ],
        correct: 0,
        explanation: "Parking is prohibited within 9 m of a pedestrian crossing, on the approach \
                      side.",
    },
    SeedQuestion {
        id: 6,
        topic: ROAD_SIGNS,
        prompt: "What shape and colour is a warning sign?",
        options: &[
            "A triangle with a red border",
            "A blue rectangle",
            "A red circle",
            "A green rectangle",
        ],
        correct: 0,
        explanation: "Warning signs are triangular with a red border and alert you to hazards \
                      ahead.",
    },
    SeedQuestion {
        id: 7,
        topic: ROAD_SIGNS,
        prompt: "A red circle around a symbol on a road sign means that...",
        options: &[
            "the action shown is prohibited",
            "the action shown is compulsory",
            "there is a hazard ahead",
            "tourist information follows",
        ],
        correct: 0,
        explanation: "Red-circle regulatory signs prohibit; blue-circle signs give compulsory \
                      instructions.",
    },
    SeedQuestion {
        id: 8,
        topic: ROAD_SIGNS,
        prompt: "What must you do at a stop sign?",
        options: &[
            "Slow down and proceed if the road is clear",
            "Stop completely behind the line, then proceed when it is safe",
            "Stop only if other traffic is present",
            "Sound your hooter and proceed",
        ],
        correct: 1,
        explanation: "A stop sign requires a complete stop behind the stop line before you may \
                      proceed.",
    },
    SeedQuestion {
        id: 9,
        topic: ROAD_SIGNS,
        prompt: "A solid white line in the centre of the road means...",
        options: &[
            "you may overtake if the road ahead is clear",
            "you may not cross the line to overtake",
            "the road narrows ahead",
            "parking is prohibited on both sides",
        ],
        correct: 1,
        explanation: "A solid line may not be crossed; overtaking there is dangerous and \
                      prohibited.",
    },
    SeedQuestion {
        id: 10,
        topic: VEHICLE_CONTROLS,
        prompt: "Which pedal is the clutch in a manual vehicle?",
        options: &[
            "The left pedal",
            "The middle pedal",
            "The right pedal",
            "There is no clutch pedal",
        ],
        correct: 0,
        explanation: "In a manual vehicle the clutch is the left pedal, the brake is in the \
                      middle and the accelerator is on the right.",
    },
    SeedQuestion {
        id: 11,
        topic: VEHICLE_CONTROLS,
        prompt: "When should you use your hazard warning lights?",
        options: &[
            "When parking illegally",
            "When your stationary vehicle is causing an obstruction",
            "When driving slowly in heavy rain",
            "When reversing into a parking space",
        ],
        correct: 1,
        explanation: "Hazard lights warn other road users that your stationary vehicle is an \
                      obstruction, such as after a breakdown.",
    },
    SeedQuestion {
        id: 12,
        topic: VEHICLE_CONTROLS,
        prompt: "Before moving off from the side of the road you should...",
        options: &[
            "signal, check your mirrors and blind spot, and pull away when safe",
            "pull away quickly to join the traffic",
            "switch on your hazard lights",
            "rev the engine to warn other traffic",
        ],
        correct: 0,
        explanation: "The K53 pull-away drill: signal your intention, check mirrors and the blind \
                      spot, and move off only when it is safe.",
    },
];

#[must_use]
pub fn default_questions() -> Vec<Question> {
    SEED_QUESTIONS
        .iter()
        .map(|seed| {
            QuestionDraft {
                prompt: seed.prompt.to_string(),
                image: None,
                options: seed.options.iter().map(ToString::to_string).collect(),
                correct_option: seed.correct,
                explanation: seed.explanation.to_string(),
            }
            .validate(QuestionId::new(seed.id), seed.topic)
            .expect("seed question is valid")
        })
        .collect()
}

fn section(title: &str, paragraphs: &[&str]) -> LessonSection {
    LessonSection {
        title: title.to_string(),
        paragraphs: paragraphs.iter().map(ToString::to_string).collect(),
    }
}

#[must_use]
pub fn default_lessons() -> Vec<Lesson> {
    vec![
        Lesson::new(
            RULES_OF_THE_ROAD,
            "20 min",
            75,
            vec![
                section(
                    "Why the rules matter",
                    &[
                        "The rules of the road let every road user predict what the others will \
                         do. Most K53 theory questions test whether you can apply them, not just \
                         recite them.",
                        "Speed limits are **maximums**, not targets. Always drive at a speed that \
                         suits the conditions.",
                    ],
                ),
                section(
                    "Right of way",
                    &[
                        "At a four-way stop, vehicles proceed in the order in which they stopped.",
                        "At an uncontrolled intersection, yield to traffic approaching from the \
                         right.",
                        "Pedestrians already on a pedestrian crossing always have right of way.",
                    ],
                ),
                section(
                    "Speed and following distance",
                    &[
                        "General limits: **60 km/h** in urban areas, **100 km/h** outside urban \
                         areas, **120 km/h** on freeways, unless signs show otherwise.",
                        "Keep a following distance of at least two seconds in dry conditions and \
                         double it in the wet.",
                    ],
                ),
            ],
            vec![
                "Stop-order decides priority at a four-way stop".into(),
                "Yield to the right at uncontrolled intersections".into(),
                "60 / 100 / 120 km/h general limits".into(),
                "Two-second following distance, doubled in rain".into(),
            ],
        )
        .expect("seed lesson is valid"),
        Lesson::new(
            ROAD_SIGNS,
            "15 min",
            50,
            vec![
                section(
                    "The three sign families",
                    &[
                        "**Warning signs** are triangles with a red border: they tell you about a \
                         hazard ahead, such as a sharp curve or a pedestrian crossing.",
                        "**Regulatory signs** are circles: a red circle prohibits, a blue circle \
                         commands. They are legally enforceable.",
                        "**Information and guidance signs** are rectangles and help you navigate.",
                    ],
                ),
                section(
                    "Road markings",
                    &[
                        "A broken centre line may be crossed when it is safe to overtake.",
                        "A solid centre line may not be crossed: no overtaking.",
                        "A painted island may not be driven on except in an emergency.",
                    ],
                ),
                section(
                    "Signs you must know cold",
                    &[
                        "Stop: come to a complete halt behind the line, every time.",
                        "Yield: slow down and give way to crossing traffic and pedestrians.",
                        "No entry: do not enter the road beyond the sign.",
                    ],
                ),
            ],
            vec![
                "Triangles warn, circles regulate, rectangles inform".into(),
                "Red circle = prohibited, blue circle = compulsory".into(),
                "Solid lines are never crossed".into(),
            ],
        )
        .expect("seed lesson is valid"),
        Lesson::new(
            VEHICLE_CONTROLS,
            "12 min",
            50,
            vec![
                section(
                    "Know your controls",
                    &[
                        "The K53 yard test expects you to identify every control before you \
                         drive: clutch (left pedal), brake (middle), accelerator (right), \
                         handbrake, indicators and light switches.",
                    ],
                ),
                section(
                    "The pull-away drill",
                    &[
                        "Clutch in, select first gear, signal, check mirrors and your blind \
                         spot, and pull away only when it is safe.",
                        "Cancel your indicator once you have joined the traffic flow.",
                    ],
                ),
                section(
                    "Warning devices",
                    &[
                        "Use hazard lights only when your stationary vehicle is an obstruction.",
                        "Use your hooter only to warn other road users of danger.",
                    ],
                ),
            ],
            vec![
                "Clutch left, brake middle, accelerator right".into(),
                "Mirrors and blind spot before every pull-away".into(),
                "Hazard lights mark a stationary obstruction".into(),
            ],
        )
        .expect("seed lesson is valid"),
    ]
}
