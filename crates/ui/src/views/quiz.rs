use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Navigator, use_navigator};

use k53_core::model::{SessionMode, TestReport};
use k53_core::session::{AUTO_ADVANCE_DELAY_MS, Phase, Transition};

use crate::context::{AppContext, ReportHandoff};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizVm, format_countdown, mode_title, start_quiz};

/// Take the vm out of its signal, apply one intent, and put it back.
///
/// The value leaves the signal for the duration of the call so no borrow is
/// held across the await (an answer submit re-reads the sound preference).
async fn apply_intent(
    vm: Signal<Option<QuizVm>>,
    quiz_loop: &services::QuizLoopService,
    intent: QuizIntent,
) -> Option<Transition> {
    let mut vm = vm;
    let mut local_vm = {
        let mut guard = vm.write();
        guard.take()
    }?;
    let transition = local_vm.apply(quiz_loop, intent).await;
    {
        let mut guard = vm.write();
        *guard = Some(local_vm);
    }
    Some(transition)
}

fn hand_off_and_show_results(handoff: &ReportHandoff, nav: Navigator, report: TestReport) {
    handoff.publish(report);
    let _ = nav.push(Route::Results {});
}

#[component]
pub fn QuizView(mode: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let handoff = ctx.report_handoff();
    let parsed_mode = mode.parse::<SessionMode>().ok();

    let vm = use_signal(|| None::<QuizVm>);
    let mut timer_started = use_signal(|| false);
    // bumped per started session so stale scheduled work can tell it is stale
    let mut session_epoch = use_signal(|| 0_u32);

    let quiz_loop_for_resource = quiz_loop.clone();
    let handoff_for_resource = handoff.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let handoff = handoff_for_resource.clone();
        let mut vm = vm;
        let mut timer_started = timer_started;
        let mut session_epoch = session_epoch;

        async move {
            let Some(mode) = parsed_mode else {
                return Err(ViewError::NotFound);
            };
            // a fresh session invalidates any earlier hand-off
            handoff.clear();
            timer_started.set(false);
            let started = start_quiz(&quiz_loop, mode).await?;
            vm.set(Some(started));
            let next_epoch = *session_epoch.peek() + 1;
            session_epoch.set(next_epoch);
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(&resource);

    // Applies an intent; a completion routes to the results screen, a reveal
    // schedules the auto-advance.
    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        let handoff = handoff.clone();
        use_callback(move |intent: QuizIntent| {
            let quiz_loop = quiz_loop.clone();
            let handoff = handoff.clone();
            let nav = navigator;

            spawn(async move {
                let Some(transition) = apply_intent(vm, &quiz_loop, intent).await else {
                    return;
                };
                match transition {
                    Transition::Finished(report) => {
                        hand_off_and_show_results(&handoff, nav, report);
                    }
                    Transition::Revealed { token, .. } => {
                        // close the reveal after a short delay; the machine
                        // drops the token if anything else happened meanwhile
                        let my_epoch = *session_epoch.peek();
                        tokio::time::sleep(Duration::from_millis(AUTO_ADVANCE_DELAY_MS)).await;
                        if *session_epoch.peek() != my_epoch {
                            return;
                        }
                        let followup =
                            apply_intent(vm, &quiz_loop, QuizIntent::AutoAdvance(token)).await;
                        if let Some(Transition::Finished(report)) = followup {
                            hand_off_and_show_results(&handoff, nav, report);
                        }
                    }
                    _ => {}
                }
            });
        })
    };

    // One countdown task per timed session. Dropping the view cancels the
    // task; after completion tick() reports `Ignored`, which also stops it.
    use_effect(move || {
        let is_timed = vm.read().as_ref().is_some_and(|vm| vm.mode().is_timed());
        if !is_timed || timer_started() {
            return;
        }
        timer_started.set(true);

        let quiz_loop = quiz_loop.clone();
        let handoff = handoff.clone();
        let nav = navigator;
        let my_epoch = *session_epoch.peek();
        spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.tick().await; // the first tick resolves immediately
            loop {
                interval.tick().await;
                if *session_epoch.peek() != my_epoch {
                    break;
                }
                let Some(transition) = apply_intent(vm, &quiz_loop, QuizIntent::Tick).await else {
                    break;
                };
                match transition {
                    Transition::Finished(report) => {
                        hand_off_and_show_results(&handoff, nav, report);
                        break;
                    }
                    Transition::Ignored => break,
                    _ => {}
                }
            }
        });
    });

    let vm_guard = vm.read();
    let title = vm_guard
        .as_ref()
        .map_or_else(|| "Practice".to_string(), |vm| mode_title(vm.mode()).to_string());

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-header",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Back to Dashboard"
                }
                h2 { class: "quiz-title", "{title}" }
                if let Some(vm) = vm_guard.as_ref() {
                    span { class: "quiz-progress-label",
                        "Question {vm.position() + 1} of {vm.total()}"
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    div { class: "quiz-loading",
                        div { class: "spinner" }
                        p { class: "muted", "Loading questions..." }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err == ViewError::EmptySession {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Practice {});
                            },
                            "Back to Practice"
                        }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if vm_guard.as_ref().is_some() {
                        QuizBody { vm, on_intent: dispatch_intent }
                    } else {
                        p { "No questions available." }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizBody(vm: Signal<Option<QuizVm>>, on_intent: EventHandler<QuizIntent>) -> Element {
    let vm_guard = vm.read();
    let Some(vm) = vm_guard.as_ref() else {
        return rsx! {};
    };
    let answered: Vec<bool> = (0..vm.total()).map(|i| vm.answer_at(i).is_some()).collect();

    rsx! {
        if vm.mode().is_timed() {
            TimerBar {
                remaining: vm.remaining_secs().unwrap_or(0),
                total: vm.timer_total_secs().unwrap_or(1),
            }
        }
        NavigatorGrid {
            total: vm.total(),
            current: vm.position(),
            answered,
            answered_count: vm.answered_count(),
            progress: vm.progress_percent(),
            on_intent,
        }
        QuestionCard {
            prompt: vm.question().prompt().to_string(),
            image: vm.question().image().map(|image| image.as_str().to_string()),
            options: vm.question().options().to_vec(),
            correct_option: vm.question().correct_option(),
            explanation: vm.question().explanation().to_string(),
            selected: vm.selected(),
            revealed: vm.is_revealed(),
            on_intent,
        }
        QuizControls {
            at_first: vm.position() == 0,
            at_last: vm.position() + 1 == vm.total(),
            revealed: vm.is_revealed(),
            unanswered_here: vm.selected().is_none(),
            on_intent,
        }
        if vm.phase() == Phase::ConfirmFinish {
            ConfirmFinishDialog {
                unanswered: vm.unanswered_count(),
                on_intent,
            }
        }
    }
}

#[component]
fn TimerBar(remaining: u32, total: u32) -> Element {
    let percent = u64::from(remaining) * 100 / u64::from(total.max(1));
    let band_class = if percent > 70 {
        "timer-fill timer-fill--comfortable"
    } else if percent > 30 {
        "timer-fill timer-fill--steady"
    } else {
        "timer-fill timer-fill--critical"
    };
    let label = format_countdown(remaining);
    rsx! {
        div { class: "quiz-timer",
            div { class: "quiz-timer__row",
                span { class: "quiz-timer__caption", "Time Remaining" }
                span {
                    class: if percent <= 30 { "quiz-timer__value quiz-timer__value--critical" } else { "quiz-timer__value" },
                    "{label}"
                }
            }
            div { class: "timer-track",
                div { class: "{band_class}", style: "width: {percent}%" }
            }
        }
    }
}

#[component]
fn NavigatorGrid(
    total: usize,
    current: usize,
    answered: Vec<bool>,
    answered_count: usize,
    progress: u32,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "quiz-navigator",
            div { class: "quiz-navigator__row",
                span { class: "quiz-navigator__caption", "Questions" }
                span { class: "muted", "{answered_count} of {total} answered" }
            }
            div { class: "quiz-navigator__grid",
                for index in 0..total {
                    button {
                        key: "{index}",
                        class: if index == current {
                            "nav-cell nav-cell--current"
                        } else if answered[index] {
                            "nav-cell nav-cell--answered"
                        } else {
                            "nav-cell"
                        },
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Jump(index)),
                        "{index + 1}"
                    }
                }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {progress}%" }
            }
        }
    }
}

#[component]
#[allow(clippy::too_many_arguments)]
fn QuestionCard(
    prompt: String,
    image: Option<String>,
    options: Vec<String>,
    correct_option: usize,
    explanation: String,
    selected: Option<usize>,
    revealed: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "card question-card",
            h3 { class: "question-card__prompt", "{prompt}" }
            if let Some(image) = image.as_ref() {
                img { class: "question-card__image", src: "{image}" }
            }
            div { class: "question-card__options",
                for (index, option) in options.iter().enumerate() {
                    button {
                        key: "{index}",
                        class: option_class(index, selected, revealed, correct_option),
                        r#type: "button",
                        disabled: revealed,
                        onclick: move |_| on_intent.call(QuizIntent::Select(index)),
                        span { "{option}" }
                        if revealed && index == correct_option {
                            span { class: "option-mark option-mark--correct", "✓" }
                        }
                        if revealed && selected == Some(index) && index != correct_option {
                            span { class: "option-mark option-mark--incorrect", "✕" }
                        }
                    }
                }
            }
            if revealed {
                div { class: "question-card__explanation",
                    h4 { "Explanation" }
                    p { class: "muted", "{explanation}" }
                }
            }
        }
    }
}

fn option_class(
    index: usize,
    selected: Option<usize>,
    revealed: bool,
    correct_option: usize,
) -> &'static str {
    if revealed {
        if index == correct_option {
            "option option--correct"
        } else if selected == Some(index) {
            "option option--incorrect"
        } else {
            "option"
        }
    } else if selected == Some(index) {
        "option option--selected"
    } else {
        "option"
    }
}

#[component]
fn QuizControls(
    at_first: bool,
    at_last: bool,
    revealed: bool,
    unanswered_here: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "quiz-controls",
            button {
                class: "btn btn-secondary",
                id: "quiz-previous",
                r#type: "button",
                disabled: at_first,
                onclick: move |_| on_intent.call(QuizIntent::Previous),
                "Previous"
            }
            div { class: "quiz-controls__right",
                if !revealed && unanswered_here && !at_last {
                    button {
                        class: "btn btn-secondary",
                        id: "quiz-skip",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Skip),
                        "Skip"
                    }
                }
                if revealed {
                    button {
                        class: "btn btn-primary",
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Next),
                        if at_last { "Finish" } else { "Next Question" }
                    }
                } else {
                    button {
                        class: "btn btn-ghost",
                        id: "quiz-finish",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Finish),
                        "Finish Test"
                    }
                }
            }
        }
    }
}

#[component]
fn ConfirmFinishDialog(unanswered: usize, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "modal-overlay",
            div {
                class: "modal",
                role: "dialog",
                aria_modal: "true",
                h3 { class: "modal__title", "Unanswered Questions" }
                p { class: "modal__body",
                    "You have {unanswered} unanswered question(s). "
                    "Are you sure you want to finish the test?"
                }
                div { class: "modal__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::CancelFinish),
                        "Review Questions"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::ConfirmFinish),
                        "Finish Test"
                    }
                }
            }
        }
    }
}
