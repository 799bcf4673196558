use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::ScorePolicy;
use quiz_core::model::TopicSummary;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Exam sizes offered by the picker. Any positive count works downstream;
/// these are the two sizes the scoring table is written for.
const QUESTION_COUNTS: [usize; 2] = [20, 25];

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();

    let mut selected_topic = use_signal(String::new);
    let mut question_count = use_signal(|| None::<usize>);

    let quiz = ctx.quiz();
    let topics_resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            quiz.topics()
                .await
                .map_err(|_| ViewError::BanksUnavailable)
        }
    });
    let state = view_state_from_resource(&topics_resource);

    let topic = selected_topic();
    let count = question_count();

    let body = match state {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading topics..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "landing-error", "{err.message()}" }
        },
        ViewState::Ready(topics) => {
            let summary: Option<TopicSummary> = topics
                .iter()
                .find(|summary| summary.topic_id.as_str() == topic)
                .cloned();
            rsx! {
                if let Some(summary) = summary.as_ref() {
                    h2 { "{summary.title}" }
                } else {
                    h2 { "Pick a topic to see its description" }
                }

                div { class: "theme-selector",
                    label { r#for: "topic-select", "Pick a topic:" }
                    select {
                        id: "topic-select",
                        class: "theme-dropdown",
                        value: "{topic}",
                        onchange: move |evt| selected_topic.set(evt.value()),
                        option { value: "", disabled: true, hidden: true, "Pick a topic" }
                        for item in topics.iter() {
                            option { value: "{item.topic_id}", "{item.title}" }
                        }
                    }
                }

                if let Some(summary) = summary.as_ref() {
                    p { class: "theme-label",
                        "Questions available: {summary.question_count}"
                    }

                    div { class: "question-count-selector",
                        label { r#for: "count-select", "Pick the number of questions:" }
                        select {
                            id: "count-select",
                            class: "question-count-dropdown",
                            onchange: move |evt| question_count.set(evt.value().parse().ok()),
                            option {
                                value: "",
                                disabled: true,
                                hidden: true,
                                selected: count.is_none(),
                                "Pick a size"
                            }
                            for size in QUESTION_COUNTS {
                                option {
                                    value: "{size}",
                                    selected: count == Some(size),
                                    "{size} questions"
                                }
                            }
                        }
                    }
                }

                if let Some(count) = count {
                    Instructions { count }
                }

                StartButton { topic: topic.clone(), count }
            }
        }
    };

    rsx! {
        div { class: "landing-page",
            h1 { "Self-Assessment Quizzes" }
            {body}
        }
    }
}

#[component]
fn Instructions(count: usize) -> Element {
    let policy = ScorePolicy::for_question_count(count);
    rsx! {
        div { class: "instructions",
            h2 { "Instructions" }
            ul {
                li { "{count} questions per exam" }
                li { "Unlimited time" }
                li { "+{policy.reward():.2} points per correct answer" }
                li { "-{policy.penalty():.2} points per incorrect answer" }
                li { "Pass mark: 5 points" }
            }
        }
    }
}

#[component]
fn StartButton(topic: String, count: Option<usize>) -> Element {
    let navigator = use_navigator();
    let ready = !topic.is_empty() && count.is_some();
    rsx! {
        button {
            class: "button start-button",
            disabled: !ready,
            onclick: move |_| {
                if let Some(count) = count {
                    let _ = navigator.push(Route::Quiz {
                        topic: topic.clone(),
                        count,
                    });
                }
            },
            "Start exam"
        }
    }
}
