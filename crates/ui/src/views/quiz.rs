use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{SessionPhase, TopicId};
use services::QuizEngine;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    QuizIntent, option_letter, page_label, progress_label, progress_percent, score_label,
    timer_label,
};

#[component]
pub fn QuizView(topic: String, count: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz = ctx.quiz();

    let engine = use_signal(QuizEngine::new);
    let ticker = use_signal(|| None::<Task>);

    // Build the session for the routed topic/count. The engine hands out an
    // epoch ticket, so a build finishing after the learner moved on is
    // discarded by `install` instead of clobbering the newer state.
    let quiz_for_resource = quiz.clone();
    let topic_for_resource = topic.clone();
    let resource = use_resource(move || {
        let quiz = quiz_for_resource.clone();
        let topic = topic_for_resource.clone();
        let mut engine = engine;
        async move {
            let topic_id: TopicId = topic.parse().map_err(|_| ViewError::Unknown)?;
            let ticket = engine
                .write()
                .begin_loading(topic_id.clone(), count)
                .map_err(|_| ViewError::Unknown)?;
            let built = quiz
                .build_session(topic_id, count)
                .await
                .map_err(|_| ViewError::Unknown)?;
            engine.write().install(ticket, built);
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    // The one-second ticker is an explicit cancellable task: spawned when the
    // session timer starts running, cancelled when it stops and on unmount.
    use_effect(move || {
        let mut engine = engine;
        let mut ticker = ticker;
        let running = engine
            .read()
            .session()
            .is_some_and(|session| session.is_timer_running());
        if running {
            if ticker.peek().is_none() {
                let task = spawn(async move {
                    loop {
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        engine.write().tick();
                    }
                });
                ticker.set(Some(task));
            }
        } else if let Some(task) = ticker.write().take() {
            task.cancel();
        }
    });

    use_drop(move || {
        let mut ticker = ticker;
        if let Some(task) = ticker.write().take() {
            task.cancel();
        }
    });

    let dispatch = {
        let quiz = quiz.clone();
        use_callback(move |intent: QuizIntent| {
            let mut engine = engine;
            match intent {
                QuizIntent::SelectAnswer { index, option } => {
                    let _ = engine.write().select_answer(index, &option);
                }
                QuizIntent::Validate => {
                    let _ = engine.write().validate();
                }
                QuizIntent::NextPage => {
                    if engine.write().next_page() {
                        scroll_to_page_top();
                    }
                }
                QuizIntent::PrevPage => {
                    if engine.write().prev_page() {
                        scroll_to_page_top();
                    }
                }
                QuizIntent::GotoQuestion(index) => {
                    if engine.write().goto_question(index) {
                        scroll_to_question(index);
                    }
                }
                QuizIntent::Reset => {
                    let quiz = quiz.clone();
                    spawn(async move {
                        let pending = {
                            let guard = engine.read();
                            guard.topic_id().cloned().zip(guard.requested())
                        };
                        let Some((topic_id, requested)) = pending else {
                            return;
                        };
                        let Ok(ticket) =
                            engine.write().begin_loading(topic_id.clone(), requested)
                        else {
                            return;
                        };
                        match quiz.reset_session(topic_id, requested).await {
                            Ok(built) => {
                                engine.write().install(ticket, built);
                            }
                            Err(_) => {
                                engine.write().return_to_landing();
                                let _ = navigator.push(Route::Landing {});
                            }
                        }
                    });
                }
                QuizIntent::ReturnToLanding => {
                    engine.write().return_to_landing();
                    let _ = navigator.push(Route::Landing {});
                }
            }
        })
    };

    let phase = engine.read().phase();

    let body = if let ViewState::Error(err) = state {
        rsx! {
            div { class: "header",
                h2 { "{err.message()}" }
                button {
                    class: "button button-secondary",
                    onclick: move |_| dispatch.call(QuizIntent::ReturnToLanding),
                    "Back to start"
                }
            }
        }
    } else {
        match phase {
            SessionPhase::Landing | SessionPhase::Loading => rsx! {
                div { class: "header",
                    h2 { "Loading questions..." }
                }
            },
            SessionPhase::Exhausted => rsx! {
                ExhaustedNotice { engine, on_intent: dispatch }
            },
            SessionPhase::Active | SessionPhase::Results => rsx! {
                div { class: "container",
                    div { class: "main-content",
                        QuizHeader { engine, on_intent: dispatch }
                        Pagination { engine, on_intent: dispatch }
                        if phase == SessionPhase::Results {
                            ResultsPanel { engine, on_intent: dispatch }
                        } else {
                            ActiveQuestions { engine, on_intent: dispatch }
                            Pagination { engine, on_intent: dispatch }
                        }
                    }
                    AnswerGrid { engine, on_intent: dispatch }
                }
            },
        }
    };

    rsx! {
        div { class: "page quiz-page", {body} }
    }
}

#[component]
fn QuizHeader(engine: Signal<QuizEngine>, on_intent: EventHandler<QuizIntent>) -> Element {
    let guard = engine.read();
    let title = guard.title().unwrap_or_default().to_string();
    let requested = guard.requested().unwrap_or_default();
    let timer = timer_label(&guard);
    let progress = progress_percent(&guard);
    let progress_text = progress_label(&guard);
    drop(guard);

    rsx! {
        div { class: "header",
            div { class: "header__heading",
                h1 { "{title}" }
                h2 { "Questions in this exam: {requested}" }
            }
            div { class: "timer", "{timer}" }
            div { class: "progress-container",
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {progress}%;" }
                }
                span { "{progress_text}" }
            }
            button {
                class: "button",
                onclick: move |_| on_intent.call(QuizIntent::Reset),
                "Restart"
            }
            button {
                class: "button button-secondary",
                onclick: move |_| on_intent.call(QuizIntent::ReturnToLanding),
                "Back to start"
            }
        }
    }
}

#[component]
fn ActiveQuestions(engine: Signal<QuizEngine>, on_intent: EventHandler<QuizIntent>) -> Element {
    let guard = engine.read();
    let Some(session) = guard.session() else {
        return rsx! {};
    };
    let offset = session.page_offset();
    let count = session.page_questions().len();
    drop(guard);

    rsx! {
        div { class: "question-list",
            for index in offset..offset + count {
                QuestionCard { engine, index, on_intent }
            }
        }
    }
}

#[component]
fn ResultsPanel(engine: Signal<QuizEngine>, on_intent: EventHandler<QuizIntent>) -> Element {
    let guard = engine.read();
    let Some(session) = guard.session() else {
        return rsx! {};
    };
    let total = session.total_questions();
    let score = score_label(&guard);
    drop(guard);

    rsx! {
        div { class: "results",
            h2 { class: "results__score", "{score}" }
            for index in 0..total {
                QuestionCard { engine, index, on_intent }
            }
        }
    }
}

#[component]
fn QuestionCard(
    engine: Signal<QuizEngine>,
    index: usize,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let guard = engine.read();
    let Some(session) = guard.session() else {
        return rsx! {};
    };
    let Some(question) = session.questions().get(index) else {
        return rsx! {};
    };

    let prompt = question.prompt().to_string();
    let options = question.options().to_vec();
    let answer = question.answer().to_string();
    let selected = session.selected_option(index).map(ToString::to_string);
    let show_results = session.is_validated();
    drop(guard);

    rsx! {
        div { id: "question-{index}", class: "question",
            h3 { "Question {index + 1}: {prompt}" }
            div { class: "options-container",
                for (position, option) in options.into_iter().enumerate() {
                    OptionRow {
                        question_index: index,
                        position,
                        selected: selected.as_deref() == Some(option.as_str()),
                        is_answer: option == answer,
                        show_results,
                        text: option,
                        on_intent,
                    }
                }
            }
        }
    }
}

#[component]
fn OptionRow(
    question_index: usize,
    position: usize,
    text: String,
    selected: bool,
    is_answer: bool,
    show_results: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let verdict = if show_results {
        if is_answer {
            " correct"
        } else if selected {
            " incorrect"
        } else {
            ""
        }
    } else {
        ""
    };
    let letter = option_letter(position);
    let option_for_click = text.clone();

    rsx! {
        div {
            class: "option-container{verdict}",
            onclick: move |_| {
                if !show_results {
                    on_intent.call(QuizIntent::SelectAnswer {
                        index: question_index,
                        option: option_for_click.clone(),
                    });
                }
            },
            label { class: "option-label",
                input {
                    r#type: "radio",
                    name: "question-{question_index}",
                    checked: selected,
                    readonly: show_results,
                }
                strong { "{letter}" }
                " {text}"
            }
        }
    }
}

#[component]
fn Pagination(engine: Signal<QuizEngine>, on_intent: EventHandler<QuizIntent>) -> Element {
    let guard = engine.read();
    let Some(session) = guard.session() else {
        return rsx! {};
    };
    let page = session.pager().page();
    let total = session.pager().total_pages();
    let label = page_label(&guard);
    drop(guard);

    rsx! {
        div { class: "pagination",
            button {
                class: "button button-auto",
                disabled: page == 0,
                onclick: move |_| on_intent.call(QuizIntent::PrevPage),
                "Previous"
            }
            span { "{label}" }
            button {
                class: "button button-auto",
                disabled: total == 0 || page + 1 == total,
                onclick: move |_| on_intent.call(QuizIntent::NextPage),
                "Next"
            }
        }
    }
}

#[component]
fn AnswerGrid(engine: Signal<QuizEngine>, on_intent: EventHandler<QuizIntent>) -> Element {
    let guard = engine.read();
    let Some(session) = guard.session() else {
        return rsx! {};
    };
    let statuses: Vec<&'static str> = (0..session.total_questions())
        .map(|index| session.question_status(index).as_str())
        .collect();
    let show_validate = !session.is_validated();
    drop(guard);

    rsx! {
        aside { class: "sidebar",
            h1 { class: "sidebar-title", "Answers" }
            div { class: "question-grid",
                for (index, status) in statuses.into_iter().enumerate() {
                    GridCell { index, status, on_intent }
                }
            }
            if show_validate {
                button {
                    class: "button btn-validate",
                    onclick: move |_| on_intent.call(QuizIntent::Validate),
                    "Validate answers"
                }
            }
        }
    }
}

#[component]
fn GridCell(
    index: usize,
    status: &'static str,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div {
            class: "question-number {status}",
            onclick: move |_| on_intent.call(QuizIntent::GotoQuestion(index)),
            "{index + 1}"
        }
    }
}

#[component]
fn ExhaustedNotice(engine: Signal<QuizEngine>, on_intent: EventHandler<QuizIntent>) -> Element {
    let title = engine.read().title().unwrap_or_default().to_string();

    rsx! {
        div { class: "header exhausted",
            h2 { "You have completed every question in this unit!" }
            if !title.is_empty() {
                p { "{title}" }
            }
            button {
                class: "button",
                onclick: move |_| on_intent.call(QuizIntent::Reset),
                "Restart quiz"
            }
            button {
                class: "button button-secondary",
                onclick: move |_| on_intent.call(QuizIntent::ReturnToLanding),
                "Back to start"
            }
        }
    }
}

fn scroll_to_question(index: usize) {
    let js = format!(
        "document.getElementById('question-{index}')?.scrollIntoView({{ behavior: 'smooth', block: 'start' }});"
    );
    let _ = eval(&js);
}

fn scroll_to_page_top() {
    let _ = eval(
        "document.querySelector('.main-content')?.scrollIntoView({ behavior: 'smooth', block: 'start' });",
    );
}
