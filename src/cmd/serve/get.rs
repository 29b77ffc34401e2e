// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::PreEscaped;
use maud::html;
use quizapp_core::export::Region;
use quizapp_core::report::Report;
use quizapp_core::report::format_time;
use quizapp_core::report::option_label;
use quizapp_core::session::Phase;
use quizapp_core::session::QuizSession;
use quizapp_core::types::timestamp::Timestamp;

use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;
use crate::db::SqliteStore;
use crate::markdown::markdown_to_html_inline;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.lock();
    let body = render_page(&mut mutable, Timestamp::now());
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_page(mutable: &mut MutableState, now: Timestamp) -> Markup {
    let notice = mutable.notice.take();
    let session = &mutable.session;
    let body = match session.phase() {
        Phase::NotStarted => render_welcome(session),
        Phase::InProgress => render_question(session, now),
        Phase::Reporting { .. } => match session.report() {
            Some(report) => render_report(&report),
            None => render_welcome(session),
        },
        Phase::Completed => render_completed(session),
        Phase::ExitedPartial => render_exited(session),
    };
    html! {
        @if let Some(notice) = notice {
            div.notice role="alert" { (notice) }
        }
        (body)
    }
}

fn render_welcome(session: &QuizSession<SqliteStore>) -> Markup {
    let total = session.bank().len();
    let seconds = session.seconds_per_question();
    html! {
        div.welcome {
            h1 { "Quiz" }
            p {
                (total) " questions, " (seconds) " seconds each. "
                "Answer at least half of them correctly to pass."
            }
            @if session.has_saved_progress() {
                form.resume method="post" {
                    p { "You have a quiz in progress." }
                    button type="submit" name="action" value="Resume" { "Resume" }
                    button type="submit" name="action" value="Discard" { "Discard" }
                }
            }
            form.start method="post" {
                label for="name" { "Name" }
                input #name type="text" name="name" autocomplete="name";
                label for="email" { "Email" }
                input #email type="email" name="email" autocomplete="email";
                button type="submit" name="action" value="Start" { "Start" }
            }
        }
    }
}

fn render_question(session: &QuizSession<SqliteStore>, now: Timestamp) -> Markup {
    let Some(question) = session.current_question() else {
        return html! {};
    };
    let index = session.current_index();
    let total = session.total_questions();
    let remaining = session.remaining_seconds(now);
    let staged = session.staged();
    html! {
        div.quiz-header {
            span.progress { "Question " (index + 1) " of " (total) }
            span #countdown.countdown data-remaining=(remaining) { (remaining) "s" }
        }
        form #quiz-form method="post" {
            @if let Some(token) = session.timer_token() {
                input type="hidden" name="token" value=(token.value());
            }
            div.question {
                (PreEscaped(markdown_to_html_inline(&question.question)))
            }
            ul.options {
                @for (idx, option) in question.options_shuffled.iter().enumerate() {
                    li {
                        label {
                            input type="radio" name="answer" value=(idx) checked[staged == Some(idx)];
                            span.option-label { (option_label(idx)) }
                            " "
                            span.option-text { (option) }
                        }
                    }
                }
            }
            div.controls {
                button type="submit" name="action" value="Previous" disabled[!session.can_go_back()] {
                    "Previous"
                }
                button #next type="submit" name="action" value="Next" disabled[!session.can_advance()] {
                    "Next"
                }
            }
            div.secondary-controls {
                button type="submit" name="action" value="Report" { "Report" }
                button type="submit" name="action" value="Clear" { "Clear Saved Progress" }
                button type="submit" name="action" value="Exit" { "Exit" }
            }
        }
    }
}

fn render_completed(session: &QuizSession<SqliteStore>) -> Markup {
    let Some(report) = session.report() else {
        return render_welcome(session);
    };
    let name = session.user().map(|u| u.name.as_str()).unwrap_or_default();
    let verdict_class = if report.passed { "passed" } else { "failed" };
    html! {
        div.final-result id=(Region::FinalResult.element_id()) {
            h1 { "Quiz Completed" }
            p.user { (name) }
            p.score { "Score: " (report.score_text()) }
            p.verdict.(verdict_class) { (report.verdict()) }
        }
        form.controls method="post" {
            button type="submit" name="action" value="Report" { "View Report" }
            button type="submit" name="action" value="Home" { "Home" }
        }
    }
}

fn render_exited(session: &QuizSession<SqliteStore>) -> Markup {
    let summary = session
        .exit_summary()
        .map(|s| s.to_string())
        .unwrap_or_default();
    html! {
        div.exited {
            h1 { "Quiz Exited" }
            p.score { "Score: " (summary) }
            p { "Your progress has been saved." }
        }
        form.controls method="post" {
            button type="submit" name="action" value="Resume" { "Resume" }
            button type="submit" name="action" value="Home" { "Home" }
        }
    }
}

fn render_report(report: &Report) -> Markup {
    html! {
        div.report id=(Region::Report.element_id()) {
            h1 { "Quiz Report" }
            table.summary {
                tbody {
                    tr { th { "Score" } td { (report.score_text()) } }
                    tr { th { "Correct" } td { (report.percentage_correct) "%" } }
                    tr {
                        th { "Average Time" }
                        td { (format_time(u64::from(report.average_time_seconds))) }
                    }
                    tr { th { "Total Time" } td { (format_time(report.total_time_seconds)) } }
                    tr { th { "Result" } td { (report.verdict()) } }
                }
            }
            @for review in &report.reviews {
                @let status = if !review.answered {
                    "unanswered"
                } else if review.is_correct {
                    "correct"
                } else {
                    "incorrect"
                };
                div.review.(status) {
                    h2 {
                        (review.number) ". "
                        (PreEscaped(markdown_to_html_inline(&review.question)))
                    }
                    @if !review.answered {
                        p.not-answered { "Not answered" }
                    }
                    ul.options {
                        @for option in &review.options {
                            li.correct-answer[option.is_correct_answer].wrong-selection[option.is_wrong_selection] {
                                span.option-label { (option.label) }
                                " "
                                span.option-text { (option.text) }
                            }
                        }
                    }
                }
            }
        }
        form.controls method="post" {
            button type="submit" name="action" value="CloseReport" { "Back" }
            button type="submit" name="action" value="Home" { "Home" }
        }
    }
}
