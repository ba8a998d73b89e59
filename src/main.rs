// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! exam-session CLI
//!
//! Drives the exam backend from a terminal. The session cookie is kept in a
//! JSON file between invocations.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context};

use exam_session::{AnswerSubmission, App, AppConfig, ExamRecord, NavigationOutcome};

/// Cookie file used when `EXAM_SESSION_COOKIES` is unset
const DEFAULT_COOKIE_FILE: &str = ".exam-session-cookies.json";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("exam_session=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("exam-session {}", exam_session::VERSION);
            ExitCode::SUCCESS
        }
        _ => match run(&args[1], &args[2..]).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ExitCode::from(1)
            }
        },
    }
}

fn print_usage() {
    println!(
        r#"exam-session - Online exam client

USAGE:
    exam-session <COMMAND> [ARGS]

COMMANDS:
    login <username> <password>         Log in and keep the session
    logout                              Forget the session
    exams                               List exams
    start <exam_id>                     Start or resume an attempt
    record <record_id>                  Show an attempt and its answers
    save <record_id> <qid=answer>...    Save answers without finishing
    finish <record_id>                  Finish and score an attempt
    result <record_id>                  Show a scored attempt
    navigate <path>                     Resolve a client route through the guard
    help                                Show this help message
    version                             Show version information

ENVIRONMENT:
    EXAM_API_BASE_URL       Backend address (default http://127.0.0.1:8000/api)
    EXAM_API_TIMEOUT_MS     Call timeout in milliseconds (default 5000)
    EXAM_SESSION_COOKIES    Cookie file (default {})
    EXAM_LOG_BODIES         Log call bodies at debug level (default off)
    RUST_LOG                Log filter (default exam_session=info)

EXAMPLES:
    exam-session login alice secret
    exam-session start 2
    exam-session save 5 3=True 4=A,B
    exam-session navigate "/result/5""#,
        DEFAULT_COOKIE_FILE
    );
}

async fn run(command: &str, args: &[String]) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("reading configuration")?;
    if config.cookie_file.is_none() {
        config.cookie_file = Some(DEFAULT_COOKIE_FILE.into());
    }
    let app = App::new(config).context("starting client")?;

    let outcome = dispatch(&app, command, args).await;

    // A 401 clears the token, so the jar is written back on failure too.
    app.save_cookies().context("saving cookies")?;

    for notice in app.shell().state().notices {
        eprintln!("[!] {}", notice);
    }

    outcome
}

async fn dispatch(app: &App, command: &str, args: &[String]) -> anyhow::Result<()> {
    match command {
        "login" => {
            let [username, password] = args else {
                bail!("Usage: exam-session login <username> <password>");
            };
            let token = app.api().login(username, password).await?;
            println!("Logged in as user {}", token.user_id);
        }
        "logout" => {
            app.api().logout();
            println!("Logged out");
        }
        "exams" => {
            let exams = app.api().list_exams().await?;
            println!("=== Exams ({}) ===", exams.len());
            for exam in &exams {
                println!(
                    "  [{}] {} ({} min, {} points)",
                    exam.id, exam.title, exam.time_limit, exam.total_score
                );
            }
        }
        "start" => {
            let exam_id = id_arg(args, "start <exam_id>")?;
            print_record(&app.api().start_exam(exam_id).await?);
        }
        "record" => {
            let record_id = id_arg(args, "record <record_id>")?;
            print_record(&app.api().exam_record(record_id).await?);
        }
        "save" => {
            let Some((record_id, answers)) = args.split_first() else {
                bail!("Usage: exam-session save <record_id> <qid=answer>...");
            };
            let record_id = record_id
                .parse()
                .with_context(|| format!("invalid record id: {}", record_id))?;
            let answers = answers
                .iter()
                .map(|a| parse_answer(a))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let saved = app.api().save_answers(record_id, &answers).await?;
            println!("{} ({} updated)", saved.message, saved.updated_count);
        }
        "finish" => {
            let record_id = id_arg(args, "finish <record_id>")?;
            print_record(&app.api().finish_exam(record_id).await?);
        }
        "result" => {
            let record_id = id_arg(args, "result <record_id>")?;
            print_record(&app.api().exam_result(record_id).await?);
        }
        "navigate" => {
            let [path] = args else {
                bail!("Usage: exam-session navigate <path>");
            };
            let navigation = app.navigate(path)?;
            match navigation.outcome {
                NavigationOutcome::Proceed(ref to) => println!("-> {}", to),
                NavigationOutcome::Redirect(ref to) => println!("-> {} (login required)", to),
            }
            println!("Title: {}", app.shell().title());
        }
        other => bail!("Unknown command: {}", other),
    }
    Ok(())
}

fn id_arg(args: &[String], usage: &str) -> anyhow::Result<u64> {
    let [id] = args else {
        bail!("Usage: exam-session {}", usage);
    };
    id.parse().with_context(|| format!("invalid id: {}", id))
}

/// `3=A,B` -> answer `A,B` to question 3
fn parse_answer(arg: &str) -> anyhow::Result<AnswerSubmission> {
    let Some((question_id, answer)) = arg.split_once('=') else {
        bail!("answers are written qid=answer, got {}", arg);
    };
    let question_id = question_id
        .trim()
        .parse()
        .with_context(|| format!("invalid question id: {}", question_id))?;
    Ok(AnswerSubmission::new(question_id, answer.trim()))
}

fn print_record(record: &ExamRecord) {
    println!("\n=== Record {} ===", record.id);
    println!("Exam: {} ({})", record.exam.title, record.exam.id);
    println!("Status: {:?}", record.status);
    println!("Started: {}", record.start_time);
    if let Some(end) = record.end_time {
        println!("Finished: {}", end);
    }
    println!("Score: {}/{}", record.score, record.exam.total_score);

    if !record.answer_records.is_empty() {
        println!("\n=== Answers ({}) ===", record.answer_records.len());
        for answer in &record.answer_records {
            println!(
                "  - question {}: {} ({})",
                answer.question.id,
                answer.user_answer,
                if answer.is_correct { "correct" } else { "wrong" }
            );
        }
    }
}
