//! Line-oriented shell driving the list controller.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Input::Command   ┌──────────────────────┐
//! │ stdin thread │ ─────────────────→ │                      │
//! └──────────────┘                    │  main loop           │
//! ┌──────────────┐   Input::Worker    │  - ListController    │
//! │ worker thread│ ─────────────────→ │  - FavoriteSet       │
//! │ (catalog I/O)│ ←───────────────── │  - recv_timeout until│
//! └──────────────┘   WorkerMessage    │    next debounce wake│
//!                                     └──────────────────────┘
//! ```
//!
//! Both producers feed one channel, so the controller only ever runs on the main
//! thread. While a delete confirmation is waiting for `y`/`n`, worker responses are
//! buffered and replayed afterwards in arrival order.
//!
//! # Commands
//!
//! - `title <text>`: set the title query (`title` alone clears it)
//! - `category <name|all>`: set the category filter
//! - `fav <id>`: toggle favorite
//! - `del <id>`: delete after confirmation
//! - `reload`: fetch the whole collection
//! - `detail <id>`: open a single report
//! - `favorites`: open the favorites page
//! - `unfav <id>`: remove a favorite
//! - `clear-favorites`: remove every favorite after confirmation
//! - `login` / `logout`: switch the authentication state
//! - `show`: back to the list
//! - `quit`

#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDate;
use ecoreport::app::{handle_event, Action, ConfirmGate, Context, Event, FavoriteSet, ListController};
use ecoreport::domain::{Category, Coordinates, Creator, Report, ReportId, Result};
use ecoreport::infrastructure::{get_config_path, get_data_dir};
use ecoreport::ui::{
    compute_detail_viewmodel, compute_favorites_viewmodel, compute_viewmodel, render_detail, render_favorites,
    render_list,
};
use ecoreport::worker::{decode_response, spawn_worker, CatalogWorker, WorkerHandle};
use ecoreport::{initialize, observability, CatalogError, Config};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Instant;

/// Everything the main loop can wake up for.
enum Input {
    Command(String),
    Worker(String),
    Tick,
    Closed,
}

/// Reads the answer to a confirmation prompt from the shared input channel.
///
/// Worker responses arriving meanwhile go to `backlog`.
struct PromptConfirm<'a> {
    rx: &'a Receiver<Input>,
    backlog: &'a mut VecDeque<String>,
}

impl ConfirmGate for PromptConfirm<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();

        loop {
            match self.rx.recv() {
                Ok(Input::Command(answer)) => {
                    let answer = answer.trim().to_lowercase();
                    return answer == "y" || answer == "yes";
                }
                Ok(Input::Worker(payload)) => self.backlog.push_back(payload),
                Ok(Input::Tick) => {}
                Ok(Input::Closed) | Err(_) => return false,
            }
        }
    }
}

/// Screen redrawn after each state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    List,
    Favorites,
    Detail,
}

struct Shell {
    view: View,
    controller: ListController,
    favorites: FavoriteSet,
    signed_in: bool,
    worker: WorkerHandle,
    rx: Receiver<Input>,
    backlog: VecDeque<String>,
}

impl Shell {
    fn next_input(&mut self) -> Input {
        if let Some(payload) = self.backlog.pop_front() {
            return Input::Worker(payload);
        }

        match self.controller.next_wake() {
            Some(deadline) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                match self.rx.recv_timeout(timeout) {
                    Ok(input) => input,
                    Err(RecvTimeoutError::Timeout) => Input::Tick,
                    Err(RecvTimeoutError::Disconnected) => Input::Closed,
                }
            }
            None => self.rx.recv().unwrap_or(Input::Closed),
        }
    }

    /// Feeds one event to the controller and executes the resulting actions.
    fn dispatch(&mut self, event: Event) {
        let mut confirm = PromptConfirm {
            rx: &self.rx,
            backlog: &mut self.backlog,
        };
        let mut ctx = Context {
            now: Instant::now(),
            favorites: &mut self.favorites,
            auth: &self.signed_in,
            confirm: &mut confirm,
        };

        match handle_event(&mut self.controller, &mut ctx, event) {
            Ok((should_render, actions)) => {
                self.execute(actions);
                if should_render {
                    self.show();
                }
            }
            Err(e) => println!("! {e}"),
        }
    }

    fn execute(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::PostToWorker(message) => {
                    if let Err(e) = self.worker.post(&message) {
                        // settle whatever the controller marked pending for this request
                        tracing::error!(error = %e, operation = message.operation(), "failed to post to worker");
                        self.dispatch(Event::WorkerResponse(message.failure_response(e.to_string())));
                    }
                }
                Action::WakeAt(deadline) => {
                    tracing::trace!(?deadline, "wakeup scheduled");
                }
                Action::Alert(notice) => println!("! {notice}"),
                Action::RedirectToLogin => println!("Sign in to manage favorites (type `login`)."),
            }
        }
    }

    fn show(&self) {
        let text = match self.view {
            View::List => render_list(&compute_viewmodel(&self.controller, &self.favorites)),
            View::Favorites => {
                render_favorites(&compute_favorites_viewmodel(&self.controller, self.favorites.iter()))
            }
            View::Detail => compute_detail_viewmodel(&self.controller, &self.favorites)
                .map_or_else(String::new, |vm| render_detail(&vm)),
        };
        print!("{text}");
    }

    fn switch_to(&mut self, view: View) {
        if self.view == View::Detail && view != View::Detail {
            self.controller.close_detail();
        }
        self.view = view;
    }

    /// Returns `false` when the shell should exit.
    fn on_command(&mut self, line: &str) -> bool {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').map_or((line, ""), |(c, a)| (c, a.trim()));

        match command {
            "" => {}
            "quit" | "exit" => return false,
            "help" => println!(
                "commands: title, category, fav, del, reload, detail, favorites, unfav, clear-favorites, login, logout, show, quit"
            ),
            "title" => {
                self.switch_to(View::List);
                self.dispatch(Event::TitleChanged(arg.to_string()));
            }
            "category" => match parse_category(arg) {
                Ok(category) => {
                    self.switch_to(View::List);
                    self.dispatch(Event::CategoryChanged(category));
                }
                Err(e) => println!("! {e}"),
            },
            "fav" => match parse_id(arg) {
                Ok(id) => self.dispatch(Event::ToggleFavorite(id)),
                Err(e) => println!("! {e}"),
            },
            "del" => match parse_id(arg) {
                Ok(id) => self.dispatch(Event::Delete(id)),
                Err(e) => println!("! {e}"),
            },
            "unfav" => match parse_id(arg) {
                Ok(id) => self.dispatch(Event::RemoveFavorite(id)),
                Err(e) => println!("! {e}"),
            },
            "clear-favorites" => self.dispatch(Event::ClearFavorites),
            "detail" => match parse_id(arg) {
                Ok(id) => {
                    self.switch_to(View::Detail);
                    self.dispatch(Event::OpenDetail(id));
                }
                Err(e) => println!("! {e}"),
            },
            "reload" => {
                self.switch_to(View::List);
                self.dispatch(Event::Reload);
            }
            "login" => {
                self.signed_in = true;
                println!("Signed in.");
                self.dispatch(Event::SignedIn);
            }
            "logout" => {
                self.signed_in = false;
                self.favorites.clear();
                println!("Signed out.");
            }
            "favorites" => {
                self.switch_to(View::Favorites);
                self.show();
            }
            "show" => {
                self.switch_to(View::List);
                self.show();
            }
            other => println!("! unknown command `{other}` (try `help`)"),
        }
        true
    }

    fn run(mut self) {
        self.dispatch(Event::Reload);

        loop {
            match self.next_input() {
                Input::Command(line) => {
                    if !self.on_command(&line) {
                        break;
                    }
                }
                Input::Worker(payload) => match decode_response(&payload) {
                    Ok(response) => self.dispatch(Event::WorkerResponse(response)),
                    Err(e) => tracing::error!(error = %e, "dropping worker payload"),
                },
                Input::Tick => self.dispatch(Event::Tick),
                Input::Closed => break,
            }
        }

        tracing::info!("shell exiting");
        self.worker.shutdown();
    }
}

fn parse_id(arg: &str) -> Result<ReportId> {
    arg.parse()
        .map_err(|_| CatalogError::Config(format!("expected a report id, got `{arg}`")))
}

fn parse_category(arg: &str) -> Result<Option<Category>> {
    if arg.is_empty() || arg.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    arg.parse().map(Some)
}

fn sample_reports() -> Vec<Report> {
    let entries = [
        (1, "Sacs plastiques sur la plage", Category::Plastic, (2024, 5, 3), "Marseille", 43.27, 5.36),
        (2, "Fumée noire au-dessus de l'usine", Category::Air, (2024, 5, 11), "Lyon", 45.73, 4.82),
        (3, "Bidons de solvant abandonnés", Category::Chemical, (2024, 6, 2), "Rouen", 49.44, 1.10),
        (4, "Gravats en lisière de forêt", Category::IllegalDumping, (2024, 6, 18), "Fontainebleau", 48.40, 2.70),
        (5, "Mousse suspecte sur la rivière", Category::Water, (2024, 7, 1), "Toulouse", 43.60, 1.44),
        (6, "Pneus dans le fossé", Category::Other, (2024, 7, 9), "Nantes", 47.22, -1.55),
    ];

    entries
        .into_iter()
        .filter_map(|(id, title, category, (y, m, d), location, latitude, longitude)| {
            let mut report = Report::new(id, title, category, NaiveDate::from_ymd_opt(y, m, d)?);
            report.location = location.to_string();
            report.coordinates = Coordinates { latitude, longitude };
            report.creator = Creator {
                id: "demo".to_string(),
                first_name: "Camille".to_string(),
                last_name: "Martin".to_string(),
            };
            Some(report)
        })
        .collect()
}

fn start() -> Result<Shell> {
    let config = match get_config_path() {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let data_dir = get_data_dir();
    observability::init_tracing(&config, &data_dir);

    let catalog_path = config.catalog_path(&data_dir);
    tracing::info!(catalog = ?catalog_path, "starting ecoreport shell");

    let mut worker = CatalogWorker::open(catalog_path)?;
    worker.seed_if_empty(&sample_reports())?;
    let favorites = FavoriteSet::from_reports(worker.favorites()?);

    let (tx, rx) = mpsc::channel();

    let worker_tx = tx.clone();
    let worker = spawn_worker(worker, move |payload| {
        let _ = worker_tx.send(Input::Worker(payload));
    })?;

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(Input::Command(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
            let _ = tx.send(Input::Closed);
        })?;

    Ok(Shell {
        view: View::List,
        controller: initialize(&config),
        favorites,
        signed_in: true,
        worker,
        rx,
        backlog: VecDeque::new(),
    })
}

fn main() {
    match start() {
        Ok(shell) => shell.run(),
        Err(e) => {
            eprintln!("ecoreport: {e}");
            std::process::exit(1);
        }
    }
}
