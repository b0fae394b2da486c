use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use queue_client::ClientHandle;
use queue_core::{update, Msg, QueueState};
use queue_logging::{queue_info, queue_warn};

use crate::commands::{self, AppCommand};
use crate::effects::EffectRunner;
use crate::render::{self, HELP};
use crate::settings::AppSettings;

/// How often the loop wakes up to collect client events.
const TICK: Duration = Duration::from_millis(75);

enum Input {
    Line(String),
    Closed,
}

pub fn run_app(config_path: &Path) -> anyhow::Result<()> {
    let settings = AppSettings::load(config_path)?;
    let client_settings = settings.client_settings()?;
    let client = ClientHandle::new(client_settings).context("starting http client")?;

    let listing = settings.listing();
    queue_info!(
        "Loaded {} queue entries from {:?}",
        listing.len(),
        config_path
    );
    let mut console = Console {
        state: QueueState::new(settings.queue_config(), listing),
        runner: EffectRunner::new(client),
    };

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::Closed);
    });

    println!("{HELP}");
    console.render_if_dirty();

    let mut input_open = true;
    loop {
        let next = if input_open {
            input_rx.recv_timeout(TICK)
        } else {
            thread::sleep(TICK);
            Err(mpsc::RecvTimeoutError::Timeout)
        };
        match next {
            Ok(Input::Line(line)) => {
                if console.handle_line(&line) == Flow::Quit {
                    break;
                }
            }
            Ok(Input::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => input_open = false,
            Err(mpsc::RecvTimeoutError::Timeout) => console.dispatch(Msg::Tick),
        }

        for msg in console.runner.drain() {
            console.dispatch(msg);
        }
        console.render_if_dirty();

        // With stdin gone, stay only until outstanding requests resolve.
        if !input_open && console.runner.pending_requests() == 0 {
            break;
        }
    }

    queue_info!("Console closed");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Console {
    state: QueueState,
    runner: EffectRunner,
}

impl Console {
    fn handle_line(&mut self, line: &str) -> Flow {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                println!("{err}");
                return Flow::Continue;
            }
        };

        match command {
            AppCommand::Click { entry_id, class } => {
                let Some(control) = self.state.control(entry_id, &class).cloned() else {
                    queue_warn!("No control {:?} on entry {}", class, entry_id);
                    println!("entry #{entry_id} has no `{class}` control");
                    return Flow::Continue;
                };
                self.dispatch(Msg::ControlClicked { entry_id, control });
            }
            AppCommand::List => self.print_view(),
            AppCommand::Help => println!("{HELP}"),
            AppCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for notice in self.runner.run(effects) {
            println!("{notice}");
        }
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            self.print_view();
        }
    }

    fn print_view(&self) {
        for line in render::render(&self.state.view()) {
            println!("{line}");
        }
    }
}
