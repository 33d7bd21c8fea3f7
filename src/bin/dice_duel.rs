//! dice-duel: play the five-dice race to 101 in a terminal.
//!
//! The menu offers New Game, About and Quit. In a game:
//! - `r`      roll (unheld dice only after the first roll)
//! - `h N`    toggle hold on die N (1-5)
//! - `k`      keep the current total and pass to the AI
//! - `n`      new game
//! - `m`      back to the menu
//! - `a`      about
//! - `q`      quit

use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use std::thread;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use dice_duel::core::{DICE_COUNT, MAX_ROLLS, WIN_THRESHOLD};
use dice_duel::session::{ConfigError, Session, SessionConfig, SessionError, SessionEvent};
use dice_duel::{GameState, Side};

const ABOUT: &str = "\
Dice Duel

Race the computer to 101 points with five dice.
Each turn you may roll up to three times. After the first roll, hold any
dice you like before rolling again. Keep your score to add the sum of your
dice to your total. The AI then takes its turn.
When either side reaches 101 after the AI's turn, the game ends. You win
only if you reached 101 and are strictly ahead.";

fn usage() {
    println!(
        r#"dice-duel

USAGE:
    dice-duel [--seed S] [--ai-delay-ms MS]

OPTIONS:
    --seed S           RNG seed (default: entropy, or DICE_DUEL_SEED)
    --ai-delay-ms MS   Pause before the AI plays (default: 1000, or DICE_DUEL_AI_DELAY_MS)
"#
    );
}

fn parse_args(mut config: SessionConfig, args: &[String]) -> SessionConfig {
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            "--seed" => {
                config = config.with_seed(option_value(args, i));
                i += 2;
            }
            "--ai-delay-ms" => {
                config = config.with_ai_delay_ms(option_value(args, i));
                i += 2;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run `dice-duel --help` for usage.");
                process::exit(1);
            }
        }
    }
    config
}

fn option_value(args: &[String], i: usize) -> u64 {
    let Some(raw) = args.get(i + 1) else {
        eprintln!("Missing value for {}", args[i]);
        process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", args[i], raw);
        process::exit(1);
    })
}

/// What the player typed while a game is on screen.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Roll,
    Hold(usize),
    Keep,
    NewGame,
    Menu,
    About,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "r" | "roll" => Command::Roll,
        "h" | "hold" => {
            let n: usize = words.next()?.parse().ok()?;
            // 1-based on screen; 0 wraps to an out-of-range index the engine rejects
            Command::Hold(n.wrapping_sub(1))
        }
        "k" | "keep" => Command::Keep,
        "n" | "new" => Command::NewGame,
        "m" | "menu" => Command::Menu,
        "a" | "about" => Command::About,
        "q" | "quit" => Command::Quit,
        "?" | "help" => Command::Help,
        _ => return None,
    };
    Some(command)
}

fn render(state: &GameState) {
    println!();
    println!(
        "Round {}  |  You: {}  AI: {}  (first to {})",
        state.round, state.player.cumulative_score, state.ai.cumulative_score, WIN_THRESHOLD
    );
    if let Some(hand) = state.ai.last_hand {
        println!("AI last hand: {}  = {}", hand, state.ai.last_round_total);
    }

    let player = &state.player;
    let dice: Vec<String> = (0..DICE_COUNT)
        .map(|i| {
            if player.holds.contains(i) {
                format!("[{}]", player.hand[i])
            } else {
                format!(" {} ", player.hand[i])
            }
        })
        .collect();
    println!("Your dice:    {}  = {}", dice.join(" "), player.round_total());
    println!("              {}", (1..=DICE_COUNT).map(|n| format!(" {n} ")).collect::<Vec<_>>().join(" "));

    if state.is_over() {
        return;
    }
    if state.active_side == Side::Ai {
        println!("AI is thinking...");
    } else {
        println!("Rolls left: {} of {}", player.turn.rolls_left(), MAX_ROLLS);
    }
}

fn report(session: &mut Session) {
    for event in session.drain_events() {
        match event {
            SessionEvent::AiTurnResolved { turn } => {
                for (i, hand) in turn.hands.iter().enumerate() {
                    println!("AI roll {}: {}", i + 1, hand);
                }
                println!("AI keeps {}", turn.round_total());
            }
            SessionEvent::GameEnded { player_won, result } => {
                println!();
                println!("{}", if player_won { "You Win!" } else { "AI Wins!" });
                println!("Final score: You {}  AI {}", result.player_score, result.ai_score);
                println!("Type `n` to play again or `m` for the menu.");
            }
            SessionEvent::GameStarted
            | SessionEvent::AiTurnScheduled { .. }
            | SessionEvent::ReturnToMenu => {}
        }
    }
}

/// Block until the pending AI turn is due, then resolve it.
fn wait_for_ai(session: &mut Session) -> Result<(), SessionError> {
    while let Some(due) = session.ai_due_at() {
        let now = Instant::now();
        if now < due {
            thread::sleep(due - now);
        }
        session.tick(Instant::now())?;
    }
    Ok(())
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

fn play(session: &mut Session, lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<bool> {
    session.start_new_game();
    loop {
        report(session);
        if let Some(state) = session.state() {
            render(state);
        }
        prompt("> ")?;
        let Some(line) = lines.next() else {
            return Ok(false);
        };
        let line = line?;

        let now = Instant::now();
        let outcome = match parse_command(&line) {
            Some(Command::Roll) => session.roll(now).map(|_| ()),
            Some(Command::Hold(index)) => session.toggle_hold(index).map(|_| ()),
            Some(Command::Keep) => session.keep_score(now).map(|_| ()),
            Some(Command::NewGame) => {
                session.start_new_game();
                Ok(())
            }
            Some(Command::Menu) => {
                session.exit_to_menu();
                session.drain_events();
                return Ok(true);
            }
            Some(Command::About) => {
                println!("\n{ABOUT}");
                Ok(())
            }
            Some(Command::Quit) => return Ok(false),
            Some(Command::Help) | None => {
                println!("Commands: r = roll, h N = hold die N, k = keep, n = new game, m = menu, a = about, q = quit");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("Can't do that: {err}");
            continue;
        }
        if session.ai_due_at().is_some() {
            if let Some(state) = session.state() {
                render(state);
            }
            if let Err(err) = wait_for_ai(session) {
                println!("Can't do that: {err}");
            }
        }
    }
}

fn run(config: SessionConfig) -> io::Result<()> {
    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("Dice Duel");
        println!("  1) New Game");
        println!("  2) About");
        println!("  3) Quit");
        prompt("> ")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        match line?.trim() {
            "1" | "n" => {
                if !play(&mut session, &mut lines)? {
                    return Ok(());
                }
            }
            "2" | "a" => println!("\n{ABOUT}"),
            "3" | "q" => return Ok(()),
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig::from_env().unwrap_or_else(|err: ConfigError| {
        eprintln!("{err}");
        process::exit(1);
    });
    let args: Vec<String> = env::args().skip(1).collect();
    let config = parse_args(config, &args);

    if let Err(err) = run(config) {
        eprintln!("I/O error: {err}");
        process::exit(1);
    }
}
