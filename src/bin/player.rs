use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use wallrace::notation::{format_action, parse_action, parse_colour};
use wallrace::rng::{rng_for_game, seed_for_seat};
use wallrace::strategy::run_action;
use wallrace::{
    apply_action_checked, score, Clock, GameState, Layout, MctsConfig, Player, SearchLimits, Strategy, Tables,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyOpt {
    Random,
    Run,
    Expectiminimax,
    Mcts,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Expectiminimax: deepest iterative-deepening depth
    #[arg(long, default_value_t = SearchLimits::default().max_depth)]
    max_depth: u8,

    /// Expectiminimax: depths up to this one are never aborted
    #[arg(long, default_value_t = SearchLimits::default().min_depth)]
    min_depth: u8,

    /// Expectiminimax: node limit for abortable depths
    #[arg(long, default_value_t = SearchLimits::default().max_nodes)]
    max_nodes: u64,

    /// MCTS: iterations before the consistency check may stop the search
    #[arg(long, default_value_t = MctsConfig::default().min_iterations)]
    min_iterations: u32,

    /// MCTS: hard iteration cap
    #[arg(long, default_value_t = MctsConfig::default().max_iterations)]
    max_iterations: u32,

    /// MCTS: exploration constant
    #[arg(long, default_value_t = MctsConfig::default().uct_k)]
    uct_k: f64,

    /// Whole-game thinking time in seconds
    #[arg(long, default_value_t = wallrace::clock::DEFAULT_TOTAL_SECS)]
    total_secs: f64,
}

impl SearchArgs {
    fn limits(&self) -> SearchLimits {
        SearchLimits {
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
            ..SearchLimits::default()
        }
    }

    fn mcts(&self, seed: u64) -> MctsConfig {
        MctsConfig {
            min_iterations: self.min_iterations,
            max_iterations: self.max_iterations.max(self.min_iterations),
            uct_k: self.uct_k,
            seed,
            ..MctsConfig::default()
        }
    }

    fn build(&self, kind: StrategyOpt, seed: u64) -> Strategy {
        match kind {
            StrategyOpt::Random => Strategy::random(seed),
            StrategyOpt::Run => Strategy::Run,
            StrategyOpt::Expectiminimax => Strategy::expectiminimax(self.limits()),
            StrategyOpt::Mcts => Strategy::mcts(self.mcts(seed)),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one seat against the referee over stdin/stdout (default)
    Play,
    /// Replay actions up to `End` and print the best action for the seat to move
    Analyze,
    /// Play one default-policy game and report its length and score
    RandomGame,
    /// Solo running moves for Yellow from the start position
    Run,
    /// Pit a strategy against another over several games
    Compare {
        #[arg(long, default_value_t = 100)]
        games: u32,

        /// Strategy of the other three seats
        #[arg(long, value_enum, default_value_t = StrategyOpt::Expectiminimax)]
        opponent: StrategyOpt,

        /// Emit one JSON object per game
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "player", about = "Wall race player: reads the wall layout from stdin first")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Strategy for our seat
    #[arg(long, value_enum, default_value_t = StrategyOpt::Mcts, global = true)]
    strategy: StrategyOpt,

    /// RNG seed for the random policies
    #[arg(long, default_value_t = 0x00C0_FFEEu64, global = true)]
    seed: u64,

    #[command(flatten)]
    search: SearchArgs,
}

/// Whitespace-separated tokens from a line-oriented reader, pulled lazily so the
/// referee can wait for our answer.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self { reader, pending: VecDeque::new() }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line).context("reading stdin")? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    fn expect(&mut self, what: &str) -> Result<String> {
        self.next_token()?.with_context(|| format!("missing {what} on stdin"))
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .with(filter)
        .init();
}

fn load_tables<R: BufRead>(tokens: &mut Tokens<R>) -> Result<Tables> {
    let walls = tokens.expect("wall layout")?;
    info!(%walls, "[player] walls");
    let layout = Layout::parse(&walls).context("parsing wall layout")?;
    Ok(Tables::build(layout))
}

/// Apply an opponent action, falling back to the unchecked path if it does not validate.
fn apply_reported(tables: &Tables, state: &mut GameState, text: &str) -> Result<()> {
    let action = parse_action(text)?;
    match apply_action_checked(state, tables, &action) {
        Ok(next) => *state = next,
        Err(e) => {
            warn!(error = %e, action = text, "[player] applying unvalidated action");
            state.do_action(tables, &action);
        }
    }
    Ok(())
}

fn render(state: &GameState) -> String {
    let mut out = String::with_capacity(80);
    for cell in 0..64u8 {
        let ch = Player::ALL
            .into_iter()
            .find(|&p| state.mask(p) & (1u64 << cell) != 0)
            .map_or('.', |p| p.name().chars().next().unwrap_or('?'));
        out.push(ch);
        if cell % 8 == 7 {
            out.push('\n');
        }
    }
    out
}

fn play<R: BufRead>(cli: &Cli, tokens: &mut Tokens<R>) -> Result<()> {
    let tables = load_tables(tokens)?;
    let colour = tokens.expect("colour")?;
    let me = parse_colour(&colour)?;
    info!(colour = me.name(), "[player] seat");

    let mut strategy = cli.search.build(cli.strategy, seed_for_seat(cli.seed, 0, me as u8));
    let mut clock = Clock::new(cli.search.total_secs);
    let mut state = GameState::new();
    let stdout = io::stdout();

    loop {
        while state.player() != me {
            let Some(token) = tokens.next_token()? else { return Ok(()) };
            match token.as_str() {
                "Quit" => return Ok(()),
                "Move" => {
                    state.enable_solo_mode(me);
                    let mut out = stdout.lock();
                    for mv in run_action(&tables, &state) {
                        writeln!(out, "{mv}")?;
                    }
                    out.flush()?;
                    return Ok(());
                }
                text => {
                    debug!(action = text, "[player] opponent action");
                    apply_reported(&tables, &mut state, text)?;
                }
            }
        }

        let (action, report) = strategy.best_action(&tables, &state, &mut clock);
        debug!(report = %serde_json::to_string(&report)?, used = clock.used(), "[player] search report");
        state.do_action(&tables, &action);
        let mut out = stdout.lock();
        writeln!(out, "{}", format_action(&action))?;
        out.flush()?;
    }
}

fn analyze<R: BufRead>(cli: &Cli, tokens: &mut Tokens<R>) -> Result<()> {
    let tables = load_tables(tokens)?;
    let mut state = GameState::new();
    loop {
        let token = tokens.expect("`End`")?;
        if token == "End" {
            break;
        }
        apply_reported(&tables, &mut state, &token)?;
    }
    info!("[analyze] position, {} to move\n{}", state.player().name(), render(&state));

    let mut strategy = cli.search.build(cli.strategy, cli.seed);
    let mut clock = Clock::new(cli.search.total_secs);
    let (action, report) = strategy.best_action(&tables, &state, &mut clock);
    println!("{}", format_action(&action));
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

fn random_game<R: BufRead>(cli: &Cli, tokens: &mut Tokens<R>) -> Result<()> {
    let tables = load_tables(tokens)?;
    let mut rng = rng_for_game(cli.seed, 0, 0);
    let mut state = GameState::new();
    let mut moves = 0u32;
    while !state.end_game() {
        let player = state.player();
        let Some(mv) = state.random_move(&tables, &mut rng) else { break };
        debug!(player = player.name(), %mv, "[random-game] move");
        state.do_move(&tables, mv);
        moves += 1;
    }
    info!("[random-game] final position\n{}", render(&state));
    println!("moves-count={moves}");
    println!("turns={}", state.turns());
    println!("score={}", score(&state, &tables, Player::Yellow));
    Ok(())
}

fn run<R: BufRead>(tokens: &mut Tokens<R>) -> Result<()> {
    let tables = load_tables(tokens)?;
    let mut state = GameState::new();
    state.enable_solo_mode(Player::Yellow);
    let action = run_action(&tables, &state);
    let mut cost = 0u32;
    for &mv in &action {
        cost += u32::from(state.do_move(&tables, mv));
        println!("{mv}");
    }
    if !state.is_done(Player::Yellow) {
        bail!("running moves stopped short of the goal");
    }
    info!(cost, moves = action.len(), "[run] done");
    Ok(())
}

#[derive(Debug, Serialize)]
struct GameResult {
    game: u32,
    seat: Player,
    turns: u16,
    score: f64,
}

fn compare<R: BufRead>(cli: &Cli, tokens: &mut Tokens<R>, games: u32, opponent: StrategyOpt, json: bool) -> Result<()> {
    let tables = load_tables(tokens)?;
    if games == 0 {
        bail!("--games must be positive");
    }

    let pb = ProgressBar::new(u64::from(games));
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] compare {bar:40.cyan/blue} {pos}/{len} {msg}")
            .context("progress template")?
            .progress_chars("=>-"),
    );

    let mut total = 0.0;
    for game in 0..games {
        let seat = Player::from_index(game as usize);
        let mut strategies: Vec<Strategy> = Player::ALL
            .into_iter()
            .map(|p| {
                let kind = if p == seat { cli.strategy } else { opponent };
                cli.search.build(kind, seed_for_seat(cli.seed, u64::from(game), p as u8))
            })
            .collect();
        let mut clocks = [Clock::new(cli.search.total_secs); 4];

        let mut state = GameState::new();
        while !state.end_game() {
            let p = state.player().index();
            let (action, _) = strategies[p].best_action(&tables, &state, &mut clocks[p]);
            state.do_action(&tables, &action);
        }

        let result = GameResult {
            game,
            seat,
            turns: state.turns(),
            score: score(&state, &tables, seat).clamp(-10.0, 10.0),
        };
        total += result.score;
        pb.suspend(|| {
            if json {
                serde_json::to_string(&result).map(|line| println!("{line}"))
            } else {
                println!("score={}", result.score);
                Ok(())
            }
        })?;
        pb.set_message(format!("avg={:.3}", total / f64::from(game + 1)));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let average = total / f64::from(games);
    if json {
        println!("{}", serde_json::json!({ "average_score": average, "games": games }));
    } else {
        println!("average-score={average}");
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut tokens = Tokens::new(stdin.lock());

    match &cli.command {
        None | Some(Command::Play) => play(&cli, &mut tokens),
        Some(Command::Analyze) => analyze(&cli, &mut tokens),
        Some(Command::RandomGame) => random_game(&cli, &mut tokens),
        Some(Command::Run) => run(&mut tokens),
        Some(Command::Compare { games, opponent, json }) => compare(&cli, &mut tokens, *games, *opponent, *json),
    }
}
