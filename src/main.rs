use clap::Parser;
use colored::Colorize;
use runway_sched::{EngineConfig, Flight, Scenario, ScheduleResult, Strategy};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::Tabled;
use tabled::settings::Style;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Override the scenario's runway count
    #[arg(short, long)]
    runways: Option<usize>,

    /// Log every placement and backtrack
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

#[derive(Tabled)]
struct FlightRow {
    #[tabled(rename = "Flight")]
    id: String,
    #[tabled(rename = "Arrival")]
    arrival: u64,
    #[tabled(rename = "Duration")]
    duration: u64,
    #[tabled(rename = "Priority")]
    priority: String,
}

impl From<&Flight> for FlightRow {
    fn from(f: &Flight) -> Self {
        FlightRow {
            id: f.id.to_string(),
            arrival: f.arrival.0,
            duration: f.duration,
            priority: f.priority.map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct AssignmentRow {
    #[tabled(rename = "Flight")]
    flight: String,
    #[tabled(rename = "Runway")]
    runway: usize,
    #[tabled(rename = "Start")]
    start: u64,
    #[tabled(rename = "End")]
    end: u64,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Completion")]
    completion: String,
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let Ok(mut pager) = pager else {
        println!("{}", content);
        return;
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let count = rows.len();
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if count > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn print_result(result: &ScheduleResult) {
    print_table(
        result
            .assignments
            .iter()
            .map(|a| AssignmentRow {
                flight: a.flight_id.to_string(),
                runway: a.runway.0,
                start: a.start.0,
                end: a.end.0,
                priority: a.priority.map(|p| p.to_string()).unwrap_or_default(),
                completion: a.completion_time.map(|t| t.to_string()).unwrap_or_default(),
            })
            .collect(),
    );
    match result.aggregate {
        Some(total) => println!("Minimum total completion time: {}", total.to_string().bold()),
        None => println!("Makespan: {}", result.makespan().to_string().bold()),
    }
}

fn run(strategy: Strategy, flights: &[Flight], config: &EngineConfig) {
    let outcome = match strategy {
        Strategy::MinCompletion => {
            // the single-queue model needs arrival order
            let mut sorted = flights.to_vec();
            sorted.sort_by_key(|f| f.arrival);
            strategy.run(&sorted, config)
        }
        _ => strategy.run(flights, config),
    };
    match outcome {
        Ok(result) => print_result(&result),
        Err(e) => println!("{}", format!("{}: {}", strategy, e).red()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let scenario = Scenario::load_from_file(&args.scenario)?;
    let mut config = scenario.config();
    if let Some(runways) = args.runways {
        config.runways = runways;
    }
    println!(
        "Tower online. Loaded {} flights for {} runways from {}",
        scenario.flights.len(),
        config.runways,
        args.scenario.display()
    );

    let rl_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "search", "dp", "priority", "runways", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => print_table(scenario.flights.iter().map(FlightRow::from).collect()),
                    "search" | "bt" => run(Strategy::Search, &scenario.flights, &config),
                    "dp" => run(Strategy::MinCompletion, &scenario.flights, &config),
                    "priority" | "prio" => run(Strategy::PriorityGreedy, &scenario.flights, &config),
                    "runways" => match parts.get(1).map(|n| n.parse::<usize>()) {
                        Some(Ok(n)) if n > 0 => {
                            config.runways = n;
                            println!("Runway count set to {}.", n);
                        }
                        Some(_) => println!("{}", "Runway count must be a positive integer.".red()),
                        None => println!("Runways: {}", config.runways),
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls              - List the loaded flights");
                        println!("  search          - Backtracking search for a conflict-free assignment");
                        println!("  dp              - Minimum completion time on a single shared queue");
                        println!("  priority        - Priority order onto the least loaded runway");
                        println!("  runways [n]     - Show or set the runway count");
                        println!("  help / ?        - Show this help menu");
                        println!("  exit / quit     - Exit the console\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
