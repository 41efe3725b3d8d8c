extern crate pretty_env_logger;

#[macro_use]
extern crate log;

use clap::Parser;
use clickmeans::{
    spawn_history_writer, ArgParser, AssignmentWriter, ChannelSink, ClusteringSession,
    HistoryWriter, LogSink, PointParser, SessionEvent, StepOutcome,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use indicatif::{ProgressBar, ProgressStyle};

type EventMsg = Option<SessionEvent>;

fn main() {
    let args = ArgParser::parse();
    let level = if args.io.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();

    info!("starting");
    info!("params: {:#?}", args);
    if !args.validate() {
        error!("please fix arguments");
        std::process::exit(1);
    }

    let points = match PointParser::new(&args.io.input).parse() {
        Ok(p) => p,
        Err(e) => {
            error!("unable to read --input: {}", e);
            std::process::exit(1);
        }
    };
    info!("loaded {} points", points.len());

    let mut session = ClusteringSession::new(&args.km);
    for p in points.iter() {
        session.add_point(p.x, p.y);
    }

    // The history file gets its own writer thread, otherwise events just go to the log
    let mut history: Option<(Sender<EventMsg>, _)> = None;
    if let Some(path) = &args.io.history {
        let writer = match HistoryWriter::create(path) {
            Ok(w) => w,
            Err(e) => {
                error!("unable to create --history: {}", e);
                std::process::exit(1);
            }
        };
        let (sender, receiver): (Sender<EventMsg>, Receiver<EventMsg>) = unbounded();
        session.set_sink(Some(Box::new(ChannelSink::new(sender.clone()))));
        history = Some((sender, spawn_history_writer(writer, receiver)));
    } else {
        session.set_sink(Some(Box::new(LogSink)));
    }

    if let Err(e) = session.request_k(args.io.k) {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("clustering");
    let sty = ProgressStyle::with_template(" [{elapsed_precise}] {bar:44.cyan/blue} > {pos} steps")
        .unwrap()
        .progress_chars("##-");
    let pbar = ProgressBar::new(args.km.max_steps as u64).with_style(sty);
    let mut outcome = StepOutcome::Iterating {
        drift: session.drift(),
    };
    for _ in 0..args.km.max_steps {
        outcome = match session.step() {
            Ok(o) => o,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        };
        pbar.inc(1);
        if outcome.is_converged() {
            break;
        }
    }
    pbar.finish_and_clear();

    match outcome {
        StepOutcome::Converged { drift } => info!(
            "converged after {} steps (drift {})",
            session.iterations(),
            drift
        ),
        StepOutcome::NoOp => info!("already converged"),
        StepOutcome::Iterating { drift } => warn!(
            "no convergence after {} steps (drift {}), consider a higher --max-steps",
            session.iterations(),
            drift
        ),
    }

    let mut writer = match AssignmentWriter::new(&args.io.out) {
        Ok(w) => w,
        Err(e) => {
            error!("unable to create --out: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = writer.write(session.points(), session.centroids()) {
        error!("failed writing assignments: {}", e);
        std::process::exit(1);
    }

    // No more events will be made
    session.set_sink(None);
    if let Some((sender, handle)) = history {
        sender.send(None).unwrap();
        match handle.join().unwrap() {
            Ok(n) => info!("wrote {} history events", n),
            Err(e) => error!("failed writing --history: {}", e),
        }
    }
    info!("finished");
}
