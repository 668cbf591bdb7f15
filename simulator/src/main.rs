use anyhow::Context;
use clap::Parser;
use generator::SweepGenerator;
use scenario::ScenarioConfig;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

mod generator;
mod scenario;

#[derive(Parser)]
#[command(author, version, about = "Emits synthetic sweep frames on the radar wire format")]
struct Args {
    /// Load a sweep scenario from YAML
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Serial device to write frames to; stdout when omitted
    #[arg(long)]
    port: Option<String>,
    #[arg(long, default_value_t = 9600)]
    baud: u32,
    /// Number of frames to emit; 0 runs until interrupted
    #[arg(long, default_value_t = 0)]
    frames: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = if let Some(path) = args.scenario {
        ScenarioConfig::load(path)?
    } else {
        ScenarioConfig::default()
    };
    let interval = Duration::from_millis(scenario.interval_ms);

    let mut sink: Box<dyn Write> = match args.port.as_deref() {
        Some(path) => {
            let port = serialport::new(path, args.baud)
                .timeout(Duration::from_millis(100))
                .open()
                .with_context(|| format!("opening serial port {path}"))?;
            log::info!("writing frames to {path} at {} baud", args.baud);
            Box::new(port)
        }
        None => Box::new(std::io::stdout()),
    };

    let mut generator = SweepGenerator::new(scenario);
    let mut emitted = 0u64;
    loop {
        let sample = generator.next_sample();
        sink.write_all(sample.to_wire().as_bytes())
            .context("writing frame")?;
        sink.flush().context("flushing frame")?;

        emitted += 1;
        if args.frames > 0 && emitted >= args.frames {
            break;
        }
        thread::sleep(interval);
    }

    log::info!("emitted {emitted} frames");
    Ok(())
}
