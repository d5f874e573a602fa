//! presubmit-filter: decide which presubmits a pull request comment triggers.
//!
//! Reads a JSON request from stdin, writes a JSON answer to stdout.
//!
//! Flags:
//!   --available          list what can run instead of evaluating the comment
//!   --honor-ok-to-test   treat `/ok-to-test` like `/test all`

use std::io::Read;

use presubmit_filter::Result;
use presubmit_filter::config::Config;
use presubmit_filter::logging;
use presubmit_filter::request::TriggerRequest;

fn run(input: &str, config: &Config, available: bool) -> Result<String> {
    let request = TriggerRequest::from_json(input)?;
    let jobs = request.jobs(&config.presubmits)?;

    if available {
        let summary = request.available(&jobs)?;
        return Ok(serde_json::to_string(&summary)?);
    }

    let response = request.trigger(config.settings.honor_ok_to_test, &jobs)?;
    if config.settings.log_decisions {
        logging::log_decision(&request.body, &response.to_trigger);
    }
    Ok(serde_json::to_string(&response)?)
}

fn main() {
    let mut available = false;
    let mut honor_ok_to_test = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--available" => available = true,
            "--honor-ok-to-test" => honor_ok_to_test = true,
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(2);
            }
        }
    }

    let mut config = Config::load();
    if honor_ok_to_test {
        config.settings.honor_ok_to_test = true;
    }
    logging::init(config.settings.level());

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(1);
    }

    match run(&input, &config, available) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            log::error!("{e}");
            eprintln!("presubmit-filter: {e}");
            std::process::exit(1);
        }
    }
}
