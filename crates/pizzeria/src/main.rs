#![forbid(unsafe_code)]

use pizzeria::{AppConfig, OrderForm, logging};
use pizzeria_http::HttpSubmitter;
use pizzeria_runtime::{Program, ProgramConfig};
use std::io;
use std::sync::Arc;

fn main() -> io::Result<()> {
    let config = AppConfig::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    logging::init(&config)?;

    let submitter = HttpSubmitter::new(config.http_config()).map_err(io::Error::other)?;
    tracing::info!(endpoint = submitter.endpoint(), policy = ?config.topping_policy, "starting");

    let form = OrderForm::new(Arc::new(submitter), config.topping_policy);
    let program_config = ProgramConfig::default().with_alternate_screen(config.alternate_screen);
    let form = Program::new(form, program_config).run()?;

    if let Some(message) = form.state().outcome().success_message() {
        println!("{message}");
    }
    Ok(())
}
