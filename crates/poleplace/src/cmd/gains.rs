use poleplace_session::DEFAULT_LOG_PATH;
use poleplace_transport::{DEFAULT_BACKLOG, DEFAULT_INTERFACE, DEFAULT_PORT};

use crate::cmd::GainsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_constants, OutputFormat};

pub fn run(args: GainsArgs, format: OutputFormat) -> CliResult<i32> {
    let controller = args.control.controller()?;

    let mut constants = vec![("q_gain", controller.quantizer().gain().to_string())];
    constants.extend(
        controller
            .gains()
            .iter()
            .map(|(name, value)| (name, value.to_string())),
    );
    constants.push(("resolution", controller.quantizer().resolution().to_string()));
    constants.push(("port", DEFAULT_PORT.to_string()));
    constants.push(("backlog", DEFAULT_BACKLOG.to_string()));
    constants.push(("interface", DEFAULT_INTERFACE.to_string()));
    constants.push(("log_file", DEFAULT_LOG_PATH.to_string()));

    print_constants(&constants, format);
    Ok(SUCCESS)
}
