use poleplace_session::{CsvFileSink, Server, ServerConfig, SessionConfig};
use poleplace_transport::ListenerConfig;

use crate::cmd::{parse_duration, ServeArgs};
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{print_exchange, OutputFormat};

pub fn run(args: ServeArgs, format: OutputFormat) -> CliResult<i32> {
    let controller = args.control.controller()?;
    let config = server_config(&args)?;
    let sink = CsvFileSink::new(&args.log_file);

    let mut server =
        Server::bind(config, controller, sink).map_err(|err| session_error("setup failed", err))?;

    tracing::info!(
        addr = %server.local_addr(),
        log_file = %args.log_file.display(),
        q_gain = controller.quantizer().gain(),
        k_output = controller.gains().k_output,
        k_state = controller.gains().k_state,
        "control server ready"
    );

    let summary = server
        .serve(|exchange| print_exchange(exchange, format))
        .map_err(|err| session_error("accept failed", err))?;

    tracing::info!(
        accepted = summary.accepted,
        completed = summary.completed,
        failed = summary.failed,
        "control server stopped"
    );
    Ok(SUCCESS)
}

fn server_config(args: &ServeArgs) -> CliResult<ServerConfig> {
    // --any-interface wins over an interface set by flag or environment.
    let interface = if args.any_interface {
        None
    } else {
        Some(args.interface.clone())
    };

    Ok(ServerConfig {
        listener: ListenerConfig {
            address: args.bind,
            port: args.port,
            interface,
            backlog: args.backlog,
        },
        session: SessionConfig {
            read_timeout: args.read_timeout.as_deref().map(parse_duration).transpose()?,
            write_timeout: args.write_timeout.as_deref().map(parse_duration).transpose()?,
        },
        max_sessions: args.count,
    })
}
