use crate::cmd::ComputeArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_exchange, OutputFormat};

/// Runs the same step the server runs, starting from physical values.
pub fn run(args: ComputeArgs, format: OutputFormat) -> CliResult<i32> {
    let controller = args.control.controller()?;
    let exchange = controller.evaluate_values(args.vo, args.v1);
    tracing::debug!(
        request_vo = exchange.request.vo,
        request_v1 = exchange.request.v1,
        response = exchange.response.vi,
        "computed offline"
    );
    print_exchange(&exchange, format);
    Ok(SUCCESS)
}
