use poleplace_codec::{Quantizer, Request};
use poleplace_session::exchange_with_timeout;

use crate::cmd::{parse_duration, SendArgs};
use crate::exit::{codec_error, session_error, CliResult, SUCCESS};
use crate::output::{print_reply, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let quantizer =
        Quantizer::new(args.q_gain).map_err(|err| codec_error("invalid constants", err))?;

    let request = Request::new(quantizer.quantize(args.vo), quantizer.quantize(args.v1));
    let response = exchange_with_timeout(args.addr, request, Some(timeout))
        .map_err(|err| session_error("exchange failed", err))?;

    print_reply(
        args.addr,
        [request.vo, request.v1],
        response.vi,
        quantizer.dequantize(response.vi),
        format,
    );
    Ok(SUCCESS)
}
